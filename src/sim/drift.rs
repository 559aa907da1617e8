//! Randomized per-tick deltas for live games.

use rand::Rng;

use crate::domain::{
    BaseballStats, BasketballStats, FootballStats, Game, GameUpdate, SoccerStats, Sport,
    TeamStats,
};

/// Probability a live game scores on a tick.
const SCORE_PROBABILITY: f64 = 0.15;
/// Probability the in-play stats drift on a tick.
const STATS_PROBABILITY: f64 = 0.3;
/// Moneyline shifts of magnitude at or below this are discarded as noise.
const ODDS_SHIFT_DEADBAND: i32 = 3;
/// Scoring plays available to a football drive.
const FOOTBALL_SCORES: [u32; 3] = [3, 6, 7];

/// Roll one tick's worth of deltas for `game`.
///
/// Returns `None` when nothing observable changed; only fields that actually
/// moved are present in the delta.
pub fn drift_game<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<GameUpdate> {
    let mut update = GameUpdate::default();

    if rng.gen_bool(SCORE_PROBABILITY) {
        let points = score_points(game.sport, rng);
        if rng.gen_bool(0.5) {
            update.home_score = Some(game.home_score + points);
        } else {
            update.away_score = Some(game.away_score + points);
        }
    }

    let shift: i32 = rng.gen_range(-8..=8);
    if shift.abs() > ODDS_SHIFT_DEADBAND {
        // Zero-sum: one side's line moves opposite the other's, then each
        // side clamps out of the pick'em band independently.
        let home = game.home_moneyline.shifted(shift);
        if home != game.home_moneyline {
            update.home_moneyline = Some(home);
        }
        let away = game.away_moneyline.shifted(-shift);
        if away != game.away_moneyline {
            update.away_moneyline = Some(away);
        }
    }

    if rng.gen_bool(STATS_PROBABILITY) {
        // Each side drifts from its own snapshot.
        if let Some(stats) = &game.home_stats {
            let next = drift_stats(stats, rng);
            if next != *stats {
                update.home_stats = Some(next);
            }
        }
        if let Some(stats) = &game.away_stats {
            let next = drift_stats(stats, rng);
            if next != *stats {
                update.away_stats = Some(next);
            }
        }
    }

    (!update.is_empty()).then_some(update)
}

fn score_points<R: Rng + ?Sized>(sport: Sport, rng: &mut R) -> u32 {
    match sport {
        Sport::Basketball => rng.gen_range(1..=3),
        Sport::Football => FOOTBALL_SCORES[rng.gen_range(0..FOOTBALL_SCORES.len())],
        _ => 1,
    }
}

fn drift_stats<R: Rng + ?Sized>(stats: &TeamStats, rng: &mut R) -> TeamStats {
    match stats {
        TeamStats::Soccer(s) => TeamStats::Soccer(drift_soccer(s, rng)),
        TeamStats::Football(s) => TeamStats::Football(drift_football(s, rng)),
        TeamStats::Basketball(s) => TeamStats::Basketball(drift_basketball(s, rng)),
        TeamStats::Baseball(s) => TeamStats::Baseball(drift_baseball(s, rng)),
    }
}

fn drift_soccer<R: Rng + ?Sized>(stats: &SoccerStats, rng: &mut R) -> SoccerStats {
    let mut next = stats.clone();
    if let Some(possession) = next.possession {
        let shifted = i64::from(possession) + rng.gen_range(-2i64..=2);
        next.possession = Some(shifted.clamp(30, 70) as u32);
    }
    if let Some(shots) = next.total_shots {
        next.total_shots = Some(shots + u32::from(rng.gen_bool(0.3)));
    }
    if let (Some(on_target), Some(total)) = (next.shots_on_target, next.total_shots) {
        // On-target shots can never outnumber total shots.
        let bumped = on_target + u32::from(rng.gen_bool(0.2));
        next.shots_on_target = Some(bumped.min(total));
    }
    if let Some(fouls) = next.fouls {
        next.fouls = Some(fouls + u32::from(rng.gen_bool(0.2)));
    }
    if let Some(corners) = next.corners {
        next.corners = Some(corners + u32::from(rng.gen_bool(0.1)));
    }
    next
}

fn drift_football<R: Rng + ?Sized>(stats: &FootballStats, rng: &mut R) -> FootballStats {
    let mut next = stats.clone();
    if let Some(yards) = next.passing_yards {
        next.passing_yards = Some(yards + rng.gen_range(0..=15));
    }
    if let Some(yards) = next.rushing_yards {
        next.rushing_yards = Some(yards + rng.gen_range(0..=8));
    }
    if let Some(turnovers) = next.turnovers {
        next.turnovers = Some(turnovers + u32::from(rng.gen_bool(0.05)));
    }
    next
}

fn drift_basketball<R: Rng + ?Sized>(stats: &BasketballStats, rng: &mut R) -> BasketballStats {
    let mut next = stats.clone();
    if let Some(rebounds) = next.rebounds {
        next.rebounds = Some(rebounds + u32::from(rng.gen_bool(0.4)));
    }
    if let Some(assists) = next.assists {
        next.assists = Some(assists + u32::from(rng.gen_bool(0.4)));
    }
    if let Some(steals) = next.steals {
        next.steals = Some(steals + u32::from(rng.gen_bool(0.1)));
    }
    if let Some(pct) = next.field_goal_pct {
        let shifted = pct + f64::from(rng.gen_range(-1i32..=1));
        next.field_goal_pct = Some((shifted * 10.0).round() / 10.0);
    }
    next
}

fn drift_baseball<R: Rng + ?Sized>(stats: &BaseballStats, rng: &mut R) -> BaseballStats {
    let mut next = stats.clone();
    if let Some(hits) = next.hits {
        next.hits = Some(hits + u32::from(rng.gen_bool(0.15)));
    }
    if let Some(strikeouts) = next.strikeouts {
        next.strikeouts = Some(strikeouts + u32::from(rng.gen_bool(0.2)));
    }
    if let Some(walks) = next.walks {
        next.walks = Some(walks + u32::from(rng.gen_bool(0.1)));
    }
    next
}
