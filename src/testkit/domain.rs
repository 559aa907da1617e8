//! Builders for domain fixtures.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    AmericanOdds, BaseballStats, BasketballStats, BetType, FootballStats, Game, GameId,
    GameStatus, SlipItem, SoccerStats, Sport, TeamStats, User, UserId,
};

/// Deterministic RNG for reproducible drift and cash-out tests.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A user with the given balance and a unique username.
#[must_use]
pub fn user_with_balance(balance: Decimal) -> User {
    let id = UserId::generate();
    let username = format!("bettor-{}", id.as_str());
    User {
        id,
        username,
        balance,
    }
}

/// An in-play game for `sport` with sport-appropriate stats on both sides.
#[must_use]
pub fn live_game(sport: Sport) -> Game {
    let mut game = upcoming_game(sport);
    game.status = GameStatus::Live;
    game.quarter = Some("2".into());
    game.time_remaining = Some("9:30".into());
    let (home_score, away_score) = match sport {
        Sport::Basketball => (62, 58),
        Sport::Football => (17, 13),
        Sport::Baseball => (3, 2),
        Sport::Soccer => (1, 0),
    };
    game.home_score = home_score;
    game.away_score = away_score;
    game.home_stats = Some(team_stats(sport));
    game.away_stats = Some(team_stats(sport));
    game
}

/// A scheduled game for `sport` with no scores or stats yet.
#[must_use]
pub fn upcoming_game(sport: Sport) -> Game {
    Game {
        id: GameId::generate(),
        sport,
        league: match sport {
            Sport::Football => "NFL".into(),
            Sport::Basketball => "NBA".into(),
            Sport::Baseball => "MLB".into(),
            Sport::Soccer => "Premier League".into(),
        },
        home_team: "Home".into(),
        away_team: "Away".into(),
        home_score: 0,
        away_score: 0,
        status: GameStatus::Upcoming,
        quarter: None,
        time_remaining: None,
        start_time: Utc::now() + Duration::hours(2),
        home_moneyline: AmericanOdds::clamped(-120),
        away_moneyline: AmericanOdds::clamped(105),
        spread: dec!(-2.5),
        spread_odds: AmericanOdds::clamped(-110),
        total_points: dec!(45.5),
        over_odds: AmericanOdds::clamped(-110),
        under_odds: AmericanOdds::clamped(-110),
        home_stats: None,
        away_stats: None,
        featured: false,
    }
}

/// A home-moneyline slip entry against `game` at the given line.
#[must_use]
pub fn slip_item(game: &Game, odds: i32) -> SlipItem {
    SlipItem {
        game_id: game.id.clone(),
        home_team: game.home_team.clone(),
        away_team: game.away_team.clone(),
        bet_type: BetType::Moneyline,
        selection: "home".into(),
        display_selection: format!("{} ML", game.home_team),
        odds: AmericanOdds::clamped(odds),
        stake: Decimal::ZERO,
    }
}

fn team_stats(sport: Sport) -> TeamStats {
    match sport {
        Sport::Soccer => TeamStats::Soccer(SoccerStats {
            possession: Some(52),
            total_shots: Some(8),
            shots_on_target: Some(4),
            fouls: Some(5),
            corners: Some(3),
            yellow_cards: Some(1),
            red_cards: Some(0),
        }),
        Sport::Football => TeamStats::Football(FootballStats {
            passing_yards: Some(150),
            rushing_yards: Some(55),
            turnovers: Some(1),
            time_of_possession: Some("14:05".into()),
        }),
        Sport::Basketball => TeamStats::Basketball(BasketballStats {
            rebounds: Some(24),
            assists: Some(15),
            steals: Some(4),
            blocks: Some(2),
            field_goal_pct: Some(45.5),
            three_point_pct: Some(35.0),
        }),
        Sport::Baseball => TeamStats::Baseball(BaseballStats {
            hits: Some(6),
            errors: Some(0),
            strikeouts: Some(5),
            walks: Some(2),
        }),
    }
}
