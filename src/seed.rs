//! Fixture games and the demo account.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::domain::{
    AmericanOdds, BaseballStats, BasketballStats, FootballStats, Game, GameId, GameStatus,
    SoccerStats, Sport, TeamStats,
};
use crate::store::Storage;

fn line(value: i32) -> AmericanOdds {
    AmericanOdds::clamped(value)
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    sport: Sport,
    league: &str,
    home_team: &str,
    away_team: &str,
    home_ml: i32,
    away_ml: i32,
    spread: Decimal,
    total_points: Decimal,
    starts_in_hours: i64,
) -> Game {
    Game {
        id: GameId::generate(),
        sport,
        league: league.into(),
        home_team: home_team.into(),
        away_team: away_team.into(),
        home_score: 0,
        away_score: 0,
        status: GameStatus::Upcoming,
        quarter: None,
        time_remaining: None,
        start_time: Utc::now() + Duration::hours(starts_in_hours),
        home_moneyline: line(home_ml),
        away_moneyline: line(away_ml),
        spread,
        spread_odds: line(-110),
        total_points,
        over_odds: line(-110),
        under_odds: line(-110),
        home_stats: None,
        away_stats: None,
        featured: false,
    }
}

fn fixture_games() -> Vec<Game> {
    let mut lakers = fixture(
        Sport::Basketball,
        "NBA",
        "Lakers",
        "Celtics",
        -115,
        105,
        dec!(-3.5),
        dec!(219.5),
        -1,
    );
    lakers.status = GameStatus::Live;
    lakers.featured = true;
    lakers.home_score = 81;
    lakers.away_score = 78;
    lakers.quarter = Some("Q3".into());
    lakers.time_remaining = Some("4:21".into());
    lakers.home_stats = Some(TeamStats::Basketball(BasketballStats {
        rebounds: Some(31),
        assists: Some(19),
        steals: Some(5),
        blocks: Some(3),
        field_goal_pct: Some(47.5),
        three_point_pct: Some(36.8),
    }));
    lakers.away_stats = Some(TeamStats::Basketball(BasketballStats {
        rebounds: Some(28),
        assists: Some(17),
        steals: Some(4),
        blocks: Some(2),
        field_goal_pct: Some(44.2),
        three_point_pct: Some(33.1),
    }));

    let warriors = fixture(
        Sport::Basketball,
        "NBA",
        "Warriors",
        "Suns",
        -130,
        110,
        dec!(-2.5),
        dec!(226.5),
        2,
    );

    let mut chiefs = fixture(
        Sport::Football,
        "NFL",
        "Chiefs",
        "Bills",
        -135,
        115,
        dec!(-3),
        dec!(48.5),
        -1,
    );
    chiefs.status = GameStatus::Live;
    chiefs.featured = true;
    chiefs.home_score = 14;
    chiefs.away_score = 10;
    chiefs.quarter = Some("Q2".into());
    chiefs.time_remaining = Some("8:45".into());
    chiefs.home_stats = Some(TeamStats::Football(FootballStats {
        passing_yards: Some(185),
        rushing_yards: Some(62),
        turnovers: Some(0),
        time_of_possession: Some("16:12".into()),
    }));
    chiefs.away_stats = Some(TeamStats::Football(FootballStats {
        passing_yards: Some(142),
        rushing_yards: Some(58),
        turnovers: Some(1),
        time_of_possession: Some("13:48".into()),
    }));

    let eagles = fixture(
        Sport::Football,
        "NFL",
        "Eagles",
        "Cowboys",
        -170,
        145,
        dec!(-3.5),
        dec!(51.5),
        26,
    );

    let mut yankees = fixture(
        Sport::Baseball,
        "MLB",
        "Yankees",
        "Red Sox",
        -140,
        120,
        dec!(-1.5),
        dec!(8.5),
        -2,
    );
    yankees.status = GameStatus::Live;
    yankees.home_score = 4;
    yankees.away_score = 2;
    yankees.quarter = Some("Top 7".into());
    yankees.home_stats = Some(TeamStats::Baseball(BaseballStats {
        hits: Some(8),
        errors: Some(0),
        strikeouts: Some(6),
        walks: Some(2),
    }));
    yankees.away_stats = Some(TeamStats::Baseball(BaseballStats {
        hits: Some(5),
        errors: Some(1),
        strikeouts: Some(9),
        walks: Some(3),
    }));

    let mut arsenal = fixture(
        Sport::Soccer,
        "Premier League",
        "Arsenal",
        "Liverpool",
        145,
        195,
        dec!(-0.5),
        dec!(2.5),
        -1,
    );
    arsenal.status = GameStatus::Live;
    arsenal.featured = true;
    arsenal.home_score = 1;
    arsenal.away_score = 1;
    arsenal.quarter = Some("2H".into());
    arsenal.time_remaining = Some("67'".into());
    arsenal.home_stats = Some(TeamStats::Soccer(SoccerStats {
        possession: Some(55),
        total_shots: Some(12),
        shots_on_target: Some(5),
        fouls: Some(7),
        corners: Some(6),
        yellow_cards: Some(1),
        red_cards: Some(0),
    }));
    arsenal.away_stats = Some(TeamStats::Soccer(SoccerStats {
        possession: Some(45),
        total_shots: Some(9),
        shots_on_target: Some(3),
        fouls: Some(9),
        corners: Some(4),
        yellow_cards: Some(2),
        red_cards: Some(0),
    }));

    let madrid = fixture(
        Sport::Soccer,
        "La Liga",
        "Real Madrid",
        "Barcelona",
        120,
        220,
        dec!(-0.5),
        dec!(3.5),
        3,
    );

    let mut dodgers = fixture(
        Sport::Baseball,
        "MLB",
        "Dodgers",
        "Giants",
        -150,
        130,
        dec!(-1.5),
        dec!(9.5),
        -6,
    );
    dodgers.status = GameStatus::Final;
    dodgers.home_score = 5;
    dodgers.away_score = 3;
    dodgers.quarter = Some("Final".into());

    vec![
        lakers, warriors, chiefs, eagles, yankees, arsenal, madrid, dodgers,
    ]
}

/// Seed the store with the bundled fixture games.
///
/// Idempotent: a store that already holds games is left alone. Returns the
/// number of games created.
pub async fn seed_games(store: &dyn Storage) -> usize {
    if !store.games().await.is_empty() {
        debug!("Store already seeded");
        return 0;
    }
    let games = fixture_games();
    let count = games.len();
    for game in games {
        store.create_game(game).await;
    }
    count
}
