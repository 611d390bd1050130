//! # league_core - Standings & Playoff Bracket Engine
//!
//! This library computes a deterministic, fully tie-broken league table from
//! a stream of recorded match results, and advances a fixed single-elimination
//! playoff bracket. It is the computation core of a league-management app;
//! persistence, auth and UI live behind the repository/settings traits.
//!
//! ## Guarantees
//! - Recomputation is a full replace and is idempotent
//! - The final table is always a strict total order (ties fully broken)
//! - Manually ranked teams land at exactly their declared position
//! - Bracket advancement is idempotent per source match and refuses to
//!   guess a winner from ambiguous data

pub mod api;
pub mod error;
pub mod models;
pub mod playoff;
pub mod repository;
pub mod service;
pub mod standings;

// Re-export the JSON API surface
pub use api::{
    advance_bracket_json, order_standings_json, AdvanceRequest, AdvanceResponse,
    StandingsRequest, StandingsResponse,
};
pub use error::{LeagueError, Result};

// Re-export the data model
pub use models::{
    BracketSlot, MatchOutcome, MatchRecord, PlayoffMatch, PlayoffRound, PointsPolicy,
    RankingMode, ScoreLine, SeasonId, Side, Standing, TeamId, TeamRef,
};

// Re-export the computation core and its boundaries
pub use playoff::{advance, advancement_target, apply_slot_update, initialize_bracket, SlotUpdate};
pub use repository::{InMemoryLeague, MatchRepository, SettingsProvider};
pub use service::LeagueService;
pub use standings::{
    apply_manual_ranks, distinct_teams, order, order_with_outcome, recompute, recompute_all,
    TiebreakOutcome,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn team(id: &str) -> TeamRef {
        TeamRef::new(id, id.to_uppercase())
    }

    fn played(n: u32, home: &str, away: &str, score: (u32, u32)) -> MatchRecord {
        MatchRecord {
            id: format!("m{n}"),
            season: "2025-26".to_string(),
            home_team: team(home),
            away_team: team(away),
            score: Some(ScoreLine::new(score.0, score.1)),
            is_completed: true,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        }
    }

    // End-to-end through the typed surface: aggregation, tie-break and
    // overlay composed the way an embedding app would call them.
    #[test]
    fn full_table_pipeline() {
        let matches = vec![
            played(1, "a", "b", (3, 1)),
            played(2, "a", "c", (2, 0)),
            played(3, "b", "c", (1, 0)),
        ];
        let season = "2025-26".to_string();
        let policy = PointsPolicy::classic();
        let teams = standings::distinct_teams(&season, &matches);

        let rows = recompute_all(&teams, &season, &matches, &policy);
        let table = apply_manual_ranks(order(&rows, &matches, &policy));

        let ids: Vec<&str> = table.iter().map(|s| s.team.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(table[0].points, 6);
        assert_eq!((table[0].goals_for, table[0].goals_against), (5, 1));
        assert_eq!(table[1].points, 3);
        assert_eq!(table[2].points, 0);
    }

    // Determinism across the JSON boundary: byte-identical responses for
    // identical requests, including a circular tie resolved by input order.
    #[test]
    fn json_surface_is_deterministic() {
        let request = json!({
            "schema_version": 1,
            "season": "2025-26",
            "policy": { "win": 3, "draw": 1, "loss": 0 },
            "matches": [
                {
                    "id": "m1", "season": "2025-26",
                    "home_team": { "id": "a", "name": "A" },
                    "away_team": { "id": "b", "name": "B" },
                    "score": { "home": 1, "away": 0 },
                    "is_completed": true, "date": "2025-09-01"
                },
                {
                    "id": "m2", "season": "2025-26",
                    "home_team": { "id": "b", "name": "B" },
                    "away_team": { "id": "c", "name": "C" },
                    "score": { "home": 1, "away": 0 },
                    "is_completed": true, "date": "2025-09-08"
                },
                {
                    "id": "m3", "season": "2025-26",
                    "home_team": { "id": "c", "name": "C" },
                    "away_team": { "id": "a", "name": "A" },
                    "score": { "home": 1, "away": 0 },
                    "is_completed": true, "date": "2025-09-15"
                },
            ]
        })
        .to_string();

        let first = order_standings_json(&request).unwrap();
        let second = order_standings_json(&request).unwrap();
        assert_eq!(first, second, "same request must produce the same response");

        let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed["arbitrary_order_used"], true);
        let table = parsed["table"].as_array().unwrap();
        // Fully symmetric cycle: stable input order (team id order from the
        // deterministic recompute) is the documented resolution.
        assert_eq!(table[0]["team"]["id"], "a");
        assert_eq!(table[1]["team"]["id"], "b");
        assert_eq!(table[2]["team"]["id"], "c");
    }

    #[test]
    fn schema_version_constant_matches_the_api() {
        let request = json!({
            "schema_version": SCHEMA_VERSION,
            "season": "2025-26",
            "policy": { "win": 3, "draw": 1, "loss": 0 },
            "matches": []
        });
        let response = order_standings_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["schema_version"], SCHEMA_VERSION);
    }
}
