use thiserror::Error;

use crate::models::PlayoffRound;

#[derive(Error, Debug)]
pub enum LeagueError {
    /// A playoff match ended level with no (or a level) penalty shootout.
    /// Advancing on a guess would corrupt the next round, so this is the
    /// one anomaly that surfaces as a hard error.
    #[error("ambiguous winner in playoff match {match_id}: scores level and no deciding shootout recorded")]
    AmbiguousPlayoffWinner { match_id: String },

    #[error("playoff match {match_id} is not completed")]
    MatchNotCompleted { match_id: String },

    #[error("playoff match {match_id} has no recorded score")]
    MissingScore { match_id: String },

    #[error("playoff match {match_id} is missing a team slot")]
    IncompleteBracketSource { match_id: String },

    #[error("unknown playoff match: {match_id}")]
    UnknownPlayoffMatch { match_id: String },

    #[error("the {round} round has no next round to advance into")]
    NoNextRound { round: PlayoffRound },

    #[error("bracket target {round} match {match_number} is missing")]
    MissingBracketTarget { round: PlayoffRound, match_number: u8 },

    #[error("bracket for season {season} is not initialized")]
    BracketNotInitialized { season: String },

    #[error("unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeagueError {
    /// Whether the caller can fix the condition by re-entering data and
    /// retrying, as opposed to a structural problem with the bracket itself.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LeagueError::AmbiguousPlayoffWinner { .. } => true,
            LeagueError::MatchNotCompleted { .. } => true,
            LeagueError::MissingScore { .. } => true,
            LeagueError::IncompleteBracketSource { .. } => true,
            LeagueError::UnknownPlayoffMatch { .. } => false,
            LeagueError::NoNextRound { .. } => false,
            LeagueError::MissingBracketTarget { .. } => false,
            LeagueError::BracketNotInitialized { .. } => true,
            LeagueError::SchemaVersion { .. } => false,
            LeagueError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
