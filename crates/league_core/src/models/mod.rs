pub mod match_record;
pub mod playoff;
pub mod policy;
pub mod standing;


pub use match_record::{MatchOutcome, MatchRecord, ScoreLine, Side, TeamRef};
pub use playoff::{BracketSlot, PlayoffMatch, PlayoffRound};
pub use policy::PointsPolicy;
pub use standing::{RankingMode, Standing};

/// Opaque team identifier, as issued by the external team registry.
pub type TeamId = String;

/// Season identifier (e.g. "2025-26"). The core never interprets its shape.
pub type SeasonId = String;
