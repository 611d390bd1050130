pub mod json_api;

pub use json_api::{
    advance_bracket_json, order_standings_json, AdvanceRequest, AdvanceResponse,
    ManualRankEntry, StandingsRequest, StandingsResponse, TableRow,
};
