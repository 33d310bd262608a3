use hexfall_core::{HexCoord, MatchEvent, MatchOutcome, TurnReport};
use serde::Serialize;

/// Everything a headless session did, in play order.
#[derive(Debug, Default, Serialize)]
pub struct SessionSummary {
    pub level: String,
    pub outcome: Option<MatchOutcome>,
    pub turns_played: u32,
    pub ammunition_remaining: u32,
    pub turns: Vec<TurnSummary>,
    /// Match events observed while playing.
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Serialize)]
pub struct TurnSummary {
    pub turn: u32,
    pub target: HexCoord,
    /// `None` when the turn ran out of ticks before settling.
    pub report: Option<TurnReport>,
}
