//! Match-level bookkeeping: actor registry, ammunition, turns, and outcome.
mod match_state;
mod registry;

pub use match_state::{LoseReason, MatchEvent, MatchOutcome, MatchState};
pub use registry::{ActorRegistry, RegistryNotice};
