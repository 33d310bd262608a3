use std::time::Duration;

use crate::error::{ErrorSeverity, GameError};

/// Irregular but recoverable endings of a turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAnomaly {
    /// The wave cap was reached with triggers still pending; the turn was forced to complete.
    #[error("chain reaction exceeded {cap} waves with {pending} triggers still pending")]
    ChainReactionCapExceeded { cap: u32, pending: usize },
}

impl GameError for TurnAnomaly {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ChainReactionCapExceeded { .. } => "TURN_CHAIN_CAP_EXCEEDED",
        }
    }
}

/// Summary handed to listeners once a turn has fully resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Chain-reaction waves that fired at least one trigger.
    pub waves: u32,
    pub triggers_fired: u32,
    pub anomaly: Option<TurnAnomaly>,
    /// Simulated time between `start_turn` and completion.
    pub elapsed: Duration,
}

impl TurnReport {
    pub fn hit_wave_cap(&self) -> bool {
        matches!(
            self.anomaly,
            Some(TurnAnomaly::ChainReactionCapExceeded { .. })
        )
    }
}

/// Receives turn completion, strictly after the last wave has settled.
pub trait TurnListener {
    fn on_turn_completed(&mut self, report: &TurnReport);
}
