//! Errors surfaced by the level orchestrator.
use hexfall_core::{ErrorSeverity, GameError, GridError, LevelValidationError};
use thiserror::Error;

/// Failures building or resetting a level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("invalid level definition: {0}")]
    Invalid(#[from] LevelValidationError),

    #[error("failed to place actor: {0}")]
    Placement(#[from] GridError),
}

impl GameError for LevelError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            LevelError::Invalid(err) => err.severity(),
            LevelError::Placement(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            LevelError::Invalid(err) => err.error_code(),
            LevelError::Placement(err) => err.error_code(),
        }
    }
}

/// Reasons a fire action is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FireError {
    #[error("the match has already ended")]
    MatchEnded,

    #[error("a turn is still resolving")]
    TurnInProgress,

    #[error("firing is disabled")]
    FiringDisabled,

    #[error("no ammunition left")]
    OutOfAmmunition,

    #[error("no living protagonist to fire from")]
    NoShooter,

    #[error("shot direction must be non-zero")]
    ZeroDirection,
}

impl GameError for FireError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            FireError::MatchEnded => "FIRE_MATCH_ENDED",
            FireError::TurnInProgress => "FIRE_TURN_IN_PROGRESS",
            FireError::FiringDisabled => "FIRE_DISABLED",
            FireError::OutOfAmmunition => "FIRE_OUT_OF_AMMUNITION",
            FireError::NoShooter => "FIRE_NO_SHOOTER",
            FireError::ZeroDirection => "FIRE_ZERO_DIRECTION",
        }
    }
}
