//! Hex algebra and grid occupancy errors.

use crate::actor::ActorId;
use crate::error::{ErrorSeverity, GameError};

use super::HexCoord;

/// Errors raised by coordinate conversion.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HexError {
    /// Rounding produced cube components that do not sum to zero.
    #[error("fractional coordinate ({q}, {r}) did not round to a valid hex")]
    InvalidCoordinate { q: f32, r: f32 },
}

impl GameError for HexError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinate { .. } => "HEX_INVALID_COORDINATE",
        }
    }
}

/// Errors raised when mutating grid occupancy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell {0} is not part of the grid")]
    OutsideGrid(HexCoord),

    #[error("cell {cell} is already occupied by {occupant}")]
    Occupied { cell: HexCoord, occupant: ActorId },

    #[error("actor {actor} does not occupy cell {cell}")]
    NotOccupant { cell: HexCoord, actor: ActorId },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutsideGrid(_) | Self::Occupied { .. } => ErrorSeverity::Validation,
            Self::NotOccupant { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutsideGrid(_) => "GRID_OUTSIDE",
            Self::Occupied { .. } => "GRID_OCCUPIED",
            Self::NotOccupant { .. } => "GRID_NOT_OCCUPANT",
        }
    }
}
