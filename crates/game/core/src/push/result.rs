use arrayvec::ArrayVec;

use crate::GameConfig;
use crate::actor::ActorId;
use crate::hex::HexCoord;

/// Path storage sized to the compile-time step bound.
pub type PushPath = ArrayVec<HexCoord, { GameConfig::MAX_PUSH_STEPS }>;

/// How a push ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PushOutcome {
    /// Moved at least one cell, then ran into something.
    StoppedByObstacle,
    /// Used every allowed step without being blocked.
    ReachedFinalPosition,
    /// Left the playable area; the pushed actor is removed.
    DestroyedAtBoundary,
    /// Blocked on the very first step (or given no direction).
    NoMovement,
}

/// Hex-by-hex result of one displacement request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PushResult {
    /// Cells entered, in order. Never contains the start or an out-of-bounds cell.
    pub path: PushPath,
    /// Cell the push started from.
    pub start: HexCoord,
    /// Last cell the actor legitimately occupies.
    pub final_position: HexCoord,
    pub outcome: PushOutcome,
    /// What stopped the push, when something did.
    pub obstacle: Option<ActorId>,
    /// The out-of-bounds cell the actor was pushed into.
    pub exit: Option<HexCoord>,
}

impl PushResult {
    pub fn steps(&self) -> usize {
        self.path.len()
    }

    pub fn moved(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.outcome == PushOutcome::DestroyedAtBoundary
    }
}
