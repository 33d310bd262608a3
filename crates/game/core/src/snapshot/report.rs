use crate::actor::{ActorId, ActorKind};
use crate::error::{ErrorSeverity, GameError};
use crate::hex::HexCoord;

/// Problems met while restoring. None of them abort the restore.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestoreAnomaly {
    /// The cell was never captured; it was left untouched.
    #[error("no snapshot recorded for cell {0}")]
    NoSnapshotForCell(HexCoord),

    /// Several live actors matched one record; the nearest was used.
    #[error("{candidates} live {kind:?} actors match a record in cell {cell}; chose {chosen}")]
    AmbiguousRestoreMatch {
        cell: HexCoord,
        kind: ActorKind,
        candidates: usize,
        chosen: ActorId,
    },

    /// The factory could not instantiate a recorded actor.
    #[error("could not spawn {kind:?} for cell {cell}")]
    SpawnFailed { cell: HexCoord, kind: ActorKind },
}

impl GameError for RestoreAnomaly {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSnapshotForCell(_) => "RESTORE_NO_SNAPSHOT",
            Self::AmbiguousRestoreMatch { .. } => "RESTORE_AMBIGUOUS_MATCH",
            Self::SpawnFailed { .. } => "RESTORE_SPAWN_FAILED",
        }
    }
}

/// What a restore changed in the live world.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoreReport {
    /// Cells that had a snapshot and were reconciled, in processing order.
    pub restored_cells: Vec<HexCoord>,
    /// Existing actors overwritten from a record.
    pub updated: Vec<ActorId>,
    pub spawned: Vec<ActorId>,
    pub destroyed: Vec<ActorId>,
    pub anomalies: Vec<RestoreAnomaly>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Cells the caller asked for that could not be resolved.
    pub fn unresolved_cells(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.anomalies.iter().filter_map(|anomaly| match anomaly {
            RestoreAnomaly::NoSnapshotForCell(cell) => Some(*cell),
            _ => None,
        })
    }
}
