use std::collections::BTreeMap;

use glam::Vec2;

use crate::actor::{ActorFlags, ActorKind, Transform};
use crate::hex::HexCoord;

/// Captured state of one actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorRecord {
    pub kind: ActorKind,
    pub transform: Transform,
    /// `None` for actors without health.
    pub health: Option<u32>,
    pub flags: ActorFlags,
}

impl ActorRecord {
    pub fn new(kind: ActorKind, transform: Transform) -> Self {
        Self {
            kind,
            transform,
            health: None,
            flags: ActorFlags::default(),
        }
    }

    pub fn with_health(mut self, health: Option<u32>) -> Self {
        self.health = health;
        self
    }

    pub fn with_flags(mut self, flags: ActorFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    pub fn subtype_tag(&self) -> Option<&'static str> {
        self.kind.subtype_tag()
    }
}

/// Records observed within one cell's footprint.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub records: Vec<ActorRecord>,
}

impl CellSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whole-grid capture. Every grid cell has an entry, empty cells included.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    cells: BTreeMap<HexCoord, CellSnapshot>,
}

impl LevelSnapshot {
    pub(crate) fn insert(&mut self, coord: HexCoord, cell: CellSnapshot) {
        self.cells.insert(coord, cell);
    }

    pub fn cell(&self, coord: HexCoord) -> Option<&CellSnapshot> {
        self.cells.get(&coord)
    }

    pub fn cells(&self) -> impl Iterator<Item = (HexCoord, &CellSnapshot)> {
        self.cells.iter().map(|(coord, cell)| (*coord, cell))
    }

    pub fn record_count(&self) -> usize {
        self.cells.values().map(|cell| cell.records.len()).sum()
    }
}
