//! Declarative level description consumed by the runtime.

use std::collections::BTreeSet;

use crate::GameConfig;
use crate::actor::{ActorFlags, ActorKind, Role};
use crate::error::{ErrorSeverity, GameError};
use crate::hex::{HexCoord, HexGrid};

/// One actor to spawn when the level starts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorPlacement {
    pub kind: ActorKind,
    pub q: i32,
    pub r: i32,
    /// Facing in radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f32,
    /// Overrides the kind's default starting health.
    #[cfg_attr(feature = "serde", serde(default))]
    pub health: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub decoy_susceptible: bool,
    /// Cells a Gaia restores when triggered.
    #[cfg_attr(feature = "serde", serde(default))]
    pub restore_cells: Vec<HexCoord>,
}

impl ActorPlacement {
    pub fn new(kind: ActorKind, q: i32, r: i32) -> Self {
        Self {
            kind,
            q,
            r,
            rotation: 0.0,
            health: None,
            decoy_susceptible: false,
            restore_cells: Vec::new(),
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_restore_cells(mut self, cells: Vec<HexCoord>) -> Self {
        self.restore_cells = cells;
        self
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }

    pub fn flags(&self) -> ActorFlags {
        ActorFlags::new()
            .with_decoy_susceptible(self.decoy_susceptible && self.kind.is_decoyable())
            .with_restore_cells(self.restore_cells.clone())
    }
}

/// A complete level: grid size, shot budget, and starting actors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_grid_width"))]
    pub grid_width: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_grid_height"))]
    pub grid_height: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_ammunition"))]
    pub ammunition: u32,
    pub actors: Vec<ActorPlacement>,
}

#[cfg(feature = "serde")]
fn default_grid_width() -> u32 {
    GameConfig::DEFAULT_GRID_WIDTH
}

#[cfg(feature = "serde")]
fn default_grid_height() -> u32 {
    GameConfig::DEFAULT_GRID_HEIGHT
}

#[cfg(feature = "serde")]
fn default_ammunition() -> u32 {
    GameConfig::DEFAULT_AMMUNITION
}

/// Structural problems in a level definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelValidationError {
    #[error("actor {index} ({kind:?}) is placed outside the grid at {cell}")]
    OutsideGrid {
        index: usize,
        kind: ActorKind,
        cell: HexCoord,
    },

    #[error("actor {index} shares cell {cell} with an earlier actor")]
    SharedCell { index: usize, cell: HexCoord },

    #[error("level has more than one protagonist")]
    MultipleProtagonists,
}

impl GameError for LevelValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutsideGrid { .. } => "LEVEL_OUTSIDE_GRID",
            Self::SharedCell { .. } => "LEVEL_SHARED_CELL",
            Self::MultipleProtagonists => "LEVEL_MULTIPLE_PROTAGONISTS",
        }
    }
}

impl LevelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid_width: GameConfig::DEFAULT_GRID_WIDTH,
            grid_height: GameConfig::DEFAULT_GRID_HEIGHT,
            ammunition: GameConfig::DEFAULT_AMMUNITION,
            actors: Vec::new(),
        }
    }

    pub fn with_ammunition(mut self, ammunition: u32) -> Self {
        self.ammunition = ammunition;
        self
    }

    pub fn with_actor(mut self, placement: ActorPlacement) -> Self {
        self.actors.push(placement);
        self
    }

    /// Applies the level's grid and ammunition on top of `base`.
    pub fn config(&self, base: &GameConfig) -> GameConfig {
        base.clone()
            .with_grid(self.grid_width, self.grid_height)
            .with_ammunition(self.ammunition)
    }

    /// Checks placements against the grid the level will generate.
    pub fn validate(&self, base: &GameConfig) -> Result<(), LevelValidationError> {
        let grid = HexGrid::from_config(&self.config(base));
        let mut taken = BTreeSet::new();
        let mut protagonists = 0;

        for (index, placement) in self.actors.iter().enumerate() {
            let cell = placement.coord();
            if !grid.contains(cell) {
                return Err(LevelValidationError::OutsideGrid {
                    index,
                    kind: placement.kind,
                    cell,
                });
            }
            if !taken.insert(cell) {
                return Err(LevelValidationError::SharedCell { index, cell });
            }
            if placement.kind.role() == Role::Protagonist {
                protagonists += 1;
            }
        }

        if protagonists > 1 {
            return Err(LevelValidationError::MultipleProtagonists);
        }
        Ok(())
    }
}
