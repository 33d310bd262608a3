use std::collections::BTreeMap;

use glam::Vec2;

use crate::GameConfig;
use crate::actor::ActorId;

use super::{GridError, HexCoord, HexLayout};

/// One generated grid cell and its occupant, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    coord: HexCoord,
    center: Vec2,
    occupant: Option<ActorId>,
}

impl Cell {
    fn new(coord: HexCoord, center: Vec2) -> Self {
        Self {
            coord,
            center,
            occupant: None,
        }
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn occupant(&self) -> Option<ActorId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Rectangular hex grid centred on the origin.
///
/// Cells are created once at generation time and only their occupancy changes
/// afterwards. Iteration order is the `HexCoord` ordering, which keeps
/// snapshotting and restoration deterministic.
#[derive(Clone, Debug)]
pub struct HexGrid {
    layout: HexLayout,
    width: u32,
    height: u32,
    cells: BTreeMap<HexCoord, Cell>,
}

impl HexGrid {
    /// Generates `width × height` cells with `q = col - width/2`, `r = row - height/2`.
    pub fn rectangular(layout: HexLayout, width: u32, height: u32) -> Self {
        let mut cells = BTreeMap::new();
        let half_w = (width / 2) as i32;
        let half_h = (height / 2) as i32;

        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let coord = HexCoord::new(col - half_w, row - half_h);
                cells.insert(coord, Cell::new(coord, layout.to_world(coord)));
            }
        }

        tracing::debug!(cells = cells.len(), width, height, "generated hex grid");

        Self {
            layout,
            width,
            height,
            cells,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::rectangular(
            HexLayout::new(config.hex_size),
            config.grid_width,
            config.grid_height,
        )
    }

    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn cell(&self, coord: HexCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// The grid cell whose centre is closest to `position`, if that cell exists.
    pub fn nearest_cell(&self, position: Vec2) -> Option<&Cell> {
        self.cells.get(&self.layout.from_world(position))
    }

    pub fn occupant(&self, coord: HexCoord) -> Option<ActorId> {
        self.cells.get(&coord).and_then(Cell::occupant)
    }

    /// Finds the cell an actor currently occupies.
    pub fn find(&self, actor: ActorId) -> Option<HexCoord> {
        self.cells
            .values()
            .find(|cell| cell.occupant == Some(actor))
            .map(Cell::coord)
    }

    /// Marks `coord` as occupied by `actor`.
    ///
    /// Placing an actor on the cell it already occupies is a no-op.
    pub fn place(&mut self, actor: ActorId, coord: HexCoord) -> Result<(), GridError> {
        let cell = self
            .cells
            .get_mut(&coord)
            .ok_or(GridError::OutsideGrid(coord))?;

        match cell.occupant {
            Some(existing) if existing == actor => Ok(()),
            Some(existing) => Err(GridError::Occupied {
                cell: coord,
                occupant: existing,
            }),
            None => {
                cell.occupant = Some(actor);
                Ok(())
            }
        }
    }

    /// Clears a cell, returning whoever was in it.
    pub fn vacate(&mut self, coord: HexCoord) -> Option<ActorId> {
        self.cells.get_mut(&coord)?.occupant.take()
    }

    /// Moves `actor` from `from` to `to`, leaving `from` untouched on failure.
    pub fn relocate(&mut self, actor: ActorId, from: HexCoord, to: HexCoord) -> Result<(), GridError> {
        if from == to {
            return self.place(actor, to);
        }
        if self.occupant(from) != Some(actor) {
            return Err(GridError::NotOccupant { cell: from, actor });
        }
        self.place(actor, to)?;
        self.vacate(from);
        Ok(())
    }

    /// Clears every cell's occupant while keeping the cells.
    pub fn clear_occupancy(&mut self) {
        for cell in self.cells.values_mut() {
            cell.occupant = None;
        }
    }
}
