//! Hex lattice: axial coordinates, world-space layout, and the playable grid.
//!
//! [`HexCoord`] is pure integer algebra. [`HexLayout`] is the only place that
//! knows the hex size and converts between axial and world coordinates.
//! [`HexGrid`] owns the generated cells and their occupancy.
mod coord;
mod error;
mod grid;
mod layout;

pub use coord::HexCoord;
pub use error::{GridError, HexError};
pub use grid::{Cell, HexGrid};
pub use layout::HexLayout;
