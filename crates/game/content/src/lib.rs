//! Data-driven level and configuration loaders.
//!
//! Levels are RON files describing the grid, the shot budget, and the
//! starting actors. Tunables live in a TOML file whose missing keys fall back
//! to [`hexfall_core::GameConfig`] defaults.
//!
//! Content is consumed by the runtime when a level is built and never appears
//! in match state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LevelLoader, LoadResult};
