//! Runtime orchestration for hexfall levels.
//!
//! This crate wires the core rules to a concrete world. Consumers build a
//! [`Level`] from a [`hexfall_core::LevelDefinition`], fire shots, and tick it
//! until each turn reports completion.
//!
//! Modules are organized by responsibility:
//! - [`level`] hosts the orchestrator and event routing
//! - [`world`] is the in-memory world implementing every collaborator trait
//! - [`config`] holds headless driving knobs and their environment overrides
pub mod config;
pub mod error;
pub mod level;
pub mod world;

pub use config::RuntimeConfig;
pub use error::{FireError, LevelError};
pub use level::Level;
pub use world::{InMemoryWorld, Projectile, ShotKind, WorldActor, WorldEvent};
