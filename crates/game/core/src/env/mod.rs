//! Traits describing the collaborators the rules consult.
//!
//! The core never simulates physics, renders, or owns actors. Whatever does
//! (an engine scene, the runtime's in-memory world, a test fixture) implements
//! these traits and is handed to the component that needs it for the duration
//! of a call.
mod spatial;
mod turn;
mod world;

pub use spatial::{BoundsOracle, ObstacleOracle, RectBounds};
pub use turn::{InputGate, KineticOracle, TriggerSource, TurnWorld};
pub use world::{ActorDirectory, ActorFactory, SnapshotWorld};
