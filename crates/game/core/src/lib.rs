//! Deterministic turn-resolution rules for a hex-grid tactics game.
//!
//! `hexfall-core` owns the hex algebra, push path resolution, the turn
//! lifecycle, match bookkeeping, and the per-cell snapshot store. It never
//! owns actors: everything it needs from the live world comes through the
//! collaborator traits in [`env`], which the runtime implements.
pub mod actor;
pub mod config;
pub mod env;
pub mod error;
pub mod hex;
pub mod level;
pub mod observer;
pub mod push;
pub mod snapshot;
pub mod state;
pub mod turn;

pub use actor::{
    Actor, ActorFlags, ActorId, ActorKind, Damageable, DecoyTarget, EnemyKind, FlagCarrier, Health,
    HealthEvent, HealthEvents, ObstacleClass, Occupant, OccupantClass, Reviveable, RobotKind, Role,
    Transform,
};
pub use config::GameConfig;
pub use env::{
    ActorDirectory, ActorFactory, BoundsOracle, InputGate, KineticOracle, ObstacleOracle,
    RectBounds, SnapshotWorld, TriggerSource, TurnWorld,
};
pub use error::{ErrorSeverity, GameError};
pub use hex::{Cell, GridError, HexCoord, HexError, HexGrid, HexLayout};
pub use level::{ActorPlacement, LevelDefinition, LevelValidationError};
pub use observer::{Observers, SubscriptionId};
pub use push::{DisplacementResolver, PushOutcome, PushPath, PushRequest, PushResult};
pub use snapshot::{
    ActorRecord, CellSnapshot, LevelSnapshot, LevelSnapshotStore, RestoreAnomaly, RestoreReport,
};
pub use state::{ActorRegistry, LoseReason, MatchEvent, MatchOutcome, MatchState, RegistryNotice};
pub use turn::{TurnAnomaly, TurnController, TurnListener, TurnPhase, TurnReport};
