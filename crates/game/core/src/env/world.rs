use glam::Vec2;

use crate::actor::{ActorId, ActorKind, Occupant, Transform};
use crate::snapshot::ActorRecord;

/// Instantiates actors by type tag.
pub trait ActorFactory {
    /// Returns `None` when the kind cannot be spawned (no prefab, no room).
    fn create_actor(&mut self, kind: ActorKind, transform: Transform) -> Option<ActorId>;
}

/// Liveness lookup used to rebuild registries.
pub trait ActorDirectory {
    /// `None` when the actor no longer exists.
    fn is_alive(&self, actor: ActorId) -> Option<bool>;
}

/// Live-world access required to capture and restore snapshots.
pub trait SnapshotWorld: ActorFactory {
    /// Every occupant whose footprint overlaps the circle, transient ones included.
    fn occupants_near(&self, center: Vec2, radius: f32) -> Vec<Occupant>;

    fn position_of(&self, actor: ActorId) -> Option<Vec2>;

    /// Current state of `actor` in record form.
    fn capture(&self, actor: ActorId) -> Option<ActorRecord>;

    /// Overwrites transform, health, and flags of `actor` from `record`.
    fn apply_record(&mut self, actor: ActorId, record: &ActorRecord);

    fn destroy(&mut self, actor: ActorId);
}
