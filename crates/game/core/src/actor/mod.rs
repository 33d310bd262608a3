//! Actor contract shared by the rules and their collaborators.
//!
//! Actors are owned by the world collaborator. The core only ever holds
//! [`ActorId`]s and reads actors through the [`Actor`] contract; mutation
//! happens through the capability traits below.
mod flags;
mod health;
mod id;
mod kind;

pub use flags::{ActorFlags, FLAG_SCHEMA_VERSION};
pub use health::{Health, HealthEvent, HealthEvents};
pub use id::{ActorId, Transform};
pub use kind::{ActorKind, EnemyKind, ObstacleClass, Occupant, OccupantClass, Role, RobotKind};

use glam::Vec2;

/// Minimal read-only view every actor exposes to the core.
pub trait Actor {
    fn id(&self) -> ActorId;

    fn kind(&self) -> ActorKind;

    fn position(&self) -> Vec2;

    fn is_alive(&self) -> bool;

    /// Current health magnitude; `None` for actors without health (walls, robots).
    fn health_value(&self) -> Option<u32>;

    fn role(&self) -> Role {
        self.kind().role()
    }
}

/// Actors that can be hurt.
pub trait Damageable {
    fn health(&self) -> Option<&Health>;

    fn health_mut(&mut self) -> Option<&mut Health>;

    fn take_damage(&mut self, amount: u32) -> HealthEvents {
        self.health_mut()
            .map(|health| health.take_damage(amount))
            .unwrap_or_default()
    }

    fn heal(&mut self, amount: u32) -> HealthEvents {
        self.health_mut()
            .map(|health| health.heal(amount))
            .unwrap_or_default()
    }

    fn set_health(&mut self, value: u32) -> HealthEvents {
        self.health_mut()
            .map(|health| health.set_health(value))
            .unwrap_or_default()
    }

    fn is_dead(&self) -> bool {
        self.health().is_some_and(Health::is_dead)
    }
}

/// Actors that come back after dying (medic rounds, restores).
pub trait Reviveable: Damageable {
    fn revive(&mut self) -> HealthEvents {
        self.health_mut()
            .map(Health::revive)
            .unwrap_or_default()
    }
}

/// Actors that a decoy can distract.
pub trait DecoyTarget {
    fn is_decoy_susceptible(&self) -> bool;

    fn set_decoy_susceptible(&mut self, susceptible: bool);
}

/// Explicit flag schema used by snapshots instead of field introspection.
pub trait FlagCarrier {
    fn capture_flags(&self) -> ActorFlags;

    fn apply_flags(&mut self, flags: &ActorFlags);
}
