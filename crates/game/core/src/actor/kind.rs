//! Actor type tags and the classifications derived from them.

use bitflags::bitflags;
use strum::{EnumIter, IntoStaticStr};

use super::ActorId;

/// Hostile character subtypes. Each fires with its own pattern (external).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyKind {
    Basic,
    NoGun,
    Hunter,
    Baretta60,
    Baretta120,
    Baretta180,
    Medic,
    SuperEnemy,
    Riot,
}

/// Robot subtypes. Robots block pushes but carry no health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotKind {
    Standard,
    /// Fires a push round back when hit; resolved as a deferred trigger.
    Bumper,
    Teleporter,
}

/// Tagged actor type used for dispatch, snapshot matching and respawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Enemy(EnemyKind),
    Robot(RobotKind),
    Wall,
    Hay,
    Hostage,
    Gaia,
    ShieldBlocker,
}

/// Class an actor plays in win/lose evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Protagonist,
    Hostile,
    Hostage,
    Neutral,
}

bitflags! {
    /// What kind of obstacle an occupant presents to a push.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ObstacleClass: u8 {
        /// Static terrain: walls and hay bales.
        const WALL = 1 << 0;
        /// Anything with health.
        const CHARACTER = 1 << 1;
        const ROBOT = 1 << 2;
        /// Directional shields.
        const SHIELD = 1 << 3;
    }
}

impl ActorKind {
    /// Coarse type tag recorded in snapshots.
    pub fn type_tag(self) -> &'static str {
        self.into()
    }

    /// Subtype tag for enemies and robots.
    pub fn subtype_tag(self) -> Option<&'static str> {
        match self {
            Self::Enemy(kind) => Some(kind.into()),
            Self::Robot(kind) => Some(kind.into()),
            _ => None,
        }
    }

    pub fn role(self) -> Role {
        match self {
            Self::Player => Role::Protagonist,
            Self::Enemy(_) => Role::Hostile,
            Self::Hostage => Role::Hostage,
            Self::Robot(_) | Self::Wall | Self::Hay | Self::Gaia | Self::ShieldBlocker => {
                Role::Neutral
            }
        }
    }

    pub fn obstacle_class(self) -> ObstacleClass {
        match self {
            Self::Wall | Self::Hay => ObstacleClass::WALL,
            Self::Player | Self::Enemy(_) | Self::Hostage | Self::Gaia => ObstacleClass::CHARACTER,
            Self::Robot(_) => ObstacleClass::ROBOT,
            Self::ShieldBlocker => ObstacleClass::SHIELD | ObstacleClass::CHARACTER,
        }
    }

    /// Whether the actor carries a [`super::Health`].
    pub fn has_health(self) -> bool {
        self.obstacle_class().contains(ObstacleClass::CHARACTER)
    }

    /// Starting health for freshly spawned actors of this kind.
    pub fn default_health(self) -> Option<(u32, u32)> {
        match self {
            Self::Gaia => Some((100, 100)),
            kind if kind.has_health() => Some((1, 2)),
            _ => None,
        }
    }

    /// Whether the actor can carry the decoy-susceptible flag.
    pub fn is_decoyable(self) -> bool {
        matches!(self, Self::Enemy(_) | Self::Robot(_))
    }

    pub fn is_deferred_trigger(self) -> bool {
        matches!(self, Self::Robot(RobotKind::Bumper))
    }
}

/// What a spatial query found at a location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OccupantClass {
    Actor(ActorKind),
    Projectile,
    CellMarker,
}

impl OccupantClass {
    /// Transient occupants never appear in snapshots or restores.
    pub fn is_transient(self) -> bool {
        !matches!(self, Self::Actor(_))
    }

    pub fn kind(self) -> Option<ActorKind> {
        match self {
            Self::Actor(kind) => Some(kind),
            _ => None,
        }
    }
}

/// One hit of a spatial overlap query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: ActorId,
    pub class: OccupantClass,
}

impl Occupant {
    pub const fn actor(id: ActorId, kind: ActorKind) -> Self {
        Self {
            id,
            class: OccupantClass::Actor(kind),
        }
    }
}
