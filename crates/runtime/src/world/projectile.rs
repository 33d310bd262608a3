use glam::Vec2;
use hexfall_core::ActorId;

/// What a projectile does to the first thing it hits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ShotKind {
    /// One point of damage.
    Bullet,
    /// Displaces the target along the shot direction.
    Push,
    /// Bumper round: displaces actors that have health, never damages.
    Bump,
}

/// A round in flight. Projectiles share the actor id space but are transient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub id: ActorId,
    pub kind: ShotKind,
    /// Never hit by its own round.
    pub owner: ActorId,
    pub position: Vec2,
    pub direction: Vec2,
    /// Steps left before the round fizzles out.
    pub range: u32,
}

impl Projectile {
    pub const DEFAULT_RANGE: u32 = 64;
}
