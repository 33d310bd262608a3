use glam::Vec2;

use crate::actor::ActorId;

/// Screen/world extent test.
pub trait BoundsOracle {
    fn is_out_of_bounds(&self, position: Vec2) -> bool;
}

/// Spatial query for whatever blocks a displaced actor.
///
/// Implementations decide which occupants count (walls, characters, robots,
/// shields) and must never report `excluding` itself.
pub trait ObstacleOracle {
    fn obstacle_at(&self, position: Vec2, excluding: ActorId) -> Option<ActorId>;
}

/// Axis-aligned playable area with a margin, the usual bounds for a fixed camera.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl RectBounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Bounds enclosing `points`, grown by `margin` on every side.
    pub fn enclosing(points: impl IntoIterator<Item = Vec2>, margin: f32) -> Self {
        let (min, max) = points
            .into_iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });
        if min.x > max.x {
            return Self::new(Vec2::splat(-margin), Vec2::splat(margin));
        }
        Self::new(min - Vec2::splat(margin), max + Vec2::splat(margin))
    }

    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= self.min.x
            && position.y >= self.min.y
            && position.x <= self.max.x
            && position.y <= self.max.y
    }
}

impl BoundsOracle for RectBounds {
    fn is_out_of_bounds(&self, position: Vec2) -> bool {
        !self.contains(position)
    }
}
