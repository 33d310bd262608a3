//! Push path resolution across the hex lattice.
//!
//! A push advances one step length at a time along a direction, snapping to
//! the nearest hex centre after every step, until it is blocked, leaves the
//! playable area, or runs out of steps.
mod result;

pub use result::{PushOutcome, PushPath, PushResult};

use glam::Vec2;
use tracing::{debug, trace};

use crate::GameConfig;
use crate::actor::ActorId;
use crate::env::{BoundsOracle, ObstacleOracle};
use crate::hex::HexLayout;

/// One displacement request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PushRequest {
    pub start: Vec2,
    pub direction: Vec2,
    pub pushed: ActorId,
}

impl PushRequest {
    pub const fn new(pushed: ActorId, start: Vec2, direction: Vec2) -> Self {
        Self {
            start,
            direction,
            pushed,
        }
    }
}

/// Computes bounded push paths. Stateless apart from its configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementResolver {
    layout: HexLayout,
    max_steps: usize,
}

impl DisplacementResolver {
    /// `max_steps` is clamped to [`GameConfig::MAX_PUSH_STEPS`].
    pub fn new(layout: HexLayout, max_steps: usize) -> Self {
        Self {
            layout,
            max_steps: max_steps.min(GameConfig::MAX_PUSH_STEPS),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(HexLayout::new(config.hex_size), config.effective_push_steps())
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Resolves the path for `request`. Always returns within `max_steps` steps.
    pub fn resolve<B, O>(&self, request: &PushRequest, bounds: &B, obstacles: &O) -> PushResult
    where
        B: BoundsOracle + ?Sized,
        O: ObstacleOracle + ?Sized,
    {
        let start = self.layout.from_world(request.start);
        let mut result = PushResult {
            path: PushPath::new(),
            start,
            final_position: start,
            outcome: PushOutcome::NoMovement,
            obstacle: None,
            exit: None,
        };

        let direction = request.direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            debug!(actor = %request.pushed, "push ignored: zero direction");
            return result;
        }

        let step = direction * self.layout.step_length();
        let mut current_pos = request.start;
        let mut current = start;
        let mut terminal = None;

        for _ in 0..self.max_steps {
            let candidate = self.layout.from_world(current_pos + step);
            if candidate == current {
                // Direction too shallow to leave the cell; nothing further will change.
                break;
            }
            let candidate_pos = self.layout.to_world(candidate);

            if bounds.is_out_of_bounds(candidate_pos) {
                trace!(actor = %request.pushed, cell = %candidate, "push leaves the playable area");
                result.exit = Some(candidate);
                terminal = Some(PushOutcome::DestroyedAtBoundary);
                break;
            }

            if let Some(obstacle) = obstacles.obstacle_at(candidate_pos, request.pushed) {
                trace!(actor = %request.pushed, %obstacle, cell = %candidate, "push blocked");
                result.obstacle = Some(obstacle);
                terminal = Some(if result.path.is_empty() {
                    PushOutcome::NoMovement
                } else {
                    PushOutcome::StoppedByObstacle
                });
                break;
            }

            result.path.push(candidate);
            current = candidate;
            current_pos = candidate_pos;
        }

        result.final_position = current;
        result.outcome = terminal.unwrap_or(if result.path.is_empty() {
            PushOutcome::NoMovement
        } else {
            PushOutcome::ReachedFinalPosition
        });

        debug!(
            actor = %request.pushed,
            steps = result.path.len(),
            outcome = ?result.outcome,
            final_position = %result.final_position,
            "push resolved"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::env::RectBounds;
    use crate::hex::HexCoord;

    struct Blockers {
        layout: HexLayout,
        cells: BTreeMap<HexCoord, ActorId>,
    }

    impl ObstacleOracle for Blockers {
        fn obstacle_at(&self, position: Vec2, excluding: ActorId) -> Option<ActorId> {
            self.cells
                .get(&self.layout.from_world(position))
                .copied()
                .filter(|id| *id != excluding)
        }
    }

    struct Unbounded;

    impl BoundsOracle for Unbounded {
        fn is_out_of_bounds(&self, _position: Vec2) -> bool {
            false
        }
    }

    fn layout() -> HexLayout {
        HexLayout::new(GameConfig::DEFAULT_HEX_SIZE)
    }

    fn blockers(cells: &[(HexCoord, ActorId)]) -> Blockers {
        Blockers {
            layout: layout(),
            cells: cells.iter().copied().collect(),
        }
    }

    const PUSHED: ActorId = ActorId(1);

    /// Push from the origin towards the `(1, 0)` neighbour.
    fn east_push() -> PushRequest {
        let toward = layout().to_world(HexCoord::new(1, 0)).normalize();
        PushRequest::new(PUSHED, layout().to_world(HexCoord::ORIGIN), toward)
    }

    #[test]
    fn stops_before_obstacle_at_step_k() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let request = east_push();

        let first = resolver.resolve(&request, &Unbounded, &blockers(&[]));
        let path: Vec<HexCoord> = first.path.iter().take(5).copied().collect();

        for k in 2..=5 {
            let blocked = path[k - 1];
            let result = resolver.resolve(&request, &Unbounded, &blockers(&[(blocked, ActorId(9))]));
            assert_eq!(result.path.len(), k - 1);
            assert_eq!(result.outcome, PushOutcome::StoppedByObstacle);
            assert_eq!(result.final_position, path[k - 2]);
            assert_eq!(result.obstacle, Some(ActorId(9)));
        }
    }

    #[test]
    fn first_step_blocked_is_no_movement() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let request = east_push();
        let next = HexCoord::new(1, 0);

        let result = resolver.resolve(&request, &Unbounded, &blockers(&[(next, ActorId(4))]));
        assert!(result.path.is_empty());
        assert_eq!(result.obstacle, Some(ActorId(4)));
        assert_eq!(result.outcome, PushOutcome::NoMovement);
        assert_eq!(result.final_position, HexCoord::ORIGIN);
    }

    #[test]
    fn ignores_the_pushed_actor_itself() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let request = east_push();
        let first = resolver.resolve(&request, &Unbounded, &blockers(&[])).path[0];

        let result = resolver.resolve(&request, &Unbounded, &blockers(&[(first, PUSHED)]));
        assert_eq!(result.outcome, PushOutcome::ReachedFinalPosition);
    }

    #[test]
    fn unblocked_push_uses_every_step() {
        let resolver = DisplacementResolver::new(layout(), 7);
        let result = resolver.resolve(&east_push(), &Unbounded, &blockers(&[]));
        assert_eq!(result.path.len(), 7);
        assert_eq!(result.outcome, PushOutcome::ReachedFinalPosition);
        assert_eq!(result.final_position, *result.path.last().unwrap());
        assert_eq!(result.final_position, HexCoord::new(7, 0));
        for pair in result.path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
    }

    #[test]
    fn boundary_destroys_without_entering_the_cell() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let bounds = RectBounds::new(Vec2::new(-3.0, -3.0), Vec2::new(3.0, 3.0));
        let result = resolver.resolve(&east_push(), &bounds, &blockers(&[]));

        assert_eq!(result.outcome, PushOutcome::DestroyedAtBoundary);
        assert_eq!(result.path.len(), 3);
        let layout = layout();
        assert!(result.path.iter().all(|c| !bounds.is_out_of_bounds(layout.to_world(*c))));
        let exit = result.exit.unwrap();
        assert!(bounds.is_out_of_bounds(layout.to_world(exit)));
        assert_eq!(result.final_position, *result.path.last().unwrap());
    }

    #[test]
    fn out_of_bounds_first_step_keeps_start() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let bounds = RectBounds::new(Vec2::splat(-0.1), Vec2::splat(0.1));
        let result = resolver.resolve(&east_push(), &bounds, &blockers(&[]));

        assert!(result.path.is_empty());
        assert_eq!(result.outcome, PushOutcome::DestroyedAtBoundary);
        assert_eq!(result.final_position, HexCoord::ORIGIN);
    }

    #[test]
    fn zero_direction_does_not_move() {
        let resolver = DisplacementResolver::from_config(&GameConfig::default());
        let request = PushRequest::new(PUSHED, Vec2::ZERO, Vec2::ZERO);
        let result = resolver.resolve(&request, &Unbounded, &blockers(&[]));
        assert_eq!(result.outcome, PushOutcome::NoMovement);
    }

    #[test]
    fn step_cap_is_clamped() {
        let resolver = DisplacementResolver::new(layout(), 500);
        assert_eq!(resolver.max_steps(), GameConfig::MAX_PUSH_STEPS);
        let result = resolver.resolve(&east_push(), &Unbounded, &blockers(&[]));
        assert_eq!(result.path.len(), GameConfig::MAX_PUSH_STEPS);
    }
}
