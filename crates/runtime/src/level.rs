//! Level orchestrator.
//!
//! [`Level`] constructs and owns one instance of every core component and the
//! world they act on. Nothing is global: callers drive the level through
//! [`Level::fire`] and [`Level::tick`], and the level routes world lifecycle
//! events to the match state, the push resolver, and Gaia restores.
use std::collections::BTreeSet;
use std::time::Duration;

use glam::Vec2;
use hexfall_core::{
    Actor, ActorId, ActorKind, DisplacementResolver, GameConfig, HexCoord, HexGrid,
    LevelDefinition, LevelSnapshotStore, MatchState, PushRequest, PushResult, RectBounds,
    RestoreReport, SnapshotWorld, TurnController, TurnPhase, TurnReport,
};
use tracing::{debug, info, warn};

use crate::error::{FireError, LevelError};
use crate::world::{InMemoryWorld, ShotKind, WorldEvent};

pub struct Level {
    definition: LevelDefinition,
    config: GameConfig,
    grid: HexGrid,
    world: InMemoryWorld,
    turns: TurnController,
    state: MatchState,
    snapshots: LevelSnapshotStore,
    resolver: DisplacementResolver,
    protagonist: Option<ActorId>,
    /// Set while a restore is reconciling, so restores never trigger restores.
    restoring: bool,
}

impl Level {
    /// Builds the level, spawns its actors, takes the starting snapshot, and begins the match.
    pub fn new(definition: LevelDefinition, base: &GameConfig) -> Result<Self, LevelError> {
        definition.validate(base)?;
        let config = definition.config(base);
        let grid = HexGrid::from_config(&config);
        let world = InMemoryWorld::new(&config, playable_bounds(&grid, &config));

        let mut level = Self {
            turns: TurnController::from_config(&config),
            state: MatchState::from_config(&config),
            snapshots: LevelSnapshotStore::from_config(&config),
            resolver: DisplacementResolver::from_config(&config),
            definition,
            config,
            grid,
            world,
            protagonist: None,
            restoring: false,
        };
        level.populate()?;
        Ok(level)
    }

    fn populate(&mut self) -> Result<(), LevelError> {
        for placement in &self.definition.actors {
            let id = self.world.spawn_placement(placement);
            self.grid.place(id, placement.coord())?;
        }
        self.route_events();
        self.snapshots.take_snapshot(&self.grid, &self.world);
        self.state.begin();
        info!(
            level = %self.definition.name,
            actors = self.definition.actors.len(),
            ammunition = self.state.remaining_ammunition(),
            "level started"
        );
        Ok(())
    }

    // ===== accessors =====

    pub fn definition(&self) -> &LevelDefinition {
        &self.definition
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn world(&self) -> &InMemoryWorld {
        &self.world
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Mutable access for subscribing to match events.
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn snapshots(&self) -> &LevelSnapshotStore {
        &self.snapshots
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.turns.phase()
    }

    pub fn is_turn_active(&self) -> bool {
        self.turns.is_turn_active()
    }

    pub fn protagonist(&self) -> Option<ActorId> {
        self.protagonist
    }

    /// World-space direction from the protagonist toward `cell`.
    pub fn aim_at(&self, cell: HexCoord) -> Option<Vec2> {
        let from = self.world.position_of(self.protagonist?)?;
        let direction = (self.grid.layout().to_world(cell) - from).normalize_or_zero();
        (direction != Vec2::ZERO).then_some(direction)
    }

    // ===== turn flow =====

    /// Spends one shot from the protagonist and starts a turn.
    pub fn fire(&mut self, kind: ShotKind, direction: Vec2) -> Result<ActorId, FireError> {
        if self.state.is_ended() {
            return Err(FireError::MatchEnded);
        }
        if self.turns.is_turn_active() {
            return Err(FireError::TurnInProgress);
        }
        if !self.world.is_firing_enabled() {
            return Err(FireError::FiringDisabled);
        }
        if self.state.remaining_ammunition() == 0 {
            return Err(FireError::OutOfAmmunition);
        }
        if direction.normalize_or_zero() == Vec2::ZERO {
            return Err(FireError::ZeroDirection);
        }
        let shooter = self
            .protagonist
            .filter(|id| self.world.actor(*id).is_some_and(|actor| actor.is_alive()))
            .ok_or(FireError::NoShooter)?;

        let projectile = self
            .world
            .fire(shooter, direction, kind)
            .ok_or(FireError::NoShooter)?;
        self.state.consume_ammunition();
        self.turns.start_turn(&mut self.world);
        debug!(%shooter, %projectile, ?kind, "shot fired");
        Ok(projectile)
    }

    /// Advances the world by one step and the turn controller by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<TurnReport> {
        self.world.step();
        self.route_events();
        let report = self.turns.tick(dt, &mut self.world, &mut self.state);
        self.route_events();
        report
    }

    /// Ticks until the current turn completes or `max_ticks` is spent.
    pub fn run_until_idle(&mut self, dt: Duration, max_ticks: u32) -> Option<TurnReport> {
        for _ in 0..max_ticks {
            if !self.turns.is_turn_active() {
                return None;
            }
            if let Some(report) = self.tick(dt) {
                return Some(report);
            }
        }
        warn!(max_ticks, phase = self.turns.phase().as_str(), "turn did not finish within tick budget");
        None
    }

    /// Rebuilds every component from the level definition, aborting any turn in flight.
    ///
    /// Match observers stay subscribed.
    pub fn reset(&mut self) -> Result<(), LevelError> {
        info!(level = %self.definition.name, "level reset");
        self.turns.reset();
        self.grid = HexGrid::from_config(&self.config);
        self.world = InMemoryWorld::new(&self.config, playable_bounds(&self.grid, &self.config));
        self.snapshots.clear();
        self.state.restart(self.definition.ammunition);
        self.protagonist = None;
        self.restoring = false;
        self.populate()
    }

    // ===== displacement =====

    /// Resolves and applies a push on `actor`.
    pub fn push(&mut self, actor: ActorId, direction: Vec2) -> Option<PushResult> {
        let result = self.apply_push(actor, direction);
        self.route_events();
        result
    }

    fn apply_push(&mut self, actor: ActorId, direction: Vec2) -> Option<PushResult> {
        let start = self.world.position_of(actor)?;
        let request = PushRequest::new(actor, start, direction);
        let result = self.resolver.resolve(&request, &self.world, &self.world);

        if result.is_destroyed() {
            info!(%actor, exit = ?result.exit, "actor pushed off the board");
            self.world.destroy(actor);
        } else if result.moved() {
            let position = self.grid.layout().to_world(result.final_position);
            self.world.set_position(actor, position);
        }
        self.sync_grid();
        Some(result)
    }

    // ===== snapshots =====

    /// Replaces the stored snapshot with the current world.
    pub fn take_snapshot(&mut self) -> usize {
        self.snapshots.take_snapshot(&self.grid, &self.world)
    }

    /// Restores `coords` from the stored snapshot and re-syncs the registry.
    pub fn restore(&mut self, coords: &[HexCoord], origin: Vec2) -> RestoreReport {
        let was_restoring = std::mem::replace(&mut self.restoring, true);
        let report = self
            .snapshots
            .restore_cells(coords, origin, &self.grid, &mut self.world);
        self.route_events();
        self.state.reconcile(&self.world);
        self.restoring = was_restoring;
        self.sync_grid();
        report
    }

    fn gaia_restore(&mut self, gaia: ActorId) {
        let Some(actor) = self.world.actor(gaia) else {
            return;
        };
        let cells = actor.restore_cells().to_vec();
        if cells.is_empty() {
            return;
        }
        let origin = actor.position();
        info!(%gaia, cells = cells.len(), "gaia restore triggered");
        self.restore(&cells, origin);
    }

    // ===== event routing =====

    fn route_events(&mut self) {
        loop {
            let events = self.world.drain_events();
            if events.is_empty() {
                break;
            }

            let mut gaia_triggers = BTreeSet::new();
            for event in events {
                if let Some(gaia) = self.handle_event(event) {
                    gaia_triggers.insert(gaia);
                }
            }
            for gaia in gaia_triggers {
                self.gaia_restore(gaia);
            }
        }
        self.sync_grid();
    }

    /// Applies one event; returns a Gaia whose restore should run.
    fn handle_event(&mut self, event: WorldEvent) -> Option<ActorId> {
        let is_gaia = self
            .world
            .actor(event.actor())
            .is_some_and(|actor| actor.kind() == ActorKind::Gaia);

        match event {
            WorldEvent::Spawned(id) => {
                let actor = self.world.actor(id)?;
                if actor.kind() == ActorKind::Player {
                    self.protagonist = Some(id);
                }
                self.state.register_actor(actor);
                None
            }
            WorldEvent::Damaged { actor, amount } => {
                debug!(%actor, amount, "actor damaged");
                (is_gaia && !self.restoring).then_some(actor)
            }
            WorldEvent::Died(actor) => {
                self.state.on_actor_died(actor);
                (is_gaia && !self.restoring).then_some(actor)
            }
            WorldEvent::Revived(id) => {
                if let Some(actor) = self.world.actor(id) {
                    self.state.on_actor_revived(actor);
                }
                None
            }
            WorldEvent::Destroyed(actor) => {
                self.state.unregister_actor(actor);
                if self.protagonist == Some(actor) {
                    self.protagonist = None;
                }
                None
            }
            WorldEvent::PushRequested { actor, direction } => {
                self.apply_push(actor, direction);
                None
            }
        }
    }

    /// Rebuilds grid occupancy from the blocking actors' positions.
    fn sync_grid(&mut self) {
        self.grid.clear_occupancy();
        let layout = self.grid.layout();
        for actor in self.world.actors().filter(|actor| actor.is_blocking()) {
            let cell = layout.from_world(actor.position());
            if let Err(err) = self.grid.place(actor.id(), cell) {
                debug!(%err, actor = %actor.id(), "actor not tracked in grid");
            }
        }
    }
}

/// The grid's centres grown by one hex size on every side.
fn playable_bounds(grid: &HexGrid, config: &GameConfig) -> RectBounds {
    RectBounds::enclosing(grid.cells().map(|cell| cell.center()), config.hex_size)
}
