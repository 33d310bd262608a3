//! In-memory reference world.
//!
//! Owns every actor and projectile, runs a discrete projectile simulation, and
//! implements all the collaborator traits the core consults. Lifecycle changes
//! are queued as [`WorldEvent`]s for the level to route.
mod actor;
mod event;
mod projectile;

pub use actor::WorldActor;
pub use event::WorldEvent;
pub use projectile::{Projectile, ShotKind};

use std::collections::BTreeMap;

use glam::Vec2;
use hexfall_core::{
    Actor, ActorDirectory, ActorFactory, ActorId, ActorKind, ActorPlacement, ActorRecord,
    BoundsOracle, Damageable, FlagCarrier, GameConfig, HealthEvent, HealthEvents, HexLayout,
    InputGate, KineticOracle, ObstacleClass, ObstacleOracle, Occupant, OccupantClass, RectBounds,
    SnapshotWorld, Transform, TriggerSource,
};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct InMemoryWorld {
    layout: HexLayout,
    probe_radius: f32,
    bounds: RectBounds,
    next_id: u32,
    actors: BTreeMap<ActorId, WorldActor>,
    projectiles: Vec<Projectile>,
    events: Vec<WorldEvent>,
    firing_enabled: bool,
}

impl InMemoryWorld {
    pub fn new(config: &GameConfig, bounds: RectBounds) -> Self {
        Self {
            layout: HexLayout::new(config.hex_size),
            probe_radius: config.obstacle_probe_radius,
            bounds,
            next_id: 0,
            actors: BTreeMap::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            firing_enabled: true,
        }
    }

    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    pub fn bounds(&self) -> RectBounds {
        self.bounds
    }

    pub fn actor(&self, id: ActorId) -> Option<&WorldActor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut WorldActor> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &WorldActor> {
        self.actors.values()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn is_firing_enabled(&self) -> bool {
        self.firing_enabled
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    fn allocate_id(&mut self) -> ActorId {
        self.next_id += 1;
        ActorId(self.next_id)
    }

    /// Adds an actor with the kind's default health.
    pub fn spawn(&mut self, kind: ActorKind, transform: Transform) -> ActorId {
        let id = self.allocate_id();
        self.actors.insert(id, WorldActor::new(id, kind, transform));
        self.events.push(WorldEvent::Spawned(id));
        debug!(actor = %id, ?kind, position = ?transform.position, "actor spawned");
        id
    }

    pub fn spawn_placement(&mut self, placement: &ActorPlacement) -> ActorId {
        let position = self.layout.to_world(placement.coord());
        let transform = Transform::at(position).with_rotation(placement.rotation);
        let id = self.spawn(placement.kind, transform);
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.apply_flags(&placement.flags());
            if let Some(health) = placement.health {
                actor.override_health(health);
            }
        }
        id
    }

    pub fn set_position(&mut self, id: ActorId, position: Vec2) {
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.transform.position = position;
        }
    }

    /// Deals damage outside of projectile hits (scripted hazards, tools).
    pub fn damage(&mut self, id: ActorId, amount: u32) {
        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        let events = actor.take_damage(amount);
        self.publish_health(id, events);
    }

    /// Launches a round from `owner` along `direction`.
    pub fn fire(&mut self, owner: ActorId, direction: Vec2, kind: ShotKind) -> Option<ActorId> {
        let origin = self.actors.get(&owner)?.position();
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }
        let id = self.allocate_id();
        self.projectiles.push(Projectile {
            id,
            kind,
            owner,
            position: origin,
            direction,
            range: Projectile::DEFAULT_RANGE,
        });
        debug!(projectile = %id, %owner, ?kind, "projectile fired");
        Some(id)
    }

    /// Advances every projectile by one step and resolves hits.
    pub fn step(&mut self) {
        if self.projectiles.is_empty() {
            return;
        }
        let step = self.layout.step_length();
        let in_flight = std::mem::take(&mut self.projectiles);

        for mut projectile in in_flight {
            projectile.position += projectile.direction * step;
            projectile.range = projectile.range.saturating_sub(1);

            if self.bounds.is_out_of_bounds(projectile.position) {
                trace!(projectile = %projectile.id, "projectile left the playable area");
                continue;
            }

            let centre = self.layout.snap(projectile.position);
            if let Some(target) = self.obstacle_at(centre, projectile.owner) {
                self.apply_hit(&projectile, target);
                continue;
            }

            if projectile.range > 0 {
                self.projectiles.push(projectile);
            }
        }
    }

    fn apply_hit(&mut self, projectile: &Projectile, target: ActorId) {
        let Some(actor) = self.actors.get_mut(&target) else {
            return;
        };
        let kind = actor.kind();
        trace!(projectile = %projectile.id, %target, ?kind, shot = ?projectile.kind, "projectile hit");

        let push = match projectile.kind {
            ShotKind::Push => actor.is_pushable(),
            ShotKind::Bump => actor.health().is_some(),
            ShotKind::Bullet => false,
        };
        match projectile.kind {
            ShotKind::Push | ShotKind::Bump if push => {
                self.events.push(WorldEvent::PushRequested {
                    actor: target,
                    direction: projectile.direction,
                });
            }
            ShotKind::Bullet | ShotKind::Bump if kind.is_deferred_trigger() => {
                actor.arm_shot();
                debug!(actor = %target, "bumper armed");
            }
            ShotKind::Push | ShotKind::Bump => {}
            ShotKind::Bullet if kind.obstacle_class().contains(ObstacleClass::SHIELD) => {}
            ShotKind::Bullet => {
                let events = actor.take_damage(1);
                self.publish_health(target, events);
            }
        }
    }

    fn publish_health(&mut self, actor: ActorId, events: HealthEvents) {
        for event in events {
            match event {
                HealthEvent::Damaged(amount) => {
                    self.events.push(WorldEvent::Damaged { actor, amount })
                }
                HealthEvent::Died => self.events.push(WorldEvent::Died(actor)),
                HealthEvent::Revived => self.events.push(WorldEvent::Revived(actor)),
                HealthEvent::Changed(_) => {}
            }
        }
    }
}

impl BoundsOracle for InMemoryWorld {
    fn is_out_of_bounds(&self, position: Vec2) -> bool {
        self.bounds.is_out_of_bounds(position)
    }
}

impl ObstacleOracle for InMemoryWorld {
    fn obstacle_at(&self, position: Vec2, excluding: ActorId) -> Option<ActorId> {
        self.actors
            .values()
            .filter(|actor| actor.id() != excluding && actor.is_blocking())
            .map(|actor| (actor.id(), actor.position().distance(position)))
            .filter(|(_, distance)| *distance <= self.probe_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(id, _)| id)
    }
}

impl KineticOracle for InMemoryWorld {
    fn has_active_projectiles(&self) -> bool {
        !self.projectiles.is_empty()
    }
}

impl TriggerSource for InMemoryWorld {
    fn pending_triggers(&self) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|actor| actor.is_shot_armed())
            .map(Actor::id)
            .collect()
    }

    /// Fires an armed bumper's push round along the way it faces.
    fn execute_trigger(&mut self, actor: ActorId) -> bool {
        let Some(bumper) = self.actors.get_mut(&actor) else {
            return false;
        };
        if !bumper.disarm_shot() {
            return false;
        }
        let facing = bumper.transform.facing();
        self.fire(actor, facing, ShotKind::Bump).is_some()
    }
}

impl InputGate for InMemoryWorld {
    fn enable_firing(&mut self) {
        self.firing_enabled = true;
    }

    fn disable_firing(&mut self) {
        self.firing_enabled = false;
    }
}

impl ActorFactory for InMemoryWorld {
    fn create_actor(&mut self, kind: ActorKind, transform: Transform) -> Option<ActorId> {
        Some(self.spawn(kind, transform))
    }
}

impl ActorDirectory for InMemoryWorld {
    fn is_alive(&self, actor: ActorId) -> Option<bool> {
        self.actors.get(&actor).map(Actor::is_alive)
    }
}

impl SnapshotWorld for InMemoryWorld {
    fn occupants_near(&self, center: Vec2, radius: f32) -> Vec<Occupant> {
        let actors = self
            .actors
            .values()
            .filter(|actor| actor.position().distance(center) <= radius)
            .map(|actor| Occupant::actor(actor.id(), actor.kind()));
        let projectiles = self
            .projectiles
            .iter()
            .filter(|projectile| projectile.position.distance(center) <= radius)
            .map(|projectile| Occupant {
                id: projectile.id,
                class: OccupantClass::Projectile,
            });
        actors.chain(projectiles).collect()
    }

    fn position_of(&self, actor: ActorId) -> Option<Vec2> {
        self.actors.get(&actor).map(Actor::position)
    }

    fn capture(&self, actor: ActorId) -> Option<ActorRecord> {
        let actor = self.actors.get(&actor)?;
        Some(
            ActorRecord::new(actor.kind(), actor.transform)
                .with_health(actor.health_value())
                .with_flags(actor.capture_flags()),
        )
    }

    fn apply_record(&mut self, id: ActorId, record: &ActorRecord) {
        let Some(actor) = self.actors.get_mut(&id) else {
            return;
        };
        actor.transform = record.transform;
        actor.apply_flags(&record.flags);
        actor.disarm_shot();
        let events = match record.health {
            Some(value) => actor.set_health(value),
            None => HealthEvents::new(),
        };
        self.publish_health(id, events);
    }

    fn destroy(&mut self, actor: ActorId) {
        if self.actors.remove(&actor).is_some() {
            debug!(%actor, "actor destroyed");
            self.events.push(WorldEvent::Destroyed(actor));
        }
    }
}
