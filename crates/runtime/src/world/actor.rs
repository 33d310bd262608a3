use glam::Vec2;
use hexfall_core::{
    Actor, ActorFlags, ActorId, ActorKind, Damageable, DecoyTarget, FlagCarrier, HexCoord, Health,
    ObstacleClass, Reviveable, Transform,
};

/// Actor as stored by the in-memory world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldActor {
    id: ActorId,
    kind: ActorKind,
    pub transform: Transform,
    health: Option<Health>,
    decoy_susceptible: bool,
    restore_cells: Vec<HexCoord>,
    /// Bumpers: a hit armed a shot for the next chain wave.
    shot_armed: bool,
}

impl WorldActor {
    pub fn new(id: ActorId, kind: ActorKind, transform: Transform) -> Self {
        Self {
            id,
            kind,
            transform,
            health: kind
                .default_health()
                .map(|(current, maximum)| Health::new(current, maximum)),
            decoy_susceptible: false,
            restore_cells: Vec::new(),
            shot_armed: false,
        }
    }

    /// Whether the actor currently stops pushes and projectiles.
    ///
    /// Dead characters stay in the world as corpses but block nothing.
    pub fn is_blocking(&self) -> bool {
        self.health.is_none_or(|health| health.is_alive())
    }

    /// Whether a push round can move this actor.
    pub fn is_pushable(&self) -> bool {
        let class = self.kind.obstacle_class();
        class.intersects(ObstacleClass::CHARACTER | ObstacleClass::ROBOT)
            && !class.contains(ObstacleClass::SHIELD)
    }

    pub fn restore_cells(&self) -> &[HexCoord] {
        &self.restore_cells
    }

    pub fn is_shot_armed(&self) -> bool {
        self.shot_armed
    }

    pub(crate) fn arm_shot(&mut self) {
        self.shot_armed = true;
    }

    /// Clears the armed shot, returning whether one was pending.
    pub(crate) fn disarm_shot(&mut self) -> bool {
        std::mem::take(&mut self.shot_armed)
    }

    /// Replaces the starting health, raising the maximum when `value` exceeds it.
    pub(crate) fn override_health(&mut self, value: u32) {
        if let Some(health) = &mut self.health {
            *health = Health::new(value, value.max(health.maximum()));
        }
    }
}

impl Actor for WorldActor {
    fn id(&self) -> ActorId {
        self.id
    }

    fn kind(&self) -> ActorKind {
        self.kind
    }

    fn position(&self) -> Vec2 {
        self.transform.position
    }

    fn is_alive(&self) -> bool {
        self.health.is_none_or(|health| health.is_alive())
    }

    fn health_value(&self) -> Option<u32> {
        self.health.map(|health| health.current())
    }
}

impl Damageable for WorldActor {
    fn health(&self) -> Option<&Health> {
        self.health.as_ref()
    }

    fn health_mut(&mut self) -> Option<&mut Health> {
        self.health.as_mut()
    }
}

impl Reviveable for WorldActor {}

impl DecoyTarget for WorldActor {
    fn is_decoy_susceptible(&self) -> bool {
        self.decoy_susceptible
    }

    fn set_decoy_susceptible(&mut self, susceptible: bool) {
        self.decoy_susceptible = susceptible && self.kind.is_decoyable();
    }
}

impl FlagCarrier for WorldActor {
    fn capture_flags(&self) -> ActorFlags {
        ActorFlags::new()
            .with_decoy_susceptible(self.decoy_susceptible)
            .with_restore_cells(self.restore_cells.clone())
    }

    fn apply_flags(&mut self, flags: &ActorFlags) {
        self.set_decoy_susceptible(flags.decoy_susceptible);
        self.restore_cells = flags.restore_cells.clone();
    }
}
