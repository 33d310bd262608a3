use glam::Vec2;
use hexfall_core::ActorId;

/// Lifecycle notifications raised by the world and routed by the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldEvent {
    Spawned(ActorId),
    Damaged { actor: ActorId, amount: u32 },
    Died(ActorId),
    Revived(ActorId),
    Destroyed(ActorId),
    /// A push round hit `actor`; the level resolves and applies the displacement.
    PushRequested { actor: ActorId, direction: Vec2 },
}

impl WorldEvent {
    pub fn actor(&self) -> ActorId {
        match *self {
            WorldEvent::Spawned(actor)
            | WorldEvent::Died(actor)
            | WorldEvent::Revived(actor)
            | WorldEvent::Destroyed(actor)
            | WorldEvent::Damaged { actor, .. }
            | WorldEvent::PushRequested { actor, .. } => actor,
        }
    }
}
