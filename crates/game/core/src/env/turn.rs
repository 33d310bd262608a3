use crate::actor::ActorId;

/// Reports whether any projectile or other kinetic effect is still in flight.
pub trait KineticOracle {
    fn has_active_projectiles(&self) -> bool;
}

/// Actors holding a reaction to fire once the world settles.
pub trait TriggerSource {
    /// Actors with a pending trigger right now.
    fn pending_triggers(&self) -> Vec<ActorId>;

    /// Fires and clears `actor`'s pending trigger. Returns false when there was
    /// nothing to fire (destroyed since, or already cleared).
    fn execute_trigger(&mut self, actor: ActorId) -> bool;
}

/// Enables and disables the fire action while a turn resolves.
pub trait InputGate {
    fn enable_firing(&mut self);

    fn disable_firing(&mut self);
}

/// Everything the turn controller consults while resolving a turn.
pub trait TurnWorld: KineticOracle + TriggerSource + InputGate {}

impl<T> TurnWorld for T where T: KineticOracle + TriggerSource + InputGate + ?Sized {}
