use arrayvec::ArrayVec;

/// Notification produced by a health mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthEvent {
    Damaged(u32),
    Changed(u32),
    Died,
    Revived,
}

/// Events emitted by a single mutation, in the order they happened.
pub type HealthEvents = ArrayVec<HealthEvent, 4>;

/// Hit points with death and revival semantics.
///
/// Mutations never publish anything themselves; they return the events they
/// produced so the owning actor can forward them to its observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    maximum: u32,
    dead: bool,
    permanently_dead: bool,
}

impl Health {
    pub fn new(current: u32, maximum: u32) -> Self {
        let maximum = maximum.max(1);
        let current = current.min(maximum);
        Self {
            current,
            maximum,
            dead: current == 0,
            permanently_dead: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_permanently_dead(&self) -> bool {
        self.permanently_dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && !self.permanently_dead
    }

    /// Reduces health, dying at zero. Dead actors ignore damage.
    pub fn take_damage(&mut self, amount: u32) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.permanently_dead || self.dead {
            return events;
        }

        self.current = self.current.saturating_sub(amount);
        events.push(HealthEvent::Changed(self.current));
        events.push(HealthEvent::Damaged(amount));

        if self.current == 0 {
            events.extend(self.die());
        }
        events
    }

    /// Heals up to the maximum. A dead actor is revived to 1 HP instead.
    pub fn heal(&mut self, amount: u32) -> HealthEvents {
        if self.permanently_dead {
            return HealthEvents::new();
        }
        if self.dead {
            return self.revive();
        }

        let mut events = HealthEvents::new();
        let healed = self.current.saturating_add(amount).min(self.maximum);
        if healed != self.current {
            self.current = healed;
            events.push(HealthEvent::Changed(healed));
        }
        events
    }

    /// Sets health directly, clamped to `[0, maximum]`.
    ///
    /// Dropping to zero kills; raising a dead actor above zero revives it at
    /// the requested value.
    pub fn set_health(&mut self, value: u32) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.permanently_dead {
            return events;
        }

        let value = value.min(self.maximum);
        if value != self.current {
            self.current = value;
            events.push(HealthEvent::Changed(value));
        }

        if self.current == 0 && !self.dead {
            events.extend(self.die());
        } else if self.current > 0 && self.dead {
            self.dead = false;
            events.push(HealthEvent::Revived);
        }
        events
    }

    pub fn die(&mut self) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.dead {
            return events;
        }
        self.dead = true;
        self.current = 0;
        events.push(HealthEvent::Died);
        events
    }

    /// Brings a dead actor back with 1 HP.
    pub fn revive(&mut self) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.permanently_dead || !self.dead {
            return events;
        }
        self.dead = false;
        self.current = 1;
        events.push(HealthEvent::Revived);
        events.push(HealthEvent::Changed(1));
        events
    }

    pub fn permanent_kill(&mut self) -> HealthEvents {
        let was_dead = self.dead;
        self.permanently_dead = true;
        self.dead = true;
        self.current = 0;
        let mut events = HealthEvents::new();
        if !was_dead {
            events.push(HealthEvent::Died);
        }
        events
    }
}
