use std::collections::{BTreeMap, BTreeSet};

use crate::actor::{ActorId, Role};
use crate::error::{ErrorSeverity, GameError};

/// Informational results of registry operations. Never returned as `Err`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryNotice {
    #[error("actor {0} is already registered")]
    DuplicateRegistration(ActorId),
}

impl GameError for RegistryNotice {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateRegistration(_) => "REGISTRY_DUPLICATE",
        }
    }
}

/// Live and ever-registered actor sets.
///
/// The ever-registered map doubles as the death-notification subscription
/// list: an actor stays in it across death so a revival is recognised as the
/// same entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActorRegistry {
    ever: BTreeMap<ActorId, Role>,
    live: BTreeSet<ActorId>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `actor`; repeat registrations only refresh liveness.
    pub fn register(&mut self, actor: ActorId, role: Role, alive: bool) -> Option<RegistryNotice> {
        let notice = if self.ever.insert(actor, role).is_some() {
            Some(RegistryNotice::DuplicateRegistration(actor))
        } else {
            None
        };
        if alive {
            self.live.insert(actor);
        }
        notice
    }

    /// Forgets `actor` entirely. Returns `false` when it was never registered.
    pub fn unregister(&mut self, actor: ActorId) -> bool {
        self.live.remove(&actor);
        self.ever.remove(&actor).is_some()
    }

    /// Drops `actor` from the live set only.
    pub fn mark_dead(&mut self, actor: ActorId) -> bool {
        self.live.remove(&actor)
    }

    /// Returns `false` when `actor` was never registered.
    pub fn mark_alive(&mut self, actor: ActorId) -> bool {
        if !self.ever.contains_key(&actor) {
            return false;
        }
        self.live.insert(actor);
        true
    }

    pub fn is_registered(&self, actor: ActorId) -> bool {
        self.ever.contains_key(&actor)
    }

    pub fn is_live(&self, actor: ActorId) -> bool {
        self.live.contains(&actor)
    }

    pub fn role_of(&self, actor: ActorId) -> Option<Role> {
        self.ever.get(&actor).copied()
    }

    /// Every registered actor with `role`, dead or alive.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = ActorId> + '_ {
        self.ever
            .iter()
            .filter(move |(_, r)| **r == role)
            .map(|(id, _)| *id)
    }

    pub fn live_with_role(&self, role: Role) -> usize {
        self.with_role(role).filter(|id| self.live.contains(id)).count()
    }

    pub fn registered(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.ever.keys().copied()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn clear(&mut self) {
        self.ever.clear();
        self.live.clear();
    }
}
