use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::GameConfig;
use crate::actor::{Actor, ActorId, Role};
use crate::env::ActorDirectory;
use crate::observer::{Observers, SubscriptionId};
use crate::turn::{TurnListener, TurnReport};

use super::{ActorRegistry, RegistryNotice};

/// Why a match was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoseReason {
    /// Every shot used while hostiles are still standing.
    AmmunitionExhausted,
    ProtagonistDied,
    /// A hostage stayed dead past its grace turns.
    HostageLost { actor: ActorId, death_turn: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    Won,
    Lost(LoseReason),
}

/// Published to match observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    AmmunitionChanged { remaining: u32 },
    TurnChanged { turn: u32 },
    Won,
    Lost { reason: LoseReason },
}

/// Ammunition, turn counter, actor registry, and the single terminal outcome.
///
/// Once an outcome is set the state is append-only: ammunition stops being
/// consumed and no further win/lose evaluation happens.
#[derive(Debug)]
pub struct MatchState {
    registry: ActorRegistry,
    /// Turn on which each currently dead hostage died.
    hostage_deaths: BTreeMap<ActorId, u32>,
    current_turn: u32,
    ammunition_used: u32,
    ammunition_available: u32,
    hostage_grace_turns: u32,
    outcome: Option<MatchOutcome>,
    observers: Observers<MatchEvent>,
}

impl MatchState {
    pub fn new(ammunition: u32, hostage_grace_turns: u32) -> Self {
        Self {
            registry: ActorRegistry::new(),
            hostage_deaths: BTreeMap::new(),
            current_turn: 0,
            ammunition_used: 0,
            ammunition_available: ammunition,
            hostage_grace_turns,
            outcome: None,
            observers: Observers::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.ammunition, config.hostage_grace_turns)
    }

    // ===== observers =====

    pub fn subscribe(&mut self, callback: impl FnMut(&MatchEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ===== queries =====

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn ammunition_used(&self) -> u32 {
        self.ammunition_used
    }

    pub fn ammunition_available(&self) -> u32 {
        self.ammunition_available
    }

    pub fn remaining_ammunition(&self) -> u32 {
        self.ammunition_available.saturating_sub(self.ammunition_used)
    }

    pub fn alive_hostiles(&self) -> usize {
        self.registry.live_with_role(Role::Hostile)
    }

    pub fn hostage_death_turn(&self, actor: ActorId) -> Option<u32> {
        self.hostage_deaths.get(&actor).copied()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    // ===== lifecycle =====

    /// Announces the starting ammunition and turn, then runs the initial outcome check.
    ///
    /// Call after the level's actors are registered; an empty registry wins immediately.
    pub fn begin(&mut self) -> Option<MatchOutcome> {
        self.observers.notify(&MatchEvent::AmmunitionChanged {
            remaining: self.remaining_ammunition(),
        });
        self.observers.notify(&MatchEvent::TurnChanged {
            turn: self.current_turn,
        });
        self.evaluate_outcome()
    }

    /// Clears everything except observers, ready for the level to be repopulated.
    pub fn restart(&mut self, ammunition: u32) {
        self.registry.clear();
        self.hostage_deaths.clear();
        self.current_turn = 0;
        self.ammunition_used = 0;
        self.ammunition_available = ammunition;
        self.outcome = None;
        debug!(ammunition, "match state restarted");
    }

    /// Uses one shot. Returns `false` without effect once the match has ended.
    pub fn consume_ammunition(&mut self) -> bool {
        if self.is_ended() {
            debug!("ammunition not consumed: match already ended");
            return false;
        }
        self.ammunition_used += 1;
        self.observers.notify(&MatchEvent::AmmunitionChanged {
            remaining: self.remaining_ammunition(),
        });
        true
    }

    /// Advances the turn counter and evaluates the outcome.
    pub fn complete_turn(&mut self) -> Option<MatchOutcome> {
        self.current_turn += 1;
        debug!(turn = self.current_turn, "turn counter advanced");
        self.observers.notify(&MatchEvent::TurnChanged {
            turn: self.current_turn,
        });
        self.evaluate_outcome()
    }

    // ===== registry =====

    pub fn register_actor(&mut self, actor: &dyn Actor) -> Option<RegistryNotice> {
        let id = actor.id();
        let notice = self.registry.register(id, actor.role(), actor.is_alive());
        if actor.is_alive() {
            self.hostage_deaths.remove(&id);
        }
        match notice {
            Some(notice) => debug!(%notice, "registration refreshed"),
            None => debug!(actor = %id, role = ?actor.role(), "actor registered"),
        }
        notice
    }

    pub fn unregister_actor(&mut self, actor: ActorId) -> bool {
        self.hostage_deaths.remove(&actor);
        self.registry.unregister(actor)
    }

    /// Drops `actor` from the live set and starts a hostage's grace countdown.
    pub fn on_actor_died(&mut self, actor: ActorId) {
        if !self.registry.is_registered(actor) {
            return;
        }
        self.registry.mark_dead(actor);
        if self.registry.role_of(actor) == Some(Role::Hostage) {
            let turn = self.current_turn;
            self.hostage_deaths.entry(actor).or_insert(turn);
            debug!(%actor, turn, "hostage died");
        }
    }

    /// Re-adds a registered actor that reports itself alive again.
    pub fn on_actor_revived(&mut self, actor: &dyn Actor) -> bool {
        let id = actor.id();
        if !actor.is_alive() || !self.registry.mark_alive(id) {
            return false;
        }
        self.hostage_deaths.remove(&id);
        true
    }

    /// Rebuilds liveness from the world after actors were destroyed or respawned wholesale.
    pub fn reconcile(&mut self, directory: &dyn ActorDirectory) {
        let registered: Vec<ActorId> = self.registry.registered().collect();
        let mut removed = 0usize;
        for id in registered {
            match directory.is_alive(id) {
                None => {
                    self.unregister_actor(id);
                    removed += 1;
                }
                Some(true) => {
                    self.registry.mark_alive(id);
                    self.hostage_deaths.remove(&id);
                }
                Some(false) => self.on_actor_died(id),
            }
        }
        debug!(
            removed,
            live = self.registry.live_count(),
            hostiles = self.alive_hostiles(),
            "registry reconciled"
        );
    }

    // ===== outcome =====

    /// Applies the first matching terminal condition. No-op after the match has ended.
    pub fn evaluate_outcome(&mut self) -> Option<MatchOutcome> {
        if self.is_ended() {
            return None;
        }
        let outcome = self.lose_reason().map(MatchOutcome::Lost).or_else(|| {
            self.is_won().then_some(MatchOutcome::Won)
        })?;
        self.conclude(outcome);
        Some(outcome)
    }

    /// Sets the outcome directly. Ignored once ended.
    pub fn force_outcome(&mut self, outcome: MatchOutcome) -> bool {
        if self.is_ended() {
            return false;
        }
        warn!(?outcome, "match outcome forced");
        self.conclude(outcome);
        true
    }

    fn lose_reason(&self) -> Option<LoseReason> {
        if self.ammunition_used >= self.ammunition_available && self.alive_hostiles() > 0 {
            return Some(LoseReason::AmmunitionExhausted);
        }

        let protagonist_dead = self
            .registry
            .with_role(Role::Protagonist)
            .any(|id| !self.registry.is_live(id));
        if protagonist_dead {
            return Some(LoseReason::ProtagonistDied);
        }

        self.hostage_deaths
            .iter()
            .find(|(_, death_turn)| self.current_turn >= **death_turn + self.hostage_grace_turns)
            .map(|(actor, death_turn)| LoseReason::HostageLost {
                actor: *actor,
                death_turn: *death_turn,
            })
    }

    fn is_won(&self) -> bool {
        let everyone_alive = |role| {
            self.registry
                .with_role(role)
                .all(|id| self.registry.is_live(id))
        };
        self.alive_hostiles() == 0
            && everyone_alive(Role::Protagonist)
            && everyone_alive(Role::Hostage)
    }

    fn conclude(&mut self, outcome: MatchOutcome) {
        self.outcome = Some(outcome);
        match outcome {
            MatchOutcome::Won => {
                info!(turn = self.current_turn, "match won");
                self.observers.notify(&MatchEvent::Won);
            }
            MatchOutcome::Lost(reason) => {
                info!(turn = self.current_turn, ?reason, "match lost");
                self.observers.notify(&MatchEvent::Lost { reason });
            }
        }
    }
}

impl TurnListener for MatchState {
    fn on_turn_completed(&mut self, _report: &TurnReport) {
        self.complete_turn();
    }
}
