//! Turn lifecycle: settle detection and bounded chain-reaction waves.
//!
//! The controller never blocks. The owner calls [`TurnController::tick`] once
//! per frame with the elapsed time and the controller advances its phase,
//! polling the world's kinetic predicate at a fixed interval.
mod report;

pub use report::{TurnAnomaly, TurnListener, TurnReport};

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::GameConfig;
use crate::actor::ActorId;
use crate::env::{InputGate, TurnWorld};
use crate::error::GameError;

/// Where the current turn is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    #[default]
    Idle,
    /// Waiting for every projectile to come to rest.
    AwaitingSettle,
    /// Firing the next wave of deferred triggers.
    ResolvingChain,
    /// Settled; waiting out the grace delay before notifying listeners.
    Complete,
}

impl TurnPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::AwaitingSettle => "awaiting_settle",
            TurnPhase::ResolvingChain => "resolving_chain",
            TurnPhase::Complete => "complete",
        }
    }
}

/// Tick-driven turn state machine.
#[derive(Clone, Debug)]
pub struct TurnController {
    phase: TurnPhase,
    poll_interval: Duration,
    grace: Duration,
    wave_cap: u32,

    until_poll: Duration,
    grace_remaining: Duration,
    waves: u32,
    triggers_fired: u32,
    anomaly: Option<TurnAnomaly>,
    elapsed: Duration,
}

impl TurnController {
    pub fn new(poll_interval: Duration, grace: Duration, wave_cap: u32) -> Self {
        Self {
            phase: TurnPhase::Idle,
            poll_interval,
            grace,
            wave_cap,
            until_poll: Duration::ZERO,
            grace_remaining: Duration::ZERO,
            waves: 0,
            triggers_fired: 0,
            anomaly: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.settle_poll_interval(),
            config.post_settle_grace(),
            config.chain_wave_cap,
        )
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_turn_active(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    pub fn wave_cap(&self) -> u32 {
        self.wave_cap
    }

    /// Waves fired so far in the current turn.
    pub fn waves(&self) -> u32 {
        self.waves
    }

    /// Begins a turn and closes the input gate.
    ///
    /// Returns `false` and does nothing when a turn is already in progress.
    pub fn start_turn<G: InputGate + ?Sized>(&mut self, gate: &mut G) -> bool {
        if self.phase != TurnPhase::Idle {
            debug!(phase = self.phase.as_str(), "start_turn ignored: turn in progress");
            return false;
        }

        self.clear_progress();
        self.phase = TurnPhase::AwaitingSettle;
        gate.disable_firing();
        info!("turn started");
        true
    }

    /// Drops any in-flight turn without notifying anyone.
    pub fn reset(&mut self) {
        if self.phase != TurnPhase::Idle {
            debug!(phase = self.phase.as_str(), "turn aborted by reset");
        }
        self.phase = TurnPhase::Idle;
        self.clear_progress();
    }

    /// Advances the state machine by `dt`.
    ///
    /// Returns the report on the tick the turn completes; the listener has
    /// already been notified and the input gate reopened by then.
    pub fn tick<W, L>(&mut self, dt: Duration, world: &mut W, listener: &mut L) -> Option<TurnReport>
    where
        W: TurnWorld + ?Sized,
        L: TurnListener + ?Sized,
    {
        if self.phase == TurnPhase::Idle {
            return None;
        }

        self.elapsed += dt;
        self.until_poll = self.until_poll.saturating_sub(dt);
        self.grace_remaining = self.grace_remaining.saturating_sub(dt);

        loop {
            match self.phase {
                TurnPhase::Idle => return None,
                TurnPhase::AwaitingSettle => {
                    if !self.until_poll.is_zero() {
                        return None;
                    }
                    if world.has_active_projectiles() {
                        self.until_poll = self.poll_interval;
                        return None;
                    }
                    self.phase = TurnPhase::ResolvingChain;
                }
                TurnPhase::ResolvingChain => {
                    let pending: BTreeSet<ActorId> = world.pending_triggers().into_iter().collect();
                    if pending.is_empty() {
                        self.enter_complete();
                        continue;
                    }
                    if self.waves >= self.wave_cap {
                        let anomaly = TurnAnomaly::ChainReactionCapExceeded {
                            cap: self.wave_cap,
                            pending: pending.len(),
                        };
                        warn!(%anomaly, code = anomaly.error_code(), "forcing turn completion");
                        self.anomaly = Some(anomaly);
                        self.enter_complete();
                        continue;
                    }

                    self.waves += 1;
                    let mut fired = 0;
                    for actor in pending {
                        if world.execute_trigger(actor) {
                            fired += 1;
                        }
                    }
                    self.triggers_fired += fired;
                    debug!(wave = self.waves, fired, "chain-reaction wave fired");

                    // Give new projectiles a chance to appear and settle before the next wave.
                    self.phase = TurnPhase::AwaitingSettle;
                    self.until_poll = Duration::ZERO;
                    return None;
                }
                TurnPhase::Complete => {
                    if !self.grace_remaining.is_zero() {
                        return None;
                    }
                    return Some(self.finish(world, listener));
                }
            }
        }
    }

    fn enter_complete(&mut self) {
        self.phase = TurnPhase::Complete;
        self.grace_remaining = self.grace;
    }

    fn finish<W, L>(&mut self, world: &mut W, listener: &mut L) -> TurnReport
    where
        W: TurnWorld + ?Sized,
        L: TurnListener + ?Sized,
    {
        let report = TurnReport {
            waves: self.waves,
            triggers_fired: self.triggers_fired,
            anomaly: self.anomaly.take(),
            elapsed: self.elapsed,
        };

        world.enable_firing();
        self.phase = TurnPhase::Idle;
        info!(
            waves = report.waves,
            triggers = report.triggers_fired,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "turn complete"
        );
        listener.on_turn_completed(&report);
        self.clear_progress();
        report
    }

    fn clear_progress(&mut self) {
        self.until_poll = Duration::ZERO;
        self.grace_remaining = Duration::ZERO;
        self.waves = 0;
        self.triggers_fired = 0;
        self.anomaly = None;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::env::{KineticOracle, TriggerSource};

    const FRAME: Duration = Duration::from_millis(100);

    #[derive(Default)]
    struct FakeWorld {
        projectiles: u32,
        pending: BTreeSet<ActorId>,
        /// Firing the key re-arms the value.
        rearms: BTreeMap<ActorId, ActorId>,
        trigger_spawns_projectile: bool,
        firing_enabled: bool,
        fired: Vec<ActorId>,
    }

    impl KineticOracle for FakeWorld {
        fn has_active_projectiles(&self) -> bool {
            self.projectiles > 0
        }
    }

    impl TriggerSource for FakeWorld {
        fn pending_triggers(&self) -> Vec<ActorId> {
            self.pending.iter().copied().collect()
        }

        fn execute_trigger(&mut self, actor: ActorId) -> bool {
            if !self.pending.remove(&actor) {
                return false;
            }
            self.fired.push(actor);
            if let Some(next) = self.rearms.get(&actor) {
                self.pending.insert(*next);
            }
            if self.trigger_spawns_projectile {
                self.projectiles += 1;
            }
            true
        }
    }

    impl InputGate for FakeWorld {
        fn enable_firing(&mut self) {
            self.firing_enabled = true;
        }

        fn disable_firing(&mut self) {
            self.firing_enabled = false;
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<TurnReport>);

    impl TurnListener for Recorder {
        fn on_turn_completed(&mut self, report: &TurnReport) {
            self.0.push(report.clone());
        }
    }

    fn controller() -> TurnController {
        TurnController::from_config(&GameConfig::default())
    }

    /// Ticks until the turn completes, letting one projectile land per frame.
    fn run(
        controller: &mut TurnController,
        world: &mut FakeWorld,
        listener: &mut Recorder,
        max_ticks: usize,
    ) -> Option<(TurnReport, usize)> {
        for tick in 1..=max_ticks {
            if let Some(report) = controller.tick(FRAME, world, listener) {
                return Some((report, tick));
            }
            world.projectiles = world.projectiles.saturating_sub(1);
        }
        None
    }

    #[test]
    fn start_turn_is_ignored_while_active() {
        let mut controller = controller();
        let mut world = FakeWorld {
            firing_enabled: true,
            ..Default::default()
        };

        assert!(controller.start_turn(&mut world));
        assert!(!world.firing_enabled);
        assert!(controller.is_turn_active());
        assert!(!controller.start_turn(&mut world));
        assert_eq!(controller.phase(), TurnPhase::AwaitingSettle);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut controller = controller();
        let mut world = FakeWorld::default();
        let mut listener = Recorder::default();
        assert!(controller.tick(FRAME, &mut world, &mut listener).is_none());
        assert!(listener.0.is_empty());
    }

    #[test]
    fn waits_for_projectiles_then_completes_after_grace() {
        let mut controller = controller();
        let mut world = FakeWorld {
            projectiles: 3,
            ..Default::default()
        };
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);

        let (report, ticks) = run(&mut controller, &mut world, &mut listener, 50).unwrap();
        // Three busy polls, one settling tick, then two grace ticks.
        assert_eq!(ticks, 6);
        assert_eq!(report.waves, 0);
        assert!(report.anomaly.is_none());
        assert!(world.firing_enabled);
        assert_eq!(listener.0, vec![report]);
        assert_eq!(controller.phase(), TurnPhase::Idle);
    }

    #[test]
    fn listener_is_not_notified_before_grace_elapses() {
        let mut controller = controller();
        let mut world = FakeWorld::default();
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);

        assert!(controller.tick(FRAME, &mut world, &mut listener).is_none());
        assert_eq!(controller.phase(), TurnPhase::Complete);
        assert!(controller.tick(FRAME, &mut world, &mut listener).is_none());
        assert!(listener.0.is_empty());
        assert!(controller.tick(FRAME, &mut world, &mut listener).is_some());
        assert_eq!(listener.0.len(), 1);
    }

    #[test]
    fn each_pending_trigger_fires_once_per_wave() {
        let mut controller = controller();
        let mut world = FakeWorld {
            pending: [ActorId(3), ActorId(1), ActorId(2)].into_iter().collect(),
            trigger_spawns_projectile: true,
            ..Default::default()
        };
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);

        let (report, _) = run(&mut controller, &mut world, &mut listener, 50).unwrap();
        assert_eq!(report.waves, 1);
        assert_eq!(report.triggers_fired, 3);
        assert_eq!(world.fired, vec![ActorId(1), ActorId(2), ActorId(3)]);
    }

    #[test]
    fn next_wave_waits_for_previous_wave_to_settle() {
        let mut controller = controller();
        let mut world = FakeWorld {
            pending: [ActorId(1)].into_iter().collect(),
            rearms: [(ActorId(1), ActorId(2))].into_iter().collect(),
            trigger_spawns_projectile: true,
            ..Default::default()
        };
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);

        // Wave 1 fires on the first tick and spawns a projectile.
        controller.tick(FRAME, &mut world, &mut listener);
        assert_eq!(controller.waves(), 1);
        assert_eq!(world.projectiles, 1);

        // The projectile is still in flight, so wave 2 must not start.
        controller.tick(FRAME, &mut world, &mut listener);
        assert_eq!(controller.waves(), 1);
        assert_eq!(world.fired, vec![ActorId(1)]);

        let (report, _) = run(&mut controller, &mut world, &mut listener, 50).unwrap();
        assert_eq!(report.waves, 2);
        assert_eq!(world.fired, vec![ActorId(1), ActorId(2)]);
    }

    #[test]
    fn mutually_retriggering_actors_stop_at_the_wave_cap() {
        let mut controller = controller();
        let mut world = FakeWorld {
            pending: [ActorId(1)].into_iter().collect(),
            rearms: [(ActorId(1), ActorId(2)), (ActorId(2), ActorId(1))]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);

        let (report, _) = run(&mut controller, &mut world, &mut listener, 200).unwrap();
        assert_eq!(report.waves, GameConfig::DEFAULT_CHAIN_WAVE_CAP);
        assert_eq!(report.triggers_fired, GameConfig::DEFAULT_CHAIN_WAVE_CAP);
        assert_eq!(
            report.anomaly,
            Some(TurnAnomaly::ChainReactionCapExceeded {
                cap: GameConfig::DEFAULT_CHAIN_WAVE_CAP,
                pending: 1,
            })
        );
        assert!(report.hit_wave_cap());
        assert!(world.firing_enabled);
        assert_eq!(listener.0.len(), 1);
    }

    #[test]
    fn reset_aborts_without_notifying() {
        let mut controller = controller();
        let mut world = FakeWorld {
            projectiles: 10,
            ..Default::default()
        };
        let mut listener = Recorder::default();
        controller.start_turn(&mut world);
        controller.tick(FRAME, &mut world, &mut listener);

        controller.reset();
        assert!(!controller.is_turn_active());
        assert!(controller.tick(FRAME, &mut world, &mut listener).is_none());
        assert!(listener.0.is_empty());
        assert!(controller.start_turn(&mut world));
    }
}
