//! Greedy auto-player: every turn, shoot the nearest live hostile.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use hexfall_core::{Actor, GameError, HexCoord, Role};
use hexfall_runtime::{FireError, Level, RuntimeConfig, ShotKind};
use tracing::{info, warn};

use crate::summary::{SessionSummary, TurnSummary};

pub struct AutoPlayer {
    shot: ShotKind,
    tick: Duration,
    max_ticks: u32,
    max_turns: u32,
}

impl AutoPlayer {
    pub fn new(config: &RuntimeConfig, shot: ShotKind) -> Self {
        Self {
            shot,
            tick: config.tick,
            max_ticks: config.max_ticks_per_turn,
            max_turns: u32::MAX,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Plays until the match ends, ammunition runs out, or the turn limit is hit.
    pub fn play(&self, level: &mut Level) -> Result<SessionSummary> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = level
            .state_mut()
            .subscribe(move |event| sink.borrow_mut().push(*event));

        let mut turns = Vec::new();
        while !level.state().is_ended() && (turns.len() as u32) < self.max_turns {
            let Some(target) = nearest_hostile(level) else {
                warn!("no reachable hostile left to target");
                break;
            };
            let Some(direction) = level.aim_at(target) else {
                break;
            };

            match level.fire(self.shot, direction) {
                Ok(_) => {}
                Err(FireError::OutOfAmmunition) => break,
                Err(err) => {
                    warn!(code = err.error_code(), %err, "shot refused");
                    return Err(err.into());
                }
            }

            let report = level.run_until_idle(self.tick, self.max_ticks);
            let turn = level.state().current_turn();
            match &report {
                Some(report) => info!(
                    turn,
                    %target,
                    waves = report.waves,
                    triggers = report.triggers_fired,
                    "turn played"
                ),
                None => warn!(turn, %target, "turn did not settle"),
            }
            let settled = report.is_some();
            turns.push(TurnSummary {
                turn,
                target,
                report,
            });
            if !settled {
                break;
            }
        }

        level.state_mut().unsubscribe(subscription);
        let events = events.take();

        Ok(SessionSummary {
            level: level.definition().name.clone(),
            outcome: level.state().outcome(),
            turns_played: level.state().current_turn(),
            ammunition_remaining: level.state().remaining_ammunition(),
            turns,
            events,
        })
    }
}

/// Cell of the live hostile closest to the protagonist; ties go to the lowest id.
pub fn nearest_hostile(level: &Level) -> Option<HexCoord> {
    let layout = level.grid().layout();
    let shooter = level.world().actor(level.protagonist()?)?;
    let origin = layout.from_world(shooter.position());

    level
        .world()
        .actors()
        .filter(|actor| actor.role() == Role::Hostile && actor.is_alive())
        .map(|actor| (layout.from_world(actor.position()), actor.id()))
        .filter(|(cell, _)| *cell != origin)
        .min_by_key(|(cell, id)| (origin.distance(*cell), *id))
        .map(|(cell, _)| cell)
}
