//! End-to-end turn scenarios driven through [`Level`].
//!
//! Every test builds a small board, fires from the protagonist, and ticks the
//! level until the turn controller reports completion.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use hexfall_core::{
    Actor, ActorKind, ActorPlacement, EnemyKind, GameConfig, HexCoord, LevelDefinition,
    LoseReason, MatchEvent, MatchOutcome, RobotKind, TurnPhase, TurnReport,
};
use hexfall_runtime::{FireError, Level, ShotKind};

const DT: Duration = Duration::from_millis(100);
const MAX_TICKS: u32 = 500;

fn enemy(q: i32, r: i32) -> ActorPlacement {
    ActorPlacement::new(ActorKind::Enemy(EnemyKind::Basic), q, r)
}

fn player() -> ActorPlacement {
    ActorPlacement::new(ActorKind::Player, 0, 0)
}

fn build(definition: LevelDefinition) -> Level {
    Level::new(definition, &GameConfig::default()).expect("level should build")
}

/// Fires at `target` and runs the turn to completion.
fn play(level: &mut Level, kind: ShotKind, target: HexCoord) -> TurnReport {
    let direction = level.aim_at(target).expect("target differs from shooter");
    level.fire(kind, direction).expect("shot should be accepted");
    level
        .run_until_idle(DT, MAX_TICKS)
        .expect("turn should complete within the tick budget")
}

#[test]
fn killing_the_last_hostile_with_the_last_shot_wins() {
    let mut level = build(
        LevelDefinition::new("win")
            .with_ammunition(1)
            .with_actor(player())
            .with_actor(enemy(3, 0)),
    );

    let report = play(&mut level, ShotKind::Bullet, HexCoord::new(3, 0));

    assert_eq!(report.waves, 0);
    assert!(report.anomaly.is_none());
    assert_eq!(level.state().outcome(), Some(MatchOutcome::Won));
    assert_eq!(level.state().current_turn(), 1);
    assert_eq!(level.turn_phase(), TurnPhase::Idle);
    assert_eq!(
        level.fire(ShotKind::Bullet, Vec2::Y),
        Err(FireError::MatchEnded)
    );
}

#[test]
fn missing_with_the_last_shot_loses_on_ammunition() {
    let mut level = build(
        LevelDefinition::new("miss")
            .with_ammunition(1)
            .with_actor(player())
            .with_actor(enemy(3, 0)),
    );

    play(&mut level, ShotKind::Bullet, HexCoord::new(-3, 0));

    assert_eq!(
        level.state().outcome(),
        Some(MatchOutcome::Lost(LoseReason::AmmunitionExhausted))
    );
    assert_eq!(level.state().alive_hostiles(), 1);
}

#[test]
fn push_round_slides_target_until_the_wall() {
    let mut level = build(
        LevelDefinition::new("push")
            .with_ammunition(3)
            .with_actor(player())
            .with_actor(enemy(2, 0))
            .with_actor(ActorPlacement::new(ActorKind::Wall, 6, 0)),
    );
    let target = level
        .grid()
        .occupant(HexCoord::new(2, 0))
        .expect("enemy occupies its cell");

    play(&mut level, ShotKind::Push, HexCoord::new(2, 0));

    assert_eq!(level.grid().find(target), Some(HexCoord::new(5, 0)));
    assert_eq!(level.grid().occupant(HexCoord::new(2, 0)), None);
    let actor = level.world().actor(target).expect("enemy still exists");
    assert!(actor.is_alive());
    assert!(!level.state().is_ended());
    assert_eq!(level.state().remaining_ammunition(), 2);
}

#[test]
fn pushing_a_hostile_off_the_board_destroys_it() {
    let mut level = build(
        LevelDefinition::new("edge")
            .with_ammunition(1)
            .with_actor(player())
            .with_actor(enemy(8, 0)),
    );
    let target = level
        .grid()
        .occupant(HexCoord::new(8, 0))
        .expect("enemy occupies its cell");

    play(&mut level, ShotKind::Push, HexCoord::new(8, 0));

    assert!(level.world().actor(target).is_none());
    assert!(!level.state().registry().is_registered(target));
    assert_eq!(level.state().outcome(), Some(MatchOutcome::Won));
}

fn bumper(q: i32, r: i32) -> ActorPlacement {
    // Unrotated bumpers face +y, straight along the r axis.
    ActorPlacement::new(ActorKind::Robot(RobotKind::Bumper), q, r)
}

#[test]
fn bumper_pushes_along_its_facing_in_a_chain_wave() {
    let mut level = build(
        LevelDefinition::new("bumper")
            .with_ammunition(2)
            .with_actor(player())
            .with_actor(bumper(3, 0))
            .with_actor(enemy(3, 2))
            .with_actor(ActorPlacement::new(ActorKind::Wall, 3, 5)),
    );
    let target = level
        .grid()
        .occupant(HexCoord::new(3, 2))
        .expect("enemy occupies its cell");

    let report = play(&mut level, ShotKind::Bullet, HexCoord::new(3, 0));

    assert_eq!(report.waves, 1);
    assert_eq!(report.triggers_fired, 1);
    assert!(!report.hit_wave_cap());
    assert_eq!(level.grid().find(target), Some(HexCoord::new(3, 4)));
    let pushed = level.world().actor(target).expect("enemy still exists");
    assert!(pushed.is_alive());
    assert_eq!(pushed.health_value(), Some(1));
    let shooter = level.protagonist().expect("player registered");
    assert!(level.world().actor(shooter).is_some_and(|actor| actor.is_alive()));
    assert!(!level.state().is_ended());
}

#[test]
fn bumper_hit_during_a_wave_fires_in_the_next_one() {
    let mut level = build(
        LevelDefinition::new("bumper chain")
            .with_ammunition(2)
            .with_actor(player())
            .with_actor(bumper(3, -3))
            .with_actor(bumper(3, 0))
            .with_actor(enemy(3, 2))
            .with_actor(ActorPlacement::new(ActorKind::Wall, 3, 5)),
    );
    let target = level
        .grid()
        .occupant(HexCoord::new(3, 2))
        .expect("enemy occupies its cell");

    let report = play(&mut level, ShotKind::Bullet, HexCoord::new(3, -3));

    assert_eq!(report.waves, 2);
    assert_eq!(report.triggers_fired, 2);
    assert!(!report.hit_wave_cap());
    assert!(report.anomaly.is_none());
    assert_eq!(level.grid().find(target), Some(HexCoord::new(3, 4)));
    assert_eq!(level.state().alive_hostiles(), 1);
    assert!(!level.state().is_ended());
}

#[test]
fn damaging_gaia_restores_its_cells() {
    let mut level = build(
        LevelDefinition::new("gaia")
            .with_ammunition(3)
            .with_actor(player())
            .with_actor(enemy(3, 0))
            .with_actor(enemy(-3, 3))
            .with_actor(
                ActorPlacement::new(ActorKind::Gaia, 0, 2)
                    .with_restore_cells(vec![HexCoord::new(3, 0)]),
            ),
    );
    let victim = level
        .grid()
        .occupant(HexCoord::new(3, 0))
        .expect("enemy occupies its cell");

    play(&mut level, ShotKind::Bullet, HexCoord::new(3, 0));
    assert_eq!(level.state().alive_hostiles(), 1);
    assert_eq!(level.grid().occupant(HexCoord::new(3, 0)), None);

    play(&mut level, ShotKind::Bullet, HexCoord::new(0, 2));

    let revived = level.world().actor(victim).expect("corpse was reused");
    assert!(revived.is_alive());
    assert_eq!(level.state().alive_hostiles(), 2);
    assert_eq!(level.grid().occupant(HexCoord::new(3, 0)), Some(victim));
    assert_eq!(level.state().current_turn(), 2);
    assert!(!level.state().is_ended());
}

#[test]
fn reset_aborts_a_turn_and_keeps_subscribers() {
    let mut level = build(
        LevelDefinition::new("reset")
            .with_ammunition(2)
            .with_actor(player())
            .with_actor(enemy(3, 0))
            .with_actor(ActorPlacement::new(ActorKind::Wall, -2, 1)),
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    level
        .state_mut()
        .subscribe(move |event| sink.borrow_mut().push(*event));

    let direction = level.aim_at(HexCoord::new(3, 0)).unwrap();
    level.fire(ShotKind::Bullet, direction).unwrap();
    level.tick(DT);
    assert!(level.is_turn_active());

    level.reset().expect("reset should rebuild the level");

    assert_eq!(level.turn_phase(), TurnPhase::Idle);
    assert!(level.world().is_firing_enabled());
    assert!(level.world().projectiles().is_empty());
    assert_eq!(level.world().actors().count(), 3);
    assert_eq!(level.state().remaining_ammunition(), 2);
    assert_eq!(level.state().current_turn(), 0);
    assert!(
        events
            .borrow()
            .contains(&MatchEvent::AmmunitionChanged { remaining: 2 })
    );
}

#[test]
fn restoring_an_untouched_board_changes_nothing() {
    let mut level = build(
        LevelDefinition::new("idempotent")
            .with_actor(player())
            .with_actor(enemy(3, 0))
            .with_actor(ActorPlacement::new(ActorKind::Hay, -1, -2))
            .with_actor(ActorPlacement::new(ActorKind::Robot(RobotKind::Standard), 2, 2)),
    );
    let cells: Vec<HexCoord> = level
        .definition()
        .actors
        .iter()
        .map(ActorPlacement::coord)
        .collect();
    let before: Vec<_> = level.world().actors().cloned().collect();

    let report = level.restore(&cells, Vec2::ZERO);

    assert!(report.is_clean());
    assert!(report.spawned.is_empty());
    assert!(report.destroyed.is_empty());
    assert_eq!(report.updated.len(), cells.len());
    let after: Vec<_> = level.world().actors().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn bundled_demo_level_plays_a_turn() {
    let base = GameConfig::default();
    let definition = hexfall_content::LevelLoader::demo(&base).expect("demo level loads");
    let mut level = Level::new(definition, &base).expect("demo level builds");
    assert_eq!(level.state().remaining_ammunition(), 6);

    let report = play(&mut level, ShotKind::Bullet, HexCoord::new(4, 0));

    assert!(report.anomaly.is_none());
    assert_eq!(level.state().current_turn(), 1);
    assert_eq!(level.state().remaining_ammunition(), 5);
}
