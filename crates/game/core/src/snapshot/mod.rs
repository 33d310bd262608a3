//! Per-cell capture of actor state and reconciliation of the live world back to it.
mod record;
mod report;

pub use record::{ActorRecord, CellSnapshot, LevelSnapshot};
pub use report::{RestoreAnomaly, RestoreReport};

use std::collections::BTreeMap;

use glam::Vec2;
use tracing::{debug, info, warn};

use crate::GameConfig;
use crate::actor::{ActorId, ActorKind};
use crate::env::SnapshotWorld;
use crate::error::GameError;
use crate::hex::{HexCoord, HexGrid};

/// Live actor considered during a restore.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    kind: ActorKind,
    position: Vec2,
    processed: bool,
}

/// Owns the most recent [`LevelSnapshot`].
#[derive(Clone, Debug)]
pub struct LevelSnapshotStore {
    snapshot: Option<LevelSnapshot>,
    footprint_radius: f32,
    match_radius: f32,
}

impl LevelSnapshotStore {
    pub fn new(footprint_radius: f32, match_radius: f32) -> Self {
        Self {
            snapshot: None,
            footprint_radius,
            match_radius,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.footprint_radius(), config.restore_match_radius)
    }

    pub fn snapshot(&self) -> Option<&LevelSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }

    /// Captures every grid cell, replacing any previous snapshot.
    ///
    /// Returns the number of actor records taken.
    pub fn take_snapshot<W>(&mut self, grid: &HexGrid, world: &W) -> usize
    where
        W: SnapshotWorld + ?Sized,
    {
        let mut snapshot = LevelSnapshot::default();

        for cell in grid.cells() {
            let records = world
                .occupants_near(cell.center(), self.footprint_radius)
                .into_iter()
                .filter(|occupant| !occupant.class.is_transient())
                .filter_map(|occupant| world.capture(occupant.id))
                .collect();
            snapshot.insert(cell.coord(), CellSnapshot { records });
        }

        let count = snapshot.record_count();
        info!(records = count, cells = grid.len(), "level snapshot taken");
        self.snapshot = Some(snapshot);
        count
    }

    /// Reconciles the live actors in `coords` with the stored snapshot.
    ///
    /// Cells are processed nearest to `origin` first. Cells outside the grid or
    /// missing from the snapshot are reported and left as they are.
    pub fn restore_cells<W>(
        &self,
        coords: &[HexCoord],
        origin: Vec2,
        grid: &HexGrid,
        world: &mut W,
    ) -> RestoreReport
    where
        W: SnapshotWorld + ?Sized,
    {
        let mut report = RestoreReport::default();
        let origin_cell = grid.layout().from_world(origin);

        let mut ordered = coords.to_vec();
        ordered.sort_by_key(|coord| (coord.distance(origin_cell), *coord));
        ordered.dedup();

        // Resolve which cells can be restored at all.
        let mut cells: Vec<(HexCoord, Vec2, &CellSnapshot)> = Vec::with_capacity(ordered.len());
        for coord in ordered {
            let resolved = grid.cell(coord).zip(
                self.snapshot
                    .as_ref()
                    .and_then(|snapshot| snapshot.cell(coord)),
            );
            match resolved {
                Some((cell, recorded)) => cells.push((coord, cell.center(), recorded)),
                None => {
                    let anomaly = RestoreAnomaly::NoSnapshotForCell(coord);
                    warn!(%anomaly, code = anomaly.error_code(), "cell skipped during restore");
                    report.anomalies.push(anomaly);
                }
            }
        }

        // Everything currently standing in those cells must be accounted for.
        let mut live: BTreeMap<ActorId, Candidate> = BTreeMap::new();
        for (_, center, _) in &cells {
            for occupant in world.occupants_near(*center, self.footprint_radius) {
                let Some(kind) = occupant.class.kind() else {
                    continue;
                };
                let Some(position) = world.position_of(occupant.id) else {
                    continue;
                };
                live.entry(occupant.id).or_insert(Candidate {
                    kind,
                    position,
                    processed: false,
                });
            }
        }

        for (coord, _, recorded) in &cells {
            for record in &recorded.records {
                match self.claim(&mut live, *coord, record, &mut report) {
                    Some(actor) => {
                        world.apply_record(actor, record);
                        report.updated.push(actor);
                    }
                    None => match world.create_actor(record.kind, record.transform) {
                        Some(actor) => {
                            world.apply_record(actor, record);
                            report.spawned.push(actor);
                        }
                        None => {
                            let anomaly = RestoreAnomaly::SpawnFailed {
                                cell: *coord,
                                kind: record.kind,
                            };
                            warn!(%anomaly, code = anomaly.error_code(), "record could not be respawned");
                            report.anomalies.push(anomaly);
                        }
                    },
                }
            }
            report.restored_cells.push(*coord);
        }

        for (actor, candidate) in &live {
            if !candidate.processed {
                debug!(%actor, kind = ?candidate.kind, "destroying actor absent from snapshot");
                world.destroy(*actor);
                report.destroyed.push(*actor);
            }
        }

        info!(
            cells = report.restored_cells.len(),
            updated = report.updated.len(),
            spawned = report.spawned.len(),
            destroyed = report.destroyed.len(),
            anomalies = report.anomalies.len(),
            "cells restored"
        );
        report
    }

    /// Marks and returns the unprocessed live actor that best matches `record`.
    fn claim(
        &self,
        live: &mut BTreeMap<ActorId, Candidate>,
        cell: HexCoord,
        record: &ActorRecord,
        report: &mut RestoreReport,
    ) -> Option<ActorId> {
        let target = record.position();
        let matches: Vec<(ActorId, f32)> = live
            .iter()
            .filter(|(_, c)| !c.processed && c.kind == record.kind)
            .map(|(id, c)| (*id, c.position.distance(target)))
            .filter(|(_, distance)| *distance <= self.match_radius)
            .collect();

        let (chosen, _) = matches
            .iter()
            .copied()
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))?;

        if matches.len() > 1 {
            let anomaly = RestoreAnomaly::AmbiguousRestoreMatch {
                cell,
                kind: record.kind,
                candidates: matches.len(),
                chosen,
            };
            warn!(%anomaly, code = anomaly.error_code(), "overlapping actors at restore");
            report.anomalies.push(anomaly);
        }

        if let Some(candidate) = live.get_mut(&chosen) {
            candidate.processed = true;
        }
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorFlags, EnemyKind, Occupant, OccupantClass, Transform};
    use crate::env::ActorFactory;
    use crate::hex::HexLayout;

    #[derive(Clone, Debug, PartialEq)]
    struct Stored {
        kind: ActorKind,
        transform: Transform,
        health: Option<u32>,
        flags: ActorFlags,
    }

    #[derive(Default)]
    struct FakeWorld {
        next_id: u32,
        actors: BTreeMap<ActorId, Stored>,
        projectiles: Vec<(ActorId, Vec2)>,
        refuse_spawns: bool,
    }

    impl FakeWorld {
        fn add(&mut self, kind: ActorKind, position: Vec2, health: Option<u32>) -> ActorId {
            self.next_id += 1;
            let id = ActorId(self.next_id);
            self.actors.insert(
                id,
                Stored {
                    kind,
                    transform: Transform::at(position),
                    health,
                    flags: ActorFlags::default(),
                },
            );
            id
        }

        /// Comparable view that ignores ids.
        fn state(&self) -> Vec<(ActorKind, [i32; 2], Option<u32>)> {
            let mut state: Vec<_> = self
                .actors
                .values()
                .map(|a| {
                    let p = a.transform.position * 1000.0;
                    (a.kind, [p.x.round() as i32, p.y.round() as i32], a.health)
                })
                .collect();
            state.sort();
            state
        }
    }

    impl ActorFactory for FakeWorld {
        fn create_actor(&mut self, kind: ActorKind, transform: Transform) -> Option<ActorId> {
            if self.refuse_spawns {
                return None;
            }
            let id = self.add(kind, transform.position, None);
            if let Some(actor) = self.actors.get_mut(&id) {
                actor.transform = transform;
            }
            Some(id)
        }
    }

    impl SnapshotWorld for FakeWorld {
        fn occupants_near(&self, center: Vec2, radius: f32) -> Vec<Occupant> {
            let actors = self
                .actors
                .iter()
                .filter(|(_, a)| a.transform.position.distance(center) <= radius)
                .map(|(id, a)| Occupant::actor(*id, a.kind));
            let projectiles = self
                .projectiles
                .iter()
                .filter(|(_, p)| p.distance(center) <= radius)
                .map(|(id, _)| Occupant {
                    id: *id,
                    class: OccupantClass::Projectile,
                });
            actors.chain(projectiles).collect()
        }

        fn position_of(&self, actor: ActorId) -> Option<Vec2> {
            self.actors.get(&actor).map(|a| a.transform.position)
        }

        fn capture(&self, actor: ActorId) -> Option<ActorRecord> {
            let a = self.actors.get(&actor)?;
            Some(
                ActorRecord::new(a.kind, a.transform)
                    .with_health(a.health)
                    .with_flags(a.flags.clone()),
            )
        }

        fn apply_record(&mut self, actor: ActorId, record: &ActorRecord) {
            if let Some(a) = self.actors.get_mut(&actor) {
                a.transform = record.transform;
                a.health = record.health;
                a.flags = record.flags.clone();
            }
        }

        fn destroy(&mut self, actor: ActorId) {
            self.actors.remove(&actor);
        }
    }

    const ENEMY: ActorKind = ActorKind::Enemy(EnemyKind::Basic);

    fn fixture() -> (HexGrid, LevelSnapshotStore, FakeWorld) {
        let config = GameConfig::default();
        let grid = HexGrid::from_config(&config);
        let store = LevelSnapshotStore::from_config(&config);
        (grid, store, FakeWorld::default())
    }

    fn at(q: i32, r: i32) -> Vec2 {
        HexLayout::new(GameConfig::DEFAULT_HEX_SIZE).to_world(HexCoord::new(q, r))
    }

    fn all_cells(grid: &HexGrid) -> Vec<HexCoord> {
        grid.cells().map(|c| c.coord()).collect()
    }

    #[test]
    fn snapshot_skips_transient_occupants() {
        let (grid, mut store, mut world) = fixture();
        world.add(ENEMY, at(0, 0), Some(1));
        world.add(ActorKind::Wall, at(1, 0), None);
        world.projectiles.push((ActorId(500), at(2, 0)));

        assert_eq!(store.take_snapshot(&grid, &world), 2);
        let snapshot = store.snapshot().unwrap();
        assert!(snapshot.cell(HexCoord::new(2, 0)).unwrap().is_empty());
        assert_eq!(snapshot.cells().count(), grid.len());
    }

    #[test]
    fn immediate_restore_leaves_world_unchanged() {
        let (grid, mut store, mut world) = fixture();
        world.add(ENEMY, at(0, 0), Some(2));
        world.add(ActorKind::Hostage, at(-3, 2), Some(1));
        world.add(ActorKind::Wall, at(4, -1), None);
        let before = world.state();

        store.take_snapshot(&grid, &world);
        let report = store.restore_cells(&all_cells(&grid), Vec2::ZERO, &grid, &mut world);

        assert_eq!(world.state(), before);
        assert_eq!(report.updated.len(), 3);
        assert!(report.spawned.is_empty());
        assert!(report.destroyed.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn restore_respawns_destroyed_and_removes_newcomers() {
        let (grid, mut store, mut world) = fixture();
        let enemy = world.add(ENEMY, at(1, 1), Some(1));
        store.take_snapshot(&grid, &world);

        world.destroy(enemy);
        let newcomer = world.add(ActorKind::Hay, at(2, 1), None);
        let outside = world.add(ActorKind::Hay, at(-5, 0), None);

        let cells = [HexCoord::new(1, 1), HexCoord::new(2, 1)];
        let report = store.restore_cells(&cells, at(1, 1), &grid, &mut world);

        assert_eq!(report.spawned.len(), 1);
        assert_eq!(report.destroyed, vec![newcomer]);
        assert!(world.actors.contains_key(&outside));
        let spawned = &world.actors[&report.spawned[0]];
        assert_eq!(spawned.kind, ENEMY);
        assert_eq!(spawned.health, Some(1));
    }

    #[test]
    fn restore_heals_and_moves_back_nearby_actor() {
        let (grid, mut store, mut world) = fixture();
        let enemy = world.add(ENEMY, at(0, 0), Some(2));
        store.take_snapshot(&grid, &world);

        let actor = world.actors.get_mut(&enemy).unwrap();
        actor.health = Some(0);
        actor.transform.position += Vec2::new(0.1, 0.05);

        let report = store.restore_cells(&[HexCoord::ORIGIN], Vec2::ZERO, &grid, &mut world);
        assert_eq!(report.updated, vec![enemy]);
        assert_eq!(world.actors[&enemy].health, Some(2));
        assert_eq!(world.actors[&enemy].transform.position, at(0, 0));
    }

    #[test]
    fn matching_requires_equal_kind() {
        let (grid, mut store, mut world) = fixture();
        world.add(ActorKind::Enemy(EnemyKind::Medic), at(0, 0), Some(1));
        store.take_snapshot(&grid, &world);

        world.actors.clear();
        let imposter = world.add(ActorKind::Enemy(EnemyKind::Hunter), at(0, 0), Some(1));
        let report = store.restore_cells(&[HexCoord::ORIGIN], Vec2::ZERO, &grid, &mut world);

        assert_eq!(report.destroyed, vec![imposter]);
        assert_eq!(report.spawned.len(), 1);
        assert_eq!(
            world.actors[&report.spawned[0]].kind,
            ActorKind::Enemy(EnemyKind::Medic)
        );
    }

    #[test]
    fn ambiguous_match_picks_nearest_and_reports() {
        let (grid, mut store, mut world) = fixture();
        world.add(ENEMY, at(0, 0), Some(1));
        store.take_snapshot(&grid, &world);

        world.actors.clear();
        let far = world.add(ENEMY, at(0, 0) + Vec2::new(0.15, 0.0), Some(1));
        let near = world.add(ENEMY, at(0, 0) + Vec2::new(0.05, 0.0), Some(1));

        let report = store.restore_cells(&[HexCoord::ORIGIN], Vec2::ZERO, &grid, &mut world);
        assert_eq!(report.updated, vec![near]);
        assert_eq!(report.destroyed, vec![far]);
        assert!(matches!(
            report.anomalies.as_slice(),
            [RestoreAnomaly::AmbiguousRestoreMatch { candidates: 2, chosen, .. }] if *chosen == near
        ));
    }

    #[test]
    fn missing_snapshot_leaves_cells_untouched() {
        let (grid, store, mut world) = fixture();
        let enemy = world.add(ENEMY, at(0, 0), Some(1));

        let outside = HexCoord::new(30, 0);
        let report = store.restore_cells(&[HexCoord::ORIGIN, outside], Vec2::ZERO, &grid, &mut world);

        assert!(world.actors.contains_key(&enemy));
        assert!(report.destroyed.is_empty());
        assert!(report.restored_cells.is_empty());
        assert_eq!(
            report.unresolved_cells().collect::<Vec<_>>(),
            vec![HexCoord::ORIGIN, outside]
        );
    }

    #[test]
    fn failed_spawn_is_reported() {
        let (grid, mut store, mut world) = fixture();
        let enemy = world.add(ENEMY, at(0, 0), Some(1));
        store.take_snapshot(&grid, &world);
        world.destroy(enemy);
        world.refuse_spawns = true;

        let report = store.restore_cells(&[HexCoord::ORIGIN], Vec2::ZERO, &grid, &mut world);
        assert_eq!(
            report.anomalies,
            vec![RestoreAnomaly::SpawnFailed {
                cell: HexCoord::ORIGIN,
                kind: ENEMY
            }]
        );
    }

    #[test]
    fn cells_are_processed_nearest_to_origin_first() {
        let (grid, mut store, mut world) = fixture();
        store.take_snapshot(&grid, &world);

        let cells = [
            HexCoord::new(3, 0),
            HexCoord::new(1, 0),
            HexCoord::new(1, 0),
            HexCoord::new(2, 0),
        ];
        let report = store.restore_cells(&cells, at(0, 0), &grid, &mut world);
        assert_eq!(
            report.restored_cells,
            vec![HexCoord::new(1, 0), HexCoord::new(2, 0), HexCoord::new(3, 0)]
        );
    }
}
