//! Monster spawning and the live set
//!
//! The spawner owns every monster. It fires repeating spawns and scripted wave
//! schedules off its own timer queue, places new monsters just outside the
//! camera, and prunes dead monsters each tick.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::monster::{Monster, MonsterId, MonsterKind, MonsterOverrides, MonsterStats};
use super::state::GameEvent;
use super::timer::{TimerId, TimerQueue};
use crate::consts::*;

/// Camera viewport in world coordinates (scroll offset + visible size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        }
    }
}

impl Viewport {
    /// Viewport of the given size centred on `center`
    pub fn centered_on(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// "Spawn `count` of `kind`"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Monster type tag, e.g. `"slime"`
    pub kind: String,
    pub count: u32,
    #[serde(default)]
    pub overrides: MonsterOverrides,
}

impl SpawnRequest {
    pub fn new(kind: &str, count: u32) -> Self {
        Self {
            kind: kind.to_string(),
            count,
            overrides: MonsterOverrides::default(),
        }
    }
}

/// One step of a scripted schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Delay after the previous wave (or after schedule start / loop restart)
    pub delay_ms: u64,
    pub spawns: Vec<SpawnRequest>,
}

/// A scripted sequence of waves
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub waves: Vec<Wave>,
    /// Restart from the first wave after the last one
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Pause between the last wave and the restart
    #[serde(default)]
    pub loop_delay_ms: u64,
}

/// Handle to a running schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub u32);

#[derive(Debug, Clone, PartialEq)]
enum SpawnTimer {
    Repeating(String),
    Wave { schedule: ScheduleId, wave: usize },
    Restart(ScheduleId),
    /// Death transition finished; release the actor
    Release(MonsterId),
}

#[derive(Debug, Clone)]
struct RepeatingSpawn {
    timer: TimerId,
    request: SpawnRequest,
}

#[derive(Debug, Clone)]
struct ScheduleRun {
    schedule: SpawnSchedule,
    timer: TimerId,
}

/// Owner of the live set and every spawn timer
#[derive(Debug, Clone)]
pub struct Spawner {
    world: Vec2,
    padding: f32,
    viewport: Viewport,
    roster: BTreeMap<MonsterKind, MonsterStats>,
    /// Sorted by id (ids are allocated increasing and only ever appended)
    monsters: Vec<Monster>,
    timers: TimerQueue<SpawnTimer>,
    repeating: BTreeMap<String, RepeatingSpawn>,
    schedules: BTreeMap<ScheduleId, ScheduleRun>,
    dying: BTreeMap<MonsterId, TimerId>,
    rng: Pcg32,
    next_monster: u32,
    next_schedule: u32,
}

impl Spawner {
    pub fn new(world: Vec2, padding: f32, seed: u64) -> Self {
        let roster = MonsterKind::ALL
            .iter()
            .map(|k| (*k, k.default_stats()))
            .collect();
        Self {
            world,
            padding,
            viewport: Viewport::default(),
            roster,
            monsters: Vec::new(),
            timers: TimerQueue::new(),
            repeating: BTreeMap::new(),
            schedules: BTreeMap::new(),
            dying: BTreeMap::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_monster: 1,
            next_schedule: 1,
        }
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Replace the default stats for a kind
    pub fn set_stats(&mut self, kind: MonsterKind, stats: MonsterStats) {
        self.roster.insert(kind, stats);
    }

    pub fn stats(&self, kind: MonsterKind) -> Option<&MonsterStats> {
        self.roster.get(&kind)
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn monsters_mut(&mut self) -> &mut [Monster] {
        &mut self.monsters
    }

    /// Look a monster up by handle
    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &self.monsters[i])
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|i| &mut self.monsters[i])
    }

    /// Number of monsters still alive
    pub fn monster_count(&self) -> usize {
        self.monsters.iter().filter(|m| m.is_alive()).count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn repeating_keys(&self) -> impl Iterator<Item = &str> {
        self.repeating.keys().map(String::as_str)
    }

    pub fn is_schedule_running(&self, id: ScheduleId) -> bool {
        self.schedules.contains_key(&id)
    }

    /// Spawn one monster from a type tag.
    ///
    /// Unknown tags are logged and yield `None`.
    pub fn spawn_entity(
        &mut self,
        tag: &str,
        overrides: &MonsterOverrides,
        events: &mut Vec<GameEvent>,
    ) -> Option<MonsterId> {
        let Some(kind) = MonsterKind::from_tag(tag) else {
            log::warn!("Unknown monster type '{}', spawn skipped", tag);
            return None;
        };
        Some(self.spawn_kind(kind, overrides, events))
    }

    pub fn spawn_kind(
        &mut self,
        kind: MonsterKind,
        overrides: &MonsterOverrides,
        events: &mut Vec<GameEvent>,
    ) -> MonsterId {
        let base = self
            .roster
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_stats());
        let stats = overrides.apply(&base);
        let pos = self.spawn_position();

        let id = MonsterId(self.next_monster);
        self.next_monster += 1;
        let monster = Monster::new(id, kind, &stats, pos);
        log::debug!("Spawned {} {:?} at ({:.0}, {:.0})", kind.as_str(), id, pos.x, pos.y);
        events.push(GameEvent::MonsterSpawned {
            id,
            kind,
            texture: monster.texture.clone(),
            scale: monster.scale,
            pos,
        });
        self.monsters.push(monster);
        id
    }

    fn spawn_request(&mut self, request: &SpawnRequest, events: &mut Vec<GameEvent>) -> u32 {
        let mut spawned = 0;
        for _ in 0..request.count {
            if self.spawn_entity(&request.kind, &request.overrides, events).is_none() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Random point on the padded camera border, clamped to the world.
    ///
    /// Sides whose padded edge got clamped back onto the visible area are
    /// skipped while any other side still lies off-screen.
    pub fn spawn_position(&mut self) -> Vec2 {
        let vp = self.viewport;
        let pad = self.padding;
        let left = (vp.x - pad).clamp(0.0, self.world.x);
        let right = (vp.x + vp.width.max(0.0) + pad).clamp(0.0, self.world.x);
        let top = (vp.y - pad).clamp(0.0, self.world.y);
        let bottom = (vp.y + vp.height.max(0.0) + pad).clamp(0.0, self.world.y);

        let open = [
            top < vp.y,
            right > vp.x + vp.width,
            bottom > vp.y + vp.height,
            left < vp.x,
        ];
        let candidates: Vec<usize> = (0..4).filter(|&s| open[s]).collect();
        let side = if candidates.is_empty() {
            self.rng.random_range(0..4)
        } else {
            candidates[self.rng.random_range(0..candidates.len())]
        };

        match side {
            0 => Vec2::new(self.rng.random_range(left..=right), top),
            1 => Vec2::new(right, self.rng.random_range(top..=bottom)),
            2 => Vec2::new(self.rng.random_range(left..=right), bottom),
            _ => Vec2::new(left, self.rng.random_range(top..=bottom)),
        }
    }

    /// Spawn `request` every `interval_ms` under `key`, replacing any earlier registration.
    ///
    /// The old registration is cancelled even when the new one names an unknown type.
    pub fn register_repeating(
        &mut self,
        key: &str,
        request: SpawnRequest,
        interval_ms: u64,
        now_ms: u64,
    ) -> Option<TimerId> {
        self.cancel_repeating(key);
        if MonsterKind::from_tag(&request.kind).is_none() {
            log::warn!("Repeating spawn '{}' names unknown monster type '{}'", key, request.kind);
            return None;
        }
        let timer = self
            .timers
            .every(now_ms, interval_ms, SpawnTimer::Repeating(key.to_string()));
        log::debug!(
            "Repeating spawn '{}': {} x{} every {}ms",
            key,
            request.kind,
            request.count,
            interval_ms
        );
        self.repeating
            .insert(key.to_string(), RepeatingSpawn { timer, request });
        Some(timer)
    }

    pub fn cancel_repeating(&mut self, key: &str) -> bool {
        match self.repeating.remove(key) {
            Some(old) => {
                self.timers.cancel(old.timer);
                log::debug!("Cancelled repeating spawn '{}'", key);
                true
            }
            None => false,
        }
    }

    /// Start a scripted schedule; its first wave fires after its own delay
    pub fn start_schedule(&mut self, mut schedule: SpawnSchedule, now_ms: u64) -> Option<ScheduleId> {
        let Some(first_delay) = schedule.waves.first().map(|w| w.delay_ms) else {
            log::warn!("Ignoring spawn schedule with no waves");
            return None;
        };
        let cycle_ms: u64 = schedule.waves.iter().map(|w| w.delay_ms).sum::<u64>() + schedule.loop_delay_ms;
        if schedule.looping && cycle_ms == 0 {
            log::warn!("Looping schedule has zero cycle time, using 1ms loop delay");
            schedule.loop_delay_ms = 1;
        }

        let id = ScheduleId(self.next_schedule);
        self.next_schedule += 1;
        let timer = self
            .timers
            .after(now_ms, first_delay, SpawnTimer::Wave { schedule: id, wave: 0 });
        log::info!(
            "Schedule {:?} started: {} waves, loop={}",
            id,
            schedule.waves.len(),
            schedule.looping
        );
        self.schedules.insert(id, ScheduleRun { schedule, timer });
        Some(id)
    }

    pub fn stop_schedule(&mut self, id: ScheduleId) -> bool {
        match self.schedules.remove(&id) {
            Some(run) => {
                self.timers.cancel(run.timer);
                true
            }
            None => false,
        }
    }

    /// Fire every spawn timer due by `now_ms`
    pub fn update(&mut self, now_ms: u64, events: &mut Vec<GameEvent>) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            match fired.payload {
                SpawnTimer::Repeating(key) => {
                    if let Some(entry) = self.repeating.get(&key) {
                        let request = entry.request.clone();
                        self.spawn_request(&request, events);
                    }
                }
                SpawnTimer::Wave { schedule, wave } => {
                    self.run_wave(schedule, wave, fired.due_ms, events);
                }
                SpawnTimer::Restart(schedule) => {
                    if let Some(run) = self.schedules.get_mut(&schedule) {
                        let delay = run.schedule.waves.first().map_or(0, |w| w.delay_ms);
                        log::info!("Schedule {:?} looping", schedule);
                        run.timer = self
                            .timers
                            .after(fired.due_ms, delay, SpawnTimer::Wave { schedule, wave: 0 });
                    }
                }
                SpawnTimer::Release(id) => {
                    if self.dying.remove(&id).is_some() {
                        events.push(GameEvent::MonsterReleased { id });
                    }
                }
            }
        }
    }

    fn run_wave(&mut self, schedule: ScheduleId, wave: usize, at_ms: u64, events: &mut Vec<GameEvent>) {
        let Some(run) = self.schedules.get(&schedule) else {
            return;
        };
        let Some(entry) = run.schedule.waves.get(wave) else {
            return;
        };
        let requests = entry.spawns.clone();
        let next_delay = run.schedule.waves.get(wave + 1).map(|w| w.delay_ms);
        let looping = run.schedule.looping;
        let loop_delay = run.schedule.loop_delay_ms;

        let spawned: u32 = requests.iter().map(|r| self.spawn_request(r, events)).sum();
        log::info!("Schedule {:?} wave {} at {}ms: {} monsters", schedule, wave, at_ms, spawned);
        events.push(GameEvent::WaveExecuted { schedule, wave, at_ms });

        let next = match next_delay {
            Some(delay) => Some(
                self.timers
                    .after(at_ms, delay, SpawnTimer::Wave { schedule, wave: wave + 1 }),
            ),
            None if looping => Some(self.timers.after(at_ms, loop_delay, SpawnTimer::Restart(schedule))),
            None => None,
        };

        match next {
            Some(timer) => {
                if let Some(run) = self.schedules.get_mut(&schedule) {
                    run.timer = timer;
                }
            }
            None => {
                log::info!("Schedule {:?} finished", schedule);
                self.schedules.remove(&schedule);
            }
        }
    }

    /// Start the death transition; the actor is released after [`DEATH_FADE_MS`]
    pub fn begin_release(&mut self, id: MonsterId, now_ms: u64) {
        if self.dying.contains_key(&id) {
            return;
        }
        let timer = self.timers.after(now_ms, DEATH_FADE_MS, SpawnTimer::Release(id));
        self.dying.insert(id, timer);
    }

    /// Integrate monster velocities over `dt` seconds
    pub fn step_all(&mut self, dt: f32) {
        let world = self.world;
        for m in &mut self.monsters {
            m.step(dt, world);
        }
    }

    /// Drop dead monsters, then steer the rest toward `target`
    pub fn advance_all(&mut self, target: Vec2) {
        self.monsters.retain(|m| m.is_alive());
        for m in &mut self.monsters {
            m.advance(target);
        }
    }

    /// Cancel repeating and scripted spawns.
    ///
    /// Monsters stay put and pending death releases still fire on later `update` calls.
    pub fn deactivate(&mut self) {
        for (_, entry) in std::mem::take(&mut self.repeating) {
            self.timers.cancel(entry.timer);
        }
        for (_, run) in std::mem::take(&mut self.schedules) {
            self.timers.cancel(run.timer);
        }
    }

    /// Cancel every timer and release every monster immediately
    pub fn stop_all(&mut self, events: &mut Vec<GameEvent>) {
        self.timers.clear();
        self.repeating.clear();
        self.schedules.clear();

        let mut released: BTreeSet<MonsterId> = std::mem::take(&mut self.dying).into_keys().collect();
        released.extend(self.monsters.drain(..).map(|m| m.id));
        for id in released {
            events.push(GameEvent::MonsterReleased { id });
        }
        log::info!("Spawner stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spawner() -> Spawner {
        let mut s = Spawner::new(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT), SPAWN_PADDING, 42);
        s.set_viewport(Viewport::centered_on(Vec2::new(1000.0, 1000.0), VIEW_WIDTH, VIEW_HEIGHT));
        s
    }

    fn spawned(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::MonsterSpawned { .. }))
            .count()
    }

    fn run_until(s: &mut Spawner, end_ms: u64, step_ms: u64, events: &mut Vec<GameEvent>) {
        let mut t = 0;
        while t <= end_ms {
            s.update(t, events);
            t += step_ms;
        }
    }

    #[test]
    fn unknown_type_yields_none() {
        let mut s = spawner();
        let mut events = Vec::new();
        assert!(s.spawn_entity("dragon", &MonsterOverrides::default(), &mut events).is_none());
        assert!(events.is_empty());
        assert_eq!(s.monster_count(), 0);
    }

    #[test]
    fn spawn_applies_overrides_and_is_findable() {
        let mut s = spawner();
        let mut events = Vec::new();
        let overrides = MonsterOverrides {
            max_health: Some(7),
            ..Default::default()
        };
        let id = s.spawn_entity("bat", &overrides, &mut events).unwrap();
        let m = s.monster(id).unwrap();
        assert_eq!(m.kind, MonsterKind::Bat);
        assert_eq!(m.max_health(), 7);
        assert!(!s.viewport().contains(m.pos));
    }

    #[test]
    fn repeating_spawns_count_per_interval() {
        let mut s = spawner();
        let mut events = Vec::new();
        s.register_repeating("slimes", SpawnRequest::new("slime", 3), 1000, 0);
        run_until(&mut s, 3000, 100, &mut events);
        assert_eq!(spawned(&events), 9);
    }

    #[test]
    fn reregistering_replaces_previous_timer() {
        let mut s = spawner();
        let mut events = Vec::new();
        s.register_repeating("pack", SpawnRequest::new("slime", 2), 1000, 0);
        s.register_repeating("pack", SpawnRequest::new("bat", 2), 1000, 0);
        assert_eq!(s.pending_timers(), 1);
        assert_eq!(s.repeating_keys().count(), 1);

        s.update(1000, &mut events);
        assert_eq!(spawned(&events), 2);
        assert!(events.iter().all(|e| matches!(
            e,
            GameEvent::MonsterSpawned { kind: MonsterKind::Bat, .. }
        )));
    }

    #[test]
    fn repeating_with_unknown_type_is_rejected() {
        let mut s = spawner();
        assert!(s.register_repeating("x", SpawnRequest::new("dragon", 1), 500, 0).is_none());
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn reregistering_with_unknown_type_still_cancels() {
        let mut s = spawner();
        let mut events = Vec::new();
        s.register_repeating("pack", SpawnRequest::new("slime", 2), 1000, 0);
        assert!(s.register_repeating("pack", SpawnRequest::new("dragon", 2), 1000, 0).is_none());
        assert_eq!(s.repeating_keys().count(), 0);
        assert_eq!(s.pending_timers(), 0);

        run_until(&mut s, 3000, 100, &mut events);
        assert_eq!(spawned(&events), 0);
    }

    #[test]
    fn clock_jump_spawns_one_batch() {
        let mut s = spawner();
        let mut events = Vec::new();
        s.register_repeating("slimes", SpawnRequest::new("slime", 2), 2000, 0);
        s.update(0, &mut events);
        s.update(600_000, &mut events);
        assert_eq!(spawned(&events), 2);

        // Back on the 2000ms grid afterwards
        s.update(601_999, &mut events);
        assert_eq!(spawned(&events), 2);
        s.update(602_000, &mut events);
        assert_eq!(spawned(&events), 4);
    }

    #[test]
    fn looping_schedule_runs_on_due_times() {
        let mut s = spawner();
        let mut events = Vec::new();
        let schedule = SpawnSchedule {
            waves: vec![
                Wave {
                    delay_ms: 0,
                    spawns: vec![SpawnRequest::new("slime", 1)],
                },
                Wave {
                    delay_ms: 5000,
                    spawns: vec![SpawnRequest::new("bat", 2)],
                },
            ],
            looping: true,
            loop_delay_ms: 15000,
        };
        let id = s.start_schedule(schedule, 0).unwrap();
        run_until(&mut s, 25000, 100, &mut events);

        let runs: Vec<(usize, u64)> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::WaveExecuted { wave, at_ms, .. } => Some((*wave, *at_ms)),
                _ => None,
            })
            .collect();
        assert_eq!(runs, vec![(0, 0), (1, 5000), (0, 20000), (1, 25000)]);
        assert!(s.is_schedule_running(id));
    }

    #[test]
    fn non_looping_schedule_goes_idle() {
        let mut s = spawner();
        let mut events = Vec::new();
        let schedule = SpawnSchedule {
            waves: vec![Wave {
                delay_ms: 100,
                spawns: vec![SpawnRequest::new("skeleton", 1)],
            }],
            looping: false,
            loop_delay_ms: 0,
        };
        let id = s.start_schedule(schedule, 0).unwrap();
        run_until(&mut s, 1000, 50, &mut events);
        assert_eq!(spawned(&events), 1);
        assert!(!s.is_schedule_running(id));
        assert_eq!(s.pending_timers(), 0);
    }

    #[test]
    fn advance_all_prunes_dead_and_steers_living() {
        let mut s = spawner();
        let mut events = Vec::new();
        let a = s.spawn_entity("slime", &MonsterOverrides::default(), &mut events).unwrap();
        let b = s.spawn_entity("slime", &MonsterOverrides::default(), &mut events).unwrap();
        let c = s.spawn_entity("slime", &MonsterOverrides::default(), &mut events).unwrap();
        s.monster_mut(a).unwrap().apply_damage(1000);
        s.monster_mut(b).unwrap().apply_damage(1000);

        s.advance_all(Vec2::new(1000.0, 1000.0));
        assert_eq!(s.monsters().len(), 1);
        assert!(s.monster(c).unwrap().vel.length() > 0.0);
        assert!(s.monster(a).is_none());
    }

    #[test]
    fn release_follows_death_after_fade() {
        let mut s = spawner();
        let mut events = Vec::new();
        let id = s.spawn_entity("bat", &MonsterOverrides::default(), &mut events).unwrap();
        s.begin_release(id, 1000);
        s.begin_release(id, 1000);
        events.clear();
        s.update(1000 + DEATH_FADE_MS - 1, &mut events);
        assert!(events.is_empty());
        s.update(1000 + DEATH_FADE_MS, &mut events);
        assert_eq!(events, vec![GameEvent::MonsterReleased { id }]);
    }

    #[test]
    fn stop_all_clears_everything_once() {
        let mut s = spawner();
        let mut events = Vec::new();
        s.register_repeating("slimes", SpawnRequest::new("slime", 1), 1000, 0);
        let a = s.spawn_entity("slime", &MonsterOverrides::default(), &mut events).unwrap();
        s.spawn_entity("bat", &MonsterOverrides::default(), &mut events);
        s.monster_mut(a).unwrap().apply_damage(1000);
        s.begin_release(a, 0);

        events.clear();
        s.stop_all(&mut events);
        assert_eq!(events.len(), 2);
        assert!(s.monsters().is_empty());
        assert_eq!(s.pending_timers(), 0);

        events.clear();
        s.update(10_000, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn camera_in_world_corner_spawns_off_screen() {
        let mut s = spawner();
        s.set_viewport(Viewport {
            x: 0.0,
            y: 0.0,
            width: VIEW_WIDTH,
            height: VIEW_HEIGHT,
        });
        for _ in 0..200 {
            let p = s.spawn_position();
            assert!(!s.viewport().contains(p), "{p:?} inside camera");
        }
    }

    proptest! {
        #[test]
        fn placement_stays_in_world_and_off_camera(
            seed in any::<u64>(),
            cx in -200.0f32..2200.0,
            cy in -200.0f32..2200.0,
            w in 100.0f32..900.0,
            h in 100.0f32..700.0,
        ) {
            let world = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
            let mut s = Spawner::new(world, SPAWN_PADDING, seed);
            let vp = Viewport { x: cx, y: cy, width: w, height: h };
            s.set_viewport(vp);

            let padded_covers_world = vp.x - SPAWN_PADDING <= 0.0
                && vp.y - SPAWN_PADDING <= 0.0
                && vp.x + w + SPAWN_PADDING >= world.x
                && vp.y + h + SPAWN_PADDING >= world.y;

            for _ in 0..16 {
                let p = s.spawn_position();
                prop_assert!(p.x >= 0.0 && p.x <= world.x);
                prop_assert!(p.y >= 0.0 && p.y <= world.y);
                if !padded_covers_world {
                    prop_assert!(!vp.contains(p));
                }
            }
        }
    }
}
