//! Session state and the events the simulation reports outward
//!
//! Everything the presentation layer needs to mirror lives in the event
//! outbox; it never reaches into monsters or abilities to mutate them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ability::{Ability, EffectId, Swing};
use super::monster::{MonsterId, MonsterKind};
use super::spawner::{ScheduleId, Spawner, Viewport};
use crate::consts::*;
use crate::clamp_to_world;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player health hit zero; spawning is off, simulation is frozen
    Defeated,
    /// Session torn down, every actor released
    Ended,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MonsterSpawned {
        id: MonsterId,
        kind: MonsterKind,
        texture: String,
        scale: f32,
        pos: Vec2,
    },
    /// Flash the monster and push it back
    MonsterHit {
        id: MonsterId,
        damage: i32,
        health: i32,
        knockback: Vec2,
    },
    /// Start the death fade; the monster no longer takes part in combat
    MonsterDied { id: MonsterId },
    /// Destroy the monster's actor
    MonsterReleased { id: MonsterId },
    EffectStarted {
        ability: usize,
        effect: EffectId,
        pos: Vec2,
        rotation: f32,
    },
    EffectExpired { ability: usize, effect: EffectId },
    PlayerHit {
        by: MonsterId,
        damage: i32,
        health: i32,
    },
    PlayerDefeated,
    WaveExecuted {
        schedule: ScheduleId,
        wave: usize,
        at_ms: u64,
    },
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Movement speed (pixels/s)
    pub speed: f32,
    /// Body radius for monster contact
    pub radius: f32,
}

impl Player {
    pub fn new(pos: Vec2, max_health: i32, speed: f32, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            health: max_health,
            max_health,
            speed,
            radius,
        }
    }

    /// Set velocity from a desired movement vector and integrate over `dt` seconds
    pub fn steer(&mut self, desired: Vec2, dt: f32, world: Vec2) {
        self.vel = desired.normalize_or_zero() * self.speed;
        self.pos = clamp_to_world(self.pos + self.vel * dt, world);
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

/// Running totals for HUD and end-of-session summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub spawned: u32,
    pub kills: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub waves: u32,
    pub survived_ms: u64,
}

impl SessionStats {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MonsterSpawned { .. } => self.spawned += 1,
            GameEvent::MonsterHit { damage, .. } => self.damage_dealt += *damage as i64,
            GameEvent::MonsterDied { .. } => self.kills += 1,
            GameEvent::PlayerHit { damage, .. } => self.damage_taken += *damage as i64,
            GameEvent::WaveExecuted { .. } => self.waves += 1,
            _ => {}
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation clock (ms), monotonic
    pub clock_ms: u64,
    pub world: Vec2,
    /// Effect-instance hit radius
    pub hit_radius: f32,
    pub player: Player,
    pub abilities: Vec<Ability>,
    pub spawner: Spawner,
    pub stats: SessionStats,
    /// Outbox, drained by the presentation layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Default session: player in the middle of the world with a sword swing
    pub fn new(seed: u64) -> Self {
        let world = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        let player = Player::new(world / 2.0, PLAYER_HEALTH, PLAYER_SPEED, PLAYER_RADIUS);
        let mut spawner = Spawner::new(world, SPAWN_PADDING, seed);
        spawner.set_viewport(Viewport::centered_on(player.pos, VIEW_WIDTH, VIEW_HEIGHT));
        Self {
            seed,
            phase: GamePhase::Playing,
            clock_ms: 0,
            world,
            hit_radius: HIT_RADIUS,
            player,
            abilities: vec![Ability::Swing(Swing::default())],
            spawner,
            stats: SessionStats::default(),
            events: Vec::new(),
        }
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn monster_count(&self) -> usize {
        self.spawner.monster_count()
    }

    pub fn active_instance_count(&self) -> usize {
        self.abilities.iter().map(|a| a.active_instances().len()).sum()
    }

    /// Tear the session down: stop spawning and release every monster
    pub fn end_session(&mut self) {
        if self.phase == GamePhase::Ended {
            return;
        }
        let start = self.events.len();
        self.spawner.stop_all(&mut self.events);
        for event in &self.events[start..] {
            self.stats.record(event);
        }
        self.phase = GamePhase::Ended;
        log::info!(
            "Session ended after {}ms: {} kills, {} spawned",
            self.stats.survived_ms,
            self.stats.kills,
            self.stats.spawned
        );
    }
}
