//! Data-driven game balance
//!
//! Loaded from JSON; every field has a default so a partial file works.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{
    Ability, ActionCore, GameState, MonsterKind, MonsterOverrides, Player, Pulse, SpawnRequest,
    SpawnSchedule, Spawner, Swing, Viewport, Wave,
};

/// Player stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub health: i32,
    pub speed: f32,
    pub radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
        }
    }
}

/// One equipped ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AbilityTuning {
    Swing {
        damage: i32,
        interval_ms: u64,
        duration_ms: u64,
        offset: f32,
        /// Sweep extent in degrees
        arc_degrees: f32,
        swing_ms: u64,
    },
    Pulse {
        damage: i32,
        interval_ms: u64,
        duration_ms: u64,
        #[serde(default)]
        offset: f32,
    },
}

impl AbilityTuning {
    pub fn build(&self) -> Ability {
        match *self {
            AbilityTuning::Swing {
                damage,
                interval_ms,
                duration_ms,
                offset,
                arc_degrees,
                swing_ms,
            } => Ability::Swing(Swing {
                core: ActionCore::new(damage, interval_ms, duration_ms, offset),
                arc: arc_degrees.to_radians(),
                swing_ms,
            }),
            AbilityTuning::Pulse {
                damage,
                interval_ms,
                duration_ms,
                offset,
            } => Ability::Pulse(Pulse {
                core: ActionCore::new(damage, interval_ms, duration_ms, offset),
            }),
        }
    }
}

/// A keyed repeating spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatingTuning {
    pub key: String,
    pub interval_ms: u64,
    #[serde(flatten)]
    pub spawn: SpawnRequest,
}

/// Full balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub seed: u64,
    pub world_width: f32,
    pub world_height: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub spawn_padding: f32,
    pub hit_radius: f32,
    pub player: PlayerTuning,
    pub abilities: Vec<AbilityTuning>,
    /// Per-kind stat overrides, keyed by type tag
    pub monsters: BTreeMap<String, MonsterOverrides>,
    pub repeating: Vec<RepeatingTuning>,
    pub schedule: Option<SpawnSchedule>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            spawn_padding: SPAWN_PADDING,
            hit_radius: HIT_RADIUS,
            player: PlayerTuning::default(),
            abilities: vec![AbilityTuning::Swing {
                damage: SWING_DAMAGE,
                interval_ms: SWING_INTERVAL_MS,
                duration_ms: SWING_DURATION_MS,
                offset: SWING_OFFSET,
                arc_degrees: SWING_ARC.to_degrees(),
                swing_ms: SWING_SPEED_MS,
            }],
            monsters: BTreeMap::new(),
            repeating: vec![
                RepeatingTuning {
                    key: "slimes".to_string(),
                    interval_ms: 2000,
                    spawn: SpawnRequest::new("slime", 2),
                },
                RepeatingTuning {
                    key: "bats".to_string(),
                    interval_ms: 5000,
                    spawn: SpawnRequest::new("bat", 3),
                },
            ],
            schedule: Some(SpawnSchedule {
                waves: vec![
                    Wave {
                        delay_ms: 10_000,
                        spawns: vec![SpawnRequest::new("skeleton", 2)],
                    },
                    Wave {
                        delay_ms: 20_000,
                        spawns: vec![SpawnRequest::new("skeleton", 4), SpawnRequest::new("bat", 6)],
                    },
                ],
                looping: true,
                loop_delay_ms: 30_000,
            }),
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Build a fresh session with spawns registered at clock 0
    pub fn build_state(&self) -> GameState {
        let mut state = GameState::new(self.seed);
        let world = Vec2::new(self.world_width.max(1.0), self.world_height.max(1.0));

        state.world = world;
        state.hit_radius = self.hit_radius;
        state.player = Player::new(world / 2.0, self.player.health, self.player.speed, self.player.radius);
        state.abilities = self.abilities.iter().map(AbilityTuning::build).collect();

        let mut spawner = Spawner::new(world, self.spawn_padding, self.seed);
        spawner.set_viewport(Viewport::centered_on(state.player.pos, self.view_width, self.view_height));
        for (tag, overrides) in &self.monsters {
            match MonsterKind::from_tag(tag) {
                Some(kind) => {
                    let base = kind.default_stats();
                    spawner.set_stats(kind, overrides.apply(&base));
                }
                None => log::warn!("Tuning lists unknown monster type '{}'", tag),
            }
        }
        for entry in &self.repeating {
            spawner.register_repeating(&entry.key, entry.spawn.clone(), entry.interval_ms, 0);
        }
        if let Some(schedule) = &self.schedule {
            spawner.start_schedule(schedule.clone(), 0);
        }
        state.spawner = spawner;
        state
    }
}
