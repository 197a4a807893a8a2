//! Hostile actors: stats, seek movement, damage, knockback and attack cooldown

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{clamp_to_world, direction_to};

/// Stable handle for a spawned monster
///
/// The presentation layer keys its actors by this id and looks monsters up
/// through the spawner; it never holds game state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub u32);

/// Monster types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterKind {
    Slime,
    Bat,
    Skeleton,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 3] = [MonsterKind::Slime, MonsterKind::Bat, MonsterKind::Skeleton];

    pub fn as_str(&self) -> &'static str {
        match self {
            MonsterKind::Slime => "slime",
            MonsterKind::Bat => "bat",
            MonsterKind::Skeleton => "skeleton",
        }
    }

    /// Resolve a type tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "slime" => Some(MonsterKind::Slime),
            "bat" => Some(MonsterKind::Bat),
            "skeleton" => Some(MonsterKind::Skeleton),
            _ => None,
        }
    }

    /// Built-in stats for this kind
    pub fn default_stats(&self) -> MonsterStats {
        match self {
            MonsterKind::Slime => MonsterStats {
                max_health: 50,
                speed: 50.0,
                damage: 10,
                knockback: 200.0,
                attack_cooldown_ms: 1000,
                radius: 16.0,
                texture: "slime".to_string(),
                scale: 2.0,
            },
            MonsterKind::Bat => MonsterStats {
                max_health: 20,
                speed: 110.0,
                damage: 5,
                knockback: 300.0,
                attack_cooldown_ms: 600,
                radius: 12.0,
                texture: "bat".to_string(),
                scale: 1.5,
            },
            MonsterKind::Skeleton => MonsterStats {
                max_health: 80,
                speed: 70.0,
                damage: 15,
                knockback: 120.0,
                attack_cooldown_ms: 1200,
                radius: 18.0,
                texture: "skeleton".to_string(),
                scale: 2.0,
            },
        }
    }
}

/// Per-kind tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub max_health: i32,
    /// Seek speed (pixels/s)
    pub speed: f32,
    /// Damage dealt to the player per successful contact
    pub damage: i32,
    /// Knockback speed applied when hit (pixels/s)
    pub knockback: f32,
    pub attack_cooldown_ms: u64,
    /// Body radius for player contact tests
    pub radius: f32,
    pub texture: String,
    pub scale: f32,
}

/// Caller overrides merged over a kind's defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterOverrides {
    pub max_health: Option<i32>,
    pub speed: Option<f32>,
    pub damage: Option<i32>,
    pub knockback: Option<f32>,
    pub attack_cooldown_ms: Option<u64>,
    pub radius: Option<f32>,
    pub texture: Option<String>,
    pub scale: Option<f32>,
}

impl MonsterOverrides {
    pub fn apply(&self, base: &MonsterStats) -> MonsterStats {
        MonsterStats {
            max_health: self.max_health.unwrap_or(base.max_health),
            speed: self.speed.unwrap_or(base.speed),
            damage: self.damage.unwrap_or(base.damage),
            knockback: self.knockback.unwrap_or(base.knockback),
            attack_cooldown_ms: self.attack_cooldown_ms.unwrap_or(base.attack_cooldown_ms),
            radius: self.radius.unwrap_or(base.radius),
            texture: self.texture.clone().unwrap_or_else(|| base.texture.clone()),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

/// Result of [`Monster::apply_damage`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Monster was already dead
    Ignored,
    Hurt { knockback: Vec2 },
    /// This hit took health to zero or below
    Killed { knockback: Vec2 },
}

/// A live (or dying) monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub pos: Vec2,
    pub vel: Vec2,
    max_health: i32,
    health: i32,
    pub speed: f32,
    damage: i32,
    pub knockback: f32,
    pub attack_cooldown_ms: u64,
    /// Last time this monster damaged the player (`None` until its first hit)
    last_attack_ms: Option<u64>,
    pub radius: f32,
    pub texture: String,
    pub scale: f32,
    /// Position it is currently seeking
    target: Vec2,
    alive: bool,
}

impl Monster {
    pub fn new(id: MonsterId, kind: MonsterKind, stats: &MonsterStats, pos: Vec2) -> Self {
        let max_health = stats.max_health.max(1);
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            max_health,
            health: max_health,
            speed: stats.speed,
            damage: stats.damage,
            knockback: stats.knockback,
            attack_cooldown_ms: stats.attack_cooldown_ms,
            last_attack_ms: None,
            radius: stats.radius,
            texture: stats.texture.clone(),
            scale: stats.scale,
            target: pos,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn damage_value(&self) -> i32 {
        self.damage
    }

    /// Steer toward `target` at full speed
    pub fn advance(&mut self, target: Vec2) {
        if !self.alive {
            return;
        }
        self.target = target;
        self.vel = direction_to(self.pos, target) * self.speed;
    }

    /// Integrate velocity over `dt` seconds, staying inside the world
    pub fn step(&mut self, dt: f32, world: Vec2) {
        self.pos = clamp_to_world(self.pos + self.vel * dt, world);
    }

    /// Take a hit. Knocks the monster away from its target and kills it at zero health.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }

        self.health -= amount.max(0);
        let knockback = direction_to(self.target, self.pos) * self.knockback;
        self.vel = knockback;

        if self.health <= 0 {
            self.alive = false;
            DamageOutcome::Killed { knockback }
        } else {
            DamageOutcome::Hurt { knockback }
        }
    }

    /// Cooldown gate for damaging the player.
    ///
    /// Stamps the cooldown when it returns true, so only call this once
    /// contact is already confirmed.
    pub fn can_deal_damage_at(&mut self, now_ms: u64) -> bool {
        if !self.alive {
            return false;
        }
        let ready = match self.last_attack_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.attack_cooldown_ms,
        };
        if ready {
            self.last_attack_ms = Some(now_ms);
        }
        ready
    }
}
