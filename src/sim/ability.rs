//! Player abilities that fire automatically on an interval
//!
//! Every ability shares an [`ActionCore`]: facing, fire timing and the list of
//! live effect instances. Variants only differ in where an instance sits over
//! its lifetime.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::monster::MonsterId;
use super::state::GameEvent;
use crate::consts::*;
use crate::{heading, offset_at_angle};

/// Identity of one effect instance, unique within its ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// One live occurrence of an ability's hit area
#[derive(Debug, Clone)]
pub struct EffectInstance {
    pub id: EffectId,
    pub pos: Vec2,
    pub rotation: f32,
    /// Facing angle at the moment it fired
    pub base_rotation: f32,
    pub created_ms: u64,
    /// Monsters this instance already damaged
    hits: BTreeSet<MonsterId>,
}

impl EffectInstance {
    /// Record a hit. Returns false if this monster was already hit by this instance.
    pub fn mark_hit(&mut self, monster: MonsterId) -> bool {
        self.hits.insert(monster)
    }

    pub fn has_hit(&self, monster: MonsterId) -> bool {
        self.hits.contains(&monster)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }
}

/// State shared by every ability
#[derive(Debug, Clone)]
pub struct ActionCore {
    pub damage: i32,
    pub interval_ms: u64,
    /// Lifetime of each effect instance
    pub duration_ms: u64,
    /// Distance from the player to the instance centre
    pub offset: f32,
    /// Last non-zero movement direction (unit length)
    direction: Vec2,
    last_fire_ms: Option<u64>,
    instances: Vec<EffectInstance>,
    next_instance: u32,
}

impl ActionCore {
    pub fn new(damage: i32, interval_ms: u64, duration_ms: u64, offset: f32) -> Self {
        Self {
            damage,
            interval_ms,
            duration_ms,
            offset,
            direction: Vec2::X,
            last_fire_ms: None,
            instances: Vec::new(),
            next_instance: 1,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn last_fire_ms(&self) -> Option<u64> {
        self.last_fire_ms
    }

    /// Update facing from the player's velocity; a zero vector keeps the old facing
    pub fn set_facing(&mut self, velocity: Vec2) {
        let dir = velocity.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.direction = dir;
        }
    }

    fn ready(&self, now_ms: u64) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    fn push_instance(&mut self, pos: Vec2, rotation: f32, now_ms: u64) -> EffectId {
        let id = EffectId(self.next_instance);
        self.next_instance += 1;
        self.instances.push(EffectInstance {
            id,
            pos,
            rotation,
            base_rotation: heading(self.direction),
            created_ms: now_ms,
            hits: BTreeSet::new(),
        });
        id
    }

    /// Drop instances whose lifetime is over, oldest first
    fn expire(&mut self, now_ms: u64, slot: usize, events: &mut Vec<GameEvent>) {
        let duration = self.duration_ms;
        self.instances.retain(|inst| {
            let live = now_ms.saturating_sub(inst.created_ms) < duration;
            if !live {
                events.push(GameEvent::EffectExpired {
                    ability: slot,
                    effect: inst.id,
                });
            }
            live
        });
    }
}

/// Sword swing: sweeps an arc in front of the player
#[derive(Debug, Clone)]
pub struct Swing {
    pub core: ActionCore,
    /// Total sweep extent (radians)
    pub arc: f32,
    /// Time to complete the sweep
    pub swing_ms: u64,
}

impl Default for Swing {
    fn default() -> Self {
        Self {
            core: ActionCore::new(SWING_DAMAGE, SWING_INTERVAL_MS, SWING_DURATION_MS, SWING_OFFSET),
            arc: SWING_ARC,
            swing_ms: SWING_SPEED_MS,
        }
    }
}

impl Swing {
    /// Sweep angle `elapsed_ms` into the swing
    pub fn rotation_at(&self, base_rotation: f32, elapsed_ms: u64) -> f32 {
        let progress = if self.swing_ms == 0 {
            1.0
        } else {
            (elapsed_ms as f32 / self.swing_ms as f32).min(1.0)
        };
        base_rotation - self.arc / 2.0 + self.arc * progress
    }
}

/// Pulse: a ring that rides along with the player
#[derive(Debug, Clone)]
pub struct Pulse {
    pub core: ActionCore,
}

/// An equipped ability
#[derive(Debug, Clone)]
pub enum Ability {
    Swing(Swing),
    Pulse(Pulse),
}

impl Ability {
    pub fn core(&self) -> &ActionCore {
        match self {
            Ability::Swing(s) => &s.core,
            Ability::Pulse(p) => &p.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut ActionCore {
        match self {
            Ability::Swing(s) => &mut s.core,
            Ability::Pulse(p) => &mut p.core,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Swing(_) => "swing",
            Ability::Pulse(_) => "pulse",
        }
    }

    pub fn damage_value(&self) -> i32 {
        self.core().damage
    }

    pub fn set_facing(&mut self, velocity: Vec2) {
        self.core_mut().set_facing(velocity);
    }

    pub fn active_instances(&self) -> &[EffectInstance] {
        &self.core().instances
    }

    pub fn active_instances_mut(&mut self) -> &mut [EffectInstance] {
        &mut self.core_mut().instances
    }

    /// Expire old instances, move live ones with the player, and fire when the interval has elapsed
    pub fn tick(&mut self, now_ms: u64, player_pos: Vec2, slot: usize, events: &mut Vec<GameEvent>) {
        self.core_mut().expire(now_ms, slot, events);
        self.track(now_ms, player_pos);

        if self.core().ready(now_ms) {
            self.fire(now_ms, player_pos, slot, events);
            self.core_mut().last_fire_ms = Some(now_ms);
        }
    }

    /// Re-derive each live instance's pose from the player position
    fn track(&mut self, now_ms: u64, player_pos: Vec2) {
        match self {
            Ability::Swing(swing) => {
                let offset = swing.core.offset;
                for i in 0..swing.core.instances.len() {
                    let inst = &swing.core.instances[i];
                    let rotation =
                        swing.rotation_at(inst.base_rotation, now_ms.saturating_sub(inst.created_ms));
                    let inst = &mut swing.core.instances[i];
                    inst.rotation = rotation;
                    inst.pos = offset_at_angle(player_pos, rotation, offset);
                }
            }
            Ability::Pulse(pulse) => {
                let offset = pulse.core.offset;
                for inst in &mut pulse.core.instances {
                    inst.pos = offset_at_angle(player_pos, inst.base_rotation, offset);
                }
            }
        }
    }

    fn fire(&mut self, now_ms: u64, player_pos: Vec2, slot: usize, events: &mut Vec<GameEvent>) {
        let base = heading(self.core().direction);
        let (pos, rotation) = match self {
            Ability::Swing(swing) => {
                let rotation = swing.rotation_at(base, 0);
                (offset_at_angle(player_pos, rotation, swing.core.offset), rotation)
            }
            Ability::Pulse(pulse) => (offset_at_angle(player_pos, base, pulse.core.offset), base),
        };
        let name = self.name();
        let effect = self.core_mut().push_instance(pos, rotation, now_ms);
        log::trace!("{} fired effect {:?} at ({:.0}, {:.0})", name, effect, pos.x, pos.y);
        events.push(GameEvent::EffectStarted {
            ability: slot,
            effect,
            pos,
            rotation,
        });
    }
}
