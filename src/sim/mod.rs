//! Engine-independent simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, polls input
//! or sleeps:
//! - Time only advances through the clock value passed into each tick
//! - Seeded RNG only
//! - Stable iteration order (by monster id)
//! - Presentation learns about changes through the `GameEvent` outbox

pub mod ability;
pub mod combat;
pub mod monster;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use ability::{Ability, ActionCore, EffectId, EffectInstance, Pulse, Swing};
pub use combat::{player_contacts, resolve_effect_hits, resolve_player_contacts};
pub use monster::{DamageOutcome, Monster, MonsterId, MonsterKind, MonsterOverrides, MonsterStats};
pub use spawner::{ScheduleId, SpawnRequest, SpawnSchedule, Spawner, Viewport, Wave};
pub use state::{GameEvent, GamePhase, GameState, Player, SessionStats};
pub use tick::{TickInput, tick};
pub use timer::{Fired, TimerId, TimerQueue};
