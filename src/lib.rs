//! Blade Swarm - A top-down survival brawler
//!
//! Core modules:
//! - `sim`: Engine-independent simulation (monsters, abilities, spawning, combat)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT_MS: u64 = 16;

    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 2000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Default camera viewport size
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// How far outside the visible camera rect monsters appear
    pub const SPAWN_PADDING: f32 = 50.0;

    /// Proximity radius for effect-instance hits
    pub const HIT_RADIUS: f32 = 50.0;

    /// Delay between a monster's death and release of its actor
    pub const DEATH_FADE_MS: u64 = 300;

    /// Player defaults
    pub const PLAYER_HEALTH: i32 = 100;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_RADIUS: f32 = 16.0;

    /// Sword swing defaults
    pub const SWING_DAMAGE: i32 = 20;
    pub const SWING_INTERVAL_MS: u64 = 1000;
    pub const SWING_DURATION_MS: u64 = 300;
    pub const SWING_SPEED_MS: u64 = 200;
    pub const SWING_OFFSET: f32 = 40.0;
    /// Full sweep extent (radians, ~120 degrees)
    pub const SWING_ARC: f32 = 2.094_395;
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Heading angle of a direction vector (radians)
#[inline]
pub fn heading(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

/// Point at `distance` from `origin` along `angle`
#[inline]
pub fn offset_at_angle(origin: Vec2, angle: f32, distance: f32) -> Vec2 {
    origin + Vec2::from_angle(angle) * distance
}

/// Clamp a point into the `[0, width] x [0, height]` world rectangle
#[inline]
pub fn clamp_to_world(pos: Vec2, world: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_to_coincident_points_is_zero() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(direction_to(p, p), Vec2::ZERO);
    }

    #[test]
    fn offset_at_angle_keeps_distance() {
        let origin = Vec2::new(100.0, 50.0);
        let p = offset_at_angle(origin, 1.3, 40.0);
        assert!((p.distance(origin) - 40.0).abs() < 1e-3);
    }
}
