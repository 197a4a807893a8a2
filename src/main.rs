//! Blade Swarm headless runner
//!
//! Drives a session with a scripted player path and no renderer attached,
//! logging what the presentation layer would be told.
//!
//! Usage: `blade-swarm [tuning.json] [seconds]`

use std::path::Path;

use glam::Vec2;

use blade_swarm::Tuning;
use blade_swarm::consts::*;
use blade_swarm::sim::{GameEvent, GamePhase, TickInput, Viewport, tick};

/// Default session length when none is given
const DEFAULT_SECONDS: u64 = 120;

fn main() {
    env_logger::init();
    log::info!("Blade Swarm (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let mut state = tuning.build_state();
    let end_ms = seconds * 1000;
    let mut now = 0;

    while now <= end_ms && state.phase == GamePhase::Playing {
        // Walk a slow circle so the swing keeps changing direction
        let t = now as f32 / 1000.0;
        let movement = Vec2::new((t * 0.5).cos(), (t * 0.5).sin());
        let viewport = Viewport::centered_on(state.player.pos, tuning.view_width, tuning.view_height);

        tick(
            &mut state,
            &TickInput {
                now_ms: now,
                movement,
                viewport: Some(viewport),
                contacts: Vec::new(),
            },
        );

        for event in state.drain_events() {
            match event {
                GameEvent::WaveExecuted { schedule, wave, at_ms } => {
                    log::info!("[{:>6}ms] schedule {:?} wave {}", at_ms, schedule, wave);
                }
                GameEvent::PlayerHit { by, damage, health } => {
                    log::info!("[{:>6}ms] hit by {:?} for {} -> {} hp", now, by, damage, health);
                }
                GameEvent::PlayerDefeated => log::info!("[{:>6}ms] defeated", now),
                other => log::trace!("{:?}", other),
            }
        }

        now += SIM_DT_MS;
    }

    let alive = state.monster_count();
    state.end_session();
    let stats = &state.stats;
    println!(
        "survived {:.1}s | spawned {} | killed {} | alive at end {} | dealt {} | taken {} | waves {}",
        stats.survived_ms as f32 / 1000.0,
        stats.spawned,
        stats.kills,
        alive,
        stats.damage_dealt,
        stats.damage_taken,
        stats.waves
    );
}
