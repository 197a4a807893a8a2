//! Per-frame simulation step
//!
//! Order within one tick: movement, ability facing/fire, spawner maintenance
//! and spawning, then combat. Damage applied this tick therefore sees this
//! tick's positions. Once the player is defeated only pending death
//! releases keep running.

use glam::Vec2;

use super::combat::{resolve_effect_hits, resolve_player_contacts};
use super::monster::MonsterId;
use super::spawner::Viewport;
use super::state::{GamePhase, GameState};

/// Input for a single tick, supplied by the engine side
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Simulation clock sampled for this tick (ms)
    pub now_ms: u64,
    /// Desired movement direction from the controls (any length)
    pub movement: Vec2,
    /// Camera rect this frame, if it moved
    pub viewport: Option<Viewport>,
    /// Monsters the physics engine reports overlapping the player
    pub contacts: Vec<MonsterId>,
}

/// Advance the session to `input.now_ms`
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Defeated => {
            finish_releases(state, input.now_ms);
            return;
        }
        GamePhase::Ended => return,
    }

    // Clock never runs backwards
    let now = input.now_ms.max(state.clock_ms);
    let dt = (now - state.clock_ms) as f32 / 1000.0;
    state.clock_ms = now;
    let first_event = state.events.len();

    if let Some(viewport) = input.viewport {
        state.spawner.set_viewport(viewport);
    }

    // Movement
    state.player.steer(input.movement, dt, state.world);
    state.spawner.step_all(dt);

    // Facing + fire
    let player_pos = state.player.pos;
    let player_vel = state.player.vel;
    for (slot, ability) in state.abilities.iter_mut().enumerate() {
        ability.set_facing(player_vel);
        ability.tick(now, player_pos, slot, &mut state.events);
    }

    // Spawning and live-set maintenance
    state.spawner.update(now, &mut state.events);
    state.spawner.advance_all(player_pos);

    // Combat
    resolve_effect_hits(state, now);
    resolve_player_contacts(state, now, &input.contacts);

    state.stats.survived_ms = now;
    for event in &state.events[first_event..] {
        state.stats.record(event);
    }
}

/// Frozen after defeat: spawning is off, but dying monsters still finish their fade
fn finish_releases(state: &mut GameState, now_ms: u64) {
    let now = now_ms.max(state.clock_ms);
    state.clock_ms = now;
    let first_event = state.events.len();
    state.spawner.update(now, &mut state.events);
    for event in &state.events[first_event..] {
        state.stats.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawner::SpawnRequest;
    use crate::sim::state::GameEvent;

    fn input(now_ms: u64, movement: Vec2) -> TickInput {
        TickInput {
            now_ms,
            movement,
            ..Default::default()
        }
    }

    #[test]
    fn player_moves_and_swing_follows_facing() {
        let mut state = GameState::new(7);
        let start = state.player.pos;
        tick(&mut state, &input(0, Vec2::ZERO));
        tick(&mut state, &input(500, Vec2::new(0.0, 1.0)));
        assert!((state.player.pos.y - (start.y + PLAYER_SPEED * 0.5)).abs() < 1e-2);
        assert_eq!(state.abilities[0].core().direction(), Vec2::new(0.0, 1.0));

        // Stopping keeps the last facing
        tick(&mut state, &input(600, Vec2::ZERO));
        assert_eq!(state.abilities[0].core().direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn clock_is_monotonic() {
        let mut state = GameState::new(7);
        tick(&mut state, &input(1000, Vec2::ZERO));
        tick(&mut state, &input(400, Vec2::ZERO));
        assert_eq!(state.clock_ms, 1000);
    }

    #[test]
    fn repeating_spawns_chase_the_player() {
        let mut state = GameState::new(11);
        state
            .spawner
            .register_repeating("slimes", SpawnRequest::new("slime", 2), 1000, 0);

        let mut now = 0;
        while now < 1000 {
            tick(&mut state, &input(now, Vec2::ZERO));
            now += SIM_DT_MS;
        }
        assert_eq!(state.monster_count(), 0);
        tick(&mut state, &input(1000, Vec2::ZERO));
        assert_eq!(state.monster_count(), 2);
        assert_eq!(state.stats.spawned, 2);

        let player = state.player.pos;
        let before: Vec<f32> = state
            .spawner
            .monsters()
            .iter()
            .map(|m| m.pos.distance(player))
            .collect();
        tick(&mut state, &input(2000 - 1, Vec2::ZERO));
        let after: Vec<f32> = state
            .spawner
            .monsters()
            .iter()
            .map(|m| m.pos.distance(player))
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(a < b);
        }
    }

    #[test]
    fn monster_in_swing_path_dies_and_is_released() {
        let mut state = GameState::new(5);
        let id = state
            .spawner
            .spawn_entity("bat", &Default::default(), &mut state.events)
            .unwrap();
        // Park it right in front of the player where the swing sweeps through
        let target = state.player.pos + Vec2::new(SWING_OFFSET, 0.0);
        {
            let m = state.spawner.monster_mut(id).unwrap();
            m.pos = target;
            m.speed = 0.0;
        }

        let mut now = 0;
        while now <= SWING_DURATION_MS + DEATH_FADE_MS + 100 {
            tick(&mut state, &input(now, Vec2::ZERO));
            now += SIM_DT_MS;
        }

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::MonsterDied { id }));
        assert!(events.contains(&GameEvent::MonsterReleased { id }));
        assert_eq!(state.stats.kills, 1);
        assert!(state.spawner.monster(id).is_none());
    }

    #[test]
    fn defeat_freezes_the_session() {
        let mut state = GameState::new(9);
        state.player.health = 5;
        state
            .spawner
            .register_repeating("bats", SpawnRequest::new("bat", 1), 500, 0);
        let id = state
            .spawner
            .spawn_entity("skeleton", &Default::default(), &mut state.events)
            .unwrap();

        let contact = TickInput {
            now_ms: 100,
            contacts: vec![id],
            ..Default::default()
        };
        tick(&mut state, &contact);
        assert_eq!(state.phase, GamePhase::Defeated);
        assert_eq!(state.spawner.repeating_keys().count(), 0);

        let survived = state.stats.survived_ms;
        let player = state.player.pos;
        tick(&mut state, &input(5000, Vec2::new(1.0, 0.0)));
        assert_eq!(state.stats.survived_ms, survived);
        assert_eq!(state.player.pos, player);
        assert_eq!(state.stats.spawned, 0);

        let defeats = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDefeated))
            .count();
        assert_eq!(defeats, 1);

        state.end_session();
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.spawner.monsters().is_empty());
    }

    #[test]
    fn dying_monster_is_released_after_defeat() {
        let mut state = GameState::new(13);
        state.player.health = 1;
        let victim = state
            .spawner
            .spawn_entity("bat", &Default::default(), &mut state.events)
            .unwrap();
        let attacker = state
            .spawner
            .spawn_entity("skeleton", &Default::default(), &mut state.events)
            .unwrap();
        // Swing kills the bat on the same tick the skeleton lands its blow
        {
            let m = state.spawner.monster_mut(victim).unwrap();
            m.pos = state.player.pos + Vec2::new(SWING_OFFSET, 0.0);
            m.speed = 0.0;
        }
        tick(
            &mut state,
            &TickInput {
                now_ms: 0,
                contacts: vec![attacker],
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Defeated);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::MonsterDied { id: victim }));
        assert!(!events.contains(&GameEvent::MonsterReleased { id: victim }));

        tick(&mut state, &input(DEATH_FADE_MS, Vec2::ZERO));
        assert_eq!(state.drain_events(), vec![GameEvent::MonsterReleased { id: victim }]);

        tick(&mut state, &input(DEATH_FADE_MS * 10, Vec2::ZERO));
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn same_seed_same_session() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            state
                .spawner
                .register_repeating("mix", SpawnRequest::new("skeleton", 3), 700, 0);
            let mut now = 0;
            while now < 5000 {
                tick(&mut state, &input(now, Vec2::new(1.0, 0.3)));
                now += SIM_DT_MS;
            }
            state
                .spawner
                .monsters()
                .iter()
                .map(|m| (m.id, m.pos))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(1234), run(1234));
    }
}
