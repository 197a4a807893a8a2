//! Hit resolution between abilities, monsters and the player

use std::collections::BTreeSet;

use super::monster::{DamageOutcome, MonsterId};
use super::state::{GameEvent, GamePhase, GameState};

/// Apply effect-instance hits: each instance damages a given monster at most once
pub fn resolve_effect_hits(state: &mut GameState, now_ms: u64) {
    let hit_radius = state.hit_radius;
    let mut killed = Vec::new();

    for ability in &mut state.abilities {
        let damage = ability.damage_value();
        for inst in ability.active_instances_mut() {
            for monster in state.spawner.monsters_mut() {
                if !monster.is_alive() || inst.pos.distance(monster.pos) >= hit_radius {
                    continue;
                }
                if !inst.mark_hit(monster.id) {
                    continue;
                }
                let (knockback, died) = match monster.apply_damage(damage) {
                    DamageOutcome::Ignored => continue,
                    DamageOutcome::Hurt { knockback } => (knockback, false),
                    DamageOutcome::Killed { knockback } => (knockback, true),
                };
                state.events.push(GameEvent::MonsterHit {
                    id: monster.id,
                    damage,
                    health: monster.health(),
                    knockback,
                });
                if died {
                    state.events.push(GameEvent::MonsterDied { id: monster.id });
                    killed.push(monster.id);
                }
            }
        }
    }

    for id in killed {
        state.spawner.begin_release(id, now_ms);
    }
}

/// Monsters currently touching the player: engine-reported overlaps plus our own radius test
pub fn player_contacts(state: &GameState, reported: &[MonsterId]) -> BTreeSet<MonsterId> {
    let player = &state.player;
    let mut contacts: BTreeSet<MonsterId> = reported.iter().copied().collect();
    contacts.extend(
        state
            .spawner
            .monsters()
            .iter()
            .filter(|m| m.is_alive() && m.pos.distance(player.pos) < player.radius + m.radius)
            .map(|m| m.id),
    );
    contacts
}

/// Apply cooldown-gated contact damage to the player; defeat ends spawning
pub fn resolve_player_contacts(state: &mut GameState, now_ms: u64, reported: &[MonsterId]) {
    if state.phase != GamePhase::Playing {
        return;
    }

    for id in player_contacts(state, reported) {
        let Some(monster) = state.spawner.monster_mut(id) else {
            continue;
        };
        if !monster.is_alive() || !monster.can_deal_damage_at(now_ms) {
            continue;
        }
        let damage = monster.damage_value();
        state.player.health -= damage;
        state.events.push(GameEvent::PlayerHit {
            by: id,
            damage,
            health: state.player.health,
        });
        log::debug!("Player hit by {:?} for {} ({} left)", id, damage, state.player.health);

        if state.player.is_defeated() {
            state.phase = GamePhase::Defeated;
            state.spawner.deactivate();
            state.events.push(GameEvent::PlayerDefeated);
            log::info!("Player defeated at {}ms", now_ms);
            return;
        }
    }
}
