//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one 60 Hz step. The frontend
//! accumulates real time and calls `tick` per elapsed step, so the
//! millisecond-based cooldowns behave the same at any frame rate.

use super::state::{GamePhase, GameState, PendingDefeat};
use crate::consts::*;

/// Sampled input for a single tick (deterministic)
///
/// The frontend rebuilds this snapshot each frame from its event-derived
/// key/pointer state; the simulation never reads input any other way.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left movement key held
    pub left: bool,
    /// Right movement key held
    pub right: bool,
    /// Fire key/button held
    pub fire: bool,
    /// Active pointer/touch drag, as an arena x coordinate
    pub pointer_x: Option<f32>,
    /// Start/restart action (one-shot)
    pub start: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Ticks run in every phase; the per-step gating below decides what takes
/// effect. Player input and collision handling apply only in `Playing`,
/// the opponent patrols whenever it is alive, projectiles always advance.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start
        && matches!(
            state.phase,
            GamePhase::Start | GamePhase::Win | GamePhase::GameOver
        )
    {
        state.start_session();
    }

    state.time_ticks += 1;
    state.time_ms += SIM_DT_MS;
    let now = state.time_ms;

    // Player movement and firing
    if state.phase == GamePhase::Playing {
        if input.left {
            state.player.move_left();
        }
        if input.right {
            state.player.move_right();
        }
        // Pointer drag is applied after the keys and steers toward the
        // pointer column, so an active drag dominates held keys.
        if let Some(px) = input.pointer_x {
            if px < state.player.rect.center_x() {
                state.player.move_left();
            } else {
                state.player.move_right();
            }
        }
        state.player.clamp_to_arena();

        if input.fire {
            let cooldown = state.tuning.player_fire_cooldown_ms;
            if let Some(shot) = state.player.try_fire(now, cooldown) {
                state.player_shots.push(shot);
            }
        }
    }

    // Opponent patrol and firing, gated only on being alive
    if let Some(opponent) = state.opponent.as_mut() {
        if !opponent.dead {
            opponent.patrol();
            let cooldown = state.tuning.opponent_fire_cooldown_ms;
            if let Some(shot) = opponent.try_fire(now, cooldown) {
                state.opponent_shots.push(shot);
            }
        }
    }

    // Advance projectiles and drop the ones that left the arena
    for shot in &mut state.player_shots {
        shot.advance();
    }
    state.player_shots.retain(|s| !s.expired());
    for shot in &mut state.opponent_shots {
        shot.advance();
    }
    state.opponent_shots.retain(|s| !s.expired());

    // Collision handling
    if state.phase == GamePhase::Playing {
        if let Some(opponent) = state.opponent.as_mut() {
            if !opponent.dead {
                let hit = state
                    .player_shots
                    .iter()
                    .position(|s| s.rect.overlaps(&opponent.rect));
                if let Some(i) = hit {
                    opponent.collide();
                    state.player_shots.remove(i);
                    state.pending_defeat = Some(PendingDefeat {
                        at_ms: now + state.tuning.defeat_delay_ms,
                        was_boss: opponent.is_boss(),
                    });
                }
            }
        }

        if !state.player.dead {
            let hit = state
                .opponent_shots
                .iter()
                .position(|s| s.rect.overlaps(&state.player.rect));
            if let Some(i) = hit {
                state.opponent_shots.remove(i);
                if state.player.lose_life() {
                    state.phase = GamePhase::GameOver;
                    log::info!("game over at score {}", state.score);
                } else {
                    state.phase = GamePhase::Respawning;
                    state.respawn_at_ms = Some(now + state.tuning.respawn_delay_ms);
                }
            }
        }
    }

    // Timed sub-states
    if let Some(pending) = state.pending_defeat {
        match state.phase {
            GamePhase::Playing | GamePhase::Respawning if now >= pending.at_ms => {
                state.pending_defeat = None;
                if pending.was_boss {
                    state.phase = GamePhase::Win;
                    log::info!("boss defeated, session won at score {}", state.score);
                } else {
                    state.score += 1;
                    state.spawn_replacement();
                }
            }
            // A defeat that comes due after the session ended is stale
            GamePhase::Win | GamePhase::GameOver => state.pending_defeat = None,
            _ => {}
        }
    }

    if state.phase == GamePhase::Respawning {
        if let Some(at) = state.respawn_at_ms {
            if now >= at {
                state.respawn_at_ms = None;
                state.player.respawn();
                state.phase = GamePhase::Playing;
            }
        }
    }
}
