//! Data-driven game balance
//!
//! Timing and threshold knobs live here rather than in `consts` so a run
//! can be rebalanced without a rebuild: an optional `tuning.json` in the
//! working directory overrides the defaults.

use serde::{Deserialize, Serialize};

/// Balance knobs for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at session start
    pub initial_lives: u8,
    /// Kills required before the boss replaces the next opponent.
    /// The reference game effectively used 1 (boss on the first kill).
    pub boss_threshold: u32,
    /// Minimum simulation time between player shots
    pub player_fire_cooldown_ms: f64,
    /// Minimum simulation time between opponent/boss shots
    pub opponent_fire_cooldown_ms: f64,
    /// Pause between a kill and its win/replacement transition, so the
    /// death animation gets a moment on screen
    pub defeat_delay_ms: f64,
    /// Pause between a player hit and the respawn
    pub respawn_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            boss_threshold: 1,
            player_fire_cooldown_ms: 500.0,
            opponent_fire_cooldown_ms: 2000.0,
            defeat_delay_ms: 1000.0,
            respawn_delay_ms: 2000.0,
        }
    }
}

impl Tuning {
    /// Override file, looked up in the working directory
    const FILE: &'static str = "tuning.json";

    /// Load tuning overrides if the file exists, defaults otherwise
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning overrides from {}", Self::FILE);
                    tuning
                }
                Err(e) => {
                    log::warn!("ignoring malformed {}: {}", Self::FILE, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = Tuning::default();
        assert_eq!(tuning.initial_lives, 3);
        assert_eq!(tuning.boss_threshold, 1);
        assert_eq!(tuning.player_fire_cooldown_ms, 500.0);
        assert_eq!(tuning.opponent_fire_cooldown_ms, 2000.0);
    }

    #[test]
    fn test_partial_override() {
        // Unknown-to-missing fields fall back to defaults
        let tuning: Tuning = serde_json::from_str(r#"{"boss_threshold": 5}"#).unwrap();
        assert_eq!(tuning.boss_threshold, 5);
        assert_eq!(tuning.initial_lives, 3);
    }
}
