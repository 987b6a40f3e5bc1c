//! Star Square Shooter - a single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `ui`: Terminal rendering (presentation only, no game logic)

pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical arena dimensions; all positions live in this space
    /// regardless of the display size.
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Fixed simulation timestep (60 Hz); speeds below are units per tick
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Gap between the player's bottom edge and the arena floor
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const PLAYER_SHOT_SPEED: f32 = -7.0;

    /// Opponent defaults
    pub const OPPONENT_SIZE: f32 = 50.0;
    pub const OPPONENT_SPEED: f32 = 2.0;
    /// Vertical offset of a freshly spawned opponent from the arena top
    pub const OPPONENT_TOP_OFFSET: f32 = 50.0;
    /// Descent applied each time the patrol reverses at a horizontal bound
    pub const OPPONENT_DESCENT_STEP: f32 = 20.0;
    pub const OPPONENT_SHOT_SPEED: f32 = 5.0;
    /// Boss movement speed multiplier applied at construction
    pub const BOSS_SPEED_FACTOR: f32 = 2.0;

    /// Projectile dimensions
    pub const SHOT_WIDTH: f32 = 5.0;
    pub const SHOT_HEIGHT: f32 = 15.0;
}
