//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    Actor, ActorKind, GamePhase, GameState, PendingDefeat, Projectile, ProjectileOwner,
};
pub use tick::{TickInput, tick};
