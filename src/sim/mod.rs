//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input-device, or platform dependencies

pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{player_hits_obstacle, player_picks_orb};
pub use spawn::{SpawnBatch, spawn_check};
pub use state::{
    NEON_PALETTE, NeonColor, Obstacle, Orb, PlayerBody, PowerUp, RunEvent, RunSession, RunStatus,
};
pub use tick::{TickInput, restart, tick};
