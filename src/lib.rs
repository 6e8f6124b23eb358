//! Neon Runner - side-scrolling runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `driver`: Fixed-timestep loop driver and frame snapshots
//! - `config`: Validated gameplay tuning
//!
//! Rendering, input-device binding, and the arcade cabinet shell are external
//! collaborators: this crate consumes abstract jump/restart events and emits
//! per-tick drawable snapshots, nothing else.

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, RunConfig};
pub use driver::{FrameSnapshot, RunDriver};

/// Game geometry and physics constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Visible field dimensions
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Ground line the player rests on
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 44.0;
    /// Player's fixed horizontal lane
    pub const PLAYER_X: f32 = 80.0;
    /// Half-extent of the player's collision box
    pub const PLAYER_HALF_EXTENT: f32 = 20.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 1.0;
    /// Upward jump impulse (negative = up, screen coordinates)
    pub const JUMP_IMPULSE: f32 = -18.0;

    /// Leftward scroll speed at session start
    pub const START_SCROLL_SPEED: f32 = 6.0;

    /// Entities enter this far beyond the right edge
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Height of the elevated spawn lane above the ground lane
    pub const LANE_OFFSET: f32 = 60.0;

    /// Obstacle width range
    pub const OBSTACLE_MIN_WIDTH: f32 = 32.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 64.0;
    /// Base obstacle height, with an occasional tall variant
    pub const OBSTACLE_BASE_HEIGHT: f32 = 44.0;
    pub const OBSTACLE_TALL_EXTRA: f32 = 30.0;
    pub const OBSTACLE_TALL_CHANCE: f64 = 0.3;

    /// Orb radius and vertical offset above its lane
    pub const ORB_RADIUS: f32 = 10.0;
    pub const ORB_LANE_LIFT: f32 = 20.0;
    /// Orb pickup window around the player center
    pub const ORB_PICKUP_DX: f32 = 28.0;
    pub const ORB_PICKUP_DY: f32 = 32.0;
}
