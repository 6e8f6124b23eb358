//! Run state and core simulation types
//!
//! Everything a session owns lives here. Entities carry no back-references;
//! a session is created at start/restart and discarded wholesale, so nothing
//! survives across sessions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, RunConfig};
use crate::consts::*;

/// Current status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Active gameplay
    Running,
    /// Run ended on a fatal collision; only `restart` leaves this state
    Over,
}

/// Active power-up tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    /// Cancels exactly one otherwise-fatal obstacle collision
    Shield,
}

/// Display color tag for obstacles (presentation owns the actual pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeonColor {
    Green,
    Magenta,
    Cyan,
    Yellow,
    Red,
}

/// The fixed obstacle palette, in spawn-draw order
pub const NEON_PALETTE: [NeonColor; 5] = [
    NeonColor::Green,
    NeonColor::Magenta,
    NeonColor::Cyan,
    NeonColor::Yellow,
    NeonColor::Red,
];

impl NeonColor {
    /// CSS hex value for canvas renderers
    pub fn as_css(&self) -> &'static str {
        match self {
            NeonColor::Green => "#39ff14",
            NeonColor::Magenta => "#ff00de",
            NeonColor::Cyan => "#00fff0",
            NeonColor::Yellow => "#ffd600",
            NeonColor::Red => "#ff004c",
        }
    }
}

/// The player's body in its fixed horizontal lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Position; x never changes, y is clamped to the ground line
    pub pos: Vec2,
    /// Vertical velocity (positive = down, screen coordinates)
    pub vel_y: f32,
    /// True from the tick a jump launches until the body re-grounds
    pub airborne: bool,
    /// Single-use shield charge
    pub shielded: bool,
}

impl PlayerBody {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y),
            vel_y: 0.0,
            airborne: false,
            shielded: false,
        }
    }

    /// At the ground line, eligible to jump
    pub fn grounded(&self) -> bool {
        self.pos.y >= GROUND_Y
    }
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new()
    }
}

/// A scrolling obstacle block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub color: NeonColor,
}

impl Obstacle {
    /// Fully past the left edge, eligible for pruning
    pub fn off_screen(&self) -> bool {
        self.pos.x + self.w < 0.0
    }
}

/// A collectible orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
}

impl Orb {
    pub fn off_screen(&self) -> bool {
        self.pos.x < 0.0
    }
}

/// One-shot notifications for the host shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    /// Emitted exactly once, on the transition to `Over`
    GameOver { score: u32 },
}

/// Complete state of one play-through
///
/// Exclusively owns the player body and both entity collections for its
/// lifetime. All randomness draws from the session RNG, so a run is
/// reproducible from its seed.
#[derive(Debug, Clone)]
pub struct RunSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: RunConfig,
    pub player: PlayerBody,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    /// Orbs gathered this run; monotonic while `Running`
    pub score: u32,
    /// Leftward entity speed; monotonic, ramps periodically
    pub scroll_speed: f32,
    pub tick_count: u64,
    pub status: RunStatus,
    /// Active precisely while `player.shielded`
    pub power_up: Option<PowerUp>,
    /// Pending events, drained by the driver
    pub events: Vec<RunEvent>,
    pub(crate) rng: Pcg32,
}

impl RunSession {
    /// Create a session with the given seed, rejecting invalid tuning.
    pub fn new(seed: u64, config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("New run session (seed {seed})");
        Ok(Self::fresh(seed, config))
    }

    /// Build initial state from already-validated tuning.
    pub(crate) fn fresh(seed: u64, config: RunConfig) -> Self {
        let scroll_speed = config.start_scroll_speed;
        Self {
            seed,
            config,
            player: PlayerBody::new(),
            obstacles: Vec::new(),
            orbs: Vec::new(),
            score: 0,
            scroll_speed,
            tick_count: 0,
            status: RunStatus::Running,
            power_up: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Take all pending events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_initial_state() {
        let s = RunSession::new(7, RunConfig::default()).unwrap();
        assert_eq!(s.status, RunStatus::Running);
        assert_eq!(s.score, 0);
        assert_eq!(s.scroll_speed, START_SCROLL_SPEED);
        assert!(s.obstacles.is_empty());
        assert!(s.orbs.is_empty());
        assert!(s.player.grounded());
        assert!(!s.player.shielded);
        assert_eq!(s.power_up, None);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let cfg = RunConfig {
            min_spawn_interval: 0,
            ..Default::default()
        };
        assert!(RunSession::new(7, cfg).is_err());
    }

    #[test]
    fn test_obstacle_off_screen_requires_full_exit() {
        let mut obs = Obstacle {
            pos: Vec2::new(-10.0, GROUND_Y),
            w: 32.0,
            h: 44.0,
            color: NeonColor::Cyan,
        };
        assert!(!obs.off_screen());
        obs.pos.x = -40.0;
        assert!(obs.off_screen());
    }
}
