//! Gameplay tuning
//!
//! The balance numbers that were presentation-tuned literals in the original
//! prototype live here as named, validated configuration. A session refuses
//! to construct from a config that would produce undefined runtime behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Invalid gameplay configuration, rejected at session construction
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("gravity must be positive, got {0}")]
    NonPositiveGravity(f32),
    #[error("jump impulse must point upward (negative), got {0}")]
    NonUpwardImpulse(f32),
    #[error("spawn interval floor must be at least 1, got {0}")]
    ZeroIntervalFloor(u64),
    #[error("spawn interval floor {floor} exceeds base interval {base}")]
    IntervalFloorAboveBase { floor: u64, base: u64 },
    #[error("probability `{name}` must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("scroll speed must be positive, got {0}")]
    NonPositiveScrollSpeed(f32),
    #[error("speed ramp period must be at least 1 tick, got {0}")]
    ZeroRampPeriod(u64),
}

/// Tunable gameplay balance for one run session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Downward acceleration applied to the player each tick
    pub gravity: f32,
    /// Velocity impulse applied by a jump (negative = up)
    pub jump_impulse: f32,
    /// Leftward entity scroll speed at session start
    pub start_scroll_speed: f32,
    /// Scroll speed gained on each difficulty ramp
    pub speed_increment: f32,
    /// Ticks between scroll-speed ramps
    pub speed_ramp_ticks: u64,
    /// Spawn-check interval at score 0 (shrinks as score grows)
    pub base_spawn_interval: u64,
    /// Spawn-check interval never shrinks below this
    pub min_spawn_interval: u64,
    /// Chance an obstacle is emitted on a passing spawn check
    pub obstacle_spawn_prob: f64,
    /// Chance an orb is emitted on a passing spawn check
    pub orb_spawn_prob: f64,
    /// Chance an orb pickup grants the shield power-up
    pub shield_drop_prob: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            start_scroll_speed: START_SCROLL_SPEED,
            speed_increment: 0.4,
            speed_ramp_ticks: 300,
            base_spawn_interval: 44,
            min_spawn_interval: 18,
            obstacle_spawn_prob: 0.6,
            orb_spawn_prob: 0.3,
            shield_drop_prob: 0.2,
        }
    }
}

impl RunConfig {
    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 {
            return Err(ConfigError::NonPositiveGravity(self.gravity));
        }
        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::NonUpwardImpulse(self.jump_impulse));
        }
        if self.min_spawn_interval == 0 {
            return Err(ConfigError::ZeroIntervalFloor(self.min_spawn_interval));
        }
        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(ConfigError::IntervalFloorAboveBase {
                floor: self.min_spawn_interval,
                base: self.base_spawn_interval,
            });
        }
        for (name, value) in [
            ("obstacle_spawn_prob", self.obstacle_spawn_prob),
            ("orb_spawn_prob", self.orb_spawn_prob),
            ("shield_drop_prob", self.shield_drop_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.start_scroll_speed <= 0.0 {
            return Err(ConfigError::NonPositiveScrollSpeed(self.start_scroll_speed));
        }
        if self.speed_ramp_ticks == 0 {
            return Err(ConfigError::ZeroRampPeriod(self.speed_ramp_ticks));
        }
        Ok(())
    }

    /// Spawn-check interval for the given score: shrinks as the score grows,
    /// never below the floor.
    pub fn spawn_interval(&self, score: u32) -> u64 {
        self.base_spawn_interval
            .saturating_sub(u64::from(score) / 2)
            .max(self.min_spawn_interval)
    }
}
