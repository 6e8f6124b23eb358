//! Fixed-timestep loop driver
//!
//! The host's render scheduler calls [`RunDriver::frame`] once per display
//! frame; the driver converts wall time into fixed simulation ticks with an
//! accumulator and a substep cap. Input arrives as edge-triggered signals
//! latched between frames and applied at the start of the next tick, so no
//! tick ever observes more than one jump or restart edge. Cancellation is
//! the host simply not calling `frame` again; the `Over` guard inside is
//! defense in depth.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, RunConfig};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::state::{Obstacle, Orb, PowerUp, RunEvent, RunSession, RunStatus};
use crate::sim::tick::{TickInput, restart, tick};

/// Player fields the presentation layer renders
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub airborne: bool,
    pub shielded: bool,
}

/// Immutable per-tick view of the session for the presentation layer
///
/// Presentation renders this and nothing else; it cannot reach the live
/// session through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub player: PlayerView,
    pub obstacles: Vec<Obstacle>,
    pub orbs: Vec<Orb>,
    pub score: u32,
    pub power_up: Option<PowerUp>,
    pub status: RunStatus,
}

/// Owns one session and pumps it at the fixed tick rate.
pub struct RunDriver {
    session: RunSession,
    accumulator: f32,
    jump_requested: bool,
    restart_requested: bool,
}

impl RunDriver {
    pub fn new(seed: u64, config: RunConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            session: RunSession::new(seed, config)?,
            accumulator: 0.0,
            jump_requested: false,
            restart_requested: false,
        })
    }

    /// Latch a jump edge for the next tick. Valid any time; the physics
    /// body ignores it unless grounded.
    pub fn on_jump_requested(&mut self) {
        self.jump_requested = true;
    }

    /// Latch a restart edge. Honored only while the run is over.
    pub fn on_restart_requested(&mut self) {
        self.restart_requested = true;
    }

    pub fn status(&self) -> RunStatus {
        self.session.status
    }

    /// Advance by one display frame of `dt` seconds.
    ///
    /// Returns the events produced this frame; the game-over report appears
    /// exactly once, on the frame the run ends. Once over, no further ticks
    /// run until a restart edge arrives.
    pub fn frame(&mut self, dt: f32) -> Vec<RunEvent> {
        if self.restart_requested {
            self.restart_requested = false;
            if self.session.status == RunStatus::Over {
                // Derive the next seed from the session's RNG lineage so
                // every session stays reproducible from the first seed.
                let seed = self.session.rng.random();
                restart(&mut self.session, seed);
                self.accumulator = 0.0;
            }
        }

        if self.session.status == RunStatus::Over {
            self.jump_requested = false;
            return self.session.drain_events();
        }

        // Clamp a long stall (tab switch) to one frame's worth of catchup
        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                jump: self.jump_requested,
            };
            tick(&mut self.session, &input);
            // One-shot edges are consumed by the first tick of the frame
            self.jump_requested = false;
            self.accumulator -= SIM_DT;
            substeps += 1;
            if self.session.status == RunStatus::Over {
                break;
            }
        }

        self.session.drain_events()
    }

    /// Current drawable state.
    pub fn snapshot(&self) -> FrameSnapshot {
        let s = &self.session;
        FrameSnapshot {
            player: PlayerView {
                x: s.player.pos.x,
                y: s.player.pos.y,
                airborne: s.player.airborne,
                shielded: s.player.shielded,
            },
            obstacles: s.obstacles.clone(),
            orbs: s.orbs.clone(),
            score: s.score,
            power_up: s.power_up,
            status: s.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUND_Y, PLAYER_X};
    use crate::sim::state::NeonColor;
    use glam::Vec2;

    fn driver() -> RunDriver {
        RunDriver::new(2024, RunConfig::default()).unwrap()
    }

    /// Force the session over by planting an obstacle on the player.
    fn kill(driver: &mut RunDriver) -> Vec<RunEvent> {
        driver.session.obstacles.push(Obstacle {
            pos: Vec2::new(PLAYER_X - 10.0, GROUND_Y - 10.0),
            w: 32.0,
            h: 44.0,
            color: NeonColor::Red,
        });
        driver.frame(SIM_DT)
    }

    #[test]
    fn test_frame_runs_ticks_at_fixed_rate() {
        let mut d = driver();
        d.frame(SIM_DT);
        assert_eq!(d.session.tick_count, 1);
        // Two frames' worth of time runs two ticks
        d.frame(2.0 * SIM_DT);
        assert_eq!(d.session.tick_count, 3);
    }

    #[test]
    fn test_substep_cap_bounds_catchup() {
        let mut d = driver();
        d.frame(10.0);
        assert!(d.session.tick_count <= u64::from(MAX_SUBSTEPS));
    }

    #[test]
    fn test_jump_edge_consumed_by_one_tick() {
        let mut d = driver();
        d.on_jump_requested();
        // The latched edge applies to exactly one tick
        d.frame(SIM_DT);
        d.frame(SIM_DT);
        d.frame(SIM_DT);
        let cfg = &d.session.config;
        // Velocity reflects a single impulse plus integrated gravity
        assert_eq!(d.session.player.vel_y, cfg.jump_impulse + 3.0 * cfg.gravity);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut d = driver();
        let events = kill(&mut d);
        assert_eq!(events, vec![RunEvent::GameOver { score: 0 }]);
        assert_eq!(d.status(), RunStatus::Over);

        // Later frames neither tick nor re-report
        let ticks = d.session.tick_count;
        assert!(d.frame(SIM_DT).is_empty());
        assert!(d.frame(SIM_DT).is_empty());
        assert_eq!(d.session.tick_count, ticks);
    }

    #[test]
    fn test_restart_only_honored_while_over() {
        let mut d = driver();
        d.frame(SIM_DT);
        let ticks = d.session.tick_count;

        // Ignored while running
        d.on_restart_requested();
        d.frame(SIM_DT);
        assert_eq!(d.status(), RunStatus::Running);
        assert_eq!(d.session.tick_count, ticks + 1);

        kill(&mut d);
        assert_eq!(d.status(), RunStatus::Over);

        d.on_restart_requested();
        d.frame(SIM_DT);
        assert_eq!(d.status(), RunStatus::Running);
        assert_eq!(d.session.score, 0);
        // The fresh session ran one tick; anything spawned is still at the
        // right edge, nowhere near the player
        assert!(d.session.obstacles.iter().all(|o| o.pos.x > 500.0));
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut d = driver();
        d.on_jump_requested();
        d.frame(SIM_DT);
        let snap = d.snapshot();
        assert_eq!(snap.player.x, PLAYER_X);
        assert!(snap.player.airborne);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.status, RunStatus::Running);
        // Snapshot serializes for the wasm boundary
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"status\":\"Running\""));
    }
}
