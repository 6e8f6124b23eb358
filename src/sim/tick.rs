//! Per-tick orchestration of the run state machine
//!
//! One tick advances the player, scrolls and spawns entities, resolves
//! collisions, prunes what scrolled off, and ramps difficulty. Ticks
//! received while the run is over are no-ops; the driver is expected to
//! stop calling, but stray ticks must be harmless.

use crate::sim::{collision, physics, spawn};
use crate::sim::state::{RunSession, RunStatus};

/// Input edges for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump requested since the last tick (no-op unless grounded)
    pub jump: bool,
}

/// Advance the session by one simulation tick.
pub fn tick(session: &mut RunSession, input: &TickInput) {
    if session.status == RunStatus::Over {
        return;
    }

    // Input edges apply at the start of the tick
    if input.jump {
        physics::jump(&mut session.player, &session.config);
    }
    physics::integrate(&mut session.player, &session.config);

    // Scroll everything leftward
    for obs in &mut session.obstacles {
        obs.pos.x -= session.scroll_speed;
    }
    for orb in &mut session.orbs {
        orb.pos.x -= session.scroll_speed;
    }

    let batch = spawn::spawn_check(
        session.tick_count,
        session.score,
        &session.config,
        &mut session.rng,
    );
    session.obstacles.extend(batch.obstacle);
    session.orbs.extend(batch.orb);

    collision::resolve(session);
    if session.status == RunStatus::Over {
        // Fatal hit: remaining work for this tick is skipped
        return;
    }

    session.obstacles.retain(|o| !o.off_screen());
    session.orbs.retain(|o| !o.off_screen());

    session.tick_count += 1;
    if session.tick_count % session.config.speed_ramp_ticks == 0 {
        session.scroll_speed += session.config.speed_increment;
    }
}

/// Discard the ended run and re-enter `Running` with fresh state.
///
/// Only valid from `Over`; calling while the run is still live is silently
/// ignored so a stray restart edge can never wipe an active session.
pub fn restart(session: &mut RunSession, seed: u64) {
    if session.status != RunStatus::Over {
        return;
    }
    log::info!("Restarting run (seed {seed})");
    *session = RunSession::fresh(seed, session.config.clone());
}
