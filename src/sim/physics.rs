//! Vertical motion for the player body
//!
//! Explicit Euler under constant gravity with a single fixed jump impulse.
//! No variable-height jumps: given the same impulse and gravity and no jump
//! calls, two runs produce identical trajectories.

use crate::config::RunConfig;
use crate::consts::GROUND_Y;
use crate::sim::state::PlayerBody;

/// Apply the jump impulse if the body rests on the ground.
///
/// Calling this while airborne is a no-op, which makes redundant jump
/// signals from the input layer harmless.
pub fn jump(body: &mut PlayerBody, config: &RunConfig) {
    if body.grounded() {
        body.vel_y = config.jump_impulse;
        body.airborne = true;
    }
}

/// Advance the body by one tick: integrate velocity, then clamp to ground.
///
/// When the body reaches the ground line from above, y clamps to `GROUND_Y`,
/// velocity zeroes, and `airborne` clears, all in the same tick.
pub fn integrate(body: &mut PlayerBody, config: &RunConfig) {
    body.vel_y += config.gravity;
    body.pos.y += body.vel_y;
    if body.pos.y >= GROUND_Y {
        body.pos.y = GROUND_Y;
        body.vel_y = 0.0;
        body.airborne = false;
    }
}
