//! Collision detection and outcome rules
//!
//! The player's bounding region is an axis-aligned box with fixed
//! half-extents centered on the body position; obstacles are AABBs and orbs
//! use a box approximation of their pickup radius. Obstacles resolve before
//! collectibles, and a fatal hit short-circuits the rest of the tick.

use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Obstacle, Orb, PlayerBody, PowerUp, RunEvent, RunSession, RunStatus};

/// AABB overlap between the player box and an obstacle.
pub fn player_hits_obstacle(player: &PlayerBody, obs: &Obstacle) -> bool {
    player.pos.x + PLAYER_HALF_EXTENT > obs.pos.x
        && player.pos.x - PLAYER_HALF_EXTENT < obs.pos.x + obs.w
        && player.pos.y + PLAYER_HALF_EXTENT > obs.pos.y
        && player.pos.y - PLAYER_HALF_EXTENT < obs.pos.y + obs.h
}

/// Pickup window test between the player and an orb center.
pub fn player_picks_orb(player: &PlayerBody, orb: &Orb) -> bool {
    (orb.pos.x - player.pos.x).abs() < ORB_PICKUP_DX
        && (orb.pos.y - player.pos.y).abs() < ORB_PICKUP_DY
}

/// Resolve all overlaps for the current tick.
///
/// Obstacle outcomes: a shielded hit consumes the obstacle and the shield
/// (single-use, not time-limited); an unshielded hit ends the run
/// immediately and skips collectible processing for this tick. Orb pickups
/// increment the score and may grant the shield power-up; re-triggering
/// while already shielded does not stack.
pub fn resolve(session: &mut RunSession) {
    let mut i = 0;
    while i < session.obstacles.len() {
        if player_hits_obstacle(&session.player, &session.obstacles[i]) {
            if session.player.shielded {
                // Membership matters, order doesn't
                session.obstacles.swap_remove(i);
                session.player.shielded = false;
                session.power_up = None;
                continue;
            }
            session.status = RunStatus::Over;
            session.events.push(RunEvent::GameOver {
                score: session.score,
            });
            log::info!(
                "Run over at score {} (tick {})",
                session.score,
                session.tick_count
            );
            return;
        }
        i += 1;
    }

    let mut i = 0;
    while i < session.orbs.len() {
        if player_picks_orb(&session.player, &session.orbs[i]) {
            session.orbs.swap_remove(i);
            session.score += 1;
            // Independent draw per pickup; granting while shielded is inert
            if session.rng.random_bool(session.config.shield_drop_prob) {
                session.player.shielded = true;
                session.power_up = Some(PowerUp::Shield);
            }
            continue;
        }
        i += 1;
    }
}
