//! Entity spawning and difficulty cadence
//!
//! Spawn checks fire on a score-driven interval that shrinks toward a floor
//! as the run progresses; whether anything is actually emitted on a passing
//! check is probabilistic. The per-tick pattern is unpredictable but the
//! average difficulty is a deterministic function of score.

use glam::Vec2;
use rand::Rng;

use crate::config::RunConfig;
use crate::consts::*;
use crate::sim::state::{NEON_PALETTE, Obstacle, Orb};

/// Entities emitted by one spawn check
#[derive(Debug, Default)]
pub struct SpawnBatch {
    pub obstacle: Option<Obstacle>,
    pub orb: Option<Orb>,
}

impl SpawnBatch {
    pub fn is_empty(&self) -> bool {
        self.obstacle.is_none() && self.orb.is_none()
    }
}

/// Run one spawn decision for the given tick.
///
/// Off-cadence ticks emit nothing. On a passing check the obstacle and orb
/// draws are independent: both, either, or neither may fire. The random
/// source is injected so tests can seed or script it.
pub fn spawn_check<R: Rng>(
    tick_count: u64,
    score: u32,
    config: &RunConfig,
    rng: &mut R,
) -> SpawnBatch {
    let interval = config.spawn_interval(score);
    if tick_count % interval != 0 {
        return SpawnBatch::default();
    }

    let mut batch = SpawnBatch::default();
    if rng.random_bool(config.obstacle_spawn_prob) {
        batch.obstacle = Some(random_obstacle(rng));
    }
    if rng.random_bool(config.orb_spawn_prob) {
        batch.orb = Some(random_orb(rng));
    }
    batch
}

/// An obstacle just past the right edge, on one of the two lanes, with
/// bounded random extents and a palette color.
fn random_obstacle<R: Rng>(rng: &mut R) -> Obstacle {
    let lane = if rng.random_bool(0.5) {
        0.0
    } else {
        LANE_OFFSET
    };
    let w = rng.random_range(OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH);
    let h = if rng.random_bool(OBSTACLE_TALL_CHANCE) {
        OBSTACLE_BASE_HEIGHT + OBSTACLE_TALL_EXTRA
    } else {
        OBSTACLE_BASE_HEIGHT
    };
    let color = NEON_PALETTE[rng.random_range(0..NEON_PALETTE.len())];
    Obstacle {
        pos: Vec2::new(FIELD_WIDTH + SPAWN_MARGIN, GROUND_Y - lane),
        w,
        h,
        color,
    }
}

/// An orb just past the right edge, lifted slightly above one of the lanes.
fn random_orb<R: Rng>(rng: &mut R) -> Orb {
    let lane = if rng.random_bool(0.5) {
        LANE_OFFSET
    } else {
        0.0
    };
    Orb {
        pos: Vec2::new(
            FIELD_WIDTH + SPAWN_MARGIN,
            GROUND_Y - lane - ORB_LANE_LIFT,
        ),
        radius: ORB_RADIUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Spawn checks over `ticks` simulated ticks at a fixed score.
    fn count_obstacles(score: u32, ticks: u64, seed: u64) -> usize {
        let config = RunConfig::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..ticks)
            .filter(|&t| spawn_check(t, score, &config, &mut rng).obstacle.is_some())
            .count()
    }

    #[test]
    fn test_no_spawn_off_cadence() {
        let config = RunConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        // Interval at score 0 is 44, so ticks 1..44 never spawn
        for t in 1..44 {
            assert!(spawn_check(t, 0, &config, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_spawn_rate_monotonic_in_score() {
        // Higher score means shorter interval means more spawns on average.
        let low = count_obstacles(0, 20_000, 42);
        let high = count_obstacles(20, 20_000, 42);
        assert!(
            high >= low,
            "expected spawn frequency at score 20 ({high}) >= score 0 ({low})"
        );
    }

    #[test]
    fn test_spawn_rate_converges_to_floor() {
        let config = RunConfig::default();
        // At score 200 the interval has bottomed out at the floor
        assert_eq!(config.spawn_interval(200), config.min_spawn_interval);
        let floored = count_obstacles(200, 18_000, 9);
        // 18_000 / 18 = 1000 checks at 0.6 obstacle probability; allow slack
        assert!((450..=750).contains(&floored), "got {floored}");
    }

    #[test]
    fn test_spawned_entities_enter_off_right_edge() {
        let config = RunConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen_obstacle = false;
        let mut seen_orb = false;
        for t in (0..10_000).step_by(44) {
            let batch = spawn_check(t, 0, &config, &mut rng);
            if let Some(obs) = batch.obstacle {
                seen_obstacle = true;
                assert_eq!(obs.pos.x, FIELD_WIDTH + SPAWN_MARGIN);
                assert!(obs.pos.y == GROUND_Y || obs.pos.y == GROUND_Y - LANE_OFFSET);
                assert!((OBSTACLE_MIN_WIDTH..OBSTACLE_MAX_WIDTH).contains(&obs.w));
                assert!(
                    obs.h == OBSTACLE_BASE_HEIGHT
                        || obs.h == OBSTACLE_BASE_HEIGHT + OBSTACLE_TALL_EXTRA
                );
            }
            if let Some(orb) = batch.orb {
                seen_orb = true;
                assert_eq!(orb.pos.x, FIELD_WIDTH + SPAWN_MARGIN);
                assert_eq!(orb.radius, ORB_RADIUS);
            }
        }
        assert!(seen_obstacle && seen_orb);
    }

    #[test]
    fn test_same_seed_same_spawn_sequence() {
        let config = RunConfig::default();
        let mut a = Pcg32::seed_from_u64(77);
        let mut b = Pcg32::seed_from_u64(77);
        for t in 0..2_000 {
            let ba = spawn_check(t, 5, &config, &mut a);
            let bb = spawn_check(t, 5, &config, &mut b);
            assert_eq!(ba.obstacle.is_some(), bb.obstacle.is_some());
            assert_eq!(ba.orb.is_some(), bb.orb.is_some());
            if let (Some(x), Some(y)) = (&ba.obstacle, &bb.obstacle) {
                assert_eq!(x.pos, y.pos);
                assert_eq!(x.w, y.w);
                assert_eq!(x.color, y.color);
            }
        }
    }
}
