//! Runner/obstacle hit test
//!
//! Pure geometry over the runner position and the nearest obstacle. The
//! runner's horizontal reach shrinks while it is high in its jump arc, which
//! lets a well-timed jump clear an obstacle it would clip at low altitude.
//! The left/right band asymmetry is deliberate gameplay tuning.

use crate::config::GameConfig;
use crate::sim::obstacles::Obstacle;

/// Reach shrink above the high-altitude line.
const REACH_SHRINK_HIGH: f32 = 40.0;
/// Reach shrink at or below it.
const REACH_SHRINK_LOW: f32 = 10.0;
/// Vertical overlap margin below the runner's top edge.
const VERTICAL_MARGIN: f32 = 40.0;

/// Whether the runner at (`runner_x`, `runner_y`) hits `obstacle` this tick.
pub fn detect(
    runner_x: f32,
    runner_y: f32,
    runner_width: f32,
    runner_height: f32,
    ground_level: f32,
    obstacle: &Obstacle,
) -> bool {
    // No vertical overlap: the obstacle top sits above the collision band.
    if obstacle.y >= runner_y + VERTICAL_MARGIN {
        return false;
    }

    // High altitude is measured from the feet line (ground_level is the top
    // edge of a grounded sprite).
    let feet_line = ground_level + runner_height;
    let high = runner_y < feet_line - runner_height * 1.2;
    let reach = if high {
        runner_width - REACH_SHRINK_HIGH
    } else {
        runner_width - REACH_SHRINK_LOW
    };

    let mid = obstacle.x + obstacle.width / 2.0;
    let front = runner_x + reach;

    // Leading edge inside the obstacle's left half.
    if front > obstacle.x && front < mid {
        return true;
    }
    // Runner body inside the right half, short of the far edge.
    if runner_x > mid && runner_x < obstacle.x + obstacle.width - reach {
        return true;
    }
    false
}

/// Convenience wrapper taking the configured runner geometry.
pub fn detect_with_config(config: &GameConfig, runner_y: f32, obstacle: &Obstacle) -> bool {
    detect(
        config.runner_x,
        runner_y,
        config.runner_width,
        config.runner_height,
        config.ground_level,
        obstacle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ObstacleKind;

    fn obstacle(x: f32) -> Obstacle {
        Obstacle {
            x,
            y: 330.0,
            width: 50.0,
            height: 50.0,
            kind: ObstacleKind::Small,
        }
    }

    // Default geometry: runner_x=50, width=50, height=50, ground=330.
    // Grounded reach = 40, so the front edge is at 90.
    const GROUND: f32 = 330.0;

    fn hit(runner_y: f32, obs_x: f32) -> bool {
        detect(50.0, runner_y, 50.0, 50.0, GROUND, &obstacle(obs_x))
    }

    #[test]
    fn test_low_left_band_boundaries() {
        // Left band: front (90) inside (obs.x, obs.x + 25).
        assert!(hit(GROUND, 65.1)); // mid=90.1, front just short of it
        assert!(hit(GROUND, 89.9)); // front just past the left edge
        assert!(!hit(GROUND, 64.9)); // mid=89.9, front past the midpoint
        assert!(!hit(GROUND, 90.1)); // obstacle fully ahead
    }

    #[test]
    fn test_high_reach_shrinks_by_thirty_more() {
        // y=300 is above the feet-line threshold (330+50-60=320): reach=10,
        // front=60.
        assert!(hit(300.0, 35.1));
        assert!(hit(300.0, 59.9));
        assert!(!hit(300.0, 34.9));
        assert!(!hit(300.0, 60.1));
    }

    #[test]
    fn test_threshold_uses_low_reach_at_boundary() {
        // y=320 sits exactly on the threshold: not high, reach stays 40.
        assert!(hit(320.0, 89.9));
        assert!(!hit(320.0, 60.1));
    }

    #[test]
    fn test_right_band() {
        // Runner x=50 past mid, short of far edge minus reach.
        // High (reach 10): obs.x=20 -> mid=45 < 50 < 60.
        assert!(hit(300.0, 20.0));
        assert!(!hit(300.0, 9.9)); // far edge - reach = 49.9, runner not short of it
        // Low (reach 40): far edge - 40 leaves no room past mid for w=50.
        assert!(!hit(GROUND, 20.0));
    }

    #[test]
    fn test_vertical_gate_clears_everything() {
        // y=260: obstacle top (330) is outside 260+40, no overlap anywhere.
        for x in [20.0, 35.1, 59.9, 65.1, 89.9] {
            assert!(!hit(260.0, x));
        }
    }

    #[test]
    fn test_wide_obstacle_right_band_low() {
        // Width 90: mid = obs.x + 45, far edge - 40 = obs.x + 50.
        let wide = Obstacle {
            x: 2.0,
            y: 330.0,
            width: 90.0,
            height: 50.0,
            kind: ObstacleKind::Large,
        };
        // mid=47 < 50 < 52: caught straddling the back half.
        assert!(detect(50.0, GROUND, 50.0, 50.0, GROUND, &wide));
    }

    #[test]
    fn test_config_wrapper_matches_raw_call() {
        let cfg = GameConfig::default();
        let obs = obstacle(70.0);
        assert_eq!(
            detect_with_config(&cfg, GROUND, &obs),
            detect(50.0, GROUND, 50.0, 50.0, GROUND, &obs)
        );
    }
}
