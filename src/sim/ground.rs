//! Scrolling ground strip
//!
//! A tile-width offset that wraps around, sharing the obstacle cadence and
//! the difficulty ramp. Purely visual state, but kept in the simulation so
//! the ramp applies to both speeds in one place.

use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    /// Horizontal scroll offset, in (-tile_width, 0].
    offset: f32,
    /// Pixels per tick, raised by the difficulty ramp.
    pub speed: f32,
    tile_width: f32,
}

impl Ground {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            offset: 0.0,
            speed: config.base_speed,
            tile_width: config.screen_width,
        }
    }

    pub fn reset(&mut self, config: &GameConfig) {
        self.offset = 0.0;
        self.speed = config.base_speed;
    }

    /// Scroll one tick, wrapping once a full tile has passed.
    pub fn advance(&mut self) {
        self.offset -= self.speed;
        if self.offset <= -self.tile_width {
            self.offset += self.tile_width;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_wraps_within_tile() {
        let cfg = GameConfig::default();
        let mut ground = Ground::new(&cfg);
        for _ in 0..1000 {
            ground.advance();
            assert!(ground.offset() <= 0.0);
            assert!(ground.offset() > -cfg.screen_width);
        }
    }

    #[test]
    fn test_reset_restores_base_speed() {
        let cfg = GameConfig::default();
        let mut ground = Ground::new(&cfg);
        ground.speed = 9.0;
        ground.advance();
        ground.reset(&cfg);
        assert_eq!(ground.speed, cfg.base_speed);
        assert_eq!(ground.offset(), 0.0);
    }
}
