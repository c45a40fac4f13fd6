//! Obstacle stream
//!
//! An ordered queue of obstacles scrolling right to left at a shared speed.
//! Spawn distances and shapes come from a seeded PCG stream so a run replays
//! deterministically from its seed.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{GameConfig, ObstacleKind};

/// One live obstacle. Shape is fixed at spawn; only `x` changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Whether the trailing edge has fully left the playfield.
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Owns the live obstacles, their shared speed, and the spawn RNG.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Leftmost first; uniform speed keeps this ordered.
    obstacles: VecDeque<Obstacle>,
    /// Pixels per tick, raised by the difficulty ramp.
    pub speed: f32,
    rng: Pcg32,
}

impl ObstacleField {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut field = Self {
            obstacles: VecDeque::new(),
            speed: config.base_speed,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.spawn(config);
        field
    }

    /// Clear the field for a fresh run. The RNG stream continues, so
    /// back-to-back runs see different layouts.
    pub fn reset(&mut self, config: &GameConfig) {
        self.obstacles.clear();
        self.speed = config.base_speed;
        self.spawn(config);
    }

    /// Move every obstacle one tick to the left.
    pub fn advance(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }
    }

    /// Append a replacement once the newest obstacle has cleared the
    /// minimum spacing from the right boundary. An empty field counts as due.
    pub fn spawn_if_due(&mut self, config: &GameConfig) {
        let due = self
            .obstacles
            .back()
            .map(|last| config.screen_width - last.x > config.min_spacing)
            .unwrap_or(true);
        if due {
            self.spawn(config);
        }
    }

    fn spawn(&mut self, config: &GameConfig) {
        if config.catalog.is_empty() {
            return;
        }
        let offset = if config.spawn_offsets.is_empty() {
            0.0
        } else {
            config.spawn_offsets[self.rng.random_range(0..config.spawn_offsets.len())]
        };
        let shape = config.catalog[self.rng.random_range(0..config.catalog.len())];

        self.obstacles.push_back(Obstacle {
            x: config.screen_width + offset,
            y: config.screen_height - shape.height - 20.0,
            width: shape.width,
            height: shape.height,
            kind: shape.kind,
        });
    }

    /// Drop every leading obstacle whose trailing edge has passed x=0 and
    /// return how many were retired this tick.
    pub fn cull_offscreen(&mut self) -> u32 {
        let mut retired = 0;
        while self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            self.obstacles.pop_front();
            retired += 1;
        }
        retired
    }

    /// The obstacle closest to (or past) the runner.
    pub fn nearest(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
