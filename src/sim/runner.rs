//! Player actor
//!
//! Vertical physics, the run-cycle animation counter, and the jump-height
//! telemetry value. Screen coordinates: y grows downward, so jumping moves
//! the position toward smaller y.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Actor lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunnerState {
    /// Pre-run idle; physics inert.
    Ready,
    /// On the ground, run cycle animating.
    Running,
    /// Airborne under gravity.
    Jumping,
    /// Collided; terminal until reset.
    Stuck,
}

/// The player actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    /// y of the sprite's top edge.
    y: f32,
    /// Current upward velocity (consumed while Jumping).
    velocity: f32,
    state: RunnerState,
    /// Ticks since the last run-cycle frame switch.
    animation_timer: u32,
    /// Current run-cycle frame, for the rendering surface.
    frame_index: usize,
    /// Peak jump height in pixels, fixed for the life of the Runner.
    max_jump_height: f32,
}

impl Runner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            y: config.ground_level,
            velocity: config.jump_velocity,
            state: RunnerState::Ready,
            animation_timer: 0,
            frame_index: 0,
            max_jump_height: compute_max_jump_height(config),
        }
    }

    /// Return to the pre-run state. The cached peak height is unchanged; the
    /// physics constants are fixed for the life of the Runner.
    pub fn reset(&mut self, config: &GameConfig) {
        self.y = config.ground_level;
        self.velocity = config.jump_velocity;
        self.state = RunnerState::Ready;
        self.animation_timer = 0;
        self.frame_index = 0;
    }

    /// Begin a jump. Idempotent while already airborne; ignored when Stuck.
    pub fn request_jump(&mut self) {
        if matches!(self.state, RunnerState::Ready | RunnerState::Running) {
            self.state = RunnerState::Jumping;
        }
    }

    /// Skip the jump and go straight to the ground run (restart path).
    pub fn begin_run(&mut self) {
        if self.state == RunnerState::Ready {
            self.state = RunnerState::Running;
        }
    }

    /// Collision outcome; terminal until [`reset`](Self::reset).
    pub fn mark_stuck(&mut self) {
        self.state = RunnerState::Stuck;
    }

    /// One tick of actor physics and animation.
    pub fn advance(&mut self, config: &GameConfig) {
        match self.state {
            RunnerState::Running => {
                self.animation_timer += 1;
                if self.animation_timer >= config.animation_interval {
                    self.animation_timer = 0;
                    if config.run_frame_count > 0 {
                        self.frame_index = (self.frame_index + 1) % config.run_frame_count;
                    }
                }
            }
            RunnerState::Jumping => {
                self.y -= self.velocity;
                self.velocity -= config.gravity;
                if self.y >= config.ground_level {
                    // Land: snap exactly, re-arm the launch velocity.
                    self.y = config.ground_level;
                    self.velocity = config.jump_velocity;
                    self.state = RunnerState::Running;
                }
            }
            RunnerState::Ready | RunnerState::Stuck => {}
        }
    }

    /// Current height above ground as a percentage of the peak, 0..=100.
    pub fn jump_height_percent(&self, config: &GameConfig) -> u8 {
        if self.max_jump_height <= 0.0 {
            return 0;
        }
        let height = (config.ground_level - self.y).max(0.0);
        let percent = (height / self.max_jump_height * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn max_jump_height(&self) -> f32 {
        self.max_jump_height
    }
}

/// Peak height of a full jump under the configured physics, found by
/// integrating the ascent until the velocity changes sign.
pub fn compute_max_jump_height(config: &GameConfig) -> f32 {
    let mut height = 0.0;
    let mut velocity = config.jump_velocity;
    while velocity > 0.0 {
        height += velocity;
        velocity -= config.gravity;
    }
    height
}
