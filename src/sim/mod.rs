//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 Hz)
//! - Seeded RNG only
//! - Stable obstacle ordering (leftmost first)
//! - No serial or rendering dependencies except the tick glue in `tick`

pub mod clock;
pub mod collision;
pub mod ground;
pub mod obstacles;
pub mod runner;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{detect, detect_with_config};
pub use ground::Ground;
pub use obstacles::{Obstacle, ObstacleField};
pub use runner::{Runner, RunnerState, compute_max_jump_height};
pub use tick::{Game, GamePhase, TickInput};
