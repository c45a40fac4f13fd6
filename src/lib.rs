//! Dino Link - a side-scrolling runner with a serial-attached controller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, physics, obstacles, collision,
//!   game state)
//! - `link`: Duplex serial bridge to the microcontroller (jump commands in,
//!   jump-height telemetry out)
//! - `config`: Data-driven game tuning and link settings

pub mod config;
pub mod link;
pub mod sim;

pub use config::{BaudRate, GameConfig, LinkSettings};
pub use link::{LinkError, SerialLink};
pub use sim::{FrameClock, Game, GamePhase, TickInput};
