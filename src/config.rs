//! Game tuning and link settings
//!
//! All gameplay constants live in [`GameConfig`] so the simulation stays free
//! of ambient globals. Defaults mirror the shipped tuning; a JSON file can
//! override any subset of fields.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Obstacle size classes, smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Small,
    Medium,
    Large,
}

/// One entry in the obstacle catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleShape {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
}

/// Complete gameplay tuning. Passed by reference into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield width in pixels; also the spawn x for new obstacles.
    pub screen_width: f32,
    /// Playfield height in pixels.
    pub screen_height: f32,
    /// y of a grounded runner sprite's top edge (y grows downward).
    pub ground_level: f32,
    /// Fixed simulation rate.
    pub ticks_per_second: u32,

    // Physics
    /// Downward acceleration per tick while airborne.
    pub gravity: f32,
    /// Initial upward velocity when a jump starts.
    pub jump_velocity: f32,

    // Animation
    /// Ticks between run-cycle frame switches.
    pub animation_interval: u32,
    /// Number of frames in the run cycle.
    pub run_frame_count: usize,

    // Runner geometry
    pub runner_x: f32,
    pub runner_width: f32,
    pub runner_height: f32,

    // Obstacles
    /// Base horizontal speed for obstacles and ground scroll.
    pub base_speed: f32,
    /// Minimum pixel gap between the right boundary and the newest obstacle
    /// before another may spawn.
    pub min_spacing: f32,
    /// Extra spawn distances beyond the right boundary, drawn uniformly.
    pub spawn_offsets: Vec<f32>,
    /// Shapes drawn uniformly at spawn time.
    pub catalog: Vec<ObstacleShape>,

    // Difficulty
    /// Every this-many points, both speeds rise by `speed_step`. 0 disables.
    pub speed_step_points: u32,
    pub speed_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 400.0,
            ground_level: 330.0,
            ticks_per_second: 60,

            gravity: 0.6,
            jump_velocity: 12.0,

            animation_interval: 5,
            run_frame_count: 3,

            runner_x: 50.0,
            runner_width: 50.0,
            runner_height: 50.0,

            base_speed: 4.0,
            min_spacing: 400.0,
            spawn_offsets: vec![0.0, 200.0],
            catalog: vec![
                ObstacleShape {
                    kind: ObstacleKind::Small,
                    width: 50.0,
                    height: 50.0,
                },
                ObstacleShape {
                    kind: ObstacleKind::Medium,
                    width: 60.0,
                    height: 50.0,
                },
                ObstacleShape {
                    kind: ObstacleKind::Large,
                    width: 90.0,
                    height: 50.0,
                },
            ],

            speed_step_points: 5,
            speed_step: 1.0,
        }
    }
}

impl GameConfig {
    /// Load tuning from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Supported serial line rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BaudRate {
    B4800,
    B9600,
    B19200,
    B38400,
    B57600,
    #[default]
    B115200,
}

impl BaudRate {
    /// All rates, slowest to fastest, for selector UIs.
    pub const ALL: [BaudRate; 6] = [
        BaudRate::B4800,
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
    ];

    pub fn as_u32(&self) -> u32 {
        match self {
            BaudRate::B4800 => 4800,
            BaudRate::B9600 => 9600,
            BaudRate::B19200 => 19200,
            BaudRate::B38400 => 38400,
            BaudRate::B57600 => 57600,
            BaudRate::B115200 => 115_200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BaudRate::B4800 => "4800",
            BaudRate::B9600 => "9600",
            BaudRate::B19200 => "19200",
            BaudRate::B38400 => "38400",
            BaudRate::B57600 => "57600",
            BaudRate::B115200 => "115200",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "4800" => Some(BaudRate::B4800),
            "9600" => Some(BaudRate::B9600),
            "19200" => Some(BaudRate::B19200),
            "38400" => Some(BaudRate::B38400),
            "57600" => Some(BaudRate::B57600),
            "115200" => Some(BaudRate::B115200),
            _ => None,
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device selection for the telemetry link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LinkSettings {
    /// Platform device path, e.g. `/dev/ttyUSB0` or `COM3`. Empty = none.
    pub port: String,
    pub baud: BaudRate,
}

impl LinkSettings {
    pub fn new(port: impl Into<String>, baud: BaudRate) -> Self {
        Self {
            port: port.into(),
            baud,
        }
    }

    /// Whether a device has been selected at all.
    pub fn is_configured(&self) -> bool {
        !self.port.is_empty()
    }
}
