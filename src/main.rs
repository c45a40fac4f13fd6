//! Dino Link entry point
//!
//! Headless shell: paces the simulation at 60 Hz and bridges it to the
//! serial-attached controller. A rendering front end consumes the same
//! read-only surface (`Game::runner`, `Game::obstacles`, `Game::score`).
//!
//! Environment:
//! - `DINO_LINK_CONFIG`: optional path to a JSON tuning file
//! - `DINO_LINK_PORT`: serial device path (e.g. `/dev/ttyUSB0`)
//! - `DINO_LINK_BAUD`: line rate, default 115200

use std::env;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use dino_link::sim::FrameClock;
use dino_link::{BaudRate, Game, GameConfig, GamePhase, LinkSettings, SerialLink};

fn load_config() -> GameConfig {
    let Ok(path) = env::var("DINO_LINK_CONFIG") else {
        return GameConfig::default();
    };
    match GameConfig::from_json_file(Path::new(&path)) {
        Ok(config) => {
            log::info!("loaded tuning from {path}");
            config
        }
        Err(err) => {
            log::error!("{err}; using default tuning");
            GameConfig::default()
        }
    }
}

fn load_link_settings() -> LinkSettings {
    let port = env::var("DINO_LINK_PORT").unwrap_or_default();
    let baud = env::var("DINO_LINK_BAUD")
        .ok()
        .and_then(|s| {
            let parsed = BaudRate::from_str(&s);
            if parsed.is_none() {
                log::warn!("unsupported baud rate {s:?}, using default");
            }
            parsed
        })
        .unwrap_or_default();
    LinkSettings::new(port, baud)
}

fn main() {
    env_logger::init();
    log::info!("Dino Link starting...");

    let config = load_config();
    let mut link = SerialLink::new(load_link_settings());
    if link.settings().is_configured() {
        if let Err(err) = link.open() {
            log::error!("{err}; continuing with local input only");
        }
    } else {
        log::info!("no serial device configured, local input only");
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("game initialized with seed {seed}");

    let mut clock = FrameClock::new(config.ticks_per_second);
    let mut game = Game::new(config, seed);
    let mut last_phase = game.phase();

    loop {
        clock.tick();
        game.tick_with_link(false, &mut link);

        let phase = game.phase();
        if phase != last_phase {
            match phase {
                GamePhase::Running => log::info!("run started"),
                GamePhase::Over => log::info!("run over, final score {}", game.score()),
                GamePhase::Ready => {}
            }
            last_phase = phase;
        }

        // A dead reader means the device went away; release it so a reopen
        // can succeed later.
        if link.is_connected() && !link.is_receiving() {
            log::warn!("serial device lost, closing link");
            link.close();
        }
    }
}
