//! Serial telemetry bridge
//!
//! Duplex link to the microcontroller. Inbound: newline-terminated `"J"`
//! tokens, assembled by a background reader thread and latched into a
//! lock-guarded mailbox the tick loop drains once per tick. Outbound: the
//! jump-height percentage, one decimal line per airborne tick, written
//! fire-and-forget so serial trouble can never stall the simulation.

use std::io::{self, Read, Write};
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::config::LinkSettings;

/// The single recognized inbound command.
const JUMP_TOKEN: &str = "J";
/// Reader wake-up bound: read timeout and idle sleep. Also bounds how long
/// `close` can wait for the join.
const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Inbound lines longer than this are garbage; drop them.
const MAX_LINE_LEN: usize = 64;

/// Failures opening the link. All are non-fatal and retryable.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no serial device configured")]
    NotConfigured,
    #[error("failed to open serial device {port}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to clone serial handle for the reader")]
    CloneHandle(#[source] serialport::Error),
}

/// Single-command latch shared with the reader thread. Repeated tokens
/// between drains collapse into one pending command.
#[derive(Debug, Default)]
struct JumpMailbox {
    pending: Mutex<bool>,
}

impl JumpMailbox {
    fn post(&self) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *pending = true;
    }

    /// Read-and-clear in one locked step.
    fn take(&self) -> bool {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        mem::take(&mut *pending)
    }
}

struct ReaderHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

/// Owns the serial connection and its reader thread.
pub struct SerialLink {
    settings: LinkSettings,
    port: Option<Box<dyn serialport::SerialPort>>,
    reader: Option<ReaderHandle>,
    mailbox: Arc<JumpMailbox>,
    /// Cleared by the reader when it exits, including on link failure.
    receiving: Arc<AtomicBool>,
    /// Set when an outbound write has failed since the last open.
    degraded: bool,
}

impl SerialLink {
    /// A disconnected link with the given device selection.
    pub fn new(settings: LinkSettings) -> Self {
        Self {
            settings,
            port: None,
            reader: None,
            mailbox: Arc::new(JumpMailbox::default()),
            receiving: Arc::new(AtomicBool::new(false)),
            degraded: false,
        }
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Replace the device selection. Ignored while connected; close first.
    pub fn set_settings(&mut self, settings: LinkSettings) {
        if self.is_connected() {
            warn!("ignoring settings change while link is open");
            return;
        }
        self.settings = settings;
    }

    /// Open the device and start the reader thread. No-op when already open.
    pub fn open(&mut self) -> Result<(), LinkError> {
        if self.is_connected() {
            return Ok(());
        }
        if !self.settings.is_configured() {
            return Err(LinkError::NotConfigured);
        }

        let port = serialport::new(&self.settings.port, self.settings.baud.as_u32())
            .timeout(POLL_INTERVAL)
            .open()
            .map_err(|source| LinkError::Open {
                port: self.settings.port.clone(),
                source,
            })?;
        let reader_port = port.try_clone().map_err(LinkError::CloneHandle)?;

        // Drop any command latched before a previous close.
        self.mailbox.take();

        let stop = Arc::new(AtomicBool::new(false));
        let mailbox = Arc::clone(&self.mailbox);
        let receiving = Arc::clone(&self.receiving);
        receiving.store(true, Ordering::SeqCst);
        self.degraded = false;

        let thread = {
            let stop = Arc::clone(&stop);
            let port_name = self.settings.port.clone();
            thread::spawn(move || run_reader(reader_port, &mailbox, &stop, &receiving, &port_name))
        };

        self.port = Some(port);
        self.reader = Some(ReaderHandle { stop, thread });
        info!(
            "serial link open on {} at {} baud",
            self.settings.port, self.settings.baud
        );
        Ok(())
    }

    /// Stop the reader, join it, and release the device. Idempotent.
    pub fn close(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.stop.store(true, Ordering::SeqCst);
            if reader.thread.join().is_err() {
                warn!("serial reader thread panicked");
            }
        }
        if self.port.take().is_some() {
            info!("serial link closed");
        }
        self.receiving.store(false, Ordering::SeqCst);
        self.degraded = false;
    }

    /// Send one telemetry value. Failures are logged and flagged, never
    /// surfaced into the tick path. No-op while disconnected.
    pub fn send(&mut self, value: u8) {
        let Some(port) = self.port.as_mut() else {
            return;
        };
        let line = format!("{value}\n");
        if let Err(err) = port.write_all(line.as_bytes()) {
            if !self.degraded {
                warn!("serial write failed, link degraded: {err}");
            }
            self.degraded = true;
        }
    }

    /// Drain the pending jump command, if any. At most one per posted token.
    pub fn consume_pending_jump(&self) -> bool {
        self.mailbox.take()
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    /// Whether the reader thread is still alive. A connected link that is no
    /// longer receiving has lost its device; close and reopen to recover.
    pub fn is_receiving(&self) -> bool {
        self.receiving.load(Ordering::SeqCst)
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        self.close();
    }
}

/// Reader loop: assemble newline-terminated lines and latch jump tokens.
/// Exits on the stop flag or a hard I/O error, clearing `receiving` either
/// way. Generic over `Read` so tests can drive it with a scripted stream.
fn run_reader<R: Read>(
    mut port: R,
    mailbox: &JumpMailbox,
    stop: &AtomicBool,
    receiving: &AtomicBool,
    port_name: &str,
) {
    let mut buf = [0u8; 256];
    let mut line: Vec<u8> = Vec::with_capacity(MAX_LINE_LEN);

    while !stop.load(Ordering::SeqCst) {
        match port.read(&mut buf) {
            Ok(0) => thread::sleep(POLL_INTERVAL),
            Ok(n) => {
                for &byte in &buf[..n] {
                    match byte {
                        b'\n' => {
                            if decode_line(&line) {
                                mailbox.post();
                            }
                            line.clear();
                        }
                        b'\r' => {}
                        _ => {
                            if line.len() < MAX_LINE_LEN {
                                line.push(byte);
                            }
                        }
                    }
                }
            }
            // The driver timeout already waited out the poll interval.
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(err) => {
                warn!("serial read failed on {port_name}, reader exiting: {err}");
                break;
            }
        }
    }
    receiving.store(false, Ordering::SeqCst);
}

/// A line is a command only if it is exactly the jump token after trimming.
/// Anything else, including invalid UTF-8, is silently ignored.
fn decode_line(raw: &[u8]) -> bool {
    match std::str::from_utf8(raw) {
        Ok(text) => text.trim() == JUMP_TOKEN,
        Err(_) => false,
    }
}
