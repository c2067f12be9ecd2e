//! A `log` backend that keeps recent records in memory for the log pane.
//!
//! The terminal is in raw mode on the alternate screen while the demo runs,
//! so records are shown under the grid instead of being written to stderr.

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

const CAPACITY: usize = 64;

/// Bounded ring of formatted log lines.
pub struct MessageLog {
    lines: Mutex<VecDeque<String>>,
}

impl MessageLog {
    pub const fn new() -> Self {
        Self {
            lines: Mutex::new(VecDeque::new()),
        }
    }

    /// The last `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        let Ok(lines) = self.lines.lock() else {
            return Vec::new();
        };
        let skip = lines.len().saturating_sub(n);
        lines.iter().skip(skip).cloned().collect()
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == CAPACITY {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for MessageLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    // The `log` macros have already filtered against the max level.
    fn log(&self, record: &Record<'_>) {
        self.push(format!("{:<5} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: MessageLog = MessageLog::new();

/// Install the pane as the global logger.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// The last `n` lines recorded by the global pane.
pub fn recent(n: usize) -> Vec<String> {
    LOGGER.recent(n)
}
