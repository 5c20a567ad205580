//! RAII guard for terminal raw mode.

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;

/// Keeps the terminal in raw mode for as long as it lives.
///
/// Restores cooked mode on drop (even on panic). Call [`RawMode::disable`]
/// to restore it explicitly and observe the error.
pub struct RawMode {
    active: bool,
}

impl RawMode {
    /// Switches the terminal to raw mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses the mode change.
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        debug!("raw mode on");
        Ok(Self { active: true })
    }

    pub fn disable(mut self) -> io::Result<()> {
        self.active = false;
        debug!("raw mode off");
        disable_raw_mode()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            // Attempt to restore terminal state, ignoring errors during cleanup
            let _ = disable_raw_mode();
        }
    }
}
