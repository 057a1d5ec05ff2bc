//! Error banner state with generation-checked expiry.
//!
//! The banner shows the most recent rejection message. Each new message
//! gets a fresh generation number; the timer that was started for it passes
//! that generation back to [`Banner::expire`], and a stale timer (one whose
//! message has since been replaced or dismissed) does nothing.

use std::time::Duration;

/// How long a message stays visible before it clears itself.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

/// The most recent user-visible error message, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    message: Option<String>,
    generation: u64,
}

impl Banner {
    /// The message currently on display.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Generation of the current banner state.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation of the message on display, or `None` when hidden.
    ///
    /// This is what an expiry timer should be keyed on.
    #[must_use]
    pub const fn shown(&self) -> Option<u64> {
        if self.message.is_some() {
            Some(self.generation)
        } else {
            None
        }
    }

    /// Show `message`, replacing whatever was there.
    ///
    /// Returns the generation to hand to [`expire`](Self::expire) once
    /// [`BANNER_TIMEOUT`] has elapsed.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// Hide the banner immediately. Outstanding timers become stale.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.message = None;
    }

    /// Clear the message shown at `generation`, if it is still current.
    ///
    /// Returns `true` when the banner was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }
}
