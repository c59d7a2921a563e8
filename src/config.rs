//! Runtime settings for the poller.
//!
//! Settings only come from command-line flags; the binary parses them with
//! clap and hands a [`Settings`] to [`Poller`](crate::Poller).

use std::time::Duration;

use crate::data::DEFAULT_INTERFACE;
use crate::source::DEFAULT_PROGRAM;

/// Delay between cycles when `-i` is not given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service whose hosts are listed.
    pub service: String,
    /// Role within the service.
    pub role: String,
    /// Sleep between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Path or name of the `mkr` executable.
    pub program: String,
    /// Network interface whose traffic is shown.
    pub interface: String,
    /// Stop after the first rendered table.
    pub once: bool,
}

impl Settings {
    /// Settings for `service`/`role` with every other field at its default.
    pub fn new(service: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            role: role.into(),
            interval: DEFAULT_INTERVAL,
            program: DEFAULT_PROGRAM.to_string(),
            interface: DEFAULT_INTERFACE.to_string(),
            once: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}
