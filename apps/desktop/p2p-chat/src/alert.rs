//! Blocking alerts on the terminal.

use client_core::notify::{Notification, Notifier};

use std::io::{Stderr, Write, stderr};
use std::sync::Mutex;

use log::warn;

pub const ALERT_PREFIX: &str = "[ALERT]";

/// Writes each notification as one `[ALERT] ...` line.
///
/// The write completes before `notify` returns.
pub struct ConsoleNotifier<W> {
    out: Mutex<W>,
}

impl ConsoleNotifier<Stderr> {
    pub fn stderr() -> Self {
        Self::new(stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn notify(&self, notification: Notification) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(e) = writeln!(out, "{ALERT_PREFIX} {notification}").and_then(|()| out.flush()) {
            warn!("Failed to show alert '{notification}': {e}");
        }
    }
}
