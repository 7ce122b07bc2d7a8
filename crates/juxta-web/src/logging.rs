#![forbid(unsafe_code)]

//! Routing of formatted log lines to the browser console.
//!
//! The fmt layer formats each event into a [`LineBuffer`]; when the buffer is
//! dropped its contents go to the console method matching the event level.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Console method a log line is written through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Log,
    Debug,
}

impl ConsoleMethod {
    #[must_use]
    pub fn for_level(level: Option<&Level>) -> Self {
        let Some(&level) = level else {
            return Self::Log;
        };
        if level == Level::ERROR {
            Self::Error
        } else if level == Level::WARN {
            Self::Warn
        } else if level == Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// Bytes of one formatted event.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8>,
}

impl LineBuffer {
    pub fn push(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// The buffered text without its trailing newline, or `None` when empty.
    #[must_use]
    pub fn take_line(&mut self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.bytes)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        self.bytes.clear();
        (!text.is_empty()).then_some(text)
    }
}

/// Parse a host-supplied filter directive such as `"info,juxta_widget=debug"`.
///
/// An empty directive means `info`.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, String> {
    let directive = directive.trim();
    let directive = if directive.is_empty() {
        "info"
    } else {
        directive
    };
    EnvFilter::try_new(directive).map_err(|err| format!("invalid log filter {directive:?}: {err}"))
}
