//! A [`Reporter`] that keeps every line in memory.

use std::sync::Mutex;

use crate::reporter::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Info,
    Error,
}

/// Captures reported lines in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line, info and error interleaved as reported.
    pub fn lines(&self) -> Vec<String> {
        self.collect(|_| true)
    }

    /// Info lines only.
    pub fn info_lines(&self) -> Vec<String> {
        self.collect(|stream| stream == Stream::Info)
    }

    /// Error lines only.
    pub fn error_lines(&self) -> Vec<String> {
        self.collect(|stream| stream == Stream::Error)
    }

    fn collect(&self, keep: impl Fn(Stream) -> bool) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .filter(|(stream, _)| keep(*stream))
            .map(|(_, line)| line.clone())
            .collect()
    }

    fn push(&self, stream: Stream, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((stream, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Stream::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Stream::Error, message);
    }
}
