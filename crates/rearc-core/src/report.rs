//! Reporting collaborators: progress and logging sinks.
//!
//! The core never prints. Operations report through two narrow interfaces
//! injected into the session: a [`ProgressSink`] receiving per-entry
//! `(completed, total, label)` updates, and a [`LogSink`] receiving leveled
//! text messages. Both are purely observational; no operation depends on
//! whether its events are consumed.

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Operation milestone.
    Info,
    /// Degraded mode or recoverable condition.
    Warn,
    /// Operation failure.
    Error,
}

/// Receives leveled text messages for operation milestones and failures.
pub trait LogSink {
    /// Handles a single log message.
    fn log(&self, level: LogLevel, message: &str);
}

/// Receives per-entry progress updates during decode/encode/copy loops.
///
/// `update` is called after each processed entry with the running count and
/// the up-front total; `finished` is called exactly once per operation.
pub trait ProgressSink {
    /// Reports that `completed` of `total` entries are done for `label`.
    fn update(&mut self, completed: usize, total: usize, label: &str);

    /// Reports that the operation behind `label` finished.
    fn finished(&mut self, label: &str);
}

/// Log sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl LogSink for NoopLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Progress sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn update(&mut self, _completed: usize, _total: usize, _label: &str) {}
    fn finished(&mut self, _label: &str) {}
}

/// Borrowed bundle of both collaborators, handed down to codec adapters
/// and tree operations for the duration of one operation.
pub struct Reporter<'a> {
    /// Progress collaborator.
    pub progress: &'a mut dyn ProgressSink,
    /// Logging collaborator.
    pub log: &'a dyn LogSink,
}

impl Reporter<'_> {
    /// Logs at `Info`.
    pub fn info(&self, message: &str) {
        self.log.log(LogLevel::Info, message);
    }

    /// Logs at `Warn`.
    pub fn warn(&self, message: &str) {
        self.log.log(LogLevel::Warn, message);
    }

    /// Logs at `Error`.
    pub fn error(&self, message: &str) {
        self.log.log(LogLevel::Error, message);
    }
}
