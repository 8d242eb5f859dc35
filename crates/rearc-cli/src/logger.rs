//! Console log sink rendering the core's leveled messages.

use console::Term;
use console::style;
use rearc_core::LogLevel;
use rearc_core::LogSink;

/// Log sink writing milestones to stdout and problems to stderr.
///
/// Info lines are suppressed in quiet mode; warnings and errors always
/// print.
pub struct ConsoleLog {
    quiet: bool,
    out: Term,
    err: Term,
}

impl ConsoleLog {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }
}

impl LogSink for ConsoleLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => {
                if !self.quiet {
                    let _ = self.out.write_line(message);
                }
            }
            LogLevel::Warn => {
                let _ = self
                    .err
                    .write_line(&format!("{} {message}", style("warning:").yellow().bold()));
            }
            LogLevel::Error => {
                let _ = self
                    .err
                    .write_line(&format!("{} {message}", style("error:").red().bold()));
            }
        }
    }
}
