//! Command implementations, one module per subcommand.

pub mod add;
pub mod completion;
pub mod create;
pub mod extract;
pub mod list;
pub mod remove;
pub mod shell;

use anyhow::Result;
use console::Term;
use console::style;
use rearc_core::LogSink;
use rearc_core::NoopProgress;
use rearc_core::ProgressSink;
use rearc_core::Session;

use crate::logger::ConsoleLog;
use crate::progress::TermProgress;

/// Builds a session wired to terminal collaborators.
///
/// Progress bars render only on a TTY and never in quiet mode. The log
/// sink drops Info lines in quiet mode but always surfaces warnings and
/// errors.
pub(crate) fn new_session(quiet: bool) -> Result<Session> {
    let progress: Box<dyn ProgressSink> = if !quiet && TermProgress::should_show() {
        Box::new(TermProgress::new())
    } else {
        Box::new(NoopProgress)
    };
    let log: Box<dyn LogSink> = Box::new(ConsoleLog::new(quiet));
    Ok(Session::with_collaborators(progress, log)?)
}

/// Prints a success line with a checkmark when colors are enabled.
pub(crate) fn success(quiet: bool, message: &str) {
    if quiet {
        return;
    }
    let term = Term::stdout();
    if console::colors_enabled() {
        let _ = term.write_line(&format!("{} {message}", style("✓").green().bold()));
    } else {
        let _ = term.write_line(message);
    }
}
