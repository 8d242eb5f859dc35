//! Progress bar rendering for archive operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use rearc_core::ProgressSink;

/// CLI progress sink backed by an indicatif bar.
///
/// The core reports `(completed, total, label)` after each entry with the
/// total known up front, so the bar is created lazily on the first update
/// for a label and cleared when the operation finishes.
pub struct TermProgress {
    bar: Option<ProgressBar>,
    label: String,
}

impl TermProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: None,
            label: String::new(),
        }
    }

    /// Whether progress should render at all (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn install_bar(&mut self, total: usize, label: &str) {
        if let Some(old) = self.bar.take() {
            old.finish_and_clear();
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(label.to_string());
        self.bar = Some(bar);
        self.label = label.to_string();
    }
}

impl Default for TermProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TermProgress {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressSink for TermProgress {
    fn update(&mut self, completed: usize, total: usize, label: &str) {
        if self.bar.is_none() || self.label != label {
            self.install_bar(total, label);
        }
        if let Some(bar) = &self.bar {
            bar.set_position(completed as u64);
        }
    }

    fn finished(&mut self, _label: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.label.clear();
    }
}
