//! UI/Progress presentation layer
//!
//! This module handles:
//! - Spinners while `dotnet restore` runs, using indicatif
//! - Styled status lines for each pipeline step
//! - Silent progress for tests (test builds only)
//!
//! All pipeline output goes through the ProgressReporter trait.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter trait for the acquisition pipeline
pub trait ProgressReporter {
    /// Start a long-running step (shown as a spinner)
    fn begin_step(&mut self, message: &str);

    /// Finish the current step
    fn finish_step(&mut self);

    /// Print a status line
    fn status(&mut self, message: &str);

    /// Print a warning line
    fn warn(&mut self, message: &str);

    /// Echo captured tool output (verbose mode only)
    fn tool_output(&mut self, output: &str);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with spinners and styled output
pub struct InteractiveProgressReporter {
    spinner: Option<ProgressBar>,
    verbose: bool,
}

impl InteractiveProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            spinner: None,
            verbose,
        }
    }

    fn print(&self, line: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn begin_step(&mut self, message: &str) {
        self.finish_step();
        println!("{}", Style::new().bold().apply_to(message));

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(pb);
    }

    fn finish_step(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn status(&mut self, message: &str) {
        self.print(message);
    }

    fn warn(&mut self, message: &str) {
        let line = format!("{} {message}", Style::new().yellow().bold().apply_to("Warning:"));
        match &self.spinner {
            Some(pb) => pb.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    fn tool_output(&mut self, output: &str) {
        if self.verbose && !output.trim().is_empty() {
            let dimmed = Style::new().dim().apply_to(output.trim_end()).to_string();
            self.print(&dimmed);
        }
    }

    fn abandon(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.abandon();
        }
    }
}

/// Silent progress reporter
///
/// No-op implementation that does not display anything; records warnings for inspection.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SilentProgressReporter {
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl ProgressReporter for SilentProgressReporter {
    fn begin_step(&mut self, _message: &str) {}

    fn finish_step(&mut self) {}

    fn status(&mut self, _message: &str) {}

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn tool_output(&mut self, _output: &str) {}

    fn abandon(&mut self) {}
}
