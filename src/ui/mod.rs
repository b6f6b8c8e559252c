//! Console output.
//!
//! This module provides:
//! - [`UserInterface`] trait for status and summary lines
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for piped output and CI logs
//! - [`LiveProgress`] and [`PlainProgress`], the two probe observers
//! - [`OutputContext`], the process-wide output settings
//!
//! # Example
//!
//! ```
//! use packmon::ui::{create_ui, OutputContext, OutputMode};
//!
//! let ctx = OutputContext::plain(OutputMode::Quiet);
//! let mut ui = create_ui(&ctx);
//! ui.message("hidden in quiet mode");
//! ui.error("always shown");
//! ```

pub mod context;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use context::OutputContext;
pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{create_observer, outcome_line, LiveProgress, PlainProgress};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, PackmonTheme};

/// Trait for console output.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Display a status message. Hidden in quiet mode.
    fn message(&mut self, msg: &str);

    /// Display a success message. Hidden in quiet mode.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown.
    fn error(&mut self, msg: &str);

    /// Display the failure count of a cycle. Always shown, on the same
    /// stream as the per-pack result lines.
    fn failure_summary(&mut self, msg: &str);
}
