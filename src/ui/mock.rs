//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use packmon::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Started checking index");
//! ui.failure_summary("1 failures");
//!
//! assert!(ui.has_message("Started"));
//! assert!(ui.has_failure_summary("1 failures"));
//! ```

use super::UserInterface;

/// Mock UI implementation for testing.
///
/// Every call is recorded. Filtering by output mode is the job of the real
/// implementations.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    failure_summaries: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn failure_summaries(&self) -> &[String] {
        &self.failure_summaries
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success containing `msg` was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a failure summary containing `msg` was shown.
    pub fn has_failure_summary(&self, msg: &str) -> bool {
        self.failure_summaries.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn failure_summary(&mut self, msg: &str) {
        self.failure_summaries.push(msg.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.message("World");
        assert_eq!(ui.messages(), &["Hello", "World"]);
        assert!(ui.has_message("Hello"));
        assert!(!ui.has_message("Missing"));
    }

    #[test]
    fn mock_ui_captures_each_kind() {
        let mut ui = MockUI::new();
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Failed");

        assert!(ui.has_success("Done"));
        assert!(ui.has_warning("Careful"));
        assert!(ui.has_error("Failed"));
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn mock_ui_keeps_summaries_apart_from_errors() {
        let mut ui = MockUI::new();
        ui.failure_summary("2 failures");

        assert!(ui.has_failure_summary("2 failures"));
        assert!(ui.errors().is_empty());
    }
}
