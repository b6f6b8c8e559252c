//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{NonInteractiveUI, OutputContext, OutputMode, PackmonTheme, UserInterface};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: PackmonTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI from the output context.
    pub fn new(ctx: &OutputContext) -> Self {
        Self {
            term: Term::stdout(),
            theme: ctx.theme().clone(),
            mode: ctx.mode(),
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn failure_summary(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(ctx: &OutputContext) -> Box<dyn UserInterface> {
    if ctx.is_interactive() && Term::stdout().is_term() {
        Box::new(TerminalUI::new(ctx))
    } else {
        Box::new(NonInteractiveUI::new(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_terminal_output_does_not_panic() {
        let mut ui = TerminalUI::new(&OutputContext::plain(OutputMode::Quiet));
        ui.message("hidden");
        ui.success("hidden");
        ui.failure_summary("shown");
    }

    #[test]
    fn create_ui_for_plain_context() {
        let mut ui = create_ui(&OutputContext::plain(OutputMode::Normal));
        ui.message("status");
        ui.failure_summary("1 failures");
    }
}
