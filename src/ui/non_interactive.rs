//! Non-interactive UI for piped output and CI logs.

use std::io::{self, Write};

use super::{OutputContext, OutputMode, PackmonTheme, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Status lines and the failure summary go to stdout next to the per-pack
/// result lines. Warnings and errors go to stderr.
pub struct NonInteractiveUI<O: Write = io::Stdout, E: Write = io::Stderr> {
    mode: OutputMode,
    theme: PackmonTheme,
    out: O,
    err: E,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI writing to stdout and stderr.
    pub fn new(ctx: &OutputContext) -> Self {
        Self::with_writers(ctx, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> NonInteractiveUI<O, E> {
    /// Create a UI writing to the given streams.
    pub fn with_writers(ctx: &OutputContext, out: O, err: E) -> Self {
        Self {
            mode: ctx.mode(),
            theme: ctx.theme().clone(),
            out,
            err,
        }
    }

    /// Recover the stdout and stderr writers.
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> UserInterface for NonInteractiveUI<O, E> {
    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn failure_summary(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_error(msg)).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(mode: OutputMode, write: impl FnOnce(&mut dyn UserInterface)) -> (String, String) {
        let mut ui = NonInteractiveUI::with_writers(&OutputContext::plain(mode), Vec::new(), Vec::new());
        write(&mut ui);
        let (out, err) = ui.into_writers();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn failure_summary_goes_to_stdout() {
        let (out, err) = capture(OutputMode::Normal, |ui| ui.failure_summary("2 failures"));
        assert_eq!(out, "✗ 2 failures\n");
        assert!(err.is_empty());
    }

    #[test]
    fn errors_and_warnings_go_to_stderr() {
        let (out, err) = capture(OutputMode::Normal, |ui| {
            ui.warning("careful");
            ui.error("broken");
        });
        assert!(out.is_empty());
        assert_eq!(err, "⚠ careful\n✗ broken\n");
    }

    #[test]
    fn quiet_mode_keeps_only_failures() {
        let (out, err) = capture(OutputMode::Quiet, |ui| {
            ui.message("hidden");
            ui.success("hidden");
            ui.failure_summary("1 failures");
            ui.error("shown");
        });
        assert_eq!(out, "✗ 1 failures\n");
        assert_eq!(err, "✗ shown\n");
    }

    #[test]
    fn normal_mode_shows_status() {
        let (out, _) = capture(OutputMode::Normal, |ui| {
            ui.message("3 total packs");
            ui.success("No failures!");
        });
        assert_eq!(out, "3 total packs\n✓ No failures!\n");
    }
}
