//! Process-wide output settings.

use console::Term;

use super::{should_use_colors, OutputMode, PackmonTheme};

/// Output settings decided once at startup.
///
/// Both the console UI and the probe observer are built from the same
/// context, so they agree on colors, verbosity and interactivity.
#[derive(Debug, Clone)]
pub struct OutputContext {
    theme: PackmonTheme,
    mode: OutputMode,
    interactive: bool,
}

impl OutputContext {
    /// Inspect the terminal and environment.
    ///
    /// Colors are used only when stdout is a terminal, `NO_COLOR` is unset
    /// and `no_color` is false.
    pub fn detect(mode: OutputMode, no_color: bool) -> Self {
        let colors = !no_color && should_use_colors();
        if !colors {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        Self {
            theme: if colors {
                PackmonTheme::new()
            } else {
                PackmonTheme::plain()
            },
            mode,
            interactive: Term::stdout().is_term(),
        }
    }

    /// Non-interactive context without colors.
    pub fn plain(mode: OutputMode) -> Self {
        Self {
            theme: PackmonTheme::plain(),
            mode,
            interactive: false,
        }
    }

    pub fn theme(&self) -> &PackmonTheme {
        &self.theme
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Whether stdout is a terminal that can show a live progress bar.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_context_is_not_interactive() {
        let ctx = OutputContext::plain(OutputMode::Quiet);
        assert!(!ctx.is_interactive());
        assert_eq!(ctx.mode(), OutputMode::Quiet);
        assert_eq!(ctx.theme().format_success("ok"), "✓ ok");
    }

    #[test]
    fn detect_keeps_mode() {
        let ctx = OutputContext::detect(OutputMode::Normal, true);
        assert_eq!(ctx.mode(), OutputMode::Normal);
    }
}
