//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show status lines, every probe result and the summary.
    #[default]
    Normal,
    /// Show only progress (when interactive) and failures.
    Quiet,
}

impl OutputMode {
    /// Pick the mode for a `--quiet` flag.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Check if this mode shows successful probes.
    pub fn shows_successes(&self) -> bool {
        matches!(self, Self::Normal)
    }
}
