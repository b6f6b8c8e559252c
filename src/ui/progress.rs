//! Probe progress display.
//!
//! Two [`ProbeObserver`]s render the same stream of outcomes:
//! - [`LiveProgress`] keeps a `completed/total` bar at the bottom of the
//!   terminal and prints result lines above it
//! - [`PlainProgress`] writes one plain line per reported outcome
//!
//! Failures are always printed; successes only outside quiet mode.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Stdout, Write};

use crate::probe::{ProbeObserver, ProbeOutcome};

use super::{OutputContext, OutputMode, PackmonTheme};

/// Format the console line for an outcome, or `None` if the mode hides it.
pub fn outcome_line(theme: &PackmonTheme, mode: OutputMode, outcome: &ProbeOutcome) -> Option<String> {
    match outcome {
        ProbeOutcome::Success { url } => mode.shows_successes().then(|| theme.format_success(url)),
        ProbeOutcome::Failure(failure) => {
            let tag = match failure.status() {
                Some(status) => status.to_string(),
                None => failure.cause().label().to_string(),
            };
            Some(theme.format_failure(failure.url(), &tag))
        }
    }
}

/// Live `completed/total` counter for interactive terminals.
pub struct LiveProgress {
    theme: PackmonTheme,
    mode: OutputMode,
    visible: bool,
    bar: Option<ProgressBar>,
}

impl LiveProgress {
    /// Create a progress display drawing to stdout.
    pub fn new(ctx: &OutputContext) -> Self {
        Self {
            theme: ctx.theme().clone(),
            mode: ctx.mode(),
            visible: true,
            bar: None,
        }
    }

    /// Create a progress display that draws nothing (for tests).
    pub fn hidden(ctx: &OutputContext) -> Self {
        Self {
            visible: false,
            ..Self::new(ctx)
        }
    }

    /// Outcomes counted in the current or last run.
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map(ProgressBar::position).unwrap_or(0)
    }

    /// Length of the current or last run.
    pub fn length(&self) -> Option<u64> {
        self.bar.as_ref().and_then(ProgressBar::length)
    }

    fn new_bar(&self, total: u64) -> ProgressBar {
        let target = if self.visible {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total), target);
        match ProgressStyle::with_template("{spinner:.magenta} [{bar:32.magenta/dim}] {pos}/{len} packs ({elapsed})") {
            Ok(style) => bar.set_style(style.progress_chars("█▓░")),
            Err(err) => tracing::debug!(error = %err, "falling back to default progress style"),
        }
        bar
    }
}

impl ProbeObserver for LiveProgress {
    fn probe_started(&mut self, total: usize) {
        self.bar = Some(self.new_bar(total as u64));
    }

    fn outcome_observed(&mut self, outcome: &ProbeOutcome) {
        let Some(bar) = &self.bar else {
            return;
        };
        if let Some(line) = outcome_line(&self.theme, self.mode, outcome) {
            bar.println(line);
        }
        bar.inc(1);
    }

    fn probe_finished(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}

/// Plain per-outcome lines for non-interactive output.
pub struct PlainProgress<W: Write = Stdout> {
    out: W,
    theme: PackmonTheme,
    mode: OutputMode,
}

impl PlainProgress<Stdout> {
    /// Write to stdout.
    pub fn stdout(ctx: &OutputContext) -> Self {
        Self::new(io::stdout(), ctx)
    }
}

impl<W: Write> PlainProgress<W> {
    /// Write to `out`.
    pub fn new(out: W, ctx: &OutputContext) -> Self {
        Self {
            out,
            theme: ctx.theme().clone(),
            mode: ctx.mode(),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProbeObserver for PlainProgress<W> {
    fn outcome_observed(&mut self, outcome: &ProbeOutcome) {
        if let Some(line) = outcome_line(&self.theme, self.mode, outcome) {
            writeln!(self.out, "{}", line).ok();
        }
    }

    fn probe_finished(&mut self) {
        self.out.flush().ok();
    }
}

/// Pick the observer matching the output context.
pub fn create_observer(ctx: &OutputContext) -> Box<dyn ProbeObserver> {
    if ctx.is_interactive() {
        Box::new(LiveProgress::new(ctx))
    } else {
        Box::new(PlainProgress::stdout(ctx))
    }
}
