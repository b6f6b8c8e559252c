//! Visual theme and styling.

use console::Style;

/// Console styles used for report lines.
#[derive(Debug, Clone)]
pub struct PackmonTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red).
    pub error: Style,
    /// Style for the cause/status tag of a failure (red bold).
    pub error_tag: Style,
}

impl Default for PackmonTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PackmonTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red(),
            error_tag: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            error_tag: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a failed URL followed by its bracketed tag.
    pub fn format_failure(&self, url: &str, tag: &str) -> String {
        format!(
            "{} {}",
            self.error.apply_to(format!("✗ {}", url)),
            self.error_tag.apply_to(format!("[{}]", tag))
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
