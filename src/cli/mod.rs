//! Command-line interface for packmon.
//!
//! - [`args`] - Argument definitions using clap derive macros

pub mod args;

pub use args::Cli;

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Write completions for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "packmon", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_completions_name_the_binary() {
        let mut buf = Vec::new();
        write_completions(Shell::Bash, &mut buf);
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("packmon"));
        assert!(output.contains("--vendors"));
    }

    #[test]
    fn zsh_completions_generate() {
        let mut buf = Vec::new();
        write_completions(Shell::Zsh, &mut buf);
        assert!(!buf.is_empty());
    }
}
