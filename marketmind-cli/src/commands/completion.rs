//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::{generate, shells::Shell};
use std::io::{self, Write};

/// Writes the completion script for `shell` to `out`.
pub fn write_completion(shell: Shell, out: &mut dyn Write) {
    let mut app = crate::Cli::command();
    generate(shell, &mut app, "marketmind", out);
}

/// Prints the completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell) {
    write_completion(shell, &mut io::stdout());
}
