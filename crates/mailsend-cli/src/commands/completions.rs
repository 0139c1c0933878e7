use crate::BIN_NAME;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;
use tracing::debug;

#[derive(Debug, clap::Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Writes completions for `send`, `preview` and the global flags to stdout.
pub fn emit(args: CompletionsArgs) -> Result<()> {
    let mut cmd = crate::Cli::command();
    debug!(shell = %args.shell, bin = BIN_NAME, "generating completions");
    let mut stdout = io::stdout().lock();
    generate(args.shell, &mut cmd, BIN_NAME, &mut stdout);
    Ok(())
}
