use anyhow::Result;
use clap::Args;
use mailsend_config::AppConfig;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod completions;
pub mod preview;
pub mod send;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
}

/// Files to read emails from.
#[derive(Debug, Args)]
pub struct FileArgs {
    /// Plaintext files with one email per line
    pub files: Vec<PathBuf>,
    /// Treat every file as this MIME type instead of guessing from the extension
    #[arg(long)]
    pub mime: Option<String>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
