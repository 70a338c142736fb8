//! CLI for the ytbatch media fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use ytbatch_core::config;

use commands::{run_completions, run_get, run_probe};

/// Top-level CLI for the ytbatch media fetcher.
#[derive(Debug, Parser)]
#[command(name = "ytbatch")]
#[command(about = "ytbatch: concurrent media fetcher over yt-dlp", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch every link found in the given text.
    Get {
        /// Links, or any text containing them; arguments are joined and
        /// parsed as one block, so a pasted multi-link blob works.
        #[arg(required_unless_present = "input")]
        text: Vec<String>,

        /// Read the link block from a file instead of the arguments.
        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Directory downloads are written to.
        #[arg(short, long, value_name = "DIR", default_value = "downloads")]
        output: PathBuf,

        /// Fetch best audio only and convert to mp3.
        #[arg(long)]
        audio: bool,

        /// Quality: 1080p/720p/480p/360p/240p, or 320kbps..64kbps with --audio.
        #[arg(short, long, value_name = "Q")]
        quality: Option<String>,

        /// Run up to N fetches concurrently (default: min(links, configured cap)).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Classify links (single item, collection, or feed) without downloading.
    Probe {
        /// Links to classify.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Generate a shell completion script on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                text,
                input,
                output,
                audio,
                quality,
                jobs,
            } => run_get(&cfg, text, input.as_deref(), output, audio, quality, jobs).await?,
            CliCommand::Probe { urls } => run_probe(&cfg, &urls).await?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
