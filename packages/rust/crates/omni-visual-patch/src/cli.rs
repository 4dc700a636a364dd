use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "visual-patch")]
#[command(about = "Resolve captured style edits to JSX source and apply them losslessly.")]
pub(crate) struct Cli {
    /// Override config directory (settings are read from `<conf>/omni-dev-fusion/visual-patch.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    /// Project root to resolve against (default: settings, then PRJ_ROOT, then cwd).
    #[arg(long, global = true)]
    pub(crate) root: Option<PathBuf>,

    /// Debug logging for the visual-patch crates (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Apply one instruction read from a JSON file; prints the outcome.
    Apply {
        /// Path to the instruction JSON.
        instruction: PathBuf,

        /// Compute the change and print a unified diff without writing.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show which file an instruction would edit, or why none can be chosen.
    Resolve {
        /// Path to the instruction JSON.
        instruction: PathBuf,
    },
    /// Run the HTTP tool endpoint. Default bind: 127.0.0.1:3333
    Serve {
        /// Listen address (overrides settings `bind`).
        #[arg(long)]
        bind: Option<String>,

        /// Per-request timeout in seconds (overrides settings `request_timeout_secs`).
        #[arg(long)]
        request_timeout: Option<u64>,
    },
}
