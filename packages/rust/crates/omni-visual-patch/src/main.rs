//! visual-patch CLI: apply, resolve, or serve.
//!
//! Logging: set `RUST_LOG=omni_visual_patch=debug` (or pass `--verbose`) to see
//! resolution and rewrite logs on stderr.

mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use omni_types::EditInstruction;
use omni_visual_patch::{
    EditExecutor, FileSource, PatchSettings, load_patch_settings, run_http,
    set_config_home_override,
};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_visual_patch=debug,omni_locate=debug,omni_edit=debug"
        } else {
            "omni_visual_patch=info,omni_locate=info,omni_edit=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let settings = load_patch_settings();
    let executor = EditExecutor::new(settings.executor_config(cli.root.as_deref()));

    match cli.command {
        Command::Apply {
            instruction,
            dry_run,
        } => Ok(run_apply(&executor, &instruction, dry_run)),
        Command::Resolve { instruction } => Ok(run_resolve(&executor, &instruction)),
        Command::Serve {
            bind,
            request_timeout,
        } => run_serve(executor, &settings, bind, request_timeout).await,
    }
}

fn read_instruction(path: &Path) -> anyhow::Result<EditInstruction> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read instruction file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse instruction file {}", path.display()))
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(error) => tracing::error!(error = %error, "failed to serialize output"),
    }
}

/// Input errors are process-level failures, reported in the outcome shape.
fn input_failure(error: &anyhow::Error) -> ExitCode {
    print_json(&json!({ "status": "error", "error": format!("{error:#}") }));
    ExitCode::FAILURE
}

fn run_apply(executor: &EditExecutor, path: &Path, dry_run: bool) -> ExitCode {
    let instruction = match read_instruction(path) {
        Ok(instruction) => instruction,
        Err(error) => return input_failure(&error),
    };
    let outcome = if dry_run {
        executor.preview(&instruction)
    } else {
        executor.execute(&instruction)
    };
    print_json(&outcome);
    ExitCode::SUCCESS
}

fn run_resolve(executor: &EditExecutor, path: &Path) -> ExitCode {
    let instruction = match read_instruction(path) {
        Ok(instruction) => instruction,
        Err(error) => return input_failure(&error),
    };
    let source = FileSource::from_instruction(&instruction);
    let report = match executor.locate(&instruction) {
        Ok(file) => json!({
            "source": source.kind(),
            "file": file.display().to_string(),
        }),
        Err(error) => json!({
            "source": source.kind(),
            "error": error.to_string(),
            "candidates": error.candidates().unwrap_or_default(),
        }),
    };
    print_json(&report);
    ExitCode::SUCCESS
}

async fn run_serve(
    executor: EditExecutor,
    settings: &PatchSettings,
    bind: Option<String>,
    request_timeout: Option<u64>,
) -> anyhow::Result<ExitCode> {
    let bind = bind.unwrap_or_else(|| settings.bind());
    let timeout = request_timeout
        .filter(|secs| *secs > 0)
        .unwrap_or_else(|| settings.request_timeout_secs());
    run_http(executor, &bind, timeout).await?;
    Ok(ExitCode::SUCCESS)
}
