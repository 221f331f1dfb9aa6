mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::CommandFactory;
use rebrand_core::{RenameSummary, RuleSet, WalkConfig, DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting rebrand");

    let Some(replace_pairs) = cli.replace.as_deref() else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    let rules = cli::parse_replace_pairs(replace_pairs)?;
    if rules.is_empty() {
        println!("Nothing to replace");
        return Ok(());
    }

    let Some(target) = resolve_target(&cli.folder)? else {
        println!("Directory not found");
        return Ok(());
    };

    let mut extensions: Vec<String> = DEFAULT_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect();
    extensions.extend(cli::parse_list(cli.extensions.as_deref()));

    let mut ignored_dirs: Vec<String> = DEFAULT_IGNORED_DIRS
        .iter()
        .map(|dir| (*dir).to_string())
        .collect();
    ignored_dirs.extend(cli::parse_list(cli.ignore.as_deref()));

    let config = WalkConfig::new(extensions, ignored_dirs, RuleSet::new(rules)?);

    println!("Target path: {}", target.display());
    println!(
        "Replacements: {}",
        config
            .rules()
            .rules()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    );
    println!("Accepted extensions: {}", config.extensions().join("; "));
    println!("Ignored directories: {}", config.ignored_dirs().join("; "));

    let summary = rebrand_core::rename_tree(&target, &config)?;

    print_summary(&summary);

    info!("Rebrand completed successfully");
    Ok(())
}

/// `.` selects the directory holding the rebrand executable; any other value
/// is joined onto it, so absolute paths pass through unchanged. A resolved
/// path that is not a directory yields `None`.
fn resolve_target(folder: &str) -> Result<Option<PathBuf>> {
    let exe = std::env::current_exe().context("cannot locate the rebrand executable")?;
    let exe_dir = exe
        .parent()
        .context("executable has no parent directory")?;

    let target = if folder == "." {
        exe_dir.to_path_buf()
    } else {
        exe_dir.join(folder)
    };

    Ok(target.is_dir().then_some(target))
}

fn print_summary(summary: &RenameSummary) {
    println!("Rename complete!");
    println!("  Files updated: {}", summary.files_updated);
    println!("  Entries renamed: {}", summary.entries_renamed);
    println!("  Entries ignored: {}", summary.entries_ignored);
}

fn setup_logging(cli: &cli::Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();

    Ok(())
}
