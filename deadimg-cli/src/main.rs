//! deadimg CLI - unused image asset detector for front-end projects.
//!
//! Features:
//! - Exact, path-relative and heuristic reference detection
//! - Glob exclusion for both image and source scans
//! - Rayon-powered parallel source indexing
//! - JSON report written on every run
//! - Optional deletion and CI-friendly fail-on-unused exit code

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use deadimg_core::{
    init_structured_logging, load_config, load_config_file, print_json, print_plain, Deadimg,
    DeadimgConfig, RunOutcome,
};

/// No build-halting condition.
const EXIT_OK: i32 = 0;
/// Unused images found with fail-on-unused enabled.
const EXIT_UNUSED: i32 = 1;
/// Configuration, I/O or deletion error.
const EXIT_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Unused image asset detector for front-end projects")]
pub struct Cli {
    /// Path to the root of the project
    #[arg(default_value = ".")]
    path: String,

    /// Directory to scan for images, relative to the root (repeatable)
    #[arg(long = "image-dir", value_name = "DIR")]
    image_dirs: Vec<String>,

    /// Directory to scan for source files, relative to the root (repeatable)
    #[arg(long = "source-dir", value_name = "DIR")]
    source_dirs: Vec<String>,

    /// Image file extension without the dot (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Source file extension without the dot (repeatable)
    #[arg(long = "source-ext", value_name = "EXT")]
    source_extensions: Vec<String>,

    /// Glob patterns to exclude, matched against root-relative paths
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Report file path (default: unused-images.json in the root)
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Read configuration from this file instead of <root>/deadimg.toml
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Exit with code 1 when unused images are found
    #[arg(long)]
    fail_on_unused: bool,

    /// Delete unused images after writing the report
    #[arg(long)]
    delete: bool,

    /// Show what would be deleted without deleting anything (implies --delete)
    #[arg(long)]
    dry_run: bool,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Index source files on the current thread only
    #[arg(long)]
    sequential: bool,
}

/// Loads deadimg.toml, preferring an explicit --config path.
fn resolve_config(cli: &Cli, root: &Path) -> Result<Option<DeadimgConfig>> {
    let config = match &cli.config {
        Some(file) => Some(load_config_file(Path::new(file))?),
        None => load_config(root)?,
    };
    Ok(config)
}

/// Builds the pipeline: defaults, then deadimg.toml, then command-line flags.
fn configure(cli: &Cli, root: &Path, config: Option<&DeadimgConfig>) -> Deadimg {
    let mut deadimg = match config {
        Some(cfg) => Deadimg::from_config(root, cfg),
        None => Deadimg::new(root),
    };

    if !cli.image_dirs.is_empty() {
        deadimg = deadimg.image_dirs(cli.image_dirs.iter().cloned());
    }
    if !cli.source_dirs.is_empty() {
        deadimg = deadimg.source_dirs(cli.source_dirs.iter().cloned());
    }
    if !cli.extensions.is_empty() {
        deadimg = deadimg.extensions(cli.extensions.iter().cloned());
    }
    if !cli.source_extensions.is_empty() {
        deadimg = deadimg.source_extensions(cli.source_extensions.iter().cloned());
    }
    if let Some(output) = &cli.output {
        deadimg = deadimg.output_file(output);
    }
    if cli.fail_on_unused {
        deadimg = deadimg.fail_on_unused(true);
    }
    if cli.delete || cli.dry_run {
        deadimg = deadimg.delete_unused(true);
    }

    deadimg
        .exclude(cli.exclude.iter().cloned())
        .dry_run(cli.dry_run)
        .parallel(!cli.sequential)
}

/// Maps a finished run to the process exit code.
fn exit_code(deadimg: &Deadimg, outcome: &RunOutcome) -> i32 {
    if let Some(deleted) = &outcome.deleted {
        if !deleted.is_clean() {
            eprintln!(
                "[ERROR] {} unused image(s) could not be deleted",
                deleted.errors.len()
            );
            return EXIT_ERROR;
        }
    }

    match deadimg.disposition().check(outcome.report.unused_count) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("[FAIL] {}", e);
            EXIT_UNUSED
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let root = PathBuf::from(&cli.path);
    if !root.is_dir() {
        return Err(anyhow!("Project root is not a directory: {}", cli.path));
    }

    let config = resolve_config(cli, &root)?;
    let json = cli.json || config.as_ref().is_some_and(DeadimgConfig::wants_json);

    let deadimg = configure(cli, &root, config.as_ref());
    let outcome = deadimg.execute()?;

    if json {
        print_json(&outcome.report);
    } else {
        print_plain(&outcome.report, &outcome.report_path);
    }

    let skipped = outcome.analysis.unreadable_sources.len();
    if skipped > 0 {
        eprintln!("[WARN] {} source file(s) could not be read and were skipped", skipped);
    }

    Ok(exit_code(&deadimg, &outcome))
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] deadimg internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code {}.", EXIT_ERROR);
    }));

    // JSON to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}
