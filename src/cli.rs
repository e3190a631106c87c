use crate::config::ResolvedConfig;
use crate::constants::{ARCHIVE_HELP_TEXT, USAGE_TEXT, WRONG_EXTENSION_TEXT};
use crate::errors::{AppError, AppResult};
use crate::pipeline::process_archive;
use crate::utils::{derive_output_path, format_duration, has_source_extension};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Builds the argument parser.
pub fn build_command() -> Command {
    Command::new("aen-scrub")
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .after_help("Writes <archive>_cleaned.aen next to the source.\nExample:\n  aen-scrub exports/ledger.aen")
        .arg(
            Arg::new("archive")
                .help(ARCHIVE_HELP_TEXT)
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the cleaned archive here instead of the derived path")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a TOML configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Parses the process arguments and cleans the requested archive.
///
/// See [`cli_from`].
pub fn cli() -> AppResult<()> {
    cli_from(std::env::args_os())
}

/// Parses `args` and cleans the requested archive.
///
/// The workflow:
/// 1. Validates the source path (extension first, then existence)
/// 2. Loads the optional TOML configuration
/// 3. Runs extraction, cleaning, reporting and repackaging
/// 4. Prints where the cleaned archive was saved
///
/// # Errors
///
/// Returns `Usage` for a missing argument, a source without the `.aen`
/// extension, a missing source file, or an output path equal to the source.
/// Archive, encoding, config and IO errors are returned as-is.
pub fn cli_from<I, T>(args: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                e.print()
                    .map_err(|e| AppError::Io(format!("Failed to print help: {e}")))?;
                return Ok(());
            }
            ErrorKind::MissingRequiredArgument => {
                return Err(AppError::Usage(USAGE_TEXT.to_string()))
            }
            _ => return Err(AppError::Usage(e.to_string())),
        },
    };

    let source = matches
        .get_one::<PathBuf>("archive")
        .ok_or_else(|| AppError::Usage(USAGE_TEXT.to_string()))?;
    validate_source(source)?;

    let config = load_config(&matches)?;
    let output = resolve_output(source, &matches, &config)?;

    run_workflow(source, &output, &config)
}

/// Checks the source path: extension first (no filesystem access), then existence.
pub fn validate_source(source: &Path) -> AppResult<()> {
    if !has_source_extension(source) {
        return Err(AppError::Usage(WRONG_EXTENSION_TEXT.to_string()));
    }
    if !source.exists() {
        return Err(AppError::Usage(format!(
            "Error: File '{}' does not exist.",
            source.display()
        )));
    }
    Ok(())
}

fn load_config(matches: &ArgMatches) -> AppResult<ResolvedConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => ResolvedConfig::from_toml_file(path),
        None => Ok(ResolvedConfig::default()),
    }
}

fn resolve_output(
    source: &Path,
    matches: &ArgMatches,
    config: &ResolvedConfig,
) -> AppResult<PathBuf> {
    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| derive_output_path(source, &config.output_suffix));

    if is_same_file(source, &output) {
        return Err(AppError::Usage(format!(
            "Error: Output path '{}' would overwrite the source archive.",
            output.display()
        )));
    }
    Ok(output)
}

/// Whether `output` designates the same file as the existing `source`.
///
/// Both sides are resolved through the filesystem, so `./in.aen`, `in.aen`
/// and symlinks to it compare equal. When `output` does not exist yet, its
/// parent is resolved and joined with the file name.
fn is_same_file(source: &Path, output: &Path) -> bool {
    if source == output {
        return true;
    }
    let Ok(source) = fs::canonicalize(source) else {
        return false;
    };
    if let Ok(existing) = fs::canonicalize(output) {
        return existing == source;
    }

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), output.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name) == source,
        _ => false,
    }
}

fn run_workflow(source: &Path, output: &Path, config: &ResolvedConfig) -> AppResult<()> {
    let started = Instant::now();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = process_archive(source, output, config, &mut out)?;

    writeln!(
        out,
        "\nProcess complete. Cleaned .aen file saved to: {}",
        summary.output_path.display()
    )?;

    info!(
        output = %summary.output_path.display(),
        entries = summary.entries_written,
        xml_scanned = summary.xml_scanned,
        xml_modified = summary.xml_modified,
        removed = summary.tally.total(),
        elapsed = %format_duration(started.elapsed()),
        "All operations completed successfully"
    );

    Ok(())
}
