use crate::cleaner::clean_entries;
use crate::config::ResolvedConfig;
use crate::constants::SCRATCH_DIR_PREFIX;
use crate::errors::{AppError, AppResult};
use crate::extractor::extract_archive;
use crate::models::RunSummary;
use crate::packager::repackage;
use crate::report::write_report;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, TempDir};
use tracing::{debug, info};

/// Runs the four stages over `source`: extract, scan & clean, report, repackage.
///
/// The scratch directory is unique to this run and is removed on every exit
/// path. The report is written to `report_out` between cleaning and
/// repackaging.
///
/// # Errors
///
/// Propagates `ArchiveRead`, `Encoding`, `ArchiveWrite` and `Io` from the
/// stages. No output archive exists after a failed run.
pub fn process_archive<W: Write>(
    source: &Path,
    output: &Path,
    config: &ResolvedConfig,
    report_out: &mut W,
) -> AppResult<RunSummary> {
    info!(source = %source.display(), "Starting process");

    let scratch = create_scratch_dir(config)?;
    debug!(scratch_dir = %scratch.path().display(), "Scratch directory created");

    let entries = extract_archive(source, scratch.path())?;
    let stats = clean_entries(scratch.path(), &entries, config)?;

    write_report(report_out, &stats.tally)
        .map_err(|e| AppError::Io(format!("Failed to write report: {e}")))?;

    let entries_written = repackage(scratch.path(), &entries, output, config.compression)?;

    let scratch_path = scratch.path().to_path_buf();
    scratch.close().map_err(|e| {
        AppError::Io(format!(
            "Failed to remove scratch directory {}: {}",
            scratch_path.display(),
            e
        ))
    })?;
    debug!(scratch_dir = %scratch_path.display(), "Scratch directory removed");

    Ok(RunSummary {
        output_path: output.to_path_buf(),
        tally: stats.tally,
        xml_scanned: stats.scanned,
        xml_modified: stats.modified,
        entries_written,
    })
}

fn create_scratch_dir(config: &ResolvedConfig) -> AppResult<TempDir> {
    let mut builder = Builder::new();
    builder.prefix(SCRATCH_DIR_PREFIX);
    let scratch = match &config.scratch_dir {
        Some(parent) => builder.tempdir_in(parent),
        None => builder.tempdir(),
    };
    scratch.map_err(|e| AppError::Io(format!("Failed to create scratch directory: {e}")))
}
