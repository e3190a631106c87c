use crate::errors::{AppError, AppResult};
use crate::models::{ArchiveEntry, CompressionMode};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Writes a new archive at `output` holding every entry from `scratch_dir`.
///
/// Entries are written in the order given, under their original archive
/// names, with their modification time and unix permissions carried over.
/// The archive is assembled in a temporary file beside `output` and renamed
/// into place only once complete, so a failure never leaves a partial archive.
///
/// # Arguments
///
/// * `scratch_dir` - Directory holding the extracted (and cleaned) entries
/// * `entries` - Entry list in source order, as recorded by the extractor
/// * `output` - Destination archive path
/// * `compression` - Whether to keep each entry's method or force one
///
/// # Returns
///
/// The number of entries written, directories included.
///
/// # Errors
///
/// Returns `ArchiveWrite` if the output cannot be created, an entry cannot be
/// added, or the finished archive cannot be moved into place.
pub fn repackage(
    scratch_dir: &Path,
    entries: &[ArchiveEntry],
    output: &Path,
    compression: CompressionMode,
) -> AppResult<usize> {
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = NamedTempFile::new_in(output_dir).map_err(|e| {
        AppError::ArchiveWrite(format!(
            "Failed to create staging file in {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    info!(
        output = %output.display(),
        entries = entries.len(),
        "Recreating archive"
    );

    let mut writer = ZipWriter::new(staging);

    for entry in entries {
        let mut options = FileOptions::default()
            .compression_method(compression.method_for(entry.compression))
            .last_modified_time(entry.last_modified);
        if let Some(mode) = entry.unix_mode {
            options = options.unix_permissions(mode);
        }

        if entry.is_dir {
            writer
                .add_directory(entry.name.as_str(), options)
                .map_err(|e| write_error(&entry.name, e))?;
            continue;
        }

        let source_path = scratch_dir.join(&entry.relative_path);
        let mut source = File::open(&source_path).map_err(|e| {
            AppError::ArchiveWrite(format!(
                "Failed to open {} for packaging: {}",
                source_path.display(),
                e
            ))
        })?;

        writer
            .start_file(entry.name.as_str(), options)
            .map_err(|e| write_error(&entry.name, e))?;
        std::io::copy(&mut source, &mut writer).map_err(|e| write_error(&entry.name, e))?;
        debug!(entry = %entry.name, "Packed entry");
    }

    let mut staging = writer
        .finish()
        .map_err(|e| AppError::ArchiveWrite(format!("Failed to finalize archive: {e}")))?;
    staging
        .flush()
        .map_err(|e| AppError::ArchiveWrite(format!("Failed to flush archive: {e}")))?;

    staging.persist(output).map_err(|e| {
        AppError::ArchiveWrite(format!(
            "Failed to move archive into place at {}: {}",
            output.display(),
            e.error
        ))
    })?;

    Ok(entries.len())
}

fn write_error(name: &str, err: impl std::fmt::Display) -> AppError {
    AppError::ArchiveWrite(format!("Failed to write entry {name}: {err}"))
}
