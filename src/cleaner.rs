use crate::config::ResolvedConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{ArchiveEntry, Tally};
use crate::sanitizer;
use crate::ui::entry_progress;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Aggregate result of the scan & clean stage.
#[derive(Debug, Clone, Default)]
pub struct CleanStats {
    pub tally: Tally,
    pub scanned: usize,
    pub modified: usize,
}

/// Sanitizes every XML entry extracted under `scratch_dir`.
///
/// Each XML file is read into memory, cleaned, and written back once. Files
/// that needed no change are left untouched on disk. Non-XML entries and
/// directories are skipped.
///
/// # Arguments
///
/// * `scratch_dir` - Directory the archive was extracted into
/// * `entries` - Entries recorded by the extractor
/// * `config` - Decides which entry names count as XML
///
/// # Returns
///
/// The merged tally plus how many XML entries were scanned and modified.
///
/// # Errors
///
/// Returns `Encoding` if an XML entry is not valid UTF-8, or `Io` if a file
/// cannot be read or rewritten.
pub fn clean_entries(
    scratch_dir: &Path,
    entries: &[ArchiveEntry],
    config: &ResolvedConfig,
) -> AppResult<CleanStats> {
    let xml_entries: Vec<&ArchiveEntry> = entries
        .iter()
        .filter(|e| !e.is_dir && config.is_xml_entry(&e.name))
        .collect();

    info!(
        xml_files = xml_entries.len(),
        skipped = entries.len() - xml_entries.len(),
        "Scanning XML entries"
    );

    let pb = entry_progress(xml_entries.len(), "scan")?;
    let mut stats = CleanStats::default();

    for entry in xml_entries {
        pb.set_message(entry.name.clone());
        let tally = clean_file(&scratch_dir.join(&entry.relative_path))?;
        stats.scanned += 1;
        if !tally.is_empty() {
            stats.modified += 1;
            debug!(
                entry = %entry.name,
                removed = tally.total(),
                "Cleaned XML entry"
            );
        }
        stats.tally.merge(&tally);
        pb.inc(1);
    }

    pb.finish_and_clear();

    info!(
        scanned = stats.scanned,
        modified = stats.modified,
        removed = stats.tally.total(),
        "Scan completed"
    );

    Ok(stats)
}

/// Cleans one file in place and returns what was removed from it.
fn clean_file(path: &Path) -> AppResult<Tally> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let content = String::from_utf8(bytes).map_err(|source| AppError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;

    let cleaned = sanitizer::clean(&content);
    if cleaned.changed() {
        fs::write(path, cleaned.text.as_bytes())
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    Ok(cleaned.tally)
}
