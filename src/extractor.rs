use crate::errors::{AppError, AppResult};
use crate::models::ArchiveEntry;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Extracts every member of `archive_path` into `dest`.
///
/// Returns the archive's entries in source order, which the packager later
/// replays to rebuild an archive with the same entry set.
///
/// # Behavior
///
/// - **Directories**: directory entries are created and recorded, so empty
///   directories survive repackaging.
/// - **Duplicates**: a name that appears twice keeps its first position and
///   the last content written to disk.
/// - **Aliases**: two different names resolving to the same scratch path
///   (`a.txt` and `x/../a.txt`) abort the extraction, since both could not be
///   written back with their own content.
/// - **Unsafe names**: entries whose path would escape `dest` (absolute paths,
///   leading `..` components) abort the extraction.
///
/// # Arguments
///
/// * `archive_path` - Source `.aen` archive
/// * `dest` - Existing scratch directory receiving the extracted files
///
/// # Returns
///
/// The recorded entries, one per distinct name, with `relative_path`
/// normalized (no `.` or `..` components).
///
/// # Errors
///
/// Returns `ArchiveRead` if the file cannot be opened, is not a valid ZIP
/// archive, or holds an unsafe or aliasing entry name. Returns `Io` if files
/// cannot be created under `dest`.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> AppResult<Vec<ArchiveEntry>> {
    let file = File::open(archive_path).map_err(|e| {
        AppError::ArchiveRead(format!(
            "Failed to open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| {
        AppError::ArchiveRead(format!(
            "Failed to read archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    info!(
        archive = %archive_path.display(),
        entries = archive.len(),
        scratch_dir = %dest.display(),
        "Extracting archive"
    );

    let mut entries: Vec<ArchiveEntry> = Vec::with_capacity(archive.len());
    // Keyed on the normalized scratch path, not the raw name
    let mut positions: HashMap<PathBuf, usize> = HashMap::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| {
            AppError::ArchiveRead(format!(
                "Failed to read entry {} from archive {}: {}",
                i,
                archive_path.display(),
                e
            ))
        })?;

        let name = file.name().to_string();
        let relative_path = file
            .enclosed_name()
            .map(normalize_relative)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                AppError::ArchiveRead(format!(
                    "Entry '{}' in {} has an unsafe path",
                    name,
                    archive_path.display()
                ))
            })?;

        if let Some(&pos) = positions.get(&relative_path) {
            if entries[pos].name != name {
                return Err(AppError::ArchiveRead(format!(
                    "Entries '{}' and '{}' in {} resolve to the same path",
                    entries[pos].name,
                    name,
                    archive_path.display()
                )));
            }
        }

        let out_path = dest.join(&relative_path);

        if file.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|e| {
                AppError::Io(format!(
                    "Failed to create directory {}: {}",
                    out_path.display(),
                    e
                ))
            })?;
        } else {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Io(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            let mut out_file = File::create(&out_path).map_err(|e| {
                AppError::Io(format!(
                    "Failed to create file {}: {}",
                    out_path.display(),
                    e
                ))
            })?;

            std::io::copy(&mut file, &mut out_file).map_err(|e| {
                AppError::ArchiveRead(format!(
                    "Failed to extract {} from {}: {}",
                    name,
                    archive_path.display(),
                    e
                ))
            })?;
        }

        let entry = ArchiveEntry {
            name: name.clone(),
            relative_path: relative_path.clone(),
            is_dir: file.is_dir(),
            compression: file.compression(),
            unix_mode: file.unix_mode(),
            last_modified: file.last_modified(),
        };

        match positions.get(&relative_path) {
            Some(&pos) => {
                warn!(entry = %name, "Duplicate entry name, keeping last content");
                entries[pos] = entry;
            }
            None => {
                positions.insert(relative_path, entries.len());
                entries.push(entry);
            }
        }
    }

    debug!(
        entries = entries.len(),
        directories = entries.iter().filter(|e| e.is_dir).count(),
        "Extraction finished"
    );

    Ok(entries)
}

/// Resolves `.` and `..` components of an already enclosed path.
fn normalize_relative(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            _ => {}
        }
    }
    normalized
}
