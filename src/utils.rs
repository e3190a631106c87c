use crate::constants::SOURCE_EXTENSION;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Whether the path text ends in `.aen`.
///
/// Matches on the raw path suffix rather than [`Path::extension`], so a bare
/// `.aen` (or `dir/.aen`) is accepted while `x.aen/` is not. The match is
/// case-sensitive and never touches the filesystem.
pub fn has_source_extension(path: &Path) -> bool {
    path.as_os_str()
        .as_encoded_bytes()
        .strip_suffix(SOURCE_EXTENSION.as_bytes())
        .is_some_and(|rest| rest.ends_with(b"."))
}

/// Derives `<path-without-.aen><suffix>.aen` from a source archive path.
///
/// Only the trailing `.aen` of the file name is replaced; directory
/// components stay untouched.
///
/// # Arguments
///
/// * `source` - Source archive path, already checked by [`has_source_extension`]
/// * `suffix` - Text inserted before the extension (e.g. `_cleaned`)
///
/// # Returns
///
/// The output path in the same directory as `source`.
pub fn derive_output_path(source: &Path, suffix: &str) -> PathBuf {
    let file_name = source.file_name().unwrap_or(source.as_os_str());
    let stem = file_name
        .to_str()
        .and_then(|n| n.strip_suffix(SOURCE_EXTENSION))
        .and_then(|n| n.strip_suffix('.'))
        .map(OsString::from)
        .unwrap_or_else(|| source.file_stem().unwrap_or(file_name).to_os_string());
    let mut name = stem;
    name.push(suffix);
    name.push(".");
    name.push(SOURCE_EXTENSION);
    source.with_file_name(name)
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        return format!("{millis}ms");
    }
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}
