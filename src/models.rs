use serde::Deserialize;
use std::path::PathBuf;
use zip::{CompressionMethod, DateTime};

/// Per-character removal counts, kept in first-seen order.
///
/// Holds at most 29 distinct code points; lookup is linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(char, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one removed occurrence of `c`.
    pub fn record(&mut self, c: char) {
        self.add(c, 1);
    }

    /// Adds `count` occurrences of `c`, appending `c` if it was not seen before.
    pub fn add(&mut self, c: char, count: usize) {
        if count == 0 {
            return;
        }
        match self.counts.iter_mut().find(|(seen, _)| *seen == c) {
            Some((_, n)) => *n += count,
            None => self.counts.push((c, count)),
        }
    }

    /// Folds another tally into this one, keeping this tally's order for known characters.
    pub fn merge(&mut self, other: &Tally) {
        for (c, count) in other.iter() {
            self.add(c, count);
        }
    }

    pub fn get(&self, c: char) -> usize {
        self.counts
            .iter()
            .find(|(seen, _)| *seen == c)
            .map_or(0, |(_, n)| *n)
    }

    /// Total number of removed characters.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct removed code points.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().copied()
    }
}

/// Compression applied to entries of the output archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    /// Reuse each source entry's method
    #[default]
    Preserve,
    Stored,
    Deflated,
}

impl CompressionMode {
    /// Resolves the method used to write an entry originally stored with `original`.
    ///
    /// Methods the writer cannot produce fall back to deflate.
    pub fn method_for(&self, original: CompressionMethod) -> CompressionMethod {
        match self {
            Self::Stored => CompressionMethod::Stored,
            Self::Deflated => CompressionMethod::Deflated,
            Self::Preserve => match original {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            },
        }
    }
}

/// One member of the source archive, as recorded during extraction.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Name exactly as stored in the archive (forward slashes, trailing `/` for directories)
    pub name: String,
    /// Path relative to the scratch directory
    pub relative_path: PathBuf,
    pub is_dir: bool,
    pub compression: CompressionMethod,
    pub unix_mode: Option<u32>,
    pub last_modified: DateTime,
}

impl ArchiveEntry {
    /// Builds a regular file entry with default metadata.
    pub fn file(name: &str) -> Self {
        Self {
            name: name.to_string(),
            relative_path: PathBuf::from(name),
            is_dir: false,
            compression: CompressionMethod::Deflated,
            unix_mode: None,
            last_modified: DateTime::default(),
        }
    }
}

/// Outcome of one full pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub tally: Tally,
    pub xml_scanned: usize,
    pub xml_modified: usize,
    pub entries_written: usize,
}
