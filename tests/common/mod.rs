//! Common test utilities for integration tests

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Creates a test archive with the given entries; names ending in `/` become directories.
#[allow(dead_code)]
pub fn create_test_archive(
    archive_path: &Path,
    files: &[(&str, &[u8])],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = fs::File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in files {
        if name.ends_with('/') {
            zip.add_directory(*name, options)?;
        } else {
            zip.start_file(*name, options)?;
            zip.write_all(content)?;
        }
    }

    zip.finish()?;
    Ok(())
}

/// Reads every entry of an archive as `(name, content)` in archive order.
#[allow(dead_code)]
pub fn read_archive(archive_path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(fs::File::open(archive_path).unwrap()).unwrap();
    let mut out = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        out.push((file.name().to_string(), content));
    }
    out
}

/// Counts leftover scratch directories directly under `dir`.
#[allow(dead_code)]
pub fn scratch_dirs_in(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with(aen_scrub::constants::SCRATCH_DIR_PREFIX)
        })
        .count()
}

/// Word-processing style XML carrying stray control characters
#[allow(dead_code)]
pub const DIRTY_DOCUMENT_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document>\n\t<p>Line\u{b}one</p>\r\n\t<p>Bell\u{7}\u{7}</p>\n</document>";

/// The same document once cleaned
#[allow(dead_code)]
pub const CLEAN_DOCUMENT_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document>\n\t<p>Lineone</p>\r\n\t<p>Bell</p>\n</document>";
