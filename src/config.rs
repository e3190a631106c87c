use crate::constants::{DEFAULT_OUTPUT_SUFFIX, DEFAULT_XML_EXTENSION};
use crate::errors::{AppError, AppResult};
use crate::models::CompressionMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in.
///
/// This struct holds the run defaults and can be deserialized from a TOML file.
/// Every key is optional; missing keys keep their default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Inserted between the source stem and `.aen` to name the output archive
    pub output_suffix: String,
    /// Extension (without the dot) of entries treated as XML
    pub xml_extension: String,
    /// Match `xml_extension` ignoring ASCII case
    pub xml_case_insensitive: bool,
    /// Compression applied to output entries
    pub compression: CompressionMode,
    /// Parent directory for the scratch directory.
    /// When unset, the system temporary directory is used.
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            xml_extension: DEFAULT_XML_EXTENSION.to_string(),
            xml_case_insensitive: false,
            compression: CompressionMode::Preserve,
            scratch_dir: None,
        }
    }
}

impl ResolvedConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// Unknown keys are rejected so typos are not silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the TOML is malformed, unknown keys are present,
    /// or `output_suffix`/`xml_extension` are empty. Returns `Io` if the file
    /// cannot be read.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfig = toml::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.output_suffix.is_empty() {
            return Err(AppError::Config(
                "Output suffix must not be empty".into(),
            ));
        }
        if self.xml_extension.trim_start_matches('.').is_empty() {
            return Err(AppError::Config("XML extension must not be empty".into()));
        }
        Ok(())
    }

    /// Whether an archive entry name designates an XML payload.
    pub fn is_xml_entry(&self, name: &str) -> bool {
        let ext = self.xml_extension.trim_start_matches('.');
        let Some(stem_len) = name.len().checked_sub(ext.len() + 1) else {
            return false;
        };
        let Some(tail) = name.get(stem_len..) else {
            return false;
        };
        let Some(tail_ext) = tail.strip_prefix('.') else {
            return false;
        };
        if self.xml_case_insensitive {
            tail_ext.eq_ignore_ascii_case(ext)
        } else {
            tail_ext == ext
        }
    }
}
