// Archive naming
pub const SOURCE_EXTENSION: &str = "aen";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_cleaned";
pub const DEFAULT_XML_EXTENSION: &str = "xml";

// Scratch directory prefix, a random suffix keeps concurrent runs apart
pub const SCRATCH_DIR_PREFIX: &str = ".aen-scrub-";

// Usage messages
pub const USAGE_TEXT: &str = "Usage: aen-scrub <path_to_aen_file>";
pub const WRONG_EXTENSION_TEXT: &str = "Error: The file must have a .aen extension.";
pub const ARCHIVE_HELP_TEXT: &str = "Path to the .aen archive to clean";

// Logging
pub const DEFAULT_LOG_FILTER: &str = "info";
