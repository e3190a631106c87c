//! aen-scrub library
//!
//! This crate provides the core functionality for the `aen-scrub` binary, which
//! removes XML-illegal control characters from the XML entries of `.aen`
//! archives (ZIP containers under another extension) and writes a cleaned copy.
//!
//! ## Overview
//!
//! - [`sanitizer`] - Removes U+0000–U+0008, U+000B–U+000C and U+000E–U+001F from text
//! - [`extractor`] - Unpacks the source archive into a scratch directory
//! - [`cleaner`] - Sanitizes every XML entry in place and tallies removals
//! - [`report`] - Renders the per-character removal report
//! - [`packager`] - Rebuilds an archive with the same entry set
//! - [`pipeline`] - Runs the stages over a run-scoped scratch directory
//! - [`cli`] - Command-line interface and argument validation
//! - [`config`] - Optional TOML configuration
//! - [`models`] - Tally, archive entry and run summary types
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use aen_scrub::{config::ResolvedConfig, errors::AppResult, pipeline};
//! use std::path::Path;
//!
//! # fn example() -> AppResult<()> {
//! let summary = pipeline::process_archive(
//!     Path::new("ledger.aen"),
//!     Path::new("ledger_cleaned.aen"),
//!     &ResolvedConfig::default(),
//!     &mut std::io::stdout(),
//! )?;
//! println!("removed {} characters", summary.tally.total());
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod packager;
pub mod pipeline;
pub mod report;
pub mod sanitizer;
pub mod ui;
pub mod utils;
