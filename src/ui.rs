use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

const ENTRY_TEMPLATE: &str = "{prefix:>8} [{bar:30}] {pos}/{len} {wide_msg}";

/// Creates the per-entry progress bar shown while a stage walks archive entries.
///
/// The bar draws to stderr, so the report on stdout is never interleaved with
/// it. indicatif hides it on its own when stderr is not a terminal; an empty
/// stage gets a hidden bar up front.
///
/// # Arguments
///
/// * `total` - Number of entries the stage will visit
/// * `stage` - Short label printed in front of the bar (e.g. `"scan"`)
///
/// # Returns
///
/// A bar whose message is meant to carry the current entry name.
///
/// # Example
///
/// ```no_run
/// use aen_scrub::ui;
///
/// # fn main() -> Result<(), aen_scrub::errors::AppError> {
/// let pb = ui::entry_progress(2, "scan")?;
/// pb.set_message("word/document.xml");
/// pb.inc(1);
/// pb.finish_and_clear();
/// # Ok(())
/// # }
/// ```
pub fn entry_progress(total: usize, stage: &'static str) -> AppResult<ProgressBar> {
    if total == 0 {
        return Ok(ProgressBar::hidden());
    }

    let style = ProgressStyle::with_template(ENTRY_TEMPLATE)
        .map_err(|e| AppError::Io(format!("Invalid progress template: {e}")))?
        .progress_chars("=> ");

    Ok(ProgressBar::new(total as u64)
        .with_style(style)
        .with_prefix(stage))
}
