use crate::models::Tally;
use std::io::{self, Write};

/// Formats a code point as `U+XXXX` (uppercase hex, at least four digits).
pub fn code_point_label(c: char) -> String {
    format!("U+{:04X}", c as u32)
}

/// Writes the removal report for `tally` to `out`.
///
/// A blank separator line and a header, one line per removed code point in
/// first-seen order, then the total. An empty tally still produces the header
/// and a zero total.
pub fn write_report<W: Write>(out: &mut W, tally: &Tally) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Detailed report of problematic characters:")?;
    for (c, count) in tally.iter() {
        writeln!(out, "Character: {} | Count: {}", code_point_label(c), count)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Total number of problematic characters found: {}",
        tally.total()
    )?;
    Ok(())
}
