use crate::models::Tally;
use std::borrow::Cow;

/// Result of cleaning one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned<'a> {
    pub text: Cow<'a, str>,
    pub tally: Tally,
}

impl Cleaned<'_> {
    /// Whether any character was removed.
    pub fn changed(&self) -> bool {
        !self.tally.is_empty()
    }
}

/// Whether `c` is a control character XML 1.0 forbids in documents.
///
/// Tab, line feed and carriage return are the only legal C0 controls.
pub fn is_illegal_xml_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}')
}

/// Removes every XML-illegal control character from `input`.
///
/// # Returns
///
/// The cleaned text and a tally of what was removed, in first-seen order.
/// The text borrows `input` when nothing had to be removed.
pub fn clean(input: &str) -> Cleaned<'_> {
    if !input.chars().any(is_illegal_xml_char) {
        return Cleaned {
            text: Cow::Borrowed(input),
            tally: Tally::new(),
        };
    }

    let mut tally = Tally::new();
    let mut text = String::with_capacity(input.len());
    for c in input.chars() {
        if is_illegal_xml_char(c) {
            tally.record(c);
        } else {
            text.push(c);
        }
    }

    Cleaned {
        text: Cow::Owned(text),
        tally,
    }
}
