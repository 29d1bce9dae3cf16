//! Post-processing of model output.
//!
//! Vision models tend to open with a conversational preamble ("Sure, here is
//! the text:") and to sprinkle zero-width joiners through Persian words. Both
//! are removed before the text is saved.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

// --- Compiled regexes ---

/// Any character in the Arabic block (U+0600–U+06FF), which covers Persian.
static PERSIAN_CHAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{0600}-\x{06FF}]").unwrap());

/// ZWNJ (U+200C) and ZWJ (U+200D).
static ZERO_WIDTH_JOINER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{200C}\x{200D}]").unwrap());

/// Drop everything before the first Persian-script character.
///
/// The first such character is taken as the start of the real text. Input
/// without any Persian character is returned unchanged.
pub fn strip_preamble(text: &str) -> &str {
    match PERSIAN_CHAR_RE.find(text) {
        Some(m) => &text[m.start()..],
        None => text,
    }
}

pub fn remove_zero_width_joiners(text: &str) -> Cow<'_, str> {
    ZERO_WIDTH_JOINER_RE.replace_all(text, "")
}

/// Strip the preamble, remove zero-width joiners, and trim.
pub fn clean_extracted_text(raw: &str) -> String {
    remove_zero_width_joiners(strip_preamble(raw)).trim().to_string()
}
