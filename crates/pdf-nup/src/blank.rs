//! Blank page detection
//!
//! A page counts as blank when it carries no extractable text. Pages that
//! are pure images are therefore also treated as blank.

use crate::source::SourcePage;
use crate::types::PageError;

/// Check whether `page` is blank by examining its text content.
///
/// A failure to read the text is returned to the caller rather than being
/// taken to mean the page is blank.
pub fn is_blank(page: &SourcePage<'_>) -> Result<bool, PageError> {
    Ok(is_blank_text(&page.text()?))
}

/// True when `text` is empty after trimming whitespace
pub fn is_blank_text(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_blank() {
        assert!(is_blank_text(""));
        assert!(is_blank_text("   \n"));
        assert!(is_blank_text("\t\r\n  "));
    }

    #[test]
    fn test_any_visible_character_is_content() {
        assert!(!is_blank_text("a"));
        assert!(!is_blank_text("  1\n"));
        assert!(!is_blank_text("\n\n.\n"));
    }
}
