//! Plausibility check on resolved text.
//!
//! A span that begins with whitespace points into indentation or between
//! tokens, which happens when the region was computed against another revision
//! of the file. Empty text passes.

use crate::error::CorrelationError;
use crate::snippet::ResolvedSnippet;

/// Unicode whitespace plus the ASCII information separators `U+001C..=U+001F`,
/// which line-splitting readers also treat as spacing.
pub fn starts_with_whitespace(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

pub fn validate(snippet: &ResolvedSnippet) -> Result<(), CorrelationError> {
    if starts_with_whitespace(snippet.text()) {
        return Err(CorrelationError::InvalidContent {
            path: snippet.path().clone(),
            region: snippet.region(),
            text: snippet.text().to_string(),
        });
    }
    Ok(())
}
