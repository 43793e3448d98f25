//! PDF text extraction. Page text is concatenated in page order with every
//! run of whitespace collapsed to a single space.

use std::fmt::Display;
use std::panic::{self, UnwindSafe};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractionError {
    #[error("file is empty")]
    Empty,

    #[error("not a readable PDF: {0}")]
    Parse(String),
}

/// Converts raw document bytes into plain text.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>` so uploads can be
/// exercised without real PDF fixtures.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// Default extractor backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let raw = contain_parser(|| pdf_extract::extract_text_from_mem(bytes))?;
        let text = join_tokens(&raw);
        debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

/// Runs a parser, turning both its errors and its panics into `Parse`.
/// pdf-extract panics on some malformed inputs; this keeps that to one document.
fn contain_parser<F, E>(parse: F) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, E> + UnwindSafe,
    E: Display,
{
    panic::catch_unwind(parse)
        .map_err(|_| ExtractionError::Parse("PDF parser aborted".to_string()))?
        .map_err(|e| ExtractionError::Parse(e.to_string()))
}

/// Joins whitespace-separated tokens with single spaces.
pub fn join_tokens(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_tokens_collapses_page_breaks_and_runs() {
        let raw = "Jane Doe\n\n  Rust   Engineer\u{c}Page two\ttext\n";
        assert_eq!(join_tokens(raw), "Jane Doe Rust Engineer Page two text");
    }

    #[test]
    fn test_join_tokens_empty() {
        assert_eq!(join_tokens("  \n\t "), "");
    }

    #[test]
    fn test_empty_bytes_is_empty_error() {
        assert_eq!(PdfTextExtractor.extract(&[]), Err(ExtractionError::Empty));
    }

    #[test]
    fn test_garbage_bytes_is_parse_error() {
        let result = PdfTextExtractor.extract(b"this is plainly not a pdf document");
        assert!(matches!(result, Err(ExtractionError::Parse(_))), "got {result:?}");
    }

    #[test]
    fn test_parser_panic_becomes_parse_error() {
        let result = contain_parser(|| -> Result<String, String> { panic!("bad xref table") });
        assert_eq!(result, Err(ExtractionError::Parse("PDF parser aborted".to_string())));
    }

    #[test]
    fn test_parser_error_keeps_its_message() {
        let result = contain_parser(|| Err::<String, _>("unexpected EOF"));
        assert_eq!(result, Err(ExtractionError::Parse("unexpected EOF".to_string())));
    }
}
