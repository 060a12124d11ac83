//! Miette diagnostic wrapper for template validation errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use varia::ValidationError;

/// A miette-compatible diagnostic for invalid templates.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid template: {message}")]
#[diagnostic(code(varia::template))]
pub struct VariaDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl VariaDiagnostic {
    /// Create a diagnostic from a validation error with source context.
    pub fn from_validation_error(path: &Path, content: &str, err: &ValidationError) -> Self {
        let (line, column) = err.position();
        let help = match err {
            ValidationError::MismatchedBraces { .. } => {
                "every '{' needs a matching '}'; check for a missing or extra brace"
            }
            ValidationError::EmptyAlternative { .. } => {
                "remove the extra '|' or fill in the option"
            }
        };
        let offset = byte_offset(content, line, column);
        let width = content[offset..].chars().next().map_or(0, char::len_utf8);

        VariaDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, width).into(),
            message: err.to_string(),
            help: Some(help.to_string()),
        }
    }
}

/// Byte offset of a 1-based line and character column, clamped to the
/// content length.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split('\n')
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum();
    let line_start = line_start.min(content.len());
    let within_line = content[line_start..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(content.len() - line_start, |(index, _)| index);
    line_start + within_line
}
