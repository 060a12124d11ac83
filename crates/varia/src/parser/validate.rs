//! Template validation: brace balance and empty spintax options.

use serde::{Deserialize, Serialize};

use super::ast::{Group, Segment, Template};
use super::error::ValidationError;
use super::template::parse_template;

/// Result of validating a template, in record form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<(), ValidationError>> for ValidationReport {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationReport {
                valid: true,
                error: None,
            },
            Err(e) => ValidationReport {
                valid: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Validate a template before substitution.
///
/// Checks, in order:
/// - every `}` closes an open `{` and every `{` is closed
/// - no group with two or more alternatives has an empty alternative
///
/// # Example
///
/// ```
/// use varia::{ValidationError, validate};
///
/// assert!(validate("{Hello|Hi} {name}").is_ok());
/// assert_eq!(
///     validate("{a||b}"),
///     Err(ValidationError::EmptyAlternative { line: 1, column: 1 })
/// );
/// ```
pub fn validate(text: &str) -> Result<(), ValidationError> {
    check_balance(text)?;
    check_alternatives(text, &parse_template(text))
}

fn check_balance(text: &str) -> Result<(), ValidationError> {
    let mut open = Vec::new();
    for (offset, c) in text.char_indices() {
        match c {
            '{' => open.push(offset),
            '}' => {
                if open.pop().is_none() {
                    return Err(mismatched(text, offset));
                }
            }
            _ => {}
        }
    }
    match open.first() {
        Some(&offset) => Err(mismatched(text, offset)),
        None => Ok(()),
    }
}

fn mismatched(text: &str, offset: usize) -> ValidationError {
    let (line, column) = calculate_position(text, offset);
    ValidationError::MismatchedBraces { line, column }
}

fn check_alternatives(text: &str, template: &Template) -> Result<(), ValidationError> {
    for segment in &template.segments {
        if let Segment::Group(group) = segment {
            check_group(text, group)?;
        }
    }
    Ok(())
}

fn check_group(text: &str, group: &Group) -> Result<(), ValidationError> {
    if group.alternatives.len() > 1
        && group
            .alternatives
            .iter()
            .any(|alternative| alternative.segments.is_empty())
    {
        let (line, column) = calculate_position(text, group.span.start);
        return Err(ValidationError::EmptyAlternative { line, column });
    }
    for alternative in &group.alternatives {
        check_alternatives(text, alternative)?;
    }
    Ok(())
}

/// Calculate 1-based line and column for a byte offset.
fn calculate_position(text: &str, offset: usize) -> (usize, usize) {
    let consumed = &text[..offset];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed[line_start..].chars().count() + 1;
    (line, column)
}
