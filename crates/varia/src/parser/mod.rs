//! Template parser and validator.
//!
//! Templates are parsed into a brace tree: literal text plus `{...}` groups
//! whose alternatives are themselves templates. The parse never fails;
//! unbalanced braces are kept as literal text and reported separately by
//! [`validate`].

pub mod ast;
pub mod error;
mod template;
mod validate;

pub use ast::*;
pub use error::ValidationError;
pub use template::{MAX_DEPTH, parse_template};
pub use validate::{ValidationReport, validate};

/// Returns true for ASCII word characters (`[A-Za-z0-9_]`).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns true if `s` is a non-empty run of word characters.
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// Returns true if `s` is a variable identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(is_word_char),
        _ => false,
    }
}
