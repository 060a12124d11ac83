//! Modifier expressions: `{name|modifier}`.
//!
//! This pass runs last, after spintax, variables and conditionals. The value
//! comes from the replacement map; when the name has no replacement the name
//! itself is transformed, so `{missing|upper}` becomes `MISSING`.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::parser::is_word_char;
use crate::types::Replacements;

/// A named string transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `upper`, `uppercase`
    Upper,
    /// `lower`, `lowercase`
    Lower,
    /// `capitalize`, `title`: every word capitalized, the rest lowercased.
    Capitalize,
    /// `first`: first character uppercased, the rest lowercased.
    First,
}

impl Modifier {
    /// All recognized modifier names.
    pub const NAMES: [&'static str; 7] = [
        "upper",
        "uppercase",
        "lower",
        "lowercase",
        "capitalize",
        "title",
        "first",
    ];

    /// Look up a modifier by name.
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "upper" | "uppercase" => Some(Modifier::Upper),
            "lower" | "lowercase" => Some(Modifier::Lower),
            "capitalize" | "title" => Some(Modifier::Capitalize),
            "first" => Some(Modifier::First),
            _ => None,
        }
    }

    /// Apply the transform.
    pub fn apply(self, value: &str) -> String {
        match self {
            Modifier::Upper => value.to_uppercase(),
            Modifier::Lower => value.to_lowercase(),
            Modifier::Capitalize => capitalize_words(value),
            Modifier::First => capitalize_first(value),
        }
    }
}

/// Apply a modifier by name; unknown names leave the value unchanged.
pub fn apply_modifier(name: &str, value: &str) -> String {
    match Modifier::from_name(name) {
        Some(modifier) => modifier.apply(value),
        None => value.to_string(),
    }
}

/// Replace every `{name|modifier}` expression in `text`.
///
/// # Example
///
/// ```
/// use varia::{process_modifiers, replacements};
///
/// let values = replacements! { "x" => "hello world" };
/// assert_eq!(process_modifiers("{x|capitalize}", &values), "Hello World");
/// assert_eq!(process_modifiers("{missing|upper}", &values), "MISSING");
/// ```
pub fn process_modifiers(text: &str, replacements: &Replacements) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('{') {
        let (before, tail) = rest.split_at(start);
        output.push_str(before);
        match parse_expression(tail) {
            Some(expression) => {
                let value = replacements
                    .get(expression.name)
                    .map_or(expression.name, String::as_str);
                trace!(
                    name = expression.name,
                    modifier = expression.modifier,
                    "applying modifier"
                );
                output.push_str(&apply_modifier(expression.modifier, value));
                rest = &tail[expression.len..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

struct Expression<'a> {
    name: &'a str,
    modifier: &'a str,
    /// Byte length of the whole expression, braces included.
    len: usize,
}

/// Parse `{word|word}` at the start of `tail`.
fn parse_expression(tail: &str) -> Option<Expression<'_>> {
    let inner = tail.strip_prefix('{')?;
    let (name, after_name) = split_word(inner)?;
    let after_pipe = after_name.strip_prefix('|')?;
    let (modifier, after_modifier) = split_word(after_pipe)?;
    let after_close = after_modifier.strip_prefix('}')?;
    Some(Expression {
        name,
        modifier,
        len: tail.len() - after_close.len(),
    })
}

/// Split a leading non-empty run of word characters from `s`.
pub(crate) fn split_word(s: &str) -> Option<(&str, &str)> {
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

/// Whitespace that starts a new word for `capitalize`.
fn is_word_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0B' | '\x0C')
}

fn capitalize_words(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut output = String::with_capacity(lowered.len());
    let mut at_word_start = true;
    for grapheme in lowered.graphemes(true) {
        if at_word_start {
            output.push_str(&grapheme.to_uppercase());
        } else {
            output.push_str(grapheme);
        }
        at_word_start = grapheme.chars().all(is_word_delimiter);
    }
    output
}

fn capitalize_first(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut graphemes = lowered.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut output = first.to_uppercase();
            output.push_str(graphemes.as_str());
            output
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_whitespace_runs() {
        assert_eq!(capitalize_words("hello  big\tworld"), "Hello  Big\tWorld");
    }

    #[test]
    fn capitalize_does_not_split_on_hyphen() {
        assert_eq!(capitalize_words("north-west SYDNEY"), "North-west Sydney");
    }

    #[test]
    fn first_lowercases_rest() {
        assert_eq!(capitalize_first("hELLO World"), "Hello world");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn parse_expression_rejects_spaces() {
        assert!(parse_expression("{a | upper}").is_none());
        assert!(parse_expression("{a|upper").is_none());
        assert_eq!(parse_expression("{a|upper} rest").map(|e| e.len), Some(9));
    }
}
