//! Conditional blocks: `{if:name}...{/if}`.
//!
//! Blocks do not nest. The body is kept as-is when `name` has a truthy
//! replacement and dropped otherwise, tags included.

use tracing::trace;

use super::modifiers::split_word;
use crate::types::Replacements;

const OPEN: &str = "{if:";
const CLOSE: &str = "{/if}";

/// Evaluate every conditional block in `text`.
///
/// An opening tag whose body would contain another `{if:` is left as
/// literal text; the inner block is evaluated on its own.
///
/// # Example
///
/// ```
/// use varia::{process_conditionals, replacements};
///
/// let text = "Call us{if:phone} on {phone}{/if}.";
/// let values = replacements! { "phone" => "555" };
/// assert_eq!(process_conditionals(text, &values), "Call us on {phone}.");
/// assert_eq!(process_conditionals(text, &replacements! {}), "Call us.");
/// ```
pub fn process_conditionals(text: &str, replacements: &Replacements) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN) {
        let (before, tail) = rest.split_at(start);
        output.push_str(before);
        match parse_block(tail) {
            Some(block) => {
                let keep = is_truthy(replacements.get(block.name).map(String::as_str));
                trace!(name = block.name, keep, "evaluated conditional");
                if keep {
                    output.push_str(block.body);
                }
                rest = &tail[block.len..];
            }
            None => {
                output.push_str(OPEN);
                rest = &tail[OPEN.len()..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// A replacement value counts as set unless it is missing, empty or `"0"`.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "0")
}

struct Block<'a> {
    name: &'a str,
    body: &'a str,
    /// Byte length of the whole block, tags included.
    len: usize,
}

/// Parse `{if:word}body{/if}` at the start of `tail`, matching the nearest
/// closing tag.
fn parse_block(tail: &str) -> Option<Block<'_>> {
    let after_open = tail.strip_prefix(OPEN)?;
    let (name, after_name) = split_word(after_open)?;
    let body_and_rest = after_name.strip_prefix('}')?;
    let close = body_and_rest.find(CLOSE)?;
    let body = &body_and_rest[..close];
    if body.contains(OPEN) {
        return None;
    }
    Some(Block {
        name,
        body,
        len: tail.len() - body_and_rest.len() + close + CLOSE.len(),
    })
}
