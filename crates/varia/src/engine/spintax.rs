//! Spintax resolution over the parsed brace tree.
//!
//! Groups resolve innermost first, left to right: every alternative of a
//! group is resolved before the group itself picks one. A group survives
//! unchanged when, after its nested groups are resolved, it is:
//! - a single space-free alternative naming a known variable (`{city}`)
//! - a conditional tag (`{if:name}`, `{/if}`)
//! - an identifier and a recognized modifier (`{service|capitalize}`)

use tracing::trace;

use super::chooser::Chooser;
use super::modifiers::Modifier;
use crate::parser::{Group, Segment, Template, is_identifier, is_word, parse_template};

/// Resolve every spintax group in `text`.
///
/// `is_known` decides whether a single-alternative group is a variable
/// placeholder that must be preserved for the substitution pass.
///
/// # Example
///
/// ```
/// use varia::{ScriptedChooser, resolve_spintax};
///
/// let mut chooser = ScriptedChooser::new([1, 0]);
/// let is_known = |name: &str| name == "name";
/// let text = resolve_spintax("{Hi|Hello} {name}, {a|b}", &is_known, &mut chooser);
/// assert_eq!(text, "Hello {name}, a");
/// ```
pub fn resolve_spintax(
    text: &str,
    is_known: &dyn Fn(&str) -> bool,
    chooser: &mut dyn Chooser,
) -> String {
    resolve_template(&parse_template(text), is_known, chooser)
}

fn resolve_template(
    template: &Template,
    is_known: &dyn Fn(&str) -> bool,
    chooser: &mut dyn Chooser,
) -> String {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Group(group) => output.push_str(&resolve_group(group, is_known, chooser)),
        }
    }
    output
}

fn resolve_group(
    group: &Group,
    is_known: &dyn Fn(&str) -> bool,
    chooser: &mut dyn Chooser,
) -> String {
    let alternatives: Vec<String> = group
        .alternatives
        .iter()
        .map(|alternative| resolve_template(alternative, is_known, chooser))
        .collect();

    if is_preserved(&alternatives, is_known) {
        trace!(group = %alternatives.join("|"), "preserving group");
        return format!("{{{}}}", alternatives.join("|"));
    }

    let index = chooser.choose_index(alternatives.len());
    alternatives
        .get(index)
        .map(|choice| choice.trim().to_string())
        .unwrap_or_default()
}

fn is_preserved(alternatives: &[String], is_known: &dyn Fn(&str) -> bool) -> bool {
    match alternatives {
        [single] => {
            is_conditional_tag(single) || (!single.contains(' ') && is_known(single.trim()))
        }
        [name, modifier] => is_modifier_expression(name, modifier),
        _ => false,
    }
}

/// `if:word` or `/if`, the inside of a conditional tag.
pub(crate) fn is_conditional_tag(inner: &str) -> bool {
    inner == "/if" || inner.strip_prefix("if:").is_some_and(is_word)
}

/// `{name|modifier}` where `modifier` is a recognized modifier name.
pub(crate) fn is_modifier_expression(name: &str, modifier: &str) -> bool {
    is_identifier(name) && Modifier::from_name(modifier).is_some()
}

/// Count the outputs spintax can produce.
///
/// Multiplies the alternative counts of every group that has no nested
/// group. Nested groups are not expanded combinatorially, so
/// `{a|{b|c}}` counts as 2. The product saturates at `u64::MAX`.
///
/// # Example
///
/// ```
/// use varia::count_possible_variations;
///
/// assert_eq!(count_possible_variations("{a|b|c} and {d|e}"), 6);
/// assert_eq!(count_possible_variations("plain text"), 1);
/// ```
pub fn count_possible_variations(text: &str) -> u64 {
    count_template(&parse_template(text))
}

fn count_template(template: &Template) -> u64 {
    template
        .groups()
        .map(count_group)
        .fold(1, u64::saturating_mul)
}

fn count_group(group: &Group) -> u64 {
    if group.is_leaf() {
        return u64::try_from(group.alternatives.len()).unwrap_or(u64::MAX);
    }
    group
        .alternatives
        .iter()
        .map(count_template)
        .fold(1, u64::saturating_mul)
}
