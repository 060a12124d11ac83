//! Static lint rules for templates.
//!
//! These catch templates that are valid but will not do what their author
//! most likely meant. Validation errors are reported by [`crate::validate`].

use strsim::levenshtein;
use thiserror::Error;

use super::modifiers::Modifier;
use super::spintax::is_conditional_tag;
use crate::parser::{Group, Segment, Template, is_identifier, is_word, parse_template};

/// A warning produced by [`lint_template`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintWarning {
    /// `{name|word}` where `word` is close to, but not, a modifier name. The
    /// group is spun as two spintax options instead.
    #[error(
        "'{{{name}|{modifier}}}' is not a known modifier and will be treated as spintax{}",
        suggestion_suffix(suggestions)
    )]
    UnknownModifier {
        name: String,
        modifier: String,
        suggestions: Vec<String>,
    },

    /// `{if:name}` without a following `{/if}`; the tag is left in the output.
    #[error("'{{if:{name}}}' has no matching '{{/if}}'")]
    UnclosedConditional { name: String },

    /// `{/if}` with no open conditional.
    #[error("'{{/if}}' without an opening '{{if:...}}'")]
    StrayConditionalClose,
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean '{}'?)", suggestions.join("', '"))
    }
}

/// Run all lint rules over a template.
pub fn lint_template(text: &str) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    lint_modifiers(&parse_template(text), &mut warnings);
    lint_conditionals(text, &mut warnings);
    warnings
}

fn lint_modifiers(template: &Template, warnings: &mut Vec<LintWarning>) {
    for segment in &template.segments {
        if let Segment::Group(group) = segment {
            lint_group(group, warnings);
        }
    }
}

fn lint_group(group: &Group, warnings: &mut Vec<LintWarning>) {
    let literals: Option<Vec<&str>> = group.alternatives.iter().map(Template::as_literal).collect();
    if let Some([name, modifier]) = literals.as_deref()
        && is_identifier(name)
        && is_word(modifier)
        && Modifier::from_name(modifier).is_none()
    {
        let suggestions = compute_suggestions(modifier, &Modifier::NAMES);
        if !suggestions.is_empty() {
            warnings.push(LintWarning::UnknownModifier {
                name: (*name).to_string(),
                modifier: (*modifier).to_string(),
                suggestions,
            });
        }
    }
    for alternative in &group.alternatives {
        lint_modifiers(alternative, warnings);
    }
}

fn lint_conditionals(text: &str, warnings: &mut Vec<LintWarning>) {
    let mut open: Option<String> = None;
    for group in parse_template(text).groups() {
        let Some(inner) = group.alternatives.first().and_then(Template::as_literal) else {
            continue;
        };
        if group.alternatives.len() != 1 || !is_conditional_tag(inner) {
            continue;
        }
        match inner.strip_prefix("if:") {
            Some(name) => {
                if let Some(previous) = open.replace(name.to_string()) {
                    warnings.push(LintWarning::UnclosedConditional { name: previous });
                }
            }
            None => {
                if open.take().is_none() {
                    warnings.push(LintWarning::StrayConditionalClose);
                }
            }
        }
    }
    if let Some(name) = open {
        warnings.push(LintWarning::UnclosedConditional { name });
    }
}

/// Names from `available` within edit distance of `key`, closest first.
///
/// Allows distance 1 for keys of up to three characters and 2 otherwise,
/// and returns at most three names.
pub fn compute_suggestions<S: AsRef<str>>(key: &str, available: &[S]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = available
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .map(|candidate| (levenshtein(key, candidate), candidate))
        .filter(|&(distance, _)| distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
