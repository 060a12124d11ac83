//! Variable placeholders: `{name}`.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::chooser::{Chooser, choose};
use super::modifiers::split_word;
use crate::parser::is_identifier;
use crate::types::{NamedValuePool, PoolEntry, Replacements, ServiceForms};

/// Substitute `{name}` placeholders from the replacement map, then from the
/// pool.
///
/// Every replacement key is applied first. Pool entries whose name is also a
/// replacement key are skipped. A list entry picks one value at random and
/// fills every occurrence with it; a services entry `N` fills `{N}` and
/// `{N_plural}` only when the replacement `N_key` names a known service.
/// Placeholders with no value are left as they are.
///
/// # Example
///
/// ```
/// use varia::{NamedValuePool, ScriptedChooser, replacements, substitute_variables};
///
/// let pool = NamedValuePool::new().with_list("city", ["Perth", "Hobart"]);
/// let mut chooser = ScriptedChooser::new([1]);
/// let text = substitute_variables(
///     "{greeting} from {city}, {city}! {unknown}",
///     &replacements! { "greeting" => "Hello" },
///     &pool,
///     &mut chooser,
/// );
/// assert_eq!(text, "Hello from Hobart, Hobart! {unknown}");
/// ```
pub fn substitute_variables(
    text: &str,
    replacements: &Replacements,
    pool: &NamedValuePool,
    chooser: &mut dyn Chooser,
) -> String {
    let mut output = text.to_string();

    for (key, value) in replacements {
        output = output.replace(&placeholder(key), value);
    }

    for (name, entry) in pool {
        if replacements.contains_key(name) {
            trace!(name = name.as_str(), "pool entry overridden by replacement");
            continue;
        }
        output = match entry {
            PoolEntry::List(values) => substitute_list(output, name, values, chooser),
            PoolEntry::Services(services) => {
                match selected_service(name, services, replacements) {
                    Some(forms) => substitute_service(output, name, forms),
                    None => output,
                }
            }
        };
    }

    output
}

/// Format a placeholder for `name`.
pub fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

fn substitute_list(
    output: String,
    name: &str,
    values: &[String],
    chooser: &mut dyn Chooser,
) -> String {
    let target = placeholder(name);
    if !output.contains(&target) {
        return output;
    }
    match choose(chooser, values) {
        Some(value) => {
            trace!(name, value = value.as_str(), "filled from pool");
            output.replace(&target, value)
        }
        None => {
            debug!(name, "pool entry has no values");
            output
        }
    }
}

fn substitute_service(output: String, name: &str, forms: &ServiceForms) -> String {
    output
        .replace(&placeholder(name), &forms.singular)
        .replace(&placeholder(&format!("{name}_plural")), &forms.plural)
}

/// The service chosen by the `N_key` replacement, if it exists.
fn selected_service<'a>(
    name: &str,
    services: &'a BTreeMap<String, ServiceForms>,
    replacements: &Replacements,
) -> Option<&'a ServiceForms> {
    let key = replacements.get(&format!("{name}_key"));
    let forms = key.and_then(|key| services.get(key));
    if forms.is_none() {
        debug!(name, key = ?key, "no service selected");
    }
    forms
}

/// List the distinct `{identifier}` placeholders in `text`, in first-seen
/// order.
///
/// Spintax groups, modifier expressions and conditional tags are not
/// placeholders and are skipped.
///
/// # Example
///
/// ```
/// use varia::extract_variables;
///
/// let names = extract_variables("{service} in {location}, {a|b} {service|upper} {service}");
/// assert_eq!(names, vec!["service", "location"]);
/// ```
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        rest = &rest[start + 1..];
        let Some((word, after)) = split_word(rest) else {
            continue;
        };
        if after.starts_with('}') && is_identifier(word) && !names.iter().any(|n| n == word) {
            names.push(word.to_string());
        }
    }
    names
}
