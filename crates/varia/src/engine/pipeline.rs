//! The content pipeline: spintax, variables, conditionals, modifiers.

use bon::Builder;
use tracing::debug;

use super::chooser::{Chooser, choose};
use super::conditionals::process_conditionals;
use super::modifiers::process_modifiers;
use super::spintax::resolve_spintax;
use super::variables::substitute_variables;
use crate::types::{NamedValuePool, Replacements, VariableSets, VariableValues, Variation};

/// Runs templates through the four substitution passes in fixed order.
///
/// The engine owns its named value pool, which stays read-only while
/// processing. Randomness comes from the chooser passed to each call.
///
/// # Example
///
/// ```
/// use varia::{Engine, RandomChooser, replacements};
///
/// let engine = Engine::new();
/// let values = replacements! { "service" => "painting", "location" => "Brisbane" };
/// let text = engine.process(
///     "{service|capitalize} in {location}",
///     &values,
///     &mut RandomChooser::seeded(7),
/// );
/// assert_eq!(text, "Painting in Brisbane");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Engine {
    /// Values for placeholders the replacement map does not cover.
    #[builder(default)]
    pool: NamedValuePool,

    /// Whether the spintax pass runs.
    #[builder(default = true)]
    spintax: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    /// An engine with an empty pool and spintax enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the given pool and spintax enabled.
    pub fn with_pool(pool: NamedValuePool) -> Self {
        Engine::builder().pool(pool).build()
    }

    pub fn pool(&self) -> &NamedValuePool {
        &self.pool
    }

    pub fn spintax_enabled(&self) -> bool {
        self.spintax
    }

    /// Returns true if `{name}` will be filled by `replacements` or the pool.
    pub fn is_known(&self, name: &str, replacements: &Replacements) -> bool {
        replacements.contains_key(name) || self.pool.is_known(name)
    }

    /// Process one template with one replacement map.
    pub fn process(
        &self,
        template: &str,
        replacements: &Replacements,
        chooser: &mut dyn Chooser,
    ) -> String {
        let spun = if self.spintax {
            resolve_spintax(
                template,
                &|name: &str| self.is_known(name, replacements),
                chooser,
            )
        } else {
            template.to_string()
        };
        let substituted = substitute_variables(&spun, replacements, &self.pool, chooser);
        let conditioned = process_conditionals(&substituted, replacements);
        process_modifiers(&conditioned, replacements)
    }

    /// Generate `count` variations of `template`.
    ///
    /// Each variation draws a fresh replacement map from `variable_sets`
    /// and runs the full pipeline. Duplicate outputs are kept.
    pub fn generate_variations(
        &self,
        template: &str,
        variable_sets: &VariableSets,
        count: usize,
        chooser: &mut dyn Chooser,
    ) -> Vec<Variation> {
        let variations: Vec<Variation> = (0..count)
            .map(|_| {
                let replacements = pick_replacements(variable_sets, chooser);
                let content = self.process(template, &replacements, chooser);
                Variation {
                    content,
                    replacements,
                }
            })
            .collect();
        debug!(count = variations.len(), "generated variations");
        variations
    }
}

/// Build one replacement map from variable sets.
///
/// Lists contribute one random element; scalars are used as-is. Empty
/// lists contribute nothing.
pub fn pick_replacements(variable_sets: &VariableSets, chooser: &mut dyn Chooser) -> Replacements {
    let mut replacements = Replacements::new();
    for (name, values) in variable_sets {
        let value = match values {
            VariableValues::One(value) => Some(value),
            VariableValues::Many(values) => choose(chooser, values),
        };
        if let Some(value) = value {
            replacements.insert(name.clone(), value.clone());
        }
    }
    replacements
}

/// Spintax-only variations with duplicates removed.
///
/// Runs the spintax pass `count` times and keeps the first occurrence of
/// each distinct output, in order.
///
/// # Example
///
/// ```
/// use varia::{RandomChooser, spin_variations};
///
/// let outputs = spin_variations("{a|b}", 10, &mut RandomChooser::seeded(1));
/// assert!(outputs.len() <= 2);
/// assert!(outputs.iter().all(|o| o == "a" || o == "b"));
/// ```
pub fn spin_variations(text: &str, count: usize, chooser: &mut dyn Chooser) -> Vec<String> {
    let mut outputs: Vec<String> = Vec::new();
    for _ in 0..count {
        let output = resolve_spintax(text, &|_: &str| false, chooser);
        if !outputs.contains(&output) {
            outputs.push(output);
        }
    }
    outputs
}
