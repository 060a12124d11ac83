pub mod blocks;
pub mod engine;
pub mod parser;
pub mod seo;
pub mod types;

pub use blocks::{Block, BlockStats, BlockVariation};
pub use engine::{
    Chooser, Engine, LintWarning, Modifier, RandomChooser, ScriptedChooser, compute_suggestions,
    count_possible_variations, extract_variables, lint_template, process_conditionals,
    process_modifiers, resolve_spintax, spin_variations, substitute_variables,
};
pub use parser::{ValidationError, ValidationReport, validate};
pub use seo::{SeoAnalysis, SeoFields, SeoIssue, SeoVariation};
pub use types::{
    NamedValuePool, PoolEntry, PoolError, Replacements, ServiceForms, VariableRow, VariableSets,
    VariableType, VariableValues, Variation,
};

/// Creates a [`Replacements`] map from key-value pairs.
///
/// # Example
///
/// ```
/// use varia::replacements;
///
/// let r = replacements! { "service" => "painting", "location" => "Brisbane" };
/// assert_eq!(r.len(), 2);
/// assert_eq!(r["service"], "painting");
/// ```
#[macro_export]
macro_rules! replacements {
    {} => {
        $crate::Replacements::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Replacements::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}

/// Creates a [`VariableSets`] map. Values convert via `Into<VariableValues>`,
/// so a string is used as-is and an array or `Vec` is picked from.
///
/// # Example
///
/// ```
/// use varia::{VariableValues, variable_sets};
///
/// let sets = variable_sets! { "location" => ["Perth", "Darwin"], "brand" => "Acme" };
/// assert_eq!(sets["brand"], VariableValues::One("Acme".to_string()));
/// ```
#[macro_export]
macro_rules! variable_sets {
    {} => {
        $crate::VariableSets::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::VariableSets::new();
            $(
                map.insert(
                    $key.to_string(),
                    ::std::convert::Into::<$crate::VariableValues>::into($value),
                );
            )+
            map
        }
    };
}
