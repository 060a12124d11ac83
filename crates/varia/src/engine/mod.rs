//! The substitution engine.
//!
//! Four passes run over the same string in fixed order: spintax, variables,
//! conditionals, modifiers. Each pass is also usable on its own.

mod chooser;
mod conditionals;
mod lint;
mod modifiers;
mod pipeline;
mod spintax;
mod variables;

pub use chooser::{Chooser, RandomChooser, ScriptedChooser, choose};
pub use conditionals::{is_truthy, process_conditionals};
pub use lint::{LintWarning, compute_suggestions, lint_template};
pub use modifiers::{Modifier, apply_modifier, process_modifiers};
pub use pipeline::{Engine, pick_replacements, spin_variations};
pub use spintax::{count_possible_variations, resolve_spintax};
pub use variables::{extract_variables, placeholder, substitute_variables};
