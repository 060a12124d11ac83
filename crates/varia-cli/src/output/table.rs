//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use varia::Variation;

/// Format generated variations as a table, one row per variation.
pub fn format_variations_table(variations: &[Variation]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Content", "Replacements"]);

    for (index, variation) in variations.iter().enumerate() {
        let replacements = variation
            .replacements
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            (index + 1).to_string(),
            variation.content.clone(),
            replacements,
        ]);
    }

    table
}
