//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Bundle tag (e.g., "de", "de-CH").
    pub locale: String,
    /// Number of root keys the locale translates.
    pub translated: usize,
    /// Root keys the locale lacks.
    pub missing: Vec<String>,
    /// Keys the locale defines that the root does not.
    pub unknown: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(root_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Missing", "Unknown"]);

    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.translated, root_count),
            locale.missing.len().to_string(),
            locale.unknown.len().to_string(),
        ]);
    }

    table
}
