//! Cell-level hardening for CSV exports.

fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@'))
}

/// Prefixes cells that a spreadsheet would interpret as formulas with an
/// apostrophe. Quoting and escaping are left to the CSV writer.
pub fn guard_formula(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}
