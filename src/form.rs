use serde_json::Value;
use tracing::debug;

use crate::error::Role;
use crate::record::UNKNOWN_RESULT;

const FORM_SEPARATORS: &[char] = &['-', ',', '|', '/', ' '];
const LAST_MATCH_SOURCES: &[&str] = &["team_last_matches", "team_form"];

/// Upper-cases, drops separators, maps anything but W/D/L to `?`, then pads or truncates.
pub fn normalize_form(raw: &str, form_length: usize) -> String {
    let mut out: String = raw
        .chars()
        .filter(|c| !FORM_SEPARATORS.contains(c))
        .map(|c| match c.to_ascii_uppercase() {
            c @ ('W' | 'D' | 'L') => c,
            _ => UNKNOWN_RESULT,
        })
        .take(form_length)
        .collect();
    while out.chars().count() < form_length {
        out.push(UNKNOWN_RESULT);
    }
    out
}

/// Builds a form string from `team_last_matches.<role>` or `team_form.<role>` lists.
pub fn form_from_last_matches(root: &Value, role: Role, form_length: usize) -> Option<String> {
    for source in LAST_MATCH_SOURCES {
        let Some(matches) = root
            .get(*source)
            .and_then(|v| v.get(role.label()))
            .and_then(|v| v.as_array())
        else {
            continue;
        };
        let results: String = matches
            .iter()
            .take(form_length)
            .filter_map(|m| m.get("result").and_then(|r| r.as_str()))
            .filter_map(|r| r.trim().chars().next())
            .collect();
        if !results.is_empty() {
            debug!(source = *source, %role, form = %results, "form built from match list");
            return Some(results);
        }
    }
    None
}
