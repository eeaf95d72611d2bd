//! Internal helpers for input validation and name matching.
//!
//! These utilities are **not** part of the public API. They centralize
//! normalization so every lookup by name compares the same way.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Collapse inner whitespace and trim; `None` when nothing is left.
pub(crate) fn normalize_display(input: &str) -> Option<String> {
    let out = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if out.is_empty() { None } else { Some(out) }
}

/// Matching key for taxonomy names: accents stripped, lowercase, punctuation
/// folded into single spaces. `"Aporte  Eduardo-Paim"` and
/// `"APORTE EDUARDO PAIM"` share a key.
pub(crate) fn name_key(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    normalize_display(value)
        .ok_or_else(|| EngineError::InvalidName(format!("{label} name must not be empty")))
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_key_ignores_accents_case_and_punctuation() {
        assert_eq!(name_key("APORTE EDUARDO PAIM"), "aporte eduardo paim");
        assert_eq!(name_key("  Aporte   Eduardo-Paim "), "aporte eduardo paim");
        assert_eq!(name_key("MÃO DE OBRA"), name_key("mao de obra"));
        assert_eq!(name_key("---"), "");
    }

    #[test]
    fn display_collapses_whitespace() {
        assert_eq!(normalize_display("  Soja   Safra "), Some("Soja Safra".to_string()));
        assert_eq!(normalize_display("   "), None);
    }

    #[test]
    fn required_name_rejects_blank() {
        assert!(normalize_required_name(" ", "centro").is_err());
        assert_eq!(normalize_required_name(" Geral ", "centro").unwrap(), "Geral");
    }
}
