//! Label normalization shared by both policies.
//!
//! Two different normalizations exist and they are NOT interchangeable:
//!
//! - [`exact_label`] is used by the item policy. It only uppercases and trims,
//!   so `"TOP SECRET"` and `"TOP-SECRET"` stay distinct.
//! - [`compact_label`] is used by the tier hierarchy. It lowercases and strips
//!   separators so `"Top_Secret"`, `"top secret"` and `"TOP-SECRET"` collapse
//!   to `"topsecret"`.

/// Uppercase and trim a label for exact matching.
///
/// Internal whitespace and punctuation are left untouched.
pub fn exact_label(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Lowercase a label and remove underscores, hyphens and whitespace.
pub fn compact_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split a comma-separated level field into trimmed tokens.
///
/// Casing is preserved. Splitting never fails: an empty field yields a
/// single empty token, exactly like splitting an empty string.
pub fn split_levels(field: &str) -> Vec<String> {
    field.split(',').map(|token| token.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_label_keeps_internal_spacing() {
        assert_eq!(exact_label("  top secret "), "TOP SECRET");
        assert_eq!(exact_label("TOP  SECRET"), "TOP  SECRET");
        assert_ne!(exact_label("TOP-SECRET"), exact_label("TOP SECRET"));
    }

    #[test]
    fn test_compact_label_strips_separators() {
        assert_eq!(compact_label("Top_Secret"), "topsecret");
        assert_eq!(compact_label(" top - secret\t"), "topsecret");
        assert_eq!(compact_label(""), "");
    }

    #[test]
    fn test_compact_label_idempotent() {
        let once = compact_label("TOP__SECRET-ish");
        assert_eq!(compact_label(&once), once);
    }

    #[test]
    fn test_split_levels() {
        assert_eq!(
            split_levels("SECRET, Unclassified ,REL TO"),
            vec!["SECRET", "Unclassified", "REL TO"]
        );
        assert_eq!(split_levels(""), vec![""]);
        assert_eq!(split_levels("A,,B"), vec!["A", "", "B"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_exact_label_idempotent(raw in "[ -~]{0,32}") {
                let once = exact_label(&raw);
                prop_assert_eq!(exact_label(&once), once);
            }

            #[test]
            fn test_compact_label_has_no_separators(raw in ".{0,32}") {
                let compact = compact_label(&raw);
                prop_assert!(!compact.contains(|c: char| c == '_' || c == '-' || c.is_whitespace()));
            }

            #[test]
            fn test_split_levels_token_count(field in "[A-Z ,]{0,32}") {
                let commas = field.matches(',').count();
                prop_assert_eq!(split_levels(&field).len(), commas + 1);
            }
        }
    }
}
