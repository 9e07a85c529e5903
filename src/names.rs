// =============================================================================
// names.rs - BUSINESS NAME SCRUBBING
// =============================================================================
//
// Two different jobs that look alike:
//
// * `clean_name` makes a name presentable. Quotes go, whitespace behaves,
//   and "ACME TRUCKING" keeps shouting while "acme trucking" gets title case.
//
// * `normalize_for_matching` makes a comparison key for whatever fuzzy
//   matcher runs downstream. Nobody should ever display its output.
// =============================================================================

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Business-entity suffixes dropped from matching keys. At most one is
/// stripped, the first in this order that the key ends with.
pub const ENTITY_SUFFIXES: &[&str] = &[" llc", " inc", " corp", " ltd", " co"];

/// Anything that is neither a word character nor whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Clean a business name for display.
///
/// Returns `None` when there is no text to clean. Otherwise strips single
/// and double quotes, collapses whitespace runs to one space, trims, and
/// title-cases the result unless it is already entirely upper case.
pub fn clean_name(name: Option<&str>) -> Option<String> {
    let name = name?;

    let unquoted: Cow<'_, str> = if memchr::memchr2(b'"', b'\'', name.as_bytes()).is_some() {
        Cow::Owned(name.replace(['"', '\''], ""))
    } else {
        Cow::Borrowed(name)
    };

    let collapsed = collapse_whitespace(&unquoted);

    if is_all_uppercase(&collapsed) {
        Some(collapsed)
    } else {
        Some(title_case(&collapsed))
    }
}

/// Build a lowercase, punctuation-free, suffix-free comparison key.
///
/// Punctuation is replaced before the suffix check, so trailing punctuation
/// cannot shield a suffix: "Acme Logistics, LLC." becomes "acme logistics".
pub fn normalize_for_matching(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return String::new();
    };

    let lowered = name.to_lowercase();
    let spaced = NON_WORD.replace_all(lowered.trim(), " ");
    let key = collapse_whitespace(&spaced);

    let stripped = ENTITY_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .unwrap_or(key.as_str());

    stripped.trim().to_string()
}

/// Collapse every whitespace run to a single space and trim both ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// At least one cased character and no lower-case ones.
fn is_all_uppercase(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Upper-case every letter that starts a run of letters and digits,
/// lower-case the rest. "1st-choice freight" becomes "1st-Choice Freight".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_strips_quotes_and_whitespace() {
        assert_eq!(clean_name(Some("  Discount   Towing  ")).as_deref(), Some("Discount Towing"));
        assert_eq!(clean_name(Some("\"Big Rig\"  'Repair'")).as_deref(), Some("Big Rig Repair"));
        assert_eq!(clean_name(Some("joe's\tdiesel\nservice")).as_deref(), Some("Joes Diesel Service"));
    }

    #[test]
    fn test_clean_name_keeps_all_caps() {
        assert_eq!(clean_name(Some("ABC TRUCKING LLC")).as_deref(), Some("ABC TRUCKING LLC"));
        assert_eq!(clean_name(Some("  A&B  FREIGHT 24/7 ")).as_deref(), Some("A&B FREIGHT 24/7"));
    }

    #[test]
    fn test_clean_name_title_cases_mixed_case() {
        assert_eq!(clean_name(Some("ABC Trucking LLC")).as_deref(), Some("Abc Trucking Llc"));
        assert_eq!(clean_name(Some("smith freight co")).as_deref(), Some("Smith Freight Co"));
        assert_eq!(
            clean_name(Some("1st-choice freight")).as_deref(),
            Some("1st-Choice Freight")
        );
    }

    #[test]
    fn test_title_case_words_start_after_non_alphanumerics() {
        assert_eq!(clean_name(Some("a-b hauling")).as_deref(), Some("A-B Hauling"));
        assert_eq!(clean_name(Some("route 66 towing 1st")).as_deref(), Some("Route 66 Towing 1st"));
        assert_eq!(clean_name(Some("o'neil freight")).as_deref(), Some("Oneil Freight"));
    }

    #[test]
    fn test_clean_name_absent_and_empty() {
        assert_eq!(clean_name(None), None);
        assert_eq!(clean_name(Some("")).as_deref(), Some(""));
        assert_eq!(clean_name(Some(" '' ")).as_deref(), Some(""));
    }

    #[test]
    fn test_clean_name_is_idempotent() {
        for raw in [
            "  Discount   Towing  ",
            "ABC Trucking LLC",
            "\"o'reilly\" hauling",
            "a b",
            "mcdonald-smith  EXCAVATION",
            "1st-choice freight",
        ] {
            let once = clean_name(Some(raw));
            let twice = clean_name(once.as_deref());
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn test_normalize_strips_suffix_after_punctuation() {
        assert_eq!(normalize_for_matching(Some("Acme Logistics, LLC.")), "acme logistics");
        assert_eq!(normalize_for_matching(Some("Smith Freight Co")), "smith freight");
        assert_eq!(normalize_for_matching(Some("  Northern Hauling Ltd ")), "northern hauling");
        assert_eq!(normalize_for_matching(Some("Big Rig Corp.")), "big rig");
    }

    #[test]
    fn test_normalize_strips_only_one_suffix() {
        assert_eq!(normalize_for_matching(Some("Widget Inc Co")), "widget inc");
        assert_eq!(normalize_for_matching(Some("Widget Co LLC")), "widget co");
    }

    #[test]
    fn test_normalize_leaves_suffix_lookalikes() {
        // no leading space, so not a suffix
        assert_eq!(normalize_for_matching(Some("Disco")), "disco");
        assert_eq!(normalize_for_matching(Some("LLC")), "llc");
    }

    #[test]
    fn test_normalize_replaces_punctuation_and_collapses() {
        assert_eq!(
            normalize_for_matching(Some("J.B. Hunt -- Transport/Services")),
            "j b hunt transport services"
        );
    }

    #[test]
    fn test_normalize_absent_or_empty() {
        assert_eq!(normalize_for_matching(None), "");
        assert_eq!(normalize_for_matching(Some("")), "");
        assert_eq!(normalize_for_matching(Some("  ,.  ")), "");
    }
}
