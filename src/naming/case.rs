//! Case conversion.

use once_cell::sync::Lazy;
use regex::Regex;

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("static regex"));
static DOUBLE_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([A-Z])").expect("static regex"));
static LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// `getHTTPResponse` → `get_http_response`, `DoIt` → `do_it`.
///
/// Already snake_case names come back unchanged.
pub fn to_snake_case(name: &str) -> String {
    let s = CAPITALIZED_WORD.replace_all(name, "${1}_${2}");
    let s = DOUBLE_UNDERSCORE.replace_all(&s, "_${1}");
    let s = LOWER_UPPER.replace_all(&s, "${1}_${2}");
    s.to_lowercase()
}

/// Unicode-aware host identifier check (`XID_Start XID_Continue*`, or a leading `_`).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}
