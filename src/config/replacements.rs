//! Ordered regex replacement tables for host type and value spellings.

use regex::Regex;

use super::options::ReplacementSpec;
use crate::error::ConfigError;

/// Native → host type spellings, applied after template arguments have
/// already been translated (so every `<...>` holds at most one level).
const STANDARD_TYPE_REPLACEMENTS: &[(&str, &str)] = &[
    (r"\bunsigned\s+long\s+long\b", "int"),
    (r"\bunsigned\s+(int|short|long|char)\b", "int"),
    (r"\bunsigned\b", "int"),
    (r"\blong\s+double\b", "float"),
    (r"\blong\s+long\b", "int"),
    (r"\bu?int(8|16|32|64)_t\b", "int"),
    (r"\b(std::)?s?size_t\b", "int"),
    (r"\blong\b", "int"),
    (r"\bshort\b", "int"),
    (r"\bdouble\b", "float"),
    (r"\bconst\s+char\s*\*", "str"),
    (r"\bstd::string\b", "str"),
    (r"\bstd::(unique|shared)_ptr<(.*)>", "${2}"),
    (r"\bstd::vector<(.*)>", "List[${1}]"),
    (r"\bstd::array<(.*),\s*([^,]*)>", "List[${1}]"),
    (r"\bstd::(tuple|pair)<(.*)>", "Tuple[${2}]"),
    (r"\bstd::variant<(.*)>", "Union[${1}]"),
    (r"\bstd::optional<(.*)>", "Optional[${1}]"),
    (r"\bstd::(unordered_)?map<(.*?),\s*(.*)>", "Dict[${2}, ${3}]"),
    (r"\bvoid\s*\*", "Any"),
    (r"\bvoid\b", "None"),
    (r"\bpy::array\b", "np.ndarray"),
    (r"\bconst\b", ""),
    (r"\bmutable\b", ""),
    (r"&", ""),
    (r"\*", ""),
    (r"::", "."),
];

/// Native → host default value spellings.
const STANDARD_VALUE_REPLACEMENTS: &[(&str, &str)] = &[
    (r"\btrue\b", "True"),
    (r"\bfalse\b", "False"),
    (r"\bvoid\s*\*", "Any"),
    (r"\bvoid\b", "None"),
    (r"\bNULL\b", "None"),
    (r"\bnullptr\b", "None"),
    (r"\bstd::nullopt\b", "None"),
    (r"\bstd::string\(\)", "\"\""),
    (r"\b(FLT|DBL|LDBL)_MIN\b", "sys.float_info.min"),
    (r"\b(FLT|DBL|LDBL)_MAX\b", "sys.float_info.max"),
    (r"\b([0-9]+\.[0-9]*|[0-9]+\.?[0-9]*[eE][+-]?[0-9]+)[fFdD]\b", "${1}"),
    (r"(^|[^0-9A-Za-z_.])(\.[0-9]+)[fFdD]\b", "${1}${2}"),
    (r"::", "."),
];

#[derive(Debug, Clone)]
struct Replacement {
    regex: Regex,
    by: String,
}

/// Regex replacements applied one after the other, in order.
#[derive(Debug, Clone, Default)]
pub struct ReplacementList {
    items: Vec<Replacement>,
}

impl ReplacementList {
    pub fn compile(option: &str, specs: &[ReplacementSpec]) -> Result<Self, ConfigError> {
        let pairs: Vec<(&str, &str)> = specs
            .iter()
            .map(|s| (s.pattern.as_str(), s.replacement.as_str()))
            .collect();
        Self::compile_pairs(option, &pairs)
    }

    fn compile_pairs(option: &str, pairs: &[(&str, &str)]) -> Result<Self, ConfigError> {
        let items = pairs
            .iter()
            .map(|(pattern, by)| {
                Regex::new(pattern)
                    .map(|regex| Replacement {
                        regex,
                        by: by.to_string(),
                    })
                    .map_err(|e| ConfigError::invalid_regex(option, pattern, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    /// User entries first, then the standard type table.
    pub fn types(user: &[ReplacementSpec]) -> Result<Self, ConfigError> {
        let mut list = Self::compile("type_replacements", user)?;
        list.items
            .extend(Self::compile_pairs("standard type table", STANDARD_TYPE_REPLACEMENTS)?.items);
        Ok(list)
    }

    /// User entries first, then the standard value table.
    pub fn values(user: &[ReplacementSpec]) -> Result<Self, ConfigError> {
        let mut list = Self::compile("value_replacements", user)?;
        list.items
            .extend(Self::compile_pairs("standard value table", STANDARD_VALUE_REPLACEMENTS)?.items);
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut r = text.to_string();
        for item in &self.items {
            if item.regex.is_match(&r) {
                r = item.regex.replace_all(&r, item.by.as_str()).into_owned();
            }
        }
        tidy(&r)
    }
}

/// Collapse the whitespace left behind by removed qualifiers.
fn tidy(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace(" ,", ",")
        .replace(",]", "]")
}
