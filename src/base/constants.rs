//! Domain constants shared by the configuration, naming and adapter layers.

/// Python keywords and soft keywords that cannot be used as identifiers.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Buffer element types a numeric buffer adaptation may accept.
pub const AUTHORIZED_BUFFER_TYPES: &[&str] = &[
    "uint8_t",
    "int8_t",
    "uint16_t",
    "int16_t",
    "uint32_t",
    "int32_t",
    "np_uint_l",
    "np_int_l",
    "float",
    "double",
    "long double",
    "long long",
];

/// Default template parameter names treated as numeric buffer element types.
pub const DEFAULT_BUFFER_TEMPLATE_TYPES: &[&str] = &["T", "NumericType"];

/// Words that mark a parameter as an element count when they appear in its name.
pub const DEFAULT_SIZE_NAME_WORDS: &[&str] = &["nb", "size", "count", "total", "n"];

/// Native scalar types whose Python counterpart is immutable.
///
/// A mutable pointer or reference to one of these cannot be observed from
/// Python without boxing or promotion to a return value.
pub const PYTHON_IMMUTABLE_NATIVE_TYPES: &[&str] = &[
    "bool",
    "int",
    "unsigned int",
    "short",
    "unsigned short",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "float",
    "double",
    "long double",
    "int8_t",
    "uint8_t",
    "int16_t",
    "uint16_t",
    "int32_t",
    "uint32_t",
    "int64_t",
    "uint64_t",
    "size_t",
    "std::string",
];

/// Native integral spellings accepted for element-count parameters.
pub const INTEGRAL_NATIVE_TYPES: &[&str] = &[
    "int",
    "unsigned int",
    "unsigned",
    "short",
    "unsigned short",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "int8_t",
    "uint8_t",
    "int16_t",
    "uint16_t",
    "int32_t",
    "uint32_t",
    "int64_t",
    "uint64_t",
    "size_t",
    "std::size_t",
    "ssize_t",
];

/// Native numeric spellings (used to tell numeric buffers from object arrays).
pub const NUMERIC_NATIVE_TYPES: &[&str] = &[
    "bool",
    "char",
    "signed char",
    "unsigned char",
    "int",
    "unsigned int",
    "unsigned",
    "short",
    "unsigned short",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "float",
    "double",
    "long double",
    "int8_t",
    "uint8_t",
    "int16_t",
    "uint16_t",
    "int32_t",
    "uint32_t",
    "int64_t",
    "uint64_t",
    "size_t",
    "np_int_l",
    "np_uint_l",
];

/// Map a buffer element type to its numpy dtype character and concrete native spelling.
///
/// `np_int_l` / `np_uint_l` name the platform `long` types.
pub fn numpy_dtype(element: &str) -> Option<(char, &'static str)> {
    let r = match element {
        "uint8_t" => ('B', "uint8_t"),
        "int8_t" => ('b', "int8_t"),
        "uint16_t" => ('H', "uint16_t"),
        "int16_t" => ('h', "int16_t"),
        "uint32_t" => ('I', "uint32_t"),
        "int32_t" => ('i', "int32_t"),
        "np_uint_l" => ('L', "unsigned long"),
        "np_int_l" => ('l', "long"),
        "float" => ('f', "float"),
        "double" => ('d', "double"),
        "long double" => ('g', "long double"),
        "long long" => ('q', "long long"),
        _ => return None,
    };
    Some(r)
}

pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_authorized_buffer_type_has_a_dtype() {
        for ty in AUTHORIZED_BUFFER_TYPES {
            assert!(numpy_dtype(ty).is_some(), "missing dtype for {}", ty);
        }
    }

    #[test]
    fn test_keywords() {
        assert!(is_python_keyword("lambda"));
        assert!(!is_python_keyword("value"));
    }
}
