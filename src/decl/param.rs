//! Function parameters.

use std::fmt;

use smol_str::SmolStr;

use super::types::CppType;

/// C-style array dimension attached to a parameter or field (`int v[3]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum CArray {
    /// `v[3]`
    Fixed(usize),
    /// `v[N]`, resolved through the constants table
    Symbolic(SmolStr),
    /// `v[]`
    Unsized,
}

impl fmt::Display for CArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CArray::Fixed(n) => write!(f, "[{}]", n),
            CArray::Symbolic(name) => write!(f, "[{}]", name),
            CArray::Unsized => f.write_str("[]"),
        }
    }
}

/// How a parameter is represented once its function has been adapted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum AdaptationTag {
    #[default]
    None,
    BoxedReference,
    Buffer,
    FixedArray,
    CStringList,
    Variadic,
    Excluded,
}

impl AdaptationTag {
    pub fn display(&self) -> &'static str {
        match self {
            AdaptationTag::None => "none",
            AdaptationTag::BoxedReference => "boxed-reference",
            AdaptationTag::Buffer => "buffer",
            AdaptationTag::FixedArray => "fixed-array",
            AdaptationTag::CStringList => "c-string-list",
            AdaptationTag::Variadic => "variadic",
            AdaptationTag::Excluded => "excluded",
        }
    }
}

/// A parameter descriptor as handed over by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct Parameter {
    pub name: SmolStr,
    pub ty: CppType,
    pub c_array: Option<CArray>,
    /// Native default value expression, verbatim
    pub default_value: Option<String>,
    /// The `...` of a variadic function
    pub is_variadic: bool,
    pub tag: AdaptationTag,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, ty: &str) -> Self {
        Self {
            name: name.into(),
            ty: CppType::parse(ty),
            ..Default::default()
        }
    }

    pub fn variadic() -> Self {
        Self {
            is_variadic: true,
            ..Default::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_array(mut self, array: CArray) -> Self {
        self.c_array = Some(array);
        self
    }

    pub fn with_tag(mut self, tag: AdaptationTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Native declaration text: `const int v[3]`, `int x = 5`, `...`.
    pub fn decl_code(&self) -> String {
        if self.is_variadic {
            return "...".to_string();
        }
        let mut s = self.ty.str_code();
        if !self.name.is_empty() {
            s.push(' ');
            s.push_str(&self.name);
        }
        if let Some(array) = &self.c_array {
            s.push_str(&array.to_string());
        }
        if let Some(value) = &self.default_value {
            s.push_str(" = ");
            s.push_str(value);
        }
        s
    }

    /// Native type as it appears in an overload cast (arrays decay to pointers).
    pub fn cast_type_code(&self) -> String {
        match &self.c_array {
            Some(_) => format!("{} *", self.ty.str_code()),
            None => self.ty.str_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_code() {
        assert_eq!(Parameter::new("x", "int").with_default("5").decl_code(), "int x = 5");
        assert_eq!(
            Parameter::new("v", "const int")
                .with_array(CArray::Fixed(3))
                .decl_code(),
            "const int v[3]"
        );
        assert_eq!(Parameter::variadic().decl_code(), "...");
    }

    #[test]
    fn test_cast_type_decays_arrays() {
        let p = Parameter::new("v", "double").with_array(CArray::Symbolic("N".into()));
        assert_eq!(p.cast_type_code(), "double *");
    }
}
