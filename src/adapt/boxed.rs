//! Boxed helper types.
//!
//! A mutable `int *` cannot be observed from the host since host integers are
//! immutable. The adapter wraps such parameters in a small mutable holder
//! (`BoxedInt`) whose `value` the native side writes through.

use crate::config::EmitOptions;

/// A mutable holder for one immutable scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoxedType {
    /// `BoxedInt`, `BoxedUnsignedInt`, `BoxedString`
    pub name: String,
    /// Native scalar spelling (`int`, `std::string`)
    pub native: String,
    /// Host spelling of the scalar (`int`, `str`)
    pub host_type: String,
}

impl BoxedType {
    pub fn new(native: &str, host_type: impl Into<String>) -> Self {
        Self {
            name: boxed_name(native),
            native: native.to_string(),
            host_type: host_type.into(),
        }
    }

    fn is_string(&self) -> bool {
        self.native == "std::string"
    }

    fn native_default(&self) -> &'static str {
        match self.native.as_str() {
            "bool" => "false",
            "float" | "double" | "long double" => "0.",
            "std::string" => "\"\"",
            _ => "0",
        }
    }

    fn host_default(&self) -> &'static str {
        match self.native.as_str() {
            "bool" => "False",
            "float" | "double" | "long double" => "0.",
            "std::string" => "\"\"",
            _ => "0",
        }
    }

    /// Native definition, emitted in the adapter stream.
    pub fn adapter_code(&self, options: &EmitOptions) -> String {
        let i1 = options.native_indent(1);
        let repr_value = if self.is_string() {
            "value".to_string()
        } else {
            "std::to_string(value)".to_string()
        };
        let mut code = String::new();
        code.push_str(&format!("struct {}\n{{\n", self.name));
        code.push_str(&format!("{i1}{} value;\n", self.native));
        code.push_str(&format!(
            "{i1}{}({} v = {}) : value(v) {{}}\n",
            self.name,
            self.native,
            self.native_default()
        ));
        code.push_str(&format!(
            "{i1}std::string __repr__() const {{ return std::string(\"{}(\") + {} + \")\"; }}\n",
            self.name, repr_value
        ));
        code.push_str("};");
        code
    }

    /// Registration, emitted in the glue stream.
    pub fn glue_code(&self, options: &EmitOptions) -> String {
        let i1 = options.native_indent(1);
        let name = &self.name;
        format!(
            "py::class_<{name}>\n{i1}({module}, \"{name}\", \"\")\n\
             {i1}.def_readwrite(\"value\", &{name}::value, \"\")\n\
             {i1}.def(py::init<{native}>(), py::arg(\"v\") = {default})\n\
             {i1}.def(\"__repr__\", &{name}::__repr__, \"\");",
            module = options.module_var,
            native = self.native,
            default = self.native_default(),
        )
    }

    /// Host declaration, emitted in the stub stream.
    pub fn stub_code(&self, options: &EmitOptions) -> String {
        let i1 = options.stub_indent(1);
        let i2 = options.stub_indent(2);
        format!(
            "class {name}:\n\
             {i1}value: {host}\n\
             {i1}def __init__(self, v: {host} = {default}) -> None:\n\
             {i2}pass\n\
             {i1}def __repr__(self) -> str:\n\
             {i2}pass",
            name = self.name,
            host = self.host_type,
            default = self.host_default(),
        )
    }
}

/// `unsigned int` → `BoxedUnsignedInt`, `std::string` → `BoxedString`.
fn boxed_name(native: &str) -> String {
    let mut name = String::from("Boxed");
    for word in native.split(|c: char| c.is_whitespace() || c == ':') {
        if word.is_empty() || word == "std" {
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_name() {
        assert_eq!(boxed_name("int"), "BoxedInt");
        assert_eq!(boxed_name("unsigned long long"), "BoxedUnsignedLongLong");
        assert_eq!(boxed_name("std::string"), "BoxedString");
    }

    #[test]
    fn test_adapter_code() {
        let boxed = BoxedType::new("float", "float");
        let code = boxed.adapter_code(&EmitOptions::default());
        assert!(code.starts_with("struct BoxedFloat\n{\n    float value;\n"));
        assert!(code.contains("BoxedFloat(float v = 0.) : value(v) {}"));
        assert!(code.contains("std::to_string(value)"));

        let boxed = BoxedType::new("std::string", "str");
        let code = boxed.adapter_code(&EmitOptions::default());
        assert!(code.contains("std::string(\"BoxedString(\") + value + \")\""));
    }

    #[test]
    fn test_stub_and_glue() {
        let boxed = BoxedType::new("bool", "bool");
        let options = EmitOptions::default();
        assert!(boxed.stub_code(&options).contains("def __init__(self, v: bool = False) -> None:"));
        assert!(boxed.glue_code(&options).contains("py::arg(\"v\") = false"));
        assert!(boxed.glue_code(&options).starts_with("py::class_<BoxedBool>\n    (m, \"BoxedBool\", \"\")"));
    }
}
