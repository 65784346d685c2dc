//! Emission options

/// Layout options for the three generated streams
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct EmitOptions {
    /// Spaces per indentation level in stubs
    pub stub_indent_size: usize,
    /// Spaces per indentation level in glue and adapter code
    pub native_indent_size: usize,
    /// Indent native code with tabs instead of spaces
    pub native_indent_with_tabs: bool,
    /// Name of the `py::module_` variable in glue code
    pub module_var: String,
    /// Precede adapted stubs with the original native signature
    pub show_original_signature: bool,
    /// Precede stubs with `file:line` of their declaration
    pub show_location: bool,
    /// Parent folders kept in location comments
    pub location_parent_folders: usize,
    /// Drop free comments and docstrings
    pub exclude_comments: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            stub_indent_size: 4,
            native_indent_size: 4,
            native_indent_with_tabs: false,
            module_var: "m".to_string(),
            show_original_signature: false,
            show_location: false,
            location_parent_folders: 0,
            exclude_comments: false,
        }
    }
}

impl EmitOptions {
    /// Stub indentation for the given level
    pub fn stub_indent(&self, level: usize) -> String {
        " ".repeat(self.stub_indent_size * level)
    }

    /// Native indentation for the given level
    pub fn native_indent(&self, level: usize) -> String {
        if self.native_indent_with_tabs {
            "\t".repeat(level)
        } else {
            " ".repeat(self.native_indent_size * level)
        }
    }
}
