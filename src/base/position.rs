/// Position tracking for native declarations
///
/// Stores the header location (line/column) of each declaration so that
/// generated fragments and diagnostics can point back at their origin.
use std::fmt;

use smol_str::SmolStr;

/// A position in a native header (1-indexed, as reported by the parser)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// The header file and position a declaration was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct SourceLocation {
    pub file: Option<SmolStr>,
    pub start: Position,
}

impl SourceLocation {
    pub fn new(file: impl Into<SmolStr>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            start: Position::new(line, column),
        }
    }

    /// A location for declarations synthesized by the generator itself.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.file.is_some() || self.start.line > 0
    }

    /// Render `file:line`, keeping only `nb_parent_folders` leading directories.
    ///
    /// `include/mylib/widgets.h:12` with one parent folder becomes `mylib/widgets.h:12`.
    pub fn display_short(&self, nb_parent_folders: usize) -> String {
        let file = match &self.file {
            Some(file) => {
                let parts: Vec<&str> = file.split(['/', '\\']).filter(|p| !p.is_empty()).collect();
                let keep = (nb_parent_folders + 1).min(parts.len());
                parts[parts.len() - keep..].join("/")
            }
            None => "<unknown>".to_string(),
        };
        format!("{}:{}", file, self.start.line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.start.line, self.start.column),
            None => write!(f, "<unknown>:{}:{}", self.start.line, self.start.column),
        }
    }
}
