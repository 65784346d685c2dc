//! Qualified native names (`outer::inner::Widget`).

use std::fmt;

use smol_str::SmolStr;

/// A `::`-separated native scope path.
///
/// The root scope has no segments. Segments never contain `::` themselves.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QualifiedName {
    segments: Vec<SmolStr>,
}

impl QualifiedName {
    /// The global scope.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a::b::c`. Empty segments (a leading `::`) are dropped.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split("::")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(SmolStr::new)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<SmolStr>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn join(&self, separator: &str) -> String {
        self.segments.join(separator)
    }

    /// Native spelling of `name` inside this scope (`ns::name`, or `name` at root).
    pub fn qualify(&self, name: &str) -> String {
        if self.segments.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.join("::"), name)
        }
    }

    pub fn starts_with(&self, prefix: &QualifiedName) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("::"))
    }
}
