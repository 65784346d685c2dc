//! Diagnostics for recoverable translation problems.
//!
//! Everything that goes wrong after configuration validation is recorded
//! here instead of aborting the run: skipped declarations, ambiguous
//! overloads, unused templates, rules that matched nothing.

use std::fmt;
use std::sync::Arc;

use crate::base::SourceLocation;
use crate::error::AdaptError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    pub fn display(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        }
    }
}

/// The error taxonomy a diagnostic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Unsupported adaptation; the declaration is skipped
    Adaptation,
    /// Overloads that cannot be told apart; the declaration is skipped
    Ambiguity,
    /// Advisory: unused template, unmatched rule
    Consistency,
    /// Informational
    Note,
}

/// A diagnostic keyed by the qualified native name of its declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Error/warning code (e.g., "E0101").
    pub code: Option<Arc<str>>,
    /// Qualified native name, or the rule pattern for rule diagnostics.
    pub declaration: Arc<str>,
    pub location: SourceLocation,
    pub message: Arc<str>,
    /// The declaration was left out of the output.
    pub skipped: bool,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        kind: DiagnosticKind,
        declaration: impl Into<Arc<str>>,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            severity,
            kind,
            code: None,
            declaration: declaration.into(),
            location: SourceLocation::unknown(),
            message: message.into(),
            skipped: false,
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn skipping(mut self) -> Self {
        self.skipped = true;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity.display())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}: {}", self.declaration, self.message)?;
        if self.location.is_known() {
            write!(f, " ({})", self.location)?;
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0101-E0199**: Adaptation errors (declaration skipped)
/// - **W0101-W0199**: Ambiguity warnings (declaration skipped)
/// - **W0201-W0299**: Consistency warnings (advisory)
/// - **I0301-I0399**: Notes
pub mod codes {
    // ========================================================================
    // ADAPTATION ERRORS (E0101-E0199)
    // ========================================================================

    /// Buffer element type outside the accepted set.
    pub const UNSUPPORTED_BUFFER_TYPE: &str = "E0101";
    /// Symbolic array dimension with no known value.
    pub const UNRESOLVED_ARRAY_DIMENSION: &str = "E0102";
    /// Static array dimension together with a count parameter.
    pub const ARRAY_BOUNDS_CONFLICT: &str = "E0103";
    /// Zero, unsized or oversized modifiable array.
    pub const INVALID_ARRAY_SIZE: &str = "E0104";
    /// Variadic function without a format parameter.
    pub const MISSING_FORMAT_PARAMETER: &str = "E0105";
    /// Instantiation with the wrong number of type arguments.
    pub const TEMPLATE_ARITY: &str = "E0106";
    /// Operator with no host counterpart.
    pub const UNSUPPORTED_OPERATOR: &str = "E0107";

    // ========================================================================
    // AMBIGUITY (W0101-W0199)
    // ========================================================================

    /// Overloads with identical host signatures.
    pub const AMBIGUOUS_OVERLOAD: &str = "W0101";

    // ========================================================================
    // CONSISTENCY (W0201-W0299)
    // ========================================================================

    /// Template with no instantiation request.
    pub const UNUSED_TEMPLATE: &str = "W0201";
    /// Rule that matched no declaration.
    pub const UNMATCHED_RULE: &str = "W0202";
    /// Template instantiated with itself as an argument.
    pub const RECURSIVE_INSTANTIATION: &str = "W0203";

    // ========================================================================
    // NOTES (I0301-I0399)
    // ========================================================================

    /// Function excluded because a parameter type is excluded.
    pub const EXCLUDED_BY_PARAMETER_TYPE: &str = "I0301";
    /// Overload already reachable through another binding.
    pub const OVERLOAD_COVERED: &str = "I0302";
    /// Excluded parameter kept because it has no default value.
    pub const EXCLUDED_PARAMETER_KEPT: &str = "I0303";
    /// C array field whose element type cannot be viewed as a numeric array.
    pub const UNBOUND_ARRAY_FIELD: &str = "I0304";
    /// Constructor of an abstract class without a trampoline.
    pub const ABSTRACT_CONSTRUCTOR: &str = "I0305";
    /// Macro whose value is not a literal.
    pub const NON_LITERAL_MACRO: &str = "I0306";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a translation run.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            declaration = %diagnostic.declaration,
            code = diagnostic.code.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// A declaration skipped because it cannot be adapted.
    pub fn adaptation_error(&mut self, declaration: &str, location: &SourceLocation, err: &AdaptError) {
        self.add(
            Diagnostic::new(Severity::Error, DiagnosticKind::Adaptation, declaration, err.to_string())
                .with_code(err.code())
                .with_location(location.clone())
                .skipping(),
        );
    }

    /// An overload skipped because its host signature duplicates `kept`'s.
    pub fn ambiguous_overload(&mut self, declaration: &str, location: &SourceLocation, kept: &str) {
        self.add(
            Diagnostic::new(
                Severity::Warning,
                DiagnosticKind::Ambiguity,
                declaration,
                format!(
                    "overload has the same host signature as '{}'; add a force-overload or force-lambda rule to expose it",
                    kept
                ),
            )
            .with_code(codes::AMBIGUOUS_OVERLOAD)
            .with_location(location.clone())
            .skipping(),
        );
    }

    pub fn unused_template(&mut self, declaration: &str, location: &SourceLocation) {
        self.add(
            Diagnostic::new(
                Severity::Warning,
                DiagnosticKind::Consistency,
                declaration,
                "template has no instantiation request and is ignored",
            )
            .with_code(codes::UNUSED_TEMPLATE)
            .with_location(location.clone())
            .skipping(),
        );
    }

    pub fn recursive_instantiation(&mut self, declaration: &str, location: &SourceLocation, args: &str) {
        self.add(
            Diagnostic::new(
                Severity::Warning,
                DiagnosticKind::Consistency,
                declaration,
                format!("instantiation <{}> refers to the template itself and is ignored", args),
            )
            .with_code(codes::RECURSIVE_INSTANTIATION)
            .with_location(location.clone()),
        );
    }

    pub fn unmatched_rule(&mut self, rule: &str) {
        self.add(
            Diagnostic::new(
                Severity::Warning,
                DiagnosticKind::Consistency,
                rule,
                "rule matched no declaration",
            )
            .with_code(codes::UNMATCHED_RULE),
        );
    }

    /// An informational note; `skipped` marks the declaration as left out.
    pub fn note(
        &mut self,
        declaration: &str,
        location: &SourceLocation,
        code: &'static str,
        message: impl Into<Arc<str>>,
        skipped: bool,
    ) {
        let mut diagnostic = Diagnostic::new(Severity::Info, DiagnosticKind::Note, declaration, message)
            .with_code(code)
            .with_location(location.clone());
        diagnostic.skipped = skipped;
        self.diagnostics.push(diagnostic);
    }

    /// Get all collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Check if any errors were collected.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
