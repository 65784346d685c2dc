//! # litbind
//!
//! Declaration-level C++ to Python binding generator. From the declaration
//! tree of a header it produces Python stubs, pybind11 glue code and the
//! C++ adapter shims that make non-representable signatures bindable.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! translate → Run entry point, TranslationOutput, skipped declarations
//!   ↓
//! emit      → Stub / glue / adapter fragments, stream assembly
//!   ↓
//! compose   → Namespace merging, class composition, overload settlement
//!   ↓
//! template  → Function and class template instantiation
//!   ↓
//! adapt     → Adapter chain, boxed types, overload strategies, shims
//!   ↓
//! naming    → Host identifiers, type and value translation
//!   ↓
//! config    → Rule configuration, validation, per-unit preparation
//!   ↓
//! decl      → Declaration model (CppType, FunctionDecl, ClassDecl, ...)
//!   ↓
//! base      → Primitives (QualifiedName, SourceLocation, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → decl → config → naming → adapt → ...)
// ============================================================================

/// Foundation types: qualified names, source locations, default tables
pub mod base;

/// Declaration model handed over by the header front end
pub mod decl;

/// Rule configuration and its validation
pub mod config;

/// Identifier and type translation
pub mod naming;

/// Adapter synthesis for signatures Python cannot express directly
pub mod adapt;

/// Template instantiation
pub mod template;

/// Composite module construction
pub mod compose;

/// Emission of the three output streams
pub mod emit;

/// Diagnostics for skipped and suspicious declarations
pub mod diagnostics;

/// Error types
pub mod error;

/// Translation entry point
pub mod translate;

/// JSON loading of options and declaration trees
#[cfg(feature = "json")]
pub mod json;

// Re-export foundation types
pub use base::{QualifiedName, SourceLocation};

// Re-export the declaration model
pub use decl::{
    Access, CArray, ClassDecl, CommentDecl, ConstantDecl, CppType, Declaration, EnumDecl, EnumValue, FieldDecl,
    FunctionDecl, MemberItem, NamespaceDecl, Parameter, TranslationUnit,
};

// Re-export configuration
pub use config::{
    Config, EmitOptions, InstantiationSpec, IterableSpec, OutputFlagPolicy, ReplacementSpec, RuleEffect, RuleSpec,
    RuleTarget, TranslatorOptions,
};

pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
pub use emit::{Fragment, FragmentKind};
pub use error::{AdaptError, ConfigError};
pub use translate::{SkippedDeclaration, TranslationOutput, Translator, translate};
