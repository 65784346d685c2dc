//! Error types for configuration and adaptation.
//!
//! [`ConfigError`] is the only error that aborts a run; it is raised while the
//! rule set is validated, before any declaration is processed. [`AdaptError`]
//! describes why a single declaration was skipped and never leaves the
//! translator as an `Err`: it is recorded as a diagnostic instead.

use thiserror::Error;

use crate::base::constants::AUTHORIZED_BUFFER_TYPES;
use crate::diagnostics::codes;

/// Invalid or contradictory configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A pattern failed to compile.
    #[error("invalid regex in {option} ('{pattern}'): {source}")]
    InvalidRegex {
        option: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A buffer element type outside the authorized set.
    #[error("unauthorized buffer element type '{0}', expected one of: {allowed}", allowed = AUTHORIZED_BUFFER_TYPES.join(", "))]
    UnauthorizedBufferType(String),

    /// Two declarations of one scope translate to the same host identifier.
    #[error("host name collision in scope '{scope}': '{host_name}' is produced by both '{first}' and '{second}'")]
    NameCollision {
        scope: String,
        host_name: String,
        first: String,
        second: String,
    },

    /// A rename produced something the host language cannot use as a name.
    #[error("'{name}' is renamed to '{host_name}', which is not a valid host identifier")]
    InvalidHostIdentifier { name: String, host_name: String },

    /// A template instantiation request with no type argument list.
    #[error("template instantiation request '{0}' lists no type arguments")]
    EmptyInstantiation(String),

    /// A synonym entry not of the form `alias=canonical`.
    #[error("malformed type synonym '{0}', expected 'alias=canonical'")]
    MalformedSynonym(String),

    /// Synonyms that resolve to each other.
    #[error("cyclic type synonym involving '{0}'")]
    CyclicSynonym(String),

    /// A rename rule whose replacement is empty.
    #[error("rename rule '{0}' has an empty replacement")]
    EmptyRename(String),

    /// A rule effect that has no meaning for its target.
    #[error("rule '{pattern}': effect '{effect}' does not apply to {target}")]
    IncompatibleRule {
        pattern: String,
        effect: &'static str,
        target: &'static str,
    },

    /// JSON parsing error.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(String),
}

impl ConfigError {
    /// Create an invalid regex error.
    pub fn invalid_regex(option: impl Into<String>, pattern: &str, source: regex::Error) -> Self {
        Self::InvalidRegex {
            option: option.into(),
            pattern: pattern.to_string(),
            source,
        }
    }

    /// Create a JSON error.
    #[cfg(feature = "json")]
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}

/// Why one declaration could not be adapted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    #[error("parameter '{param}': buffer element type '{element}' is not supported")]
    UnsupportedBufferType { param: String, element: String },

    #[error("parameter '{param}': array dimension '{dimension}' is not a known constant")]
    UnresolvedArrayDimension { param: String, dimension: String },

    #[error("parameter '{param}': declared size {size} conflicts with count parameter '{count_param}'")]
    ArrayBoundsConflict {
        param: String,
        size: usize,
        count_param: String,
    },

    #[error("parameter '{param}': {reason}")]
    InvalidArraySize { param: String, reason: String },

    #[error("variadic function has no format string parameter before '...'")]
    MissingFormatParameter,

    #[error("template '{template}' expects {expected} type argument(s), got {found}")]
    TemplateArity {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("operator '{0}' has no host equivalent")]
    UnsupportedOperator(String),
}

impl AdaptError {
    pub fn unsupported_buffer(param: &str, element: &str) -> Self {
        Self::UnsupportedBufferType {
            param: param.to_string(),
            element: element.to_string(),
        }
    }

    pub fn invalid_array_size(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArraySize {
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedBufferType { .. } => codes::UNSUPPORTED_BUFFER_TYPE,
            Self::UnresolvedArrayDimension { .. } => codes::UNRESOLVED_ARRAY_DIMENSION,
            Self::ArrayBoundsConflict { .. } => codes::ARRAY_BOUNDS_CONFLICT,
            Self::InvalidArraySize { .. } => codes::INVALID_ARRAY_SIZE,
            Self::MissingFormatParameter => codes::MISSING_FORMAT_PARAMETER,
            Self::TemplateArity { .. } => codes::TEMPLATE_ARITY,
            Self::UnsupportedOperator(_) => codes::UNSUPPORTED_OPERATOR,
        }
    }
}
