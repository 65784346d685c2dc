//! Naming and type translation.
//!
//! Every native identifier goes through [`Namer`], every native type or
//! default value through [`TypeTranslator`]. Both are pure functions of the
//! validated [`Config`]: translating the same input twice gives the same
//! output and leaves no state behind.

mod case;
mod types;

pub use case::{is_valid_identifier, to_snake_case};
pub use types::TypeTranslator;

use crate::base::constants::is_python_keyword;
use crate::config::{Config, RuleTarget};
use crate::decl::{ClassDecl, EnumDecl, EnumValue, FunctionDecl};
use crate::error::AdaptError;

/// Maps native identifiers to host identifiers.
///
/// Priority: rename rule, then snake_case (when enabled and the target is
/// converted), then passthrough. Python keywords get a trailing `_`.
#[derive(Debug, Clone, Copy)]
pub struct Namer<'a> {
    config: &'a Config,
}

impl<'a> Namer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn identifier(&self, target: RuleTarget, native: &str) -> String {
        let name = match self.config.rules.rename(target, native) {
            Some(renamed) => renamed,
            None if self.config.options.snake_case && converts_case(target) => to_snake_case(native),
            None => native.to_string(),
        };
        escape_keyword(name)
    }

    /// Host name of a function, or why it has none.
    pub fn function_name(&self, function: &FunctionDecl) -> Result<String, AdaptError> {
        if function.is_constructor() {
            return Ok("__init__".to_string());
        }
        if function.is_operator() {
            return operator_name(function)
                .map(str::to_string)
                .ok_or_else(|| AdaptError::UnsupportedOperator(function.name.to_string()));
        }
        let native = function.instance_name.as_deref().unwrap_or(&function.name);
        Ok(self.identifier(RuleTarget::Function, native))
    }

    pub fn class_name(&self, class: &ClassDecl) -> String {
        let native = class.instance_name.as_deref().unwrap_or(&class.name);
        self.identifier(RuleTarget::Class, native)
    }

    pub fn enum_name(&self, decl: &EnumDecl) -> String {
        self.identifier(RuleTarget::Enum, &decl.name)
    }

    /// `MyEnum_Red` of a plain `MyEnum_` enum becomes `red`.
    pub fn enum_value_name(&self, decl: &EnumDecl, value: &EnumValue) -> String {
        if let Some(renamed) = self.config.rules.rename(RuleTarget::EnumValue, &value.name) {
            return escape_keyword(renamed);
        }
        let stripped = if self.config.options.enum_remove_values_prefix && !decl.is_scoped {
            strip_enum_prefix(&decl.name, &value.name)
        } else {
            &value.name
        };
        let name = if self.config.options.snake_case {
            to_snake_case(stripped)
        } else {
            stripped.to_string()
        };
        escape_keyword(name)
    }

    /// A trailing `Count` value is a size marker, not a member.
    pub fn is_count_value(&self, decl: &EnumDecl, index: usize) -> bool {
        if !self.config.options.enum_skip_count || index + 1 != decl.values.len() {
            return false;
        }
        let name = &decl.values[index].name;
        let stripped = strip_enum_prefix(&decl.name, name);
        stripped.eq_ignore_ascii_case("count") || name.ends_with("Count") || name.ends_with("_COUNT")
    }
}

fn converts_case(target: RuleTarget) -> bool {
    matches!(
        target,
        RuleTarget::Function
            | RuleTarget::ParamName
            | RuleTarget::Member
            | RuleTarget::Namespace
            | RuleTarget::EnumValue
    )
}

fn escape_keyword(name: String) -> String {
    if is_python_keyword(&name) {
        format!("{}_", name)
    } else {
        name
    }
}

fn strip_enum_prefix<'n>(enum_name: &str, value: &'n str) -> &'n str {
    let base = enum_name.trim_end_matches('_');
    if base.is_empty() {
        return value;
    }
    let rest = value
        .strip_prefix(base)
        .map(|r| r.trim_start_matches('_'))
        .unwrap_or(value);
    if rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_digit()) {
        value
    } else {
        rest
    }
}

/// Python dunder for a member operator.
fn operator_name(function: &FunctionDecl) -> Option<&'static str> {
    if !function.is_method() {
        return None;
    }
    let symbol = function.name["operator".len()..].trim();
    let nb_params = function.params.len();
    let name = match (symbol, nb_params) {
        ("+", 1) => "__add__",
        ("-", 1) => "__sub__",
        ("-", 0) => "__neg__",
        ("+", 0) => "__pos__",
        ("*", 1) => "__mul__",
        ("/", 1) => "__truediv__",
        ("%", 1) => "__mod__",
        ("==", 1) => "__eq__",
        ("!=", 1) => "__ne__",
        ("<", 1) => "__lt__",
        ("<=", 1) => "__le__",
        (">", 1) => "__gt__",
        (">=", 1) => "__ge__",
        ("+=", 1) => "__iadd__",
        ("-=", 1) => "__isub__",
        ("*=", 1) => "__imul__",
        ("/=", 1) => "__itruediv__",
        ("()", _) => "__call__",
        ("[]", 1) => "__getitem__",
        ("bool", 0) => "__bool__",
        _ => return None,
    };
    Some(name)
}
