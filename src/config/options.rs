//! Translator options
//!
//! [`TranslatorOptions`] is plain data: an ordered rule list plus scalar
//! switches. It is compiled and validated into a [`Config`](super::Config)
//! before a run starts.

use indexmap::IndexMap;

use super::emit_options::EmitOptions;
use crate::base::constants::{
    AUTHORIZED_BUFFER_TYPES, DEFAULT_BUFFER_TEMPLATE_TYPES, DEFAULT_SIZE_NAME_WORDS,
};

// ============================================================================
// RULES
// ============================================================================

/// What kind of declaration a rule pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum RuleTarget {
    /// Function, method and constructor names
    Function,
    /// Class and struct names
    Class,
    Enum,
    Namespace,
    /// Parameter names
    ParamName,
    /// Parameter types, matched against the canonical native spelling
    ParamType,
    /// Field names
    Member,
    EnumValue,
    /// Macro and global constant names
    Constant,
}

impl RuleTarget {
    pub fn display(&self) -> &'static str {
        match self {
            RuleTarget::Function => "function",
            RuleTarget::Class => "class",
            RuleTarget::Enum => "enum",
            RuleTarget::Namespace => "namespace",
            RuleTarget::ParamName => "parameter name",
            RuleTarget::ParamType => "parameter type",
            RuleTarget::Member => "member",
            RuleTarget::EnumValue => "enum value",
            RuleTarget::Constant => "constant",
        }
    }
}

/// What happens to a declaration matched by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum RuleEffect {
    Exclude,
    /// Host name replacement; `$1`-style capture references are expanded
    Rename(String),
    /// Box mutable scalar parameters of matched functions
    Box,
    /// Promote mutable scalar parameters of matched functions to return values
    OutputToReturn,
    Vectorize,
    ForceOverload,
    ForceLambda,
    /// Expose pointer + count parameter pairs as numeric arrays
    BufferAdapt,
    ExposeProtected,
    OverrideVirtual,
    ReadOnly,
}

/// Effects that compete for "first match wins".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectCategory {
    Exclude,
    Rename,
    Box,
    OutputToReturn,
    Vectorize,
    ForceOverload,
    ForceLambda,
    BufferAdapt,
    ExposeProtected,
    OverrideVirtual,
    ReadOnly,
}

impl RuleEffect {
    pub fn category(&self) -> EffectCategory {
        match self {
            RuleEffect::Exclude => EffectCategory::Exclude,
            RuleEffect::Rename(_) => EffectCategory::Rename,
            RuleEffect::Box => EffectCategory::Box,
            RuleEffect::OutputToReturn => EffectCategory::OutputToReturn,
            RuleEffect::Vectorize => EffectCategory::Vectorize,
            RuleEffect::ForceOverload => EffectCategory::ForceOverload,
            RuleEffect::ForceLambda => EffectCategory::ForceLambda,
            RuleEffect::BufferAdapt => EffectCategory::BufferAdapt,
            RuleEffect::ExposeProtected => EffectCategory::ExposeProtected,
            RuleEffect::OverrideVirtual => EffectCategory::OverrideVirtual,
            RuleEffect::ReadOnly => EffectCategory::ReadOnly,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            RuleEffect::Exclude => "exclude",
            RuleEffect::Rename(_) => "rename",
            RuleEffect::Box => "box",
            RuleEffect::OutputToReturn => "output-to-return",
            RuleEffect::Vectorize => "vectorize",
            RuleEffect::ForceOverload => "force-overload",
            RuleEffect::ForceLambda => "force-lambda",
            RuleEffect::BufferAdapt => "buffer-adapt",
            RuleEffect::ExposeProtected => "expose-protected",
            RuleEffect::OverrideVirtual => "override-virtual",
            RuleEffect::ReadOnly => "read-only",
        }
    }

    /// Whether this effect means anything for `target`.
    pub fn applies_to(&self, target: RuleTarget) -> bool {
        use RuleTarget as T;
        match self {
            RuleEffect::Exclude => true,
            RuleEffect::Rename(_) => target != T::ParamType,
            RuleEffect::Box
            | RuleEffect::OutputToReturn
            | RuleEffect::Vectorize
            | RuleEffect::ForceOverload
            | RuleEffect::ForceLambda
            | RuleEffect::BufferAdapt => target == T::Function,
            RuleEffect::ExposeProtected | RuleEffect::OverrideVirtual => target == T::Class,
            RuleEffect::ReadOnly => target == T::Member,
        }
    }
}

/// One `(target, pattern) -> effect` rule, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSpec {
    pub target: RuleTarget,
    /// Regex, searched (not anchored) in the native name
    pub pattern: String,
    pub effect: RuleEffect,
}

impl RuleSpec {
    pub fn new(target: RuleTarget, pattern: impl Into<String>, effect: RuleEffect) -> Self {
        Self {
            target,
            pattern: pattern.into(),
            effect,
        }
    }

    pub fn exclude(target: RuleTarget, pattern: impl Into<String>) -> Self {
        Self::new(target, pattern, RuleEffect::Exclude)
    }

    pub fn rename(target: RuleTarget, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::new(target, pattern, RuleEffect::Rename(replacement.into()))
    }

    /// A function-targeted rule.
    pub fn function(pattern: impl Into<String>, effect: RuleEffect) -> Self {
        Self::new(RuleTarget::Function, pattern, effect)
    }

    /// `function exclude '^foo$'`
    pub fn describe(&self) -> String {
        format!("{} {} '{}'", self.target.display(), self.effect.display(), self.pattern)
    }
}

/// A regex → replacement pair applied to host type or value spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplacementSpec {
    pub pattern: String,
    pub replacement: String,
}

impl ReplacementSpec {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Concrete type lists for the templates whose name matches `template`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantiationSpec {
    /// Regex on the template's native name (`^sum$`, `^Matrix$`)
    pub template: String,
    /// One inner list per instantiation, one entry per template parameter
    pub type_args: Vec<Vec<String>>,
    /// Suffix host names with the type list (`sum_int`); otherwise the
    /// instantiations become overloads of one host name
    #[cfg_attr(feature = "json", serde(default = "default_true"))]
    pub add_suffix: bool,
}

#[cfg(feature = "json")]
fn default_true() -> bool {
    true
}

impl InstantiationSpec {
    /// One instantiation per single type: `["int", "double"]` → `<int>`, `<double>`.
    pub fn new<I, S>(template: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template: template.into(),
            type_args: types.into_iter().map(|t| vec![t.into()]).collect(),
            add_suffix: true,
        }
    }

    pub fn without_suffix(mut self) -> Self {
        self.add_suffix = false;
        self
    }
}

/// Iteration support for the classes whose name matches `class`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct IterableSpec {
    /// Regex on the class's native name
    pub class: String,
    /// Native element type yielded by `begin()`/`end()`
    pub element_type: String,
}

impl IterableSpec {
    pub fn new(class: impl Into<String>, element_type: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            element_type: element_type.into(),
        }
    }
}

/// Where a `bool` success flag returned alongside promoted outputs goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum OutputFlagPolicy {
    /// `bool f(int & out)` → `f() -> Tuple[bool, int]`
    #[default]
    InTuple,
    /// A mutable `bool &` flag parameter is boxed instead of promoted
    KeepAsParameter,
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Every knob of a translation run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TranslatorOptions {
    /// Ordered rule list; first match wins per effect category
    pub rules: Vec<RuleSpec>,

    // ------------------------------------------------------------------
    // Naming
    // ------------------------------------------------------------------
    /// Convert function, parameter, field, namespace and enum value names to snake_case
    pub snake_case: bool,
    /// Applied to host type spellings before the standard table
    pub type_replacements: Vec<ReplacementSpec>,
    /// Applied to host default values before the standard table
    pub value_replacements: Vec<ReplacementSpec>,
    /// `alias=canonical` native type synonyms (`MyFloat=float`)
    pub type_synonyms: Vec<String>,
    /// Known integer constants, used to resolve symbolic array sizes
    pub constants: IndexMap<String, i64>,
    /// Regex of namespaces whose content goes straight into the enclosing module
    pub namespaces_root: String,
    /// Regex of namespaces left out entirely, on top of namespace exclude rules
    pub namespaces_exclude: String,

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------
    pub templates: Vec<InstantiationSpec>,

    // ------------------------------------------------------------------
    // Adapters
    // ------------------------------------------------------------------
    /// Element types a numeric buffer may hold
    pub buffer_types: Vec<String>,
    /// Template parameter names that stand for any buffer element type
    pub buffer_template_types: Vec<String>,
    /// Regex recognizing element count parameter names
    pub buffer_size_names: String,
    pub c_string_list: bool,
    /// `const T v[N]` → `const std::array<T, N> &`
    pub c_array_const_to_std_array: bool,
    /// `T v[N]` → N boxed parameters
    pub c_array_modifiable_to_boxed: bool,
    pub c_array_modifiable_max_size: usize,
    pub variadic_format: bool,
    /// `const char * p = nullptr` → `std::optional<std::string>`
    pub const_char_pointer_default_null: bool,
    pub output_flag_policy: OutputFlagPolicy,
    pub vectorize_prefix: String,
    pub vectorize_suffix: String,
    /// Regex of functions whose parameters defaulting to a mutable value
    /// (`const Foo & foo = Foo()`) become `Optional[Foo] = None`
    pub fn_params_adapt_mutable_param_with_default_value: String,
    /// Document the substituted defaults in the docstring
    pub fn_params_adapt_mutable_param_with_default_value_add_comment: bool,
    /// Regex of functions returning a pointer bound with `return_value_policy::reference`
    pub fn_return_force_policy_reference_for_pointers: String,
    /// Same, for functions returning a reference
    pub fn_return_force_policy_reference_for_references: String,

    // ------------------------------------------------------------------
    // Classes and enums
    // ------------------------------------------------------------------
    /// Structs without a user constructor get a named constructor from their fields
    pub struct_default_ctor: bool,
    /// `MyEnum_A` → `a`
    pub enum_remove_values_prefix: bool,
    /// Skip a trailing `Count` value
    pub enum_skip_count: bool,
    /// Add `py::arithmetic()` to plain enums
    pub enum_arithmetic: bool,
    /// Regex of classes given `__copy__`
    pub class_copy: String,
    /// Regex of classes given `__deepcopy__`
    pub class_deep_copy: String,
    /// Regex of classes held by `std::shared_ptr` instead of `std::unique_ptr`
    pub class_held_as_shared: String,
    /// Regex of classes whose instances accept new attributes
    pub class_dynamic_attributes: String,
    /// Classes iterable from the host through their `begin()`/`end()`
    pub class_iterables_infos: Vec<IterableSpec>,

    // ------------------------------------------------------------------
    // Constants
    // ------------------------------------------------------------------
    /// Regex of `#define` names exported as module attributes
    pub macro_define_include_by_name: String,
    /// Regex of global constant names exported as module attributes
    pub globals_vars_include_by_name: String,

    pub emit: EmitOptions,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            namespaces_exclude: "[Ii]nternal|[Dd]etail".to_string(),
            snake_case: true,
            type_replacements: Vec::new(),
            value_replacements: Vec::new(),
            type_synonyms: Vec::new(),
            constants: IndexMap::new(),
            namespaces_root: String::new(),
            templates: Vec::new(),
            buffer_types: AUTHORIZED_BUFFER_TYPES.iter().map(|s| s.to_string()).collect(),
            buffer_template_types: DEFAULT_BUFFER_TEMPLATE_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            buffer_size_names: size_names_regex(DEFAULT_SIZE_NAME_WORDS),
            c_string_list: true,
            c_array_const_to_std_array: true,
            c_array_modifiable_to_boxed: true,
            c_array_modifiable_max_size: 10,
            variadic_format: true,
            const_char_pointer_default_null: true,
            output_flag_policy: OutputFlagPolicy::default(),
            vectorize_prefix: String::new(),
            vectorize_suffix: String::new(),
            fn_params_adapt_mutable_param_with_default_value: String::new(),
            fn_params_adapt_mutable_param_with_default_value_add_comment: true,
            fn_return_force_policy_reference_for_pointers: String::new(),
            fn_return_force_policy_reference_for_references: String::new(),
            struct_default_ctor: true,
            enum_remove_values_prefix: true,
            enum_skip_count: true,
            enum_arithmetic: true,
            class_copy: String::new(),
            class_deep_copy: String::new(),
            class_held_as_shared: String::new(),
            class_dynamic_attributes: String::new(),
            class_iterables_infos: Vec::new(),
            macro_define_include_by_name: String::new(),
            globals_vars_include_by_name: String::new(),
            emit: EmitOptions::default(),
        }
    }
}

impl TranslatorOptions {
    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_template(mut self, spec: InstantiationSpec) -> Self {
        self.templates.push(spec);
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: i64) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    pub fn with_iterable(mut self, spec: IterableSpec) -> Self {
        self.class_iterables_infos.push(spec);
        self
    }

    /// Export every macro and global constant.
    pub fn with_all_constants(mut self) -> Self {
        self.macro_define_include_by_name = ".*".to_string();
        self.globals_vars_include_by_name = ".*".to_string();
        self
    }
}

/// `nb|size|count` as whole words of a snake_case or camelCase name.
fn size_names_regex(words: &[&str]) -> String {
    let alternatives = words.join("|");
    format!(
        r"(?i:^(?:{a})$|^(?:{a})_|_(?:{a})$|_(?:{a})_)|^(?:{a})[A-Z]|[a-z](?:{c})(?:[A-Z]|$)",
        a = alternatives,
        c = words
            .iter()
            .map(|w| capitalize(w))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
