//! Rule configuration.
//!
//! ```text
//! TranslatorOptions (plain data)
//!        │  Config::new      compile regexes, check buffer types, synonyms,
//!        ▼                   instantiation requests, rule/target pairs
//!     Config
//!        │  Config::prepare  fold macro constants, reject host name collisions
//!        ▼                   and invalid renamed identifiers for one unit
//!     Config (read-only for the rest of the run)
//! ```
//!
//! A [`ConfigError`] from either step aborts the run before any declaration
//! is processed.

mod check;
mod emit_options;
mod options;
mod replacements;
mod rules;

pub use emit_options::EmitOptions;
pub use options::{
    EffectCategory, InstantiationSpec, IterableSpec, OutputFlagPolicy, ReplacementSpec, RuleEffect,
    RuleSpec, RuleTarget, TranslatorOptions,
};
pub use replacements::ReplacementList;
pub use rules::{Matcher, Rule, RuleSet};

use rustc_hash::FxHashMap;

use crate::base::constants::AUTHORIZED_BUFFER_TYPES;
use crate::decl::{ConstantDecl, ConstantKind, CppType};
use crate::error::ConfigError;

/// A validated instantiation request.
#[derive(Debug, Clone)]
pub struct TemplateRequest {
    pub matcher: Matcher,
    pub spec: InstantiationSpec,
    /// Parsed `spec.type_args`
    pub type_args: Vec<Vec<CppType>>,
}

/// Validated, compiled configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub options: TranslatorOptions,
    pub rules: RuleSet,
    pub type_replacements: ReplacementList,
    pub value_replacements: ReplacementList,
    /// `(alias, canonical)` in configuration order
    pub synonyms: Vec<(String, CppType)>,
    pub constants: FxHashMap<String, i64>,
    pub namespaces_root: Matcher,
    pub namespaces_exclude: Matcher,
    pub buffer_size_names: Matcher,
    pub templates: Vec<TemplateRequest>,
    pub mutable_default_functions: Matcher,
    pub reference_policy_for_pointers: Matcher,
    pub reference_policy_for_references: Matcher,
    pub class_copy: Matcher,
    pub class_deep_copy: Matcher,
    pub class_held_as_shared: Matcher,
    pub class_dynamic_attributes: Matcher,
    /// `(class matcher, element type)` in configuration order
    pub iterables: Vec<(Matcher, CppType)>,
    pub macro_include: Matcher,
    pub globals_include: Matcher,
}

impl Config {
    pub fn new(options: TranslatorOptions) -> Result<Self, ConfigError> {
        let rules = RuleSet::compile(&options.rules)?;

        for ty in &options.buffer_types {
            let ty = ty.trim();
            if !AUTHORIZED_BUFFER_TYPES.contains(&ty) {
                return Err(ConfigError::UnauthorizedBufferType(ty.to_string()));
            }
        }

        let synonyms = parse_synonyms(&options.type_synonyms)?;

        let mut templates = Vec::with_capacity(options.templates.len());
        for spec in &options.templates {
            if spec.template.is_empty()
                || spec.type_args.is_empty()
                || spec.type_args.iter().any(|args| args.is_empty())
            {
                return Err(ConfigError::EmptyInstantiation(spec.template.clone()));
            }
            templates.push(TemplateRequest {
                matcher: Matcher::compile("templates", &spec.template)?,
                type_args: spec
                    .type_args
                    .iter()
                    .map(|args| args.iter().map(|a| CppType::parse(a)).collect())
                    .collect(),
                spec: spec.clone(),
            });
        }

        let mut iterables = Vec::with_capacity(options.class_iterables_infos.len());
        for spec in &options.class_iterables_infos {
            iterables.push((
                Matcher::compile("class_iterables_infos", &spec.class)?,
                CppType::parse(&spec.element_type),
            ));
        }

        let config = Self {
            type_replacements: ReplacementList::types(&options.type_replacements)?,
            value_replacements: ReplacementList::values(&options.value_replacements)?,
            constants: options
                .constants
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            namespaces_root: Matcher::compile("namespaces_root", &options.namespaces_root)?,
            namespaces_exclude: Matcher::compile("namespaces_exclude", &options.namespaces_exclude)?,
            buffer_size_names: Matcher::compile("buffer_size_names", &options.buffer_size_names)?,
            mutable_default_functions: Matcher::compile(
                "fn_params_adapt_mutable_param_with_default_value",
                &options.fn_params_adapt_mutable_param_with_default_value,
            )?,
            reference_policy_for_pointers: Matcher::compile(
                "fn_return_force_policy_reference_for_pointers",
                &options.fn_return_force_policy_reference_for_pointers,
            )?,
            reference_policy_for_references: Matcher::compile(
                "fn_return_force_policy_reference_for_references",
                &options.fn_return_force_policy_reference_for_references,
            )?,
            class_copy: Matcher::compile("class_copy", &options.class_copy)?,
            class_deep_copy: Matcher::compile("class_deep_copy", &options.class_deep_copy)?,
            class_held_as_shared: Matcher::compile("class_held_as_shared", &options.class_held_as_shared)?,
            class_dynamic_attributes: Matcher::compile("class_dynamic_attributes", &options.class_dynamic_attributes)?,
            iterables,
            macro_include: Matcher::compile("macro_define_include_by_name", &options.macro_define_include_by_name)?,
            globals_include: Matcher::compile("globals_vars_include_by_name", &options.globals_vars_include_by_name)?,
            rules,
            synonyms,
            templates,
            options,
        };
        tracing::debug!(
            rules = config.rules.rules().len(),
            templates = config.templates.len(),
            "configuration validated"
        );
        Ok(config)
    }

    pub fn is_buffer_type(&self, element: &str) -> bool {
        self.options.buffer_types.iter().any(|t| t.trim() == element)
    }

    pub fn is_buffer_template_type(&self, name: &str) -> bool {
        self.options.buffer_template_types.iter().any(|t| t == name)
    }

    pub fn constant(&self, name: &str) -> Option<i64> {
        self.constants.get(name).copied()
    }

    /// Whether `constant` becomes a module attribute. Macros and globals are
    /// opted in by name; exclusion rules still apply.
    pub fn exports_constant(&self, constant: &ConstantDecl) -> bool {
        let include = match constant.kind {
            ConstantKind::Macro => &self.macro_include,
            ConstantKind::Global => &self.globals_include,
        };
        include.matches(&constant.name) && !self.rules.is_excluded(RuleTarget::Constant, &constant.name)
    }

    /// Element type of the iterable classes matching `class_name`.
    pub fn iterable_element(&self, class_name: &str) -> Option<&CppType> {
        self.iterables
            .iter()
            .find(|(matcher, _)| matcher.matches(class_name))
            .map(|(_, element)| element)
    }
}

fn parse_synonyms(entries: &[String]) -> Result<Vec<(String, CppType)>, ConfigError> {
    let mut synonyms: Vec<(String, CppType)> = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut parts = entry.splitn(2, '=');
        let alias = parts.next().unwrap_or_default().trim();
        let canonical = parts.next().unwrap_or_default().trim();
        if alias.is_empty() || canonical.is_empty() || alias.contains(char::is_whitespace) {
            return Err(ConfigError::MalformedSynonym(entry.clone()));
        }
        synonyms.push((alias.to_string(), CppType::parse(canonical)));
    }

    // alias -> aliases its canonical type mentions
    let edges: Vec<Vec<usize>> = synonyms
        .iter()
        .map(|(_, canonical)| {
            synonyms
                .iter()
                .enumerate()
                .filter(|(_, (other, _))| canonical.mentions(other))
                .map(|(j, _)| j)
                .collect()
        })
        .collect();

    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    fn visit(node: usize, edges: &[Vec<usize>], marks: &mut [Mark]) -> bool {
        match marks[node] {
            Mark::Active => return true,
            Mark::Done => return false,
            Mark::New => {}
        }
        marks[node] = Mark::Active;
        if edges[node].iter().any(|&next| visit(next, edges, marks)) {
            return true;
        }
        marks[node] = Mark::Done;
        false
    }

    let mut marks = vec![Mark::New; synonyms.len()];
    for i in 0..synonyms.len() {
        if visit(i, &edges, &mut marks) {
            return Err(ConfigError::CyclicSynonym(synonyms[i].0.clone()));
        }
    }
    Ok(synonyms)
}
