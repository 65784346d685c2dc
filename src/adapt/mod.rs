//! Adapter synthesis.
//!
//! Every function-like declaration is run through a fixed chain of
//! adapters. An adapter inspects the current signature and either leaves it
//! alone or returns a [`LambdaStep`]: a native lambda with a new, more
//! host-friendly parameter list that converts its arguments and calls the
//! previous signature. The steps of one declaration form its
//! [`AdapterPlan`], rendered as a single shim function.
//!
//! ```text
//! native fn ◄── step 1 (buffers) ◄── step 2 (boxing) ◄── ... ◄── shim ◄── glue
//! ```
//!
//! Order: numeric buffers, excluded parameters, mutable defaults, fixed size C arrays,
//! `const char *` defaulting to null, output-to-return, boxing, C string
//! lists (with then without count), variadic format, forced lambda.

mod arrays;
mod boxed;
mod buffers;
mod mutable;
mod overload;
mod params;
mod shim;

#[cfg(test)]
mod tests;

pub use boxed::BoxedType;
pub use overload::{BindingStrategy, OverloadDecision, OverloadOutcome, resolve_overloads};
pub use shim::{native_callee, render_shim};

pub(crate) use buffers::is_buffer_dispatch_template;

use smol_str::SmolStr;

use crate::base::QualifiedName;
use crate::base::constants::PYTHON_IMMUTABLE_NATIVE_TYPES;
use crate::config::{Config, EffectCategory, RuleTarget};
use crate::decl::{AdaptationTag, CppType, FunctionDecl, Parameter, TypeModifier};
use crate::error::AdaptError;
use crate::naming::{Namer, TypeTranslator};

// ============================================================================
// PLAN TYPES
// ============================================================================

/// The adaptation strategies, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdaptationKind {
    Buffer,
    ExcludeParams,
    MutableDefault,
    CArray,
    OptionalString,
    OutputToReturn,
    Boxing,
    StringListWithCount,
    StringList,
    Variadic,
    ForceLambda,
}

impl AdaptationKind {
    /// Suffix of the lambda implementing this step.
    pub fn lambda_suffix(&self) -> &'static str {
        match self {
            AdaptationKind::Buffer => "adapt_c_buffers",
            AdaptationKind::ExcludeParams => "adapt_exclude_params",
            AdaptationKind::MutableDefault => "adapt_mutable_param_with_default_value",
            AdaptationKind::CArray => "adapt_fixed_size_c_arrays",
            AdaptationKind::OptionalString => "adapt_const_char_pointer_with_default_null",
            AdaptationKind::OutputToReturn => "adapt_modifiable_immutable_to_return",
            AdaptationKind::Boxing => "adapt_modifiable_immutable",
            AdaptationKind::StringListWithCount => "adapt_c_string_list",
            AdaptationKind::StringList => "adapt_c_string_list_no_count",
            AdaptationKind::Variadic => "adapt_variadic_format",
            AdaptationKind::ForceLambda => "adapt_force_lambda",
        }
    }
}

/// How a step invokes the signature below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// `callee(args...)`
    Args(Vec<String>),
    /// One call per accepted dtype of a template buffer, selected at runtime.
    Dispatch {
        /// Buffer parameter whose dtype selects the case
        param: String,
        cases: Vec<(char, Vec<String>)>,
    },
}

/// One native lambda of an adapter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaStep {
    pub kind: AdaptationKind,
    pub name: String,
    /// Parameters of this lambda (the new signature)
    pub params: Vec<Parameter>,
    pub return_type: CppType,
    /// Statements run before the call
    pub input_code: Vec<String>,
    pub call: CallShape,
    /// Statements run after the call
    pub output_code: Vec<String>,
    /// Returned instead of the call result
    pub return_expr: Option<String>,
    pub boxed: Vec<BoxedType>,
    /// Tags of the original parameters this step replaced
    pub tags: Vec<(SmolStr, AdaptationTag)>,
    /// Lines appended to the declaration's documentation
    pub doc_notes: Vec<String>,
}

impl LambdaStep {
    fn new(kind: AdaptationKind, ctx: &AdaptCtx<'_>, params: Vec<Parameter>, return_type: CppType) -> Self {
        Self {
            kind,
            name: format!("{}_{}", ctx.lambda_base, kind.lambda_suffix()),
            params,
            return_type,
            input_code: Vec::new(),
            call: CallShape::Args(Vec::new()),
            output_code: Vec::new(),
            return_expr: None,
            boxed: Vec::new(),
            tags: Vec::new(),
            doc_notes: Vec::new(),
        }
    }

    fn signature(&self) -> Signature {
        Signature {
            params: self.params.clone(),
            return_type: self.return_type.clone(),
        }
    }
}

/// How a declaration's signature is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterPlan {
    /// `<scope>__<name>[_overload<i>]_adapt_shim`, assigned by the composer
    pub shim_name: String,
    /// Host-visible native parameters (the last step's)
    pub params: Vec<Parameter>,
    pub return_type: CppType,
    pub steps: Vec<LambdaStep>,
    /// Boxed helper types in first-use order
    pub boxed_types: Vec<BoxedType>,
}

/// A host-visible parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostParam {
    pub name: String,
    pub native_name: SmolStr,
    pub native_type: CppType,
    pub host_type: String,
    /// Default for `py::arg(...) = ...`
    pub native_default: Option<String>,
    /// Default in the stub
    pub host_default: Option<String>,
}

/// The class a method belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Fully qualified, specialized native name (`gfx::Matrix<float>`)
    pub native_name: String,
    /// Publicist class used to reach protected members
    pub publicist: Option<String>,
}

/// A declaration after adaptation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedFunction {
    /// The native declaration, parameters tagged
    pub original: FunctionDecl,
    /// Enclosing native scope (namespaces and classes)
    pub scope: QualifiedName,
    pub owner: Option<Owner>,
    pub host_name: String,
    pub host_params: Vec<HostParam>,
    pub host_return: String,
    pub plan: Option<AdapterPlan>,
    pub vectorize: bool,
    /// `py::return_value_policy::<policy>` added to the binding
    pub return_policy: Option<String>,
    /// Informational notes `(code, message)`
    pub notes: Vec<(&'static str, String)>,
}

impl AdaptedFunction {
    pub fn qualified_name(&self) -> String {
        self.scope.qualify(&self.original.native_call_name())
    }

    pub fn is_adapted(&self) -> bool {
        self.plan.is_some()
    }

    /// Host parameter types, the overload key.
    pub fn host_signature(&self) -> Vec<&str> {
        self.host_params.iter().map(|p| p.host_type.as_str()).collect()
    }

    /// Native parameter types after adaptation.
    pub fn native_signature(&self) -> Vec<String> {
        self.host_params.iter().map(|p| p.native_type.str_code()).collect()
    }
}

/// Outcome of adapting one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adaptation {
    Adapted(Box<AdaptedFunction>),
    /// Left out by a parameter type exclusion
    Excluded { reason: String },
}

// ============================================================================
// PIPELINE
// ============================================================================

/// A parameter list and return type, as seen by the next adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Signature {
    params: Vec<Parameter>,
    return_type: CppType,
}

/// Read-only state shared by the adapters of one declaration.
struct AdaptCtx<'a> {
    config: &'a Config,
    function: &'a FunctionDecl,
    types: TypeTranslator<'a>,
    /// `<native name>` prefix of lambda names
    lambda_base: String,
}

impl AdaptCtx<'_> {
    fn rule(&self, category: EffectCategory) -> bool {
        self.config
            .rules
            .has(category, RuleTarget::Function, &self.function.name)
    }

    /// Canonical base of `ty` once synonyms are resolved (`MyInt &` → `int`).
    fn resolved_base(&self, ty: &CppType) -> String {
        self.types.resolve_synonyms(ty).base.to_string()
    }

    /// `int *`, `float &`, `std::string &`: a mutable indirection to a value
    /// the host cannot mutate in place.
    fn is_mutable_immutable(&self, param: &Parameter) -> bool {
        param.c_array.is_none()
            && !param.is_variadic
            && param.ty.is_mutable_single_indirection()
            && PYTHON_IMMUTABLE_NATIVE_TYPES.contains(&self.resolved_base(&param.ty).as_str())
    }

    fn is_count_param(&self, param: &Parameter) -> bool {
        param.c_array.is_none()
            && param.ty.modifiers.is_empty()
            && is_integral(&self.resolved_base(&param.ty))
            && self.config.buffer_size_names.matches(&param.name)
    }
}

type AdapterFn = fn(&AdaptCtx<'_>, &Signature) -> Result<Option<LambdaStep>, AdaptError>;

const ADAPTERS: &[AdapterFn] = &[
    buffers::adapt_buffers,
    params::adapt_excluded_params,
    params::adapt_mutable_defaults,
    arrays::adapt_c_arrays,
    params::adapt_optional_string,
    mutable::adapt_output_to_return,
    mutable::adapt_boxing,
    params::adapt_string_list_with_count,
    params::adapt_string_list,
    params::adapt_variadic,
];

/// Adapt one declaration living in `scope`.
pub fn adapt_function(
    config: &Config,
    function: &FunctionDecl,
    scope: &QualifiedName,
    owner: Option<&Owner>,
) -> Result<Adaptation, AdaptError> {
    let namer = Namer::new(config);
    let host_name = namer.function_name(function)?;

    let mut notes = Vec::new();
    if let Some(reason) = params::excluded_by_param_type(config, function, &mut notes) {
        return Ok(Adaptation::Excluded { reason });
    }

    let ctx = AdaptCtx {
        config,
        function,
        types: TypeTranslator::new(config),
        lambda_base: function
            .instance_name
            .as_deref()
            .unwrap_or(&function.name)
            .to_string(),
    };

    let mut signature = Signature {
        params: named_params(&function.params),
        return_type: initial_return_type(function, owner),
    };
    let mut steps: Vec<LambdaStep> = Vec::new();
    for adapter in ADAPTERS {
        if let Some(step) = adapter(&ctx, &signature)? {
            tracing::trace!(function = %function.name, step = %step.name, "adapter applied");
            signature = step.signature();
            steps.push(step);
        }
    }
    if steps.is_empty() && ctx.rule(EffectCategory::ForceLambda) {
        steps.push(params::force_lambda(&ctx, &signature));
    }

    let mut original = function.clone();
    original.params = named_params(&original.params);
    for (name, tag) in steps.iter().flat_map(|s| s.tags.iter()) {
        if let Some(p) = original.params.iter_mut().find(|p| &p.name == name) {
            if p.tag == AdaptationTag::None {
                p.tag = *tag;
            }
        }
    }
    let doc_notes: Vec<&String> = steps.iter().flat_map(|s| s.doc_notes.iter()).collect();
    if !doc_notes.is_empty() {
        let mut doc = original.meta.doc.take().unwrap_or_default();
        for line in doc_notes {
            if !doc.is_empty() {
                doc.push('\n');
            }
            doc.push_str("// ");
            doc.push_str(line);
        }
        original.meta.doc = Some(doc);
    }

    let host_params = host_params(config, &signature.params);
    let host_return = if function.is_constructor() {
        "None".to_string()
    } else {
        ctx.types.host_type(&signature.return_type)
    };

    let plan = if steps.is_empty() {
        None
    } else {
        let mut boxed_types: Vec<BoxedType> = Vec::new();
        for b in steps.iter().flat_map(|s| s.boxed.iter()) {
            if !boxed_types.iter().any(|x| x.name == b.name) {
                boxed_types.push(b.clone());
            }
        }
        Some(AdapterPlan {
            shim_name: String::new(),
            params: signature.params.clone(),
            return_type: signature.return_type.clone(),
            steps,
            boxed_types,
        })
    };

    let return_policy = return_policy(config, function, &signature.return_type);
    let vectorize = !function.is_method() || function.is_static;
    Ok(Adaptation::Adapted(Box::new(AdaptedFunction {
        original,
        scope: scope.clone(),
        owner: owner.cloned(),
        host_name,
        host_params,
        host_return,
        plan,
        vectorize: vectorize && ctx.rule(EffectCategory::Vectorize),
        return_policy,
        notes,
    })))
}

/// Policy named by a `return_value_policy::<name>` comment on the declaration,
/// otherwise `reference` when the function name is listed for its kind of
/// returned indirection.
fn return_policy(config: &Config, function: &FunctionDecl, return_type: &CppType) -> Option<String> {
    if function.is_constructor() {
        return None;
    }
    if let Some(policy) = function.meta.doc.as_deref().and_then(requested_policy) {
        return Some(policy);
    }
    let forced = if return_type.is_pointer() && !return_type.is_c_string() {
        config.reference_policy_for_pointers.matches(&function.name)
    } else if return_type.is_reference() {
        config.reference_policy_for_references.matches(&function.name)
    } else {
        false
    };
    forced.then(|| "reference".to_string())
}

fn requested_policy(doc: &str) -> Option<String> {
    const TOKEN: &str = "return_value_policy::";
    let start = doc.find(TOKEN)? + TOKEN.len();
    let policy: String = doc[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    (!policy.is_empty()).then_some(policy)
}

/// Unnamed parameters get `arg_<i>` so they can be forwarded and bound.
fn named_params(params: &[Parameter]) -> Vec<Parameter> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.name.is_empty() && !p.is_variadic {
                let mut p = p.clone();
                p.name = SmolStr::new(format!("arg_{}", i));
                p
            } else {
                p.clone()
            }
        })
        .collect()
}

fn initial_return_type(function: &FunctionDecl, owner: Option<&Owner>) -> CppType {
    match owner {
        Some(owner) if function.is_constructor() => {
            CppType::simple(&format!("std::unique_ptr<{}>", owner.native_name))
        }
        _ => function.return_type.clone(),
    }
}

/// Host view of a native parameter list.
pub fn host_params(config: &Config, params: &[Parameter]) -> Vec<HostParam> {
    let namer = Namer::new(config);
    let types = TypeTranslator::new(config);
    params
        .iter()
        .filter(|p| !p.is_variadic)
        .map(|p| {
            let native_type = match p.c_array {
                Some(_) => p.ty.with_modifier(TypeModifier::Pointer { is_const: false }),
                None => p.ty.clone(),
            };
            let mut host_type = types.host_type(&native_type);
            let null_default = p.default_value.as_deref().is_some_and(is_null_value);
            if native_type.is_pointer() && null_default && !host_type.starts_with("Optional[") {
                host_type = format!("Optional[{}]", host_type);
            }
            HostParam {
                name: namer.identifier(RuleTarget::ParamName, &p.name),
                native_name: p.name.clone(),
                native_type,
                host_type,
                native_default: p.default_value.as_ref().map(|d| {
                    if is_null_value(d) {
                        "py::none()".to_string()
                    } else {
                        d.clone()
                    }
                }),
                host_default: p.default_value.as_ref().map(|d| types.host_value(d)),
            }
        })
        .collect()
}

pub(crate) fn is_null_value(value: &str) -> bool {
    matches!(value.trim(), "nullptr" | "NULL" | "std::nullopt" | "0L" | "None")
}

pub(crate) fn is_integral(base: &str) -> bool {
    crate::base::constants::INTEGRAL_NATIVE_TYPES.contains(&base)
}
