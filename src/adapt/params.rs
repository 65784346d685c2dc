//! Parameter-level adapters that need no boxing: excluded parameters,
//! mutable defaults, optional strings, C string lists, variadic formats and
//! forced lambdas.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{AdaptCtx, AdaptationKind, CallShape, LambdaStep, Signature, is_integral, is_null_value};
use crate::base::constants::PYTHON_IMMUTABLE_NATIVE_TYPES;
use crate::config::{Config, RuleTarget};
use crate::decl::{AdaptationTag, CArray, FunctionDecl, Parameter, TypeModifier};
use crate::diagnostics::codes;
use crate::error::AdaptError;
use crate::naming::is_valid_identifier;

/// Numeric, string and character literals.
static IMMUTABLE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:[-+]?(?:0[xXbBoO][0-9A-Fa-f']+|[0-9][0-9']*\.?[0-9]*(?:[eE][-+]?[0-9]+)?|\.[0-9]+(?:[eE][-+]?[0-9]+)?)[uUlLfF]*|"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)+')$"#,
    )
    .expect("static regex")
});

/// Reason to leave `function` out when an excluded parameter type has no
/// default. Excluded parameter names without default are kept, with a note.
pub(super) fn excluded_by_param_type(
    config: &Config,
    function: &FunctionDecl,
    notes: &mut Vec<(&'static str, String)>,
) -> Option<String> {
    for param in function.params.iter().filter(|p| !p.is_variadic) {
        let ty = param.ty.str_code();
        if !param.has_default() && config.rules.is_excluded(RuleTarget::ParamType, &ty) {
            return Some(format!("parameter '{}' has excluded type '{}'", param.name, ty));
        }
        if !param.has_default() && config.rules.is_excluded(RuleTarget::ParamName, &param.name) {
            notes.push((
                codes::EXCLUDED_PARAMETER_KEPT,
                format!("parameter '{}' is excluded but has no default value; kept", param.name),
            ));
        }
    }
    None
}

fn is_excluded_param(config: &Config, param: &Parameter) -> bool {
    !param.is_variadic
        && param.has_default()
        && (config.rules.is_excluded(RuleTarget::ParamName, &param.name)
            || config.rules.is_excluded(RuleTarget::ParamType, &param.ty.str_code()))
}

pub(super) fn adapt_excluded_params(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    if !sig.params.iter().any(|p| is_excluded_param(ctx.config, p)) {
        return Ok(None);
    }
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut tags = Vec::new();
    for param in &sig.params {
        if is_excluded_param(ctx.config, param) {
            args.push(param.default_value.clone().unwrap_or_default());
            tags.push((param.name.clone(), AdaptationTag::Excluded));
        } else {
            args.push(param.name.to_string());
            params.push(param.clone());
        }
    }
    let mut step = LambdaStep::new(AdaptationKind::ExcludeParams, ctx, params, sig.return_type.clone());
    step.call = CallShape::Args(args);
    step.tags = tags;
    Ok(Some(step))
}

/// Whether a default value may be shared and mutated across host calls once
/// evaluated a single time: anything but literals, null values, trivial
/// constructors of immutable types and enumerators of the parameter's type.
pub(super) fn is_mutable_default(value: &str, type_base: &str) -> bool {
    let value = value.trim();
    if IMMUTABLE_LITERAL.is_match(value) || is_null_value(value) || matches!(value, "true" | "false" | "nullopt") {
        return false;
    }
    if let Some(ctor) = value.strip_suffix("()") {
        if PYTHON_IMMUTABLE_NATIVE_TYPES.contains(&ctor.trim()) {
            return false;
        }
    }
    let enumerator = value.strip_prefix(type_base).and_then(|rest| rest.strip_prefix("::"));
    !enumerator.is_some_and(is_valid_identifier)
}

/// `const Foo & foo = Foo()` → `const std::optional<Foo> & foo = std::nullopt`,
/// the default being built on each call.
pub(super) fn adapt_mutable_defaults(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    let function = ctx.function;
    if function.is_constructor() || !ctx.config.mutable_default_functions.matches(&function.name) {
        return Ok(None);
    }
    let is_candidate = |p: &Parameter| {
        let Some(value) = p.default_value.as_deref() else {
            return false;
        };
        let by_value_or_const_ref =
            p.ty.modifiers.is_empty() || (p.ty.is_const && p.ty.modifiers == [TypeModifier::Reference]);
        p.c_array.is_none()
            && !p.is_variadic
            && by_value_or_const_ref
            && !PYTHON_IMMUTABLE_NATIVE_TYPES.contains(&ctx.resolved_base(&p.ty).as_str())
            && is_mutable_default(value, &p.ty.base)
    };
    if !sig.params.iter().any(is_candidate) {
        return Ok(None);
    }

    let options = &ctx.config.options;
    let i1 = options.emit.native_indent(1);
    let i2 = options.emit.native_indent(2);
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut doc_notes = Vec::new();
    for param in &sig.params {
        let Some(value) = param.default_value.as_deref().filter(|_| is_candidate(param)) else {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        };
        let name = &param.name;
        let value_type = param.ty.unqualified().str_code();
        params.push(
            Parameter::new(name.clone(), &format!("const std::optional<{}> &", value_type)).with_default("std::nullopt"),
        );
        input_code.push(format!("const {value_type} & {name}_or_default = [&]() -> const {value_type} {{"));
        input_code.push(format!("{i1}if ({name}.has_value())"));
        input_code.push(format!("{i2}return {name}.value();"));
        input_code.push(format!("{i1}else"));
        input_code.push(format!("{i2}return {value};"));
        input_code.push("}();".to_string());
        input_code.push(String::new());
        args.push(format!("{name}_or_default"));
        doc_notes.push(format!(
            "If {} is None, then its default value will be: {}",
            name,
            ctx.types.host_value(value)
        ));
    }
    input_code.pop();

    let mut step = LambdaStep::new(AdaptationKind::MutableDefault, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    if options.fn_params_adapt_mutable_param_with_default_value_add_comment {
        step.doc_notes = ["---", "Python bindings defaults:"]
            .into_iter()
            .map(str::to_string)
            .chain(doc_notes)
            .collect();
    }
    Ok(Some(step))
}

/// `const char * label = nullptr` → `std::optional<std::string> label = std::nullopt`
pub(super) fn adapt_optional_string(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    let is_candidate = |p: &Parameter| {
        p.c_array.is_none() && p.ty.is_c_string() && p.default_value.as_deref().is_some_and(is_null_value)
    };
    if !ctx.config.options.const_char_pointer_default_null || !sig.params.iter().any(is_candidate) {
        return Ok(None);
    }

    let i1 = ctx.config.options.emit.native_indent(1);
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    for param in &sig.params {
        if !is_candidate(param) {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        }
        let name = &param.name;
        params.push(Parameter::new(name.clone(), "std::optional<std::string>").with_default("std::nullopt"));
        input_code.push(format!("const char * {name}_adapt_default_null = nullptr;"));
        input_code.push(format!("if ({name}.has_value())"));
        input_code.push(format!("{i1}{name}_adapt_default_null = {name}.value().c_str();"));
        input_code.push(String::new());
        args.push(format!("{name}_adapt_default_null"));
    }
    input_code.pop();

    let mut step = LambdaStep::new(AdaptationKind::OptionalString, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    Ok(Some(step))
}

/// `const char ** items` and `const char * items[]`
fn is_c_string_list(param: &Parameter) -> bool {
    if param.ty.base != "char" || !param.ty.is_const || param.is_variadic {
        return false;
    }
    match &param.c_array {
        Some(CArray::Unsized) => param.ty.pointer_depth() == 1 && param.ty.modifiers.len() == 1,
        Some(_) => false,
        None => param.ty.pointer_depth() == 2 && param.ty.modifiers.len() == 2,
    }
}

fn string_list_input(name: &str, null_terminated: bool, i1: &str) -> Vec<String> {
    let mut code = vec![
        format!("std::vector<const char *> {name}_ptrs;"),
        format!("for (const auto& v: {name})"),
        format!("{i1}{name}_ptrs.push_back(v.c_str());"),
    ];
    if null_terminated {
        code.push(format!("{name}_ptrs.push_back(nullptr);"));
    }
    code
}

/// `(const char ** items, int nb_items)` → `const std::vector<std::string> & items`
pub(super) fn adapt_string_list_with_count(
    ctx: &AdaptCtx<'_>,
    sig: &Signature,
) -> Result<Option<LambdaStep>, AdaptError> {
    if !ctx.config.options.c_string_list {
        return Ok(None);
    }
    let with_count = |i: usize| {
        is_c_string_list(&sig.params[i])
            && sig.params.get(i + 1).is_some_and(|c| {
                c.c_array.is_none() && c.ty.modifiers.is_empty() && is_integral(&ctx.resolved_base(&c.ty))
            })
    };
    if !(0..sig.params.len()).any(with_count) {
        return Ok(None);
    }

    let i1 = ctx.config.options.emit.native_indent(1);
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut tags = Vec::new();
    let mut i = 0;
    while i < sig.params.len() {
        let param = &sig.params[i];
        if !with_count(i) {
            params.push(param.clone());
            args.push(param.name.to_string());
            i += 1;
            continue;
        }
        let name = &param.name;
        let count = &sig.params[i + 1];
        params.push(Parameter::new(name.clone(), "const std::vector<std::string> &"));
        input_code.extend(string_list_input(name, false, &i1));
        input_code.push(format!(
            "{} {}_count = static_cast<{}>({}.size());",
            count.ty.str_code(),
            name,
            count.ty.str_code(),
            name
        ));
        input_code.push(String::new());
        args.push(format!("{name}_ptrs.data()"));
        args.push(format!("{name}_count"));
        tags.push((name.clone(), AdaptationTag::CStringList));
        tags.push((count.name.clone(), AdaptationTag::CStringList));
        i += 2;
    }
    input_code.pop();

    let mut step = LambdaStep::new(AdaptationKind::StringListWithCount, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    step.tags = tags;
    Ok(Some(step))
}

/// A null-terminated `const char **` with no count.
pub(super) fn adapt_string_list(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    if !ctx.config.options.c_string_list || !sig.params.iter().any(is_c_string_list) {
        return Ok(None);
    }
    let i1 = ctx.config.options.emit.native_indent(1);
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut tags = Vec::new();
    for param in &sig.params {
        if !is_c_string_list(param) {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        }
        let name = &param.name;
        params.push(Parameter::new(name.clone(), "const std::vector<std::string> &"));
        input_code.extend(string_list_input(name, true, &i1));
        input_code.push(String::new());
        args.push(format!("{name}_ptrs.data()"));
        tags.push((name.clone(), AdaptationTag::CStringList));
    }
    input_code.pop();

    let mut step = LambdaStep::new(AdaptationKind::StringList, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    step.tags = tags;
    Ok(Some(step))
}

/// `void log(int level, const char * fmt, ...)` → `log(level, "%s", fmt)`
pub(super) fn adapt_variadic(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    let Some(variadic) = sig.params.iter().position(|p| p.is_variadic) else {
        return Ok(None);
    };
    if !ctx.config.options.variadic_format {
        return Ok(None);
    }
    let format_index = variadic
        .checked_sub(1)
        .filter(|&i| sig.params[i].ty.is_c_string() && sig.params[i].c_array.is_none())
        .ok_or(AdaptError::MissingFormatParameter)?;

    let mut params = Vec::new();
    let mut args = Vec::new();
    for (i, param) in sig.params.iter().enumerate() {
        if i == variadic {
            continue;
        }
        params.push(param.clone());
        if i == format_index {
            args.push("\"%s\"".to_string());
        }
        args.push(param.name.to_string());
    }
    let mut step = LambdaStep::new(AdaptationKind::Variadic, ctx, params, sig.return_type.clone());
    step.call = CallShape::Args(args);
    step.tags = vec![(sig.params[variadic].name.clone(), AdaptationTag::Variadic)];
    Ok(Some(step))
}

/// A pass-through lambda, for declarations that must go through a shim.
pub(super) fn force_lambda(ctx: &AdaptCtx<'_>, sig: &Signature) -> LambdaStep {
    let mut step = LambdaStep::new(AdaptationKind::ForceLambda, ctx, sig.params.clone(), sig.return_type.clone());
    step.call = CallShape::Args(sig.params.iter().map(|p| p.name.to_string()).collect());
    step
}
