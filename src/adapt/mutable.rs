//! Mutable scalar parameters (`int * value`, `float & value`).
//!
//! Two strategies, chosen per function by rule: promote the parameter to a
//! return value, or keep it and wrap it in a boxed type.

use super::{AdaptCtx, AdaptationKind, BoxedType, CallShape, LambdaStep, Signature, is_null_value};
use crate::config::{EffectCategory, OutputFlagPolicy};
use crate::decl::{AdaptationTag, CppType, Parameter};
use crate::error::AdaptError;

fn is_nullable_pointer(param: &Parameter) -> bool {
    param.ty.is_pointer() && param.default_value.as_deref().is_some_and(is_null_value)
}

/// A `bool` output that the flag policy keeps as a parameter.
fn is_kept_flag(ctx: &AdaptCtx<'_>, param: &Parameter) -> bool {
    ctx.config.options.output_flag_policy == OutputFlagPolicy::KeepAsParameter && ctx.resolved_base(&param.ty) == "bool"
}

/// `bool get(int * value)` → `std::tuple<bool, int> get()`
pub(super) fn adapt_output_to_return(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    if !ctx.rule(EffectCategory::OutputToReturn) {
        return Ok(None);
    }
    let is_output = |p: &Parameter| ctx.is_mutable_immutable(p) && !is_kept_flag(ctx, p);
    if !sig.params.iter().any(is_output) {
        return Ok(None);
    }

    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut outputs: Vec<(String, CppType)> = Vec::new();
    let mut tags = Vec::new();
    for param in &sig.params {
        if !is_output(param) {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        }
        let name = &param.name;
        let value_type = param.ty.pointee().with_const(false);
        input_code.push(format!("{} {}{{}};", value_type.str_code(), name));
        if param.ty.is_pointer() {
            input_code.push(format!(
                "{} {}_adapt_modifiable = & {};",
                param.ty.with_const(false).str_code(),
                name,
                name
            ));
            args.push(format!("{name}_adapt_modifiable"));
        } else {
            args.push(name.to_string());
        }
        outputs.push((name.to_string(), value_type));
        tags.push((name.clone(), AdaptationTag::BoxedReference));
    }

    let callee_is_void = sig.return_type.is_void();
    let mut types: Vec<String> = Vec::new();
    let mut values: Vec<String> = Vec::new();
    if !callee_is_void {
        types.push(sig.return_type.str_code());
        values.push("lambda_result".to_string());
    }
    for (name, ty) in &outputs {
        types.push(ty.str_code());
        values.push(name.clone());
    }
    let (return_type, return_expr) = if types.len() == 1 {
        (CppType::parse(&types[0]), values[0].clone())
    } else {
        (
            CppType::simple(&format!("std::tuple<{}>", types.join(", "))),
            format!("std::make_tuple({})", values.join(", ")),
        )
    };

    let mut step = LambdaStep::new(AdaptationKind::OutputToReturn, ctx, params, return_type);
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    step.return_expr = Some(return_expr);
    step.tags = tags;
    Ok(Some(step))
}

/// `void inc(int * value)` → `void inc(BoxedInt & value)`
pub(super) fn adapt_boxing(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    let boxes_all = ctx.rule(EffectCategory::Box);
    let boxes_flags = ctx.rule(EffectCategory::OutputToReturn);
    let is_boxed = |p: &Parameter| {
        ctx.is_mutable_immutable(p) && (boxes_all || (boxes_flags && is_kept_flag(ctx, p)))
    };
    if !sig.params.iter().any(is_boxed) {
        return Ok(None);
    }

    let i1 = ctx.config.options.emit.native_indent(1);
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut boxed: Vec<BoxedType> = Vec::new();
    let mut tags = Vec::new();
    for param in &sig.params {
        if !is_boxed(param) {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        }
        let name = &param.name;
        let resolved = ctx.resolved_base(&param.ty);
        let boxed_type = BoxedType::new(&resolved, ctx.types.host_type(&CppType::simple(&resolved)));
        let value_type = param.ty.pointee().with_const(false).str_code();

        if is_nullable_pointer(param) {
            params.push(Parameter::new(name.clone(), &format!("{} *", boxed_type.name)).with_default("nullptr"));
            input_code.push(format!("{value_type} * {name}_boxed_value = nullptr;"));
            input_code.push(format!("if ({name} != nullptr)"));
            input_code.push(format!("{i1}{name}_boxed_value = & ({name}->value);"));
        } else if param.ty.is_pointer() {
            params.push(Parameter::new(name.clone(), &format!("{} &", boxed_type.name)));
            input_code.push(format!("{value_type} * {name}_boxed_value = & ({name}.value);"));
        } else {
            params.push(Parameter::new(name.clone(), &format!("{} &", boxed_type.name)));
            input_code.push(format!("{value_type} & {name}_boxed_value = {name}.value;"));
        }
        args.push(format!("{name}_boxed_value"));
        tags.push((name.clone(), AdaptationTag::BoxedReference));
        if !boxed.iter().any(|b| b.name == boxed_type.name) {
            boxed.push(boxed_type);
        }
    }

    let mut step = LambdaStep::new(AdaptationKind::Boxing, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    step.boxed = boxed;
    step.tags = tags;
    Ok(Some(step))
}
