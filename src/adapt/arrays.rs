//! Fixed size C arrays.
//!
//! `const float v[3]` becomes `const std::array<float, 3> & v`; a modifiable
//! `float v[3]` becomes three boxed parameters copied in and out of a local
//! array around the call.

use super::{AdaptCtx, AdaptationKind, BoxedType, CallShape, LambdaStep, Signature};
use crate::base::constants::PYTHON_IMMUTABLE_NATIVE_TYPES;
use crate::decl::{AdaptationTag, CArray, CppType, Parameter};
use crate::error::AdaptError;

pub(super) fn adapt_c_arrays(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    let options = &ctx.config.options;
    let mut changed = false;
    let mut params = Vec::new();
    let mut args = Vec::new();
    let mut input_code = Vec::new();
    let mut output_code = Vec::new();
    let mut boxed = Vec::new();
    let mut tags = Vec::new();

    for (index, param) in sig.params.iter().enumerate() {
        let Some(array) = &param.c_array else {
            params.push(param.clone());
            args.push(param.name.to_string());
            continue;
        };
        let name = &param.name;
        let is_const = param.ty.is_const;
        let size = match array {
            CArray::Fixed(n) => Some(*n as i64),
            CArray::Symbolic(symbol) => Some(ctx.config.constant(symbol).ok_or_else(|| {
                AdaptError::UnresolvedArrayDimension {
                    param: name.to_string(),
                    dimension: symbol.to_string(),
                }
            })?),
            CArray::Unsized if is_const || !param.ty.modifiers.is_empty() => None,
            CArray::Unsized => {
                let counted = sig.params.get(index + 1).is_some_and(|c| ctx.is_count_param(c));
                if !options.c_array_modifiable_to_boxed || counted {
                    None
                } else {
                    return Err(AdaptError::invalid_array_size(name, "modifiable array has no declared size"));
                }
            }
        };
        let Some(size) = size else {
            params.push(param.clone());
            args.push(name.to_string());
            continue;
        };
        if size <= 0 {
            return Err(AdaptError::invalid_array_size(name, format!("array size must be positive, got {}", size)));
        }
        let size = size as usize;
        if let Some(count) = sig.params.get(index + 1).filter(|c| ctx.is_count_param(c)) {
            return Err(AdaptError::ArrayBoundsConflict {
                param: name.to_string(),
                size,
                count_param: count.name.to_string(),
            });
        }

        let element = param.ty.with_const(false);
        if is_const && options.c_array_const_to_std_array {
            changed = true;
            params.push(Parameter::new(
                name.clone(),
                &format!("const std::array<{}, {}> &", element.str_code(), size),
            ));
            args.push(format!("{name}.data()"));
            tags.push((name.clone(), AdaptationTag::FixedArray));
        } else if !is_const && options.c_array_modifiable_to_boxed && element.modifiers.is_empty() {
            if size > options.c_array_modifiable_max_size {
                return Err(AdaptError::invalid_array_size(
                    name,
                    format!(
                        "modifiable array of {} elements exceeds the maximum of {}",
                        size, options.c_array_modifiable_max_size
                    ),
                ));
            }
            changed = true;
            let resolved = ctx.resolved_base(&element);
            let boxed_type = PYTHON_IMMUTABLE_NATIVE_TYPES
                .contains(&resolved.as_str())
                .then(|| BoxedType::new(&resolved, ctx.types.host_type(&CppType::simple(&resolved))));
            input_code.push(format!("{} {}_raw[{}];", element.str_code(), name, size));
            for i in 0..size {
                let item = format!("{name}_{i}");
                match &boxed_type {
                    Some(b) => {
                        params.push(Parameter::new(item.as_str(), &format!("{} &", b.name)));
                        input_code.push(format!("{name}_raw[{i}] = {item}.value;"));
                        output_code.push(format!("{item}.value = {name}_raw[{i}];"));
                    }
                    None => {
                        params.push(Parameter::new(item.as_str(), &format!("{} &", element.str_code())));
                        input_code.push(format!("{name}_raw[{i}] = {item};"));
                        output_code.push(format!("{item} = {name}_raw[{i}];"));
                    }
                }
            }
            input_code.push(String::new());
            args.push(format!("{name}_raw"));
            if let Some(b) = boxed_type {
                boxed.push(b);
            }
            tags.push((name.clone(), AdaptationTag::FixedArray));
        } else {
            params.push(param.clone());
            args.push(name.to_string());
        }
    }
    if !changed {
        return Ok(None);
    }
    if input_code.last().is_some_and(String::is_empty) {
        input_code.pop();
    }

    let mut step = LambdaStep::new(AdaptationKind::CArray, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = CallShape::Args(args);
    step.output_code = output_code;
    step.boxed = boxed;
    step.tags = tags;
    Ok(Some(step))
}
