//! Numeric buffers: `(T * values, size_t count)` becomes one numpy array.

use smol_str::SmolStr;

use super::{AdaptCtx, AdaptationKind, CallShape, LambdaStep, Signature};
use crate::base::constants::{NUMERIC_NATIVE_TYPES, numpy_dtype};
use crate::config::{Config, EffectCategory, RuleTarget};
use crate::decl::{AdaptationTag, FunctionDecl, Parameter};
use crate::naming::TypeTranslator;
use crate::error::AdaptError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    /// One of the accepted buffer types
    Fixed(String),
    /// A template parameter, dispatched on the runtime dtype
    Template(SmolStr),
    /// A numeric type outside the accepted set
    Unsupported(String),
}

/// Consecutive buffers sharing one count parameter.
#[derive(Debug)]
struct BufferGroup {
    buffers: Vec<(usize, Element)>,
    count: usize,
    stride: Option<usize>,
}

pub(super) fn adapt_buffers(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Option<LambdaStep>, AdaptError> {
    if !ctx.rule(EffectCategory::BufferAdapt) {
        return Ok(None);
    }
    let groups = find_groups(ctx, sig)?;
    if groups.is_empty() {
        return Ok(None);
    }

    let emit = &ctx.config.options.emit;
    let i1 = emit.native_indent(1);
    let mut input_code: Vec<String> = Vec::new();
    let mut params: Vec<Parameter> = Vec::new();
    let mut tags = Vec::new();
    // index in `sig.params` -> call argument; `None` marks a template cast
    let mut args: Vec<Option<String>> = vec![None; sig.params.len()];
    let mut template_buffers: Vec<(usize, bool)> = Vec::new();
    let mut dispatch_param: Option<String> = None;
    let mut needs_long_aliases = false;

    for (index, param) in sig.params.iter().enumerate() {
        let group = groups.iter().find(|g| {
            g.buffers.iter().any(|(i, _)| *i == index) || g.count == index || g.stride == Some(index)
        });
        let Some(group) = group else {
            params.push(param.clone());
            args[index] = Some(param.name.to_string());
            continue;
        };
        let first = &sig.params[group.buffers[0].0].name;

        if group.count == index {
            args[index] = Some(format!("static_cast<{}>({}_count)", param.ty.str_code(), first));
            tags.push((param.name.clone(), AdaptationTag::Buffer));
            continue;
        }
        if group.stride == Some(index) {
            let name = &param.name;
            params.push(Parameter::new(name.clone(), "int").with_default("-1"));
            input_code.push("// process stride default value (which was a sizeof in C++)".to_string());
            input_code.push(format!("int {first}_stride = {name};"));
            input_code.push(format!("if ({first}_stride == -1)"));
            input_code.push(format!("{i1}{first}_stride = (int){first}.itemsize();"));
            input_code.push(String::new());
            args[index] = Some(format!("static_cast<{}>({}_stride)", param.ty.str_code(), first));
            continue;
        }

        let Some((_, element)) = group.buffers.iter().find(|(i, _)| *i == index) else {
            continue;
        };
        let name = &param.name;
        let is_const = param.ty.is_const;
        let const_prefix = if is_const { "const " } else { "" };
        params.push(Parameter::new(name.clone(), &format!("{}py::array &", const_prefix)));
        tags.push((name.clone(), AdaptationTag::Buffer));

        input_code.push("// Check if the array is 1D and C-contiguous".to_string());
        input_code.push(format!(
            "if (! ({name}.ndim() == 1 && {name}.strides(0) == {name}.itemsize()) )"
        ));
        input_code.push(format!("{i1}throw std::runtime_error(\"The array must be 1D and contiguous\");"));
        input_code.push(String::new());
        input_code.push(format!(
            "// convert py::array to C standard buffer ({})",
            if is_const { "const" } else { "mutable" }
        ));
        if is_const {
            input_code.push(format!("const void * {name}_from_pyarray = {name}.data();"));
        } else {
            input_code.push(format!("void * {name}_from_pyarray = {name}.mutable_data();"));
        }
        if name == first {
            input_code.push(format!("py::ssize_t {name}_count = {name}.shape()[0];"));
        } else {
            input_code.push(format!("if ({name}.shape()[0] != {first}_count)"));
            input_code.push(format!(
                "{i1}throw std::runtime_error(\"Arrays {first} and {name} must have the same length\");"
            ));
        }

        match element {
            Element::Fixed(element) => {
                needs_long_aliases |= element.starts_with("np_");
                let dtype = numpy_dtype(element).map(|(c, _)| c).unwrap_or('?');
                input_code.push(format!("char {name}_type = {name}.dtype().char_();"));
                input_code.push(format!("if ({name}_type != '{dtype}')"));
                input_code.push(format!(
                    "{i1}throw std::runtime_error(\"Bad type! Expected a numpy array of native type {const_prefix}{element} * (dtype '{dtype}') for param {name}\");"
                ));
                args[index] = Some(format!("static_cast<{const_prefix}{element} *>({name}_from_pyarray)"));
            }
            Element::Template(_) => {
                needs_long_aliases = true;
                match &dispatch_param {
                    None => {
                        input_code.push(format!("char {name}_type = {name}.dtype().char_();"));
                        dispatch_param = Some(name.to_string());
                    }
                    Some(selector) => {
                        input_code.push(format!("if ({name}.dtype().char_() != {selector}_type)"));
                        input_code.push(format!(
                            "{i1}throw std::runtime_error(\"Arrays {selector} and {name} must have the same type\");"
                        ));
                    }
                }
                template_buffers.push((index, is_const));
            }
            Element::Unsupported(_) => {}
        }
        input_code.push(String::new());
    }

    if needs_long_aliases {
        let mut aliases = vec![
            "#ifdef _WIN32".to_string(),
            "using np_uint_l = uint32_t;".to_string(),
            "using np_int_l = int32_t;".to_string(),
            "#else".to_string(),
            "using np_uint_l = uint64_t;".to_string(),
            "using np_int_l = int64_t;".to_string(),
            "#endif".to_string(),
            String::new(),
        ];
        aliases.append(&mut input_code);
        input_code = aliases;
    }
    while input_code.last().is_some_and(String::is_empty) {
        input_code.pop();
    }

    let call = match dispatch_param {
        None => CallShape::Args(args.into_iter().map(Option::unwrap_or_default).collect()),
        Some(param) => {
            let mut cases = Vec::new();
            for element in &ctx.config.options.buffer_types {
                let element = element.trim();
                let Some((dtype, _)) = numpy_dtype(element) else {
                    continue;
                };
                let case_args = args
                    .iter()
                    .enumerate()
                    .map(|(i, arg)| match arg {
                        Some(arg) => arg.clone(),
                        None => {
                            let is_const = template_buffers.iter().any(|(b, c)| *b == i && *c);
                            let const_prefix = if is_const { "const " } else { "" };
                            format!(
                                "static_cast<{}{} *>({}_from_pyarray)",
                                const_prefix, element, sig.params[i].name
                            )
                        }
                    })
                    .collect();
                cases.push((dtype, case_args));
            }
            CallShape::Dispatch { param, cases }
        }
    };

    let mut step = LambdaStep::new(AdaptationKind::Buffer, ctx, params, sig.return_type.clone());
    step.input_code = input_code;
    step.call = call;
    step.tags = tags;
    Ok(Some(step))
}

fn find_groups(ctx: &AdaptCtx<'_>, sig: &Signature) -> Result<Vec<BufferGroup>, AdaptError> {
    let params = &sig.params;
    let elements: Vec<Option<Element>> = params.iter().map(|p| buffer_element(ctx, sig, p)).collect();

    let mut groups = Vec::new();
    let mut i = 0;
    while i < params.len() {
        if elements[i].is_none() {
            i += 1;
            continue;
        }
        let mut end = i;
        while end < params.len() && elements[end].is_some() {
            end += 1;
        }
        if end < params.len() && ctx.is_count_param(&params[end]) {
            let mut buffers = Vec::new();
            for (b, element) in elements.iter().enumerate().take(end).skip(i) {
                match element {
                    Some(Element::Unsupported(ty)) => {
                        return Err(AdaptError::unsupported_buffer(&params[b].name, ty));
                    }
                    Some(element) => buffers.push((b, element.clone())),
                    None => {}
                }
            }
            let stride = params
                .get(end + 1)
                .filter(|p| is_stride_param(p))
                .map(|_| end + 1);
            groups.push(BufferGroup {
                buffers,
                count: end,
                stride,
            });
            i = stride.unwrap_or(end) + 1;
        } else {
            i = end;
        }
    }
    Ok(groups)
}

fn buffer_element(ctx: &AdaptCtx<'_>, sig: &Signature, param: &Parameter) -> Option<Element> {
    if param.c_array.is_some() || param.is_variadic || param.ty.modifiers.len() != 1 || !param.ty.is_pointer() {
        return None;
    }
    let base = ctx.resolved_base(&param.ty);
    if ctx.config.is_buffer_type(&base) {
        return Some(Element::Fixed(base));
    }
    if is_dispatchable_template(ctx, sig, &base) {
        return Some(Element::Template(SmolStr::new(&base)));
    }
    if base != "char" && NUMERIC_NATIVE_TYPES.contains(&base.as_str()) {
        return Some(Element::Unsupported(base));
    }
    None
}

/// `T` can be picked from the dtype when only buffer parameters mention it.
fn is_dispatchable_template(ctx: &AdaptCtx<'_>, sig: &Signature, base: &str) -> bool {
    let function = ctx.function;
    if !function.template_params.iter().any(|p| p == base) || !ctx.config.is_buffer_template_type(base) {
        return false;
    }
    if sig.return_type.mentions(base) {
        return false;
    }
    sig.params
        .iter()
        .filter(|p| p.ty.mentions(base))
        .all(|p| p.c_array.is_none() && p.ty.base == base && p.ty.modifiers.len() == 1 && p.ty.is_pointer())
}

/// `int stride = sizeof(float)`
fn is_stride_param(param: &Parameter) -> bool {
    param.name.contains("stride")
        && param.ty.modifiers.is_empty()
        && param
            .default_value
            .as_deref()
            .is_some_and(|d| d.trim_start().starts_with("sizeof"))
}

/// Whether `function` can be bound without instantiation through dtype dispatch.
pub(crate) fn is_buffer_dispatch_template(config: &Config, function: &FunctionDecl) -> bool {
    if !function.is_template() || !config.rules.has(EffectCategory::BufferAdapt, RuleTarget::Function, &function.name) {
        return false;
    }
    let ctx = AdaptCtx {
        config,
        function,
        types: TypeTranslator::new(config),
        lambda_base: function.name.to_string(),
    };
    let sig = Signature {
        params: function.params.clone(),
        return_type: function.return_type.clone(),
    };
    let Ok(groups) = find_groups(&ctx, &sig) else {
        return false;
    };
    // every template parameter must be resolved by some buffer
    function.template_params.iter().all(|t| {
        groups
            .iter()
            .flat_map(|g| g.buffers.iter())
            .any(|(_, e)| matches!(e, Element::Template(name) if name == t))
    })
}
