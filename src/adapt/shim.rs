//! Rendering of adapter plans into native shim functions.

use super::{AdaptedFunction, CallShape, LambdaStep};
use crate::config::EmitOptions;
use crate::decl::Parameter;

/// Expression calling the native declaration from inside a shim.
pub fn native_callee(function: &AdaptedFunction) -> String {
    let f = &function.original;
    let call_name = f.native_call_name();
    match &function.owner {
        Some(owner) if f.is_constructor() => format!("std::make_unique<{}>", owner.native_name),
        Some(owner) if f.is_static => format!("{}::{}", owner.native_name, call_name),
        Some(owner) => match &owner.publicist {
            Some(publicist) => format!("(self.*&{}::{})", publicist, call_name),
            None => format!("self.{}", call_name),
        },
        None => function.scope.qualify(&call_name),
    }
}

fn param_code(param: &Parameter) -> String {
    let mut s = format!("{} {}", param.ty.str_code(), param.name);
    if let Some(array) = &param.c_array {
        s.push_str(&array.to_string());
    }
    s
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    if !line.is_empty() {
        out.push_str(indent);
        out.push_str(line);
    }
    out.push('\n');
}

fn render_step(step: &LambdaStep, callee: &str, callee_is_void: bool, options: &EmitOptions) -> String {
    let i1 = options.native_indent(1);
    let i2 = options.native_indent(2);
    let mut out = String::new();

    let params: Vec<String> = step.params.iter().map(param_code).collect();
    let return_part = if step.return_type.is_void() {
        String::new()
    } else {
        format!(" -> {}", step.return_type.str_code())
    };
    push_line(&mut out, &i1, &format!("auto {} = [&]({}){}", step.name, params.join(", "), return_part));
    push_line(&mut out, &i1, "{");
    for line in &step.input_code {
        push_line(&mut out, &i2, line);
    }
    if !step.input_code.is_empty() {
        out.push('\n');
    }

    match &step.call {
        CallShape::Args(args) => {
            let call = format!("{}({})", callee, args.join(", "));
            if callee_is_void {
                push_line(&mut out, &i2, &format!("{};", call));
            } else {
                push_line(&mut out, &i2, &format!("auto lambda_result = {};", call));
            }
            for line in &step.output_code {
                push_line(&mut out, &i2, line);
            }
            match &step.return_expr {
                Some(expr) => push_line(&mut out, &i2, &format!("return {};", expr)),
                None if !callee_is_void => push_line(&mut out, &i2, "return lambda_result;"),
                None => {}
            }
        }
        CallShape::Dispatch { param, cases } => {
            let i3 = options.native_indent(3);
            for (i, (dtype, args)) in cases.iter().enumerate() {
                let keyword = if i == 0 { "if" } else { "else if" };
                push_line(&mut out, &i2, &format!("{} ({}_type == '{}')", keyword, param, dtype));
                push_line(&mut out, &i3, &format!("return {}({});", callee, args.join(", ")));
            }
            push_line(&mut out, &i2, "// If we reach this point, the array type is not supported!");
            push_line(&mut out, &i2, "else");
            push_line(
                &mut out,
                &i3,
                &format!(
                    "throw std::runtime_error(std::string(\"Bad array type ('\") + {}_type + \"') for param {}\");",
                    param, param
                ),
            );
        }
    }
    push_line(&mut out, &i1, "};");
    out
}

/// The shim of an adapted declaration, or `None` when it binds directly.
pub fn render_shim(function: &AdaptedFunction, options: &EmitOptions) -> Option<String> {
    let plan = function.plan.as_ref()?;
    let f = &function.original;
    let i1 = options.native_indent(1);

    let mut params: Vec<String> = Vec::new();
    if let Some(owner) = &function.owner {
        if f.is_method() && !f.is_static {
            let constness = if f.is_const { "const " } else { "" };
            params.push(format!("{}{} & self", constness, owner.native_name));
        }
    }
    params.extend(plan.params.iter().map(param_code));

    let mut out = String::new();
    out.push_str(&format!("// {}\n", f.signature_code()));
    out.push_str(&format!(
        "static {} {}({})\n{{\n",
        plan.return_type.str_code(),
        plan.shim_name,
        params.join(", ")
    ));

    let native = native_callee(function);
    let mut callee = native.as_str();
    let mut callee_is_void = !f.is_constructor() && f.return_type.is_void();
    for step in &plan.steps {
        out.push_str(&render_step(step, callee, callee_is_void, options));
        out.push('\n');
        callee = &step.name;
        callee_is_void = step.return_type.is_void();
    }

    let args: Vec<&str> = plan.params.iter().map(|p| p.name.as_str()).collect();
    let call = format!("{}({})", callee, args.join(", "));
    if plan.return_type.is_void() {
        push_line(&mut out, &i1, &format!("{};", call));
    } else {
        push_line(&mut out, &i1, &format!("return {};", call));
    }
    out.push('}');
    Some(out)
}
