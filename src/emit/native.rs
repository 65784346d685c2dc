//! Helper classes emitted in the adapter stream.

use crate::compose::{Publicist, Trampoline, TrampolineMethod};
use crate::config::EmitOptions;

pub fn publicist(options: &EmitOptions, publicist: &Publicist) -> String {
    let i1 = options.native_indent(1);
    let mut code = String::new();
    code.push_str("// helper type to expose protected members\n");
    code.push_str(&format!(
        "class {} : public {}\n{{\npublic:\n",
        publicist.name, publicist.class_native
    ));
    for member in &publicist.members {
        code.push_str(&format!("{}using {}::{};\n", i1, publicist.class_native, member));
    }
    code.push_str("};");
    code
}

fn override_method(options: &EmitOptions, trampoline: &Trampoline, method: &TrampolineMethod) -> String {
    let i1 = options.native_indent(1);
    let i2 = options.native_indent(2);
    let i3 = options.native_indent(3);
    let f = &method.function;

    let params: Vec<(String, String)> = f
        .params
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_variadic)
        .map(|(i, p)| {
            let name = if p.name.is_empty() {
                format!("arg_{}", i)
            } else {
                p.name.to_string()
            };
            (p.cast_type_code(), name)
        })
        .collect();
    let declared: Vec<String> = params.iter().map(|(ty, name)| format!("{} {}", ty, name)).collect();
    let constness = if f.is_const { " const" } else { "" };

    let return_type = f.return_type.str_code();
    // the macro splits its arguments on commas
    let macro_return = if return_type.contains(',') {
        format!("PYBIND11_TYPE({})", return_type)
    } else {
        return_type.clone()
    };
    let macro_name = if f.is_pure_virtual {
        "PYBIND11_OVERRIDE_PURE_NAME"
    } else {
        "PYBIND11_OVERRIDE_NAME"
    };

    let mut code = format!(
        "{i1}{} {}({}){} override\n{i1}{{\n{i2}{}(\n",
        return_type,
        f.name,
        declared.join(", "),
        constness,
        macro_name
    );
    code.push_str(&format!("{i3}{}, // return type\n", macro_return));
    code.push_str(&format!("{i3}{}, // parent class\n", trampoline.class_native));
    code.push_str(&format!("{i3}\"{}\", // function name (python)\n", method.host_name));
    if params.is_empty() {
        code.push_str(&format!("{i3}{} // function name (c++)\n", f.name));
    } else {
        code.push_str(&format!("{i3}{}, // function name (c++)\n", f.name));
        let names: Vec<&str> = params.iter().map(|(_, name)| name.as_str()).collect();
        code.push_str(&format!("{i3}{} // params\n", names.join(", ")));
    }
    code.push_str(&format!("{i2});\n{i1}}}\n"));
    code
}

pub fn trampoline(options: &EmitOptions, trampoline: &Trampoline) -> String {
    let i1 = options.native_indent(1);
    let mut code = String::new();
    code.push_str("// helper type to enable overriding virtual methods in python\n");
    code.push_str(&format!(
        "class {} : public {}\n{{\npublic:\n{}using {}::{};\n",
        trampoline.name, trampoline.class_native, i1, trampoline.class_native, trampoline.constructor_name
    ));
    for method in &trampoline.methods {
        code.push('\n');
        code.push_str(&override_method(options, trampoline, method));
    }
    code.push_str("};");
    code
}
