//! pybind11 registration statements.

use super::doc::{c_string, comment_lines};
use crate::adapt::{BindingStrategy, HostParam, native_callee};
use crate::compose::{BoundFunction, ComposedClass, ComposedConstant, ComposedEnum, ComposedField, ModuleScope};
use crate::config::EmitOptions;
use crate::decl::DeclMeta;

fn doc_arg(options: &EmitOptions, meta: &DeclMeta) -> Option<String> {
    match &meta.doc {
        Some(doc) if !options.exclude_comments => {
            let lines = comment_lines(doc);
            (!lines.is_empty()).then(|| c_string(&lines))
        }
        _ => None,
    }
}

/// `py::arg("a")`, `py::arg("b") = 2`
fn arg(p: &HostParam) -> String {
    match &p.native_default {
        Some(default) => format!("py::arg(\"{}\") = {}", p.name, default),
        None => format!("py::arg(\"{}\")", p.name),
    }
}

fn cast_types(bound: &BoundFunction) -> String {
    bound
        .original()
        .params
        .iter()
        .filter(|p| !p.is_variadic)
        .map(|p| p.cast_type_code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `&ns::f`, `&Owner::m`, or `&Publicist::m` for protected members.
fn member_pointer(bound: &BoundFunction) -> String {
    let f = &bound.function;
    let name = f.original.native_call_name();
    match &f.owner {
        Some(owner) => match &owner.publicist {
            Some(publicist) => format!("&{}::{}", publicist, name),
            None => format!("&{}::{}", owner.native_name, name),
        },
        None => format!("&{}", f.scope.qualify(&name)),
    }
}

/// `[](const Owner & self, int a) { return self.f(a); }`
fn dispatch_lambda(bound: &BoundFunction) -> String {
    let f = &bound.function;
    let original = &f.original;
    let mut params = Vec::new();
    if let Some(owner) = &f.owner {
        if !original.is_static {
            let constness = if original.is_const { "const " } else { "" };
            params.push(format!("{}{} & self", constness, owner.native_name));
        }
    }
    let mut args = Vec::new();
    for p in original.params.iter().filter(|p| !p.is_variadic) {
        params.push(format!("{} {}", p.cast_type_code(), p.name));
        args.push(p.name.to_string());
    }
    format!(
        "[]({}) {{ return {}({}); }}",
        params.join(", "),
        native_callee(f),
        args.join(", ")
    )
}

/// Expression bound by `.def(...)`.
fn function_ref(bound: &BoundFunction) -> String {
    let f = &bound.function;
    let original = &f.original;
    match (bound.strategy, &f.plan) {
        (BindingStrategy::Shim, Some(plan)) => format!("&{}", plan.shim_name),
        (BindingStrategy::OverloadCast, _) => {
            let constness = if original.is_const { ", py::const_" } else { "" };
            format!("py::overload_cast<{}>({}{})", cast_types(bound), member_pointer(bound), constness)
        }
        (BindingStrategy::DispatchLambda, _) => dispatch_lambda(bound),
        _ => member_pointer(bound),
    }
}

/// `var.def("name", ref, py::arg(...), "doc");`
pub fn function(options: &EmitOptions, var: &str, bound: &BoundFunction, vectorized_name: Option<&str>) -> String {
    let f = &bound.function;
    let original = &f.original;

    let mut parts: Vec<String> = Vec::new();
    let method = if original.is_constructor() {
        let init = match (&f.plan, bound.strategy) {
            (Some(plan), BindingStrategy::Shim) => format!("py::init(&{})", plan.shim_name),
            _ => format!("py::init<{}>()", cast_types(bound)),
        };
        parts.push(init);
        "def"
    } else {
        let name = vectorized_name.unwrap_or(&f.host_name);
        parts.push(format!("\"{}\"", name));
        let reference = function_ref(bound);
        if vectorized_name.is_some() {
            parts.push(format!("py::vectorize({})", reference));
        } else {
            parts.push(reference);
        }
        if original.is_method() && original.is_static {
            "def_static"
        } else {
            "def"
        }
    };

    parts.extend(f.host_params.iter().map(arg));
    if let Some(doc) = doc_arg(options, &original.meta) {
        parts.push(doc);
    }
    if let (None, Some(policy)) = (vectorized_name, &f.return_policy) {
        parts.push(format!("py::return_value_policy::{}", policy));
    }
    format!("{}.{}({});", var, method, parts.join(", "))
}

/// Named constructor built from the struct's fields.
pub fn default_constructor(options: &EmitOptions, var: &str, class: &ComposedClass, params: &[HostParam]) -> String {
    if params.is_empty() {
        return format!("{}.def(py::init<>());", var);
    }
    let i1 = options.native_indent(1);
    let lambda_params: Vec<String> = params
        .iter()
        .map(|p| format!("{} {}", p.native_type.str_code(), p.native_name))
        .collect();
    let mut code = format!(
        "{}.def(py::init([]({}) {{\n{}auto r = std::make_unique<{}>();\n",
        var,
        lambda_params.join(", "),
        i1,
        class.native_name
    );
    for p in params {
        code.push_str(&format!("{}r->{} = {};\n", i1, p.native_name, p.native_name));
    }
    code.push_str(&format!("{}return r;\n}})", i1));
    for p in params {
        code.push_str(", ");
        code.push_str(&arg(p));
    }
    code.push_str(");");
    code
}

/// `auto var = py::class_<Q, Bases..., Trampoline>(parent, "Name", "doc");`
pub fn class(options: &EmitOptions, var: &str, parent: &str, class: &ComposedClass) -> String {
    let mut template_args = vec![class.native_name.clone()];
    template_args.extend(class.bases.iter().cloned());
    if let Some(trampoline) = &class.trampoline {
        template_args.push(trampoline.name.clone());
    }
    if class.protocols.held_as_shared {
        template_args.push(format!("std::shared_ptr<{}>", class.native_name));
    }
    let mut args = vec![parent.to_string(), format!("\"{}\"", class.host_name)];
    if class.protocols.dynamic_attributes {
        args.push("py::dynamic_attr()".to_string());
    }
    if let Some(doc) = doc_arg(options, &class.meta) {
        args.push(doc);
    }
    format!(
        "auto {} = py::class_<{}>({});",
        var,
        template_args.join(", "),
        args.join(", ")
    )
}

/// `__copy__` or `__deepcopy__` through the copy constructor.
pub fn copy(var: &str, class: &ComposedClass, deep: bool) -> String {
    let q = &class.native_name;
    if deep {
        format!(
            "{}.def(\"__deepcopy__\", [](const {} & self, py::dict) {{ return {}(self); }}, py::arg(\"memo\"));",
            var, q, q
        )
    } else {
        format!("{}.def(\"__copy__\", [](const {} & self) {{ return {}(self); }});", var, q, q)
    }
}

/// `__iter__` over `begin()`/`end()`, kept alive by the container, and `__len__`.
pub fn iterable(var: &str, class: &ComposedClass) -> String {
    let q = &class.native_name;
    format!(
        "{var}.def(\"__iter__\", [](const {q} & v) {{ return py::make_iterator(v.begin(), v.end()); }}, py::keep_alive<0, 1>());\n\
         {var}.def(\"__len__\", [](const {q} & v) {{ return v.size(); }});"
    )
}

pub fn field(options: &EmitOptions, var: &str, class: &ComposedClass, field: &ComposedField) -> String {
    let holder = field.publicist.as_deref().unwrap_or(&class.native_name);
    let doc = doc_arg(options, &field.meta);

    if let Some(n) = field.array_len {
        let element = field.ty.unqualified().str_code();
        let (method, self_param, access) = if field.is_static {
            (
                "def_property_readonly_static",
                "py::object /* cls */".to_string(),
                format!("{}::{}", holder, field.native_name),
            )
        } else {
            (
                "def_property_readonly",
                format!("{} & self", class.native_name),
                format!("self.{}", field.native_name),
            )
        };
        let mut code = format!(
            "{}.{}(\"{}\", []({}) -> py::array {{ auto dtype = py::dtype(py::format_descriptor<{}>::format()); auto base = py::array(dtype, {{{}}}, {{sizeof({})}}); return py::array(dtype, {{{}}}, {{sizeof({})}}, {}, base); }}",
            var, method, field.host_name, self_param, element, n, element, n, element, access
        );
        if let Some(doc) = doc {
            code.push_str(", ");
            code.push_str(&doc);
        }
        code.push_str(");");
        return code;
    }

    let method = match (field.read_only, field.is_static) {
        (false, false) => "def_readwrite",
        (true, false) => "def_readonly",
        (false, true) => "def_readwrite_static",
        (true, true) => "def_readonly_static",
    };
    let mut args = vec![
        format!("\"{}\"", field.host_name),
        format!("&{}::{}", holder, field.native_name),
    ];
    args.extend(doc);
    format!("{}.{}({});", var, method, args.join(", "))
}

pub fn enumeration(options: &EmitOptions, parent: &str, arithmetic: bool, decl: &ComposedEnum) -> String {
    let i1 = options.native_indent(1);
    let mut args = vec![parent.to_string(), format!("\"{}\"", decl.host_name)];
    if arithmetic && !decl.is_scoped {
        args.push("py::arithmetic()".to_string());
    }
    args.extend(doc_arg(options, &decl.meta));
    let mut code = format!("py::enum_<{}>({})", decl.native_name, args.join(", "));
    for value in &decl.values {
        code.push('\n');
        code.push_str(&i1);
        let mut value_args = vec![format!("\"{}\"", value.host_name), value.native.clone()];
        value_args.extend(doc_arg(options, &value.meta));
        code.push_str(&format!(".value({})", value_args.join(", ")));
    }
    code.push(';');
    code
}

pub fn constant(var: &str, constant: &ComposedConstant) -> String {
    format!("{}.attr(\"{}\") = {};", var, constant.host_name, constant.native)
}

pub fn namespace(options: &EmitOptions, var: &str, parent: &str, scope: &ModuleScope) -> String {
    let doc = doc_arg(options, &scope.meta).unwrap_or_else(|| "\"\"".to_string());
    format!(
        "py::module_ {} = {}.def_submodule(\"{}\", {});",
        var, parent, scope.host_name, doc
    )
}
