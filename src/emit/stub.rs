//! Python stub fragments.
//!
//! Fragments are rendered relative to their own depth; the assembler adds
//! the indentation of the enclosing classes.

use super::Placement;
use super::doc::{comment_lines, docstring};
use crate::adapt::HostParam;
use crate::compose::{BoundFunction, ComposedClass, ComposedConstant, ComposedEnum, ComposedField, ModuleScope};
use crate::config::EmitOptions;
use crate::decl::DeclMeta;

fn doc_lines(options: &EmitOptions, meta: &DeclMeta) -> Vec<String> {
    match &meta.doc {
        Some(doc) if !options.exclude_comments => comment_lines(doc),
        _ => Vec::new(),
    }
}

fn push_location(options: &EmitOptions, meta: &DeclMeta, lines: &mut Vec<String>) {
    if options.show_location && meta.location.is_known() {
        lines.push(format!("# {}", meta.location.display_short(options.location_parent_folders)));
    }
}

fn push_docstring(options: &EmitOptions, meta: &DeclMeta, lines: &mut Vec<String>) {
    let doc = doc_lines(options, meta);
    if !doc.is_empty() {
        let i1 = options.stub_indent(1);
        lines.push(format!("{}{}", i1, docstring(&doc, &i1)));
    }
}

fn param(p: &HostParam, vectorized: bool) -> String {
    let host_type = if vectorized && matches!(p.host_type.as_str(), "int" | "float") {
        "np.ndarray"
    } else {
        p.host_type.as_str()
    };
    match &p.host_default {
        Some(default) => format!("{}: {} = {}", p.name, host_type, default),
        None => format!("{}: {}", p.name, host_type),
    }
}

/// `def name(...) -> ret:` with decorators, docstring and `pass`.
pub fn function(options: &EmitOptions, bound: &BoundFunction, placement: Placement, vectorized_name: Option<&str>) -> String {
    let f = &bound.function;
    let original = &f.original;
    let vectorized = vectorized_name.is_some();
    let mut lines = Vec::new();

    push_location(options, &original.meta, &mut lines);
    if options.show_original_signature && f.is_adapted() && !vectorized {
        lines.push(format!("# C++: {}", original.signature_code()));
    }
    let in_class = placement == Placement::Class;
    if placement == Placement::Namespace || (in_class && original.is_static) {
        lines.push("@staticmethod".to_string());
    }
    if bound.overloaded && !vectorized {
        lines.push("@overload".to_string());
    }

    let mut params = Vec::with_capacity(f.host_params.len() + 1);
    if in_class && !original.is_static {
        params.push("self".to_string());
    }
    params.extend(f.host_params.iter().map(|p| param(p, vectorized)));
    let returns = if vectorized && f.host_return != "None" {
        "np.ndarray"
    } else {
        f.host_return.as_str()
    };
    lines.push(format!(
        "def {}({}) -> {}:",
        vectorized_name.unwrap_or(&f.host_name),
        params.join(", "),
        returns
    ));
    push_docstring(options, &original.meta, &mut lines);
    lines.push(format!("{}pass", options.stub_indent(1)));
    lines.join("\n")
}

/// `def __init__(self, x: int = int(), ...) -> None:` of a struct without
/// user constructor.
pub fn default_constructor(options: &EmitOptions, params: &[HostParam]) -> String {
    let mut all = vec!["self".to_string()];
    all.extend(params.iter().map(|p| param(p, false)));
    format!(
        "def __init__({}) -> None:\n{}\"\"\"Auto-generated default constructor with named params\"\"\"\n{}pass",
        all.join(", "),
        options.stub_indent(1),
        options.stub_indent(1)
    )
}

/// Class header; the body is made of the member fragments.
pub fn class(options: &EmitOptions, class: &ComposedClass, bases: &[String]) -> String {
    let mut lines = Vec::new();
    push_location(options, &class.meta, &mut lines);
    if bases.is_empty() {
        lines.push(format!("class {}:", class.host_name));
    } else {
        lines.push(format!("class {}({}):", class.host_name, bases.join(", ")));
    }
    push_docstring(options, &class.meta, &mut lines);
    lines.join("\n")
}

pub fn copy(options: &EmitOptions, class: &ComposedClass, deep: bool) -> String {
    let signature = if deep {
        format!("def __deepcopy__(self, memo: dict) -> {}:", class.host_name)
    } else {
        format!("def __copy__(self) -> {}:", class.host_name)
    };
    format!("{}\n{}pass", signature, options.stub_indent(1))
}

pub fn iterable(options: &EmitOptions, element: &str) -> String {
    let i1 = options.stub_indent(1);
    format!(
        "def __iter__(self) -> Iterator[{}]:\n{}pass\ndef __len__(self) -> int:\n{}pass",
        element, i1, i1
    )
}

pub fn field(options: &EmitOptions, field: &ComposedField) -> String {
    let ty = if field.is_static {
        format!("ClassVar[{}]", field.host_type)
    } else {
        field.host_type.clone()
    };
    let mut line = format!("{}: {}", field.host_name, ty);
    let mut comments = doc_lines(options, &field.meta);
    if let Some(n) = field.array_len {
        comments.insert(0, format!("ndarray[type={}, size={}]", field.ty.unqualified().str_code(), n));
    }
    if field.read_only {
        comments.push("(read-only)".to_string());
    }
    if !comments.is_empty() {
        line.push_str("  # ");
        line.push_str(&comments.join(" "));
    }
    line
}

pub fn enumeration(options: &EmitOptions, decl: &ComposedEnum) -> String {
    let i1 = options.stub_indent(1);
    let mut lines = Vec::new();
    push_location(options, &decl.meta, &mut lines);
    lines.push(format!("class {}(enum.Enum):", decl.host_name));
    push_docstring(options, &decl.meta, &mut lines);
    for value in &decl.values {
        let mut line = match (value.number, &value.expression) {
            (Some(n), _) => format!("{}{} = {}", i1, value.host_name, n),
            (None, Some(expr)) => format!("{}{} = enum.auto()  # (= {})", i1, value.host_name, expr),
            (None, None) => format!("{}{} = enum.auto()", i1, value.host_name),
        };
        let doc = doc_lines(options, &value.meta);
        if !doc.is_empty() {
            line.push_str(if value.expression.is_some() { " " } else { "  # " });
            line.push_str(&doc.join(" "));
        }
        lines.push(line);
    }
    if decl.values.is_empty() {
        lines.push(format!("{}pass", i1));
    }
    lines.join("\n")
}

pub fn constant(options: &EmitOptions, constant: &ComposedConstant) -> String {
    let mut line = format!("{}: {} = {}", constant.host_name, constant.host_type, constant.host_value);
    let doc = doc_lines(options, &constant.meta);
    if !doc.is_empty() {
        line.push_str("  # ");
        line.push_str(&doc.join(" "));
    }
    line
}

pub fn comment(text: &str) -> String {
    comment_lines(text)
        .iter()
        .map(|l| if l.is_empty() { "#".to_string() } else { format!("# {}", l) })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Proxy class standing for a submodule.
pub fn namespace_start(options: &EmitOptions, scope: &ModuleScope) -> String {
    let i1 = options.stub_indent(1);
    let mut lines = vec![
        format!("# <submodule {}>", scope.host_name),
        format!(
            "class {}:  # Proxy class that introduces typings for the *submodule* {}",
            scope.host_name, scope.host_name
        ),
    ];
    push_docstring(options, &scope.meta, &mut lines);
    lines.push(format!("{}pass  # (This corresponds to a C++ namespace. All methods are static!)", i1));
    lines.join("\n")
}

pub fn namespace_end(scope: &ModuleScope) -> String {
    format!("# </submodule {}>", scope.host_name)
}
