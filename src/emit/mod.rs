//! Emission coordinator.
//!
//! One depth-first walk of the [`CompositeModule`] produces three streams in
//! lock-step:
//!
//! ```text
//! node ──► stub fragment      (Python declarations, no bodies)
//!      ──► glue fragment      (pybind11 registration)
//!      ──► adapter fragment   (native shims and helper classes, optional)
//!      then the children of the node
//! ```
//!
//! Boxed helper types are gathered during the walk and written once, in
//! first-use order, at the head of every stream. The walk reads only the
//! composed tree and the options, so identical inputs give identical bytes.

mod doc;
mod glue;
mod native;
mod stub;


use crate::adapt::{BoxedType, render_shim};
use crate::compose::{BoundFunction, ClassItem, ComposedClass, CompositeModule, ModuleScope, ScopeItem, c_identifier};
use crate::config::{Config, EmitOptions};
use crate::decl::CppType;
use crate::naming::TypeTranslator;

// ============================================================================
// FRAGMENTS
// ============================================================================

/// Where a function is declared, which decides `self` and `@staticmethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Module,
    Namespace,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub enum FragmentKind {
    Namespace,
    NamespaceEnd,
    Class,
    Function,
    Constructor,
    Field,
    Enum,
    Constant,
    Comment,
}

impl FragmentKind {
    pub fn display(&self) -> &'static str {
        match self {
            FragmentKind::Namespace => "namespace",
            FragmentKind::NamespaceEnd => "namespace end",
            FragmentKind::Class => "class",
            FragmentKind::Function => "function",
            FragmentKind::Constructor => "constructor",
            FragmentKind::Field => "field",
            FragmentKind::Enum => "enum",
            FragmentKind::Constant => "constant",
            FragmentKind::Comment => "comment",
        }
    }
}

/// The output of one composed node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct Fragment {
    /// Qualified native name of the declaration the fragment comes from
    pub name: String,
    pub kind: FragmentKind,
    /// Nesting level in the stub (namespace proxy classes and classes)
    pub depth: usize,
    /// Unindented stub text
    pub stub: String,
    pub glue: String,
    pub adapter: Option<String>,
}

/// The three assembled streams.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmittedCode {
    pub fragments: Vec<Fragment>,
    pub boxed_types: Vec<BoxedType>,
    pub stub_code: String,
    pub glue_code: String,
    pub adapter_code: String,
}

// ============================================================================
// WALK
// ============================================================================

struct Emitter<'a> {
    config: &'a Config,
    options: &'a EmitOptions,
    types: TypeTranslator<'a>,
    fragments: Vec<Fragment>,
    boxed: Vec<BoxedType>,
}

/// Emit every node of `module`.
pub fn emit(config: &Config, module: &CompositeModule) -> EmittedCode {
    let mut emitter = Emitter {
        config,
        options: &config.options.emit,
        types: TypeTranslator::new(config),
        fragments: Vec::new(),
        boxed: Vec::new(),
    };
    let module_var = emitter.options.module_var.clone();
    emitter.scope_items(&module.root, &module_var, Placement::Module, 0);

    let Emitter {
        options,
        fragments,
        boxed,
        ..
    } = emitter;
    let stub_code = assemble(
        boxed.iter().map(|b| b.stub_code(options)),
        fragments.iter().map(|f| indent_stub(options, &f.stub, f.depth)),
    );
    let glue_code = assemble(
        boxed.iter().map(|b| b.glue_code(options)),
        fragments.iter().map(|f| f.glue.clone()),
    );
    let adapter_code = assemble(
        boxed.iter().map(|b| b.adapter_code(options)),
        fragments.iter().filter_map(|f| f.adapter.clone()),
    );
    tracing::debug!(
        fragments = fragments.len(),
        boxed_types = boxed.len(),
        "module emitted"
    );
    EmittedCode {
        fragments,
        boxed_types: boxed,
        stub_code,
        glue_code,
        adapter_code,
    }
}

impl Emitter<'_> {
    fn push(&mut self, fragment: Fragment) {
        tracing::trace!(name = %fragment.name, kind = fragment.kind.display(), "fragment");
        self.fragments.push(fragment);
    }

    fn scope_items(&mut self, scope: &ModuleScope, var: &str, placement: Placement, depth: usize) {
        for item in &scope.items {
            match item {
                ScopeItem::Function(bound) => self.function(bound, var, placement, depth),
                ScopeItem::Class(class) => self.class(class, var, depth),
                ScopeItem::Enum(decl) => self.push(Fragment {
                    name: decl.native_name.clone(),
                    kind: FragmentKind::Enum,
                    depth,
                    stub: stub::enumeration(self.options, decl),
                    glue: glue::enumeration(self.options, var, self.config.options.enum_arithmetic, decl),
                    adapter: None,
                }),
                ScopeItem::Constant(constant) => self.push(Fragment {
                    name: constant.native.clone(),
                    kind: FragmentKind::Constant,
                    depth,
                    stub: stub::constant(self.options, constant),
                    glue: glue::constant(var, constant),
                    adapter: None,
                }),
                ScopeItem::Comment(comment) => self.push(Fragment {
                    name: scope.native.to_string(),
                    kind: FragmentKind::Comment,
                    depth,
                    stub: stub::comment(&comment.text),
                    glue: String::new(),
                    adapter: None,
                }),
                ScopeItem::Namespace(ns) => self.namespace(ns, var, depth),
            }
        }
    }

    fn namespace(&mut self, ns: &ModuleScope, parent_var: &str, depth: usize) {
        let var = format!("pyNs{}", var_suffix(&ns.native.to_string()));
        let name = ns.native.to_string();
        self.push(Fragment {
            name: name.clone(),
            kind: FragmentKind::Namespace,
            depth,
            stub: stub::namespace_start(self.options, ns),
            glue: glue::namespace(self.options, &var, parent_var, ns),
            adapter: None,
        });
        self.scope_items(ns, &var, Placement::Namespace, depth + 1);
        self.push(Fragment {
            name,
            kind: FragmentKind::NamespaceEnd,
            depth,
            stub: stub::namespace_end(ns),
            glue: String::new(),
            adapter: None,
        });
    }

    fn function(&mut self, bound: &BoundFunction, var: &str, placement: Placement, depth: usize) {
        let f = &bound.function;
        for boxed in f.plan.iter().flat_map(|plan| &plan.boxed_types) {
            if !self.boxed.iter().any(|b| b.name == boxed.name) {
                self.boxed.push(boxed.clone());
            }
        }
        let kind = if f.original.is_constructor() {
            FragmentKind::Constructor
        } else {
            FragmentKind::Function
        };
        self.push(Fragment {
            name: bound.qualified_name(),
            kind,
            depth,
            stub: stub::function(self.options, bound, placement, None),
            glue: glue::function(self.options, var, bound, None),
            adapter: render_shim(f, self.options),
        });

        if f.vectorize {
            let vectorized = format!(
                "{}{}{}",
                self.config.options.vectorize_prefix, f.host_name, self.config.options.vectorize_suffix
            );
            self.push(Fragment {
                name: bound.qualified_name(),
                kind,
                depth,
                stub: stub::function(self.options, bound, placement, Some(&vectorized)),
                glue: glue::function(self.options, var, bound, Some(&vectorized)),
                adapter: None,
            });
        }
    }

    fn class(&mut self, class: &ComposedClass, parent_var: &str, depth: usize) {
        let var = format!("pyClass{}", var_suffix(&class.native_name));
        let bases: Vec<String> = class
            .bases
            .iter()
            .map(|base| self.types.host_type(&CppType::parse(base)))
            .collect();

        let mut helpers = Vec::new();
        if let Some(publicist) = &class.publicist {
            helpers.push(native::publicist(self.options, publicist));
        }
        if let Some(trampoline) = &class.trampoline {
            helpers.push(native::trampoline(self.options, trampoline));
        }

        let header = self.fragments.len();
        self.push(Fragment {
            name: class.native_name.clone(),
            kind: FragmentKind::Class,
            depth,
            stub: stub::class(self.options, class, &bases),
            glue: glue::class(self.options, &var, parent_var, class),
            adapter: (!helpers.is_empty()).then(|| helpers.join("\n")),
        });

        for item in &class.items {
            match item {
                ClassItem::Method(bound) => self.function(bound, &var, Placement::Class, depth + 1),
                ClassItem::Field(field) => self.push(Fragment {
                    name: format!("{}::{}", class.native_name, field.native_name),
                    kind: FragmentKind::Field,
                    depth: depth + 1,
                    stub: stub::field(self.options, field),
                    glue: glue::field(self.options, &var, class, field),
                    adapter: None,
                }),
                ClassItem::DefaultConstructor(params) => self.push(Fragment {
                    name: class.native_name.clone(),
                    kind: FragmentKind::Constructor,
                    depth: depth + 1,
                    stub: stub::default_constructor(self.options, params),
                    glue: glue::default_constructor(self.options, &var, class, params),
                    adapter: None,
                }),
                ClassItem::Class(nested) => self.class(nested, &var, depth + 1),
                ClassItem::Enum(decl) => self.push(Fragment {
                    name: decl.native_name.clone(),
                    kind: FragmentKind::Enum,
                    depth: depth + 1,
                    stub: stub::enumeration(self.options, decl),
                    glue: glue::enumeration(self.options, &var, self.config.options.enum_arithmetic, decl),
                    adapter: None,
                }),
                ClassItem::Comment(comment) => self.push(Fragment {
                    name: class.native_name.clone(),
                    kind: FragmentKind::Comment,
                    depth: depth + 1,
                    stub: stub::comment(&comment.text),
                    glue: String::new(),
                    adapter: None,
                }),
            }
        }

        self.class_protocols(class, &var, depth + 1);

        // a class body needs at least one statement, comments are not one
        let has_body = self.fragments[header + 1..]
            .iter()
            .any(|f| f.kind != FragmentKind::Comment && !f.stub.is_empty());
        if !has_body {
            let pass = format!("\n{}pass", self.options.stub_indent(1));
            self.fragments[header].stub.push_str(&pass);
        }
    }
}

impl Emitter<'_> {
    fn class_protocols(&mut self, class: &ComposedClass, var: &str, depth: usize) {
        let protocols = &class.protocols;
        for (enabled, deep) in [(protocols.copy, false), (protocols.deep_copy, true)] {
            if enabled {
                self.push(Fragment {
                    name: class.native_name.clone(),
                    kind: FragmentKind::Function,
                    depth,
                    stub: stub::copy(self.options, class, deep),
                    glue: glue::copy(var, class, deep),
                    adapter: None,
                });
            }
        }
        if let Some(element) = &protocols.iterable {
            self.push(Fragment {
                name: class.native_name.clone(),
                kind: FragmentKind::Function,
                depth,
                stub: stub::iterable(self.options, element),
                glue: glue::iterable(var, class),
                adapter: None,
            });
        }
    }
}

/// `gfx::Matrix<float>` → `_Gfx_Matrix_float`
fn var_suffix(native: &str) -> String {
    let mut out = String::new();
    for segment in native.split("::") {
        let ident = c_identifier(segment);
        if ident.is_empty() {
            continue;
        }
        out.push('_');
        let mut chars = ident.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn indent_stub(options: &EmitOptions, stub: &str, depth: usize) -> String {
    if depth == 0 {
        return stub.to_string();
    }
    let indent = options.stub_indent(depth);
    stub.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join the non-empty parts, prelude first, one per line.
fn assemble(prelude: impl Iterator<Item = String>, parts: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    for part in prelude.chain(parts).filter(|p| !p.is_empty()) {
        out.push_str(&part);
        out.push('\n');
    }
    out
}
