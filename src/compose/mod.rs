//! Namespace and class composition.
//!
//! Builds the [`CompositeModule`] the emitter walks:
//!
//! ```text
//! TranslationUnit (physical occurrences, source order)
//!     │ merge namespaces by path, drop excluded subtrees,
//!     │ instantiate templates, adapt functions
//!     ▼
//! CompositeModule
//!     │ settle overloads per scope, name shims
//!     ▼
//! ready for emission
//! ```
//!
//! Exclusion is applied here, on whole subtrees: an excluded namespace or
//! class never reaches the emitter, so no fragment can mention it.

mod class;
mod overloads;
mod scope;


use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::adapt::{AdaptedFunction, BindingStrategy, HostParam};
use crate::base::QualifiedName;
use crate::config::Config;
use crate::decl::{CppType, DeclMeta, FunctionDecl, TranslationUnit};
use crate::diagnostics::DiagnosticCollector;
use crate::naming::{Namer, TypeTranslator};

// ============================================================================
// COMPOSITE TREE
// ============================================================================

/// A function with its overload decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundFunction {
    pub function: AdaptedFunction,
    pub strategy: BindingStrategy,
    /// Several bindings share the host name (`@overload` in stubs)
    pub overloaded: bool,
}

impl BoundFunction {
    fn new(function: AdaptedFunction) -> Self {
        Self {
            function,
            strategy: BindingStrategy::Direct,
            overloaded: false,
        }
    }

    pub fn qualified_name(&self) -> String {
        self.function.qualified_name()
    }

    pub fn original(&self) -> &FunctionDecl {
        &self.function.original
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEnumValue {
    pub host_name: String,
    /// Native expression naming the value (`gfx::Color::Red`)
    pub native: String,
    /// Known integer value
    pub number: Option<i64>,
    /// Explicit initializer when it is not an integer literal
    pub expression: Option<String>,
    pub meta: DeclMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEnum {
    /// `gfx::Color`
    pub native_name: String,
    pub host_name: String,
    pub is_scoped: bool,
    pub values: Vec<ComposedEnumValue>,
    pub meta: DeclMeta,
}

/// A macro or global constant exported as a module attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedConstant {
    /// Native expression (`MAX_ITEMS`, `gfx::kScale`)
    pub native: String,
    pub host_name: String,
    pub host_type: String,
    pub host_value: String,
    pub meta: DeclMeta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedComment {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedField {
    pub native_name: SmolStr,
    pub host_name: String,
    pub ty: CppType,
    pub host_type: String,
    pub read_only: bool,
    pub is_static: bool,
    /// Element count of a numeric C array exposed as an array view
    pub array_len: Option<usize>,
    /// Publicist used to reach a protected field
    pub publicist: Option<String>,
    pub meta: DeclMeta,
}

/// Host protocols a class opts into by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassProtocols {
    /// `__copy__` through the copy constructor
    pub copy: bool,
    /// `__deepcopy__` through the copy constructor
    pub deep_copy: bool,
    /// `std::shared_ptr<T>` holder
    pub held_as_shared: bool,
    /// `py::dynamic_attr()`
    pub dynamic_attributes: bool,
    /// Host element type of `__iter__`, with `__len__`
    pub iterable: Option<String>,
}

/// `class X_publicist : public X { public: using X::m; };`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publicist {
    pub name: String,
    pub class_native: String,
    pub members: Vec<SmolStr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrampolineMethod {
    pub host_name: String,
    pub function: FunctionDecl,
}

/// Subclass forwarding virtual calls to host overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trampoline {
    pub name: String,
    pub class_native: String,
    /// Unqualified constructor name, for `using X::X;`
    pub constructor_name: SmolStr,
    pub methods: Vec<TrampolineMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    Method(BoundFunction),
    Field(ComposedField),
    /// Named constructor of a struct without user constructors, one
    /// parameter per public field
    DefaultConstructor(Vec<HostParam>),
    Class(ComposedClass),
    Enum(ComposedEnum),
    Comment(ComposedComment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedClass {
    /// `gfx::Matrix<float>`
    pub native_name: String,
    pub host_name: String,
    /// Qualified native bases
    pub bases: Vec<String>,
    pub items: Vec<ClassItem>,
    pub publicist: Option<Publicist>,
    pub trampoline: Option<Trampoline>,
    pub protocols: ClassProtocols,
    pub meta: DeclMeta,
    deleted: Vec<String>,
}

impl ComposedClass {
    pub fn methods(&self) -> impl Iterator<Item = &BoundFunction> {
        self.items.iter().filter_map(|item| match item {
            ClassItem::Method(f) => Some(f),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &ComposedField> {
        self.items.iter().filter_map(|item| match item {
            ClassItem::Field(f) => Some(f),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeItem {
    Function(BoundFunction),
    Class(ComposedClass),
    Enum(ComposedEnum),
    Constant(ComposedConstant),
    Comment(ComposedComment),
    Namespace(ModuleScope),
}

/// The module, or one merged namespace (a host submodule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScope {
    /// Native path of the first occurrence
    pub native: QualifiedName,
    /// Empty for the module itself
    pub host_name: String,
    pub meta: DeclMeta,
    pub items: Vec<ScopeItem>,
    deleted: Vec<String>,
    /// Native namespace name → index in `items`
    namespaces: IndexMap<SmolStr, usize>,
}

impl ModuleScope {
    fn new(native: QualifiedName, host_name: String, meta: DeclMeta) -> Self {
        Self {
            native,
            host_name,
            meta,
            items: Vec::new(),
            deleted: Vec::new(),
            namespaces: IndexMap::new(),
        }
    }

    fn root() -> Self {
        Self::new(QualifiedName::root(), String::new(), DeclMeta::default())
    }

    pub fn is_root(&self) -> bool {
        self.host_name.is_empty()
    }

    pub fn namespace(&self, native_name: &str) -> Option<&ModuleScope> {
        let index = *self.namespaces.get(native_name)?;
        match &self.items[index] {
            ScopeItem::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    pub fn functions(&self) -> impl Iterator<Item = &BoundFunction> {
        self.items.iter().filter_map(|item| match item {
            ScopeItem::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &ComposedClass> {
        self.items.iter().filter_map(|item| match item {
            ScopeItem::Class(c) => Some(c),
            _ => None,
        })
    }

    fn reindex_namespaces(&mut self) {
        self.namespaces = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| match item {
                ScopeItem::Namespace(ns) => ns.native.last().map(|name| (SmolStr::new(name), i)),
                _ => None,
            })
            .collect();
    }
}

/// The final nested tree handed to the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeModule {
    pub root: ModuleScope,
}

impl CompositeModule {
    /// Every bound function and method, depth first in emission order.
    pub fn bound_functions(&self) -> Vec<&BoundFunction> {
        fn in_class<'a>(class: &'a ComposedClass, out: &mut Vec<&'a BoundFunction>) {
            for item in &class.items {
                match item {
                    ClassItem::Method(f) => out.push(f),
                    ClassItem::Class(nested) => in_class(nested, out),
                    _ => {}
                }
            }
        }
        fn in_scope<'a>(scope: &'a ModuleScope, out: &mut Vec<&'a BoundFunction>) {
            for item in &scope.items {
                match item {
                    ScopeItem::Function(f) => out.push(f),
                    ScopeItem::Class(c) => in_class(c, out),
                    ScopeItem::Namespace(ns) => in_scope(ns, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        in_scope(&self.root, &mut out);
        out
    }
}

// ============================================================================
// COMPOSER
// ============================================================================

struct Composer<'a> {
    config: &'a Config,
    namer: Namer<'a>,
    types: TypeTranslator<'a>,
    collector: &'a mut DiagnosticCollector,
}

/// Compose `unit` into one module. Recoverable problems go to `collector`.
pub fn compose(config: &Config, unit: &TranslationUnit, collector: &mut DiagnosticCollector) -> CompositeModule {
    let mut composer = Composer {
        config,
        namer: Namer::new(config),
        types: TypeTranslator::new(config),
        collector,
    };
    let mut root = ModuleScope::root();
    composer.compose_decls(&unit.decls, &QualifiedName::root(), &mut root);
    composer.settle_scope(&mut root);
    make_shim_names_unique(&mut root);
    let module = CompositeModule { root };
    tracing::debug!(
        functions = module.bound_functions().len(),
        diagnostics = composer.collector.len(),
        "module composed"
    );
    module
}

/// Identifiers escaped from one scope can still meet another scope's
/// (`gfx__draw` at the root and `gfx::draw`); later ones get `_<k>`.
fn make_shim_names_unique(root: &mut ModuleScope) {
    fn in_class(class: &mut ComposedClass, taken: &mut FxHashSet<String>) {
        for item in &mut class.items {
            match item {
                ClassItem::Method(f) => claim(f, taken),
                ClassItem::Class(nested) => in_class(nested, taken),
                _ => {}
            }
        }
    }
    fn in_scope(scope: &mut ModuleScope, taken: &mut FxHashSet<String>) {
        for item in &mut scope.items {
            match item {
                ScopeItem::Function(f) => claim(f, taken),
                ScopeItem::Class(c) => in_class(c, taken),
                ScopeItem::Namespace(ns) => in_scope(ns, taken),
                _ => {}
            }
        }
    }
    fn claim(bound: &mut BoundFunction, taken: &mut FxHashSet<String>) {
        let Some(plan) = bound.function.plan.as_mut() else {
            return;
        };
        if taken.insert(plan.shim_name.clone()) {
            return;
        }
        let stem = plan
            .shim_name
            .strip_suffix("_adapt_shim")
            .unwrap_or(&plan.shim_name)
            .to_string();
        let mut k = 2;
        let unique = loop {
            let candidate = format!("{}_{}_adapt_shim", stem, k);
            if !taken.contains(&candidate) {
                break candidate;
            }
            k += 1;
        };
        tracing::debug!(shim = %plan.shim_name, renamed = %unique, "shim name taken by another scope");
        taken.insert(unique.clone());
        plan.shim_name = unique;
    }
    in_scope(root, &mut FxHashSet::default());
}

/// `gfx::Matrix<float>` → `gfx__Matrix_float`
///
/// Path segments are joined with `__` so that `a::b_c` and `a_b::c` stay
/// apart; inside a segment every non-identifier run becomes one `_`.
pub(crate) fn scope_identifier(native: &str) -> String {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = native.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&native[start..i]);
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&native[start..]);
    segments
        .into_iter()
        .map(c_identifier)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("__")
}

/// `Matrix<float>` → `Matrix_float`
pub(crate) fn c_identifier(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}
