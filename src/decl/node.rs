//! Declaration nodes: classes, enums, namespaces, constants, comments.

use smol_str::SmolStr;

use super::function::FunctionDecl;
use super::param::CArray;
use super::types::CppType;
use crate::base::SourceLocation;

// ============================================================================
// METADATA
// ============================================================================

/// Documentation and origin of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct DeclMeta {
    /// Raw documentation comment, whitespace preserved
    pub doc: Option<String>,
    pub location: SourceLocation,
}

/// The declaration variants a translation unit may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Function,
    Class,
    Struct,
    Enum,
    Namespace,
    TemplateFunction,
    TemplateClass,
    Constant,
}

impl DeclKind {
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Enum => "enum",
            DeclKind::Namespace => "namespace",
            DeclKind::TemplateFunction => "template function",
            DeclKind::TemplateClass => "template class",
            DeclKind::Constant => "constant",
        }
    }
}

// ============================================================================
// CLASSES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// A data member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FieldDecl {
    pub name: SmolStr,
    pub ty: CppType,
    pub c_array: Option<CArray>,
    pub default_value: Option<String>,
    pub is_static: bool,
    pub meta: DeclMeta,
}

impl FieldDecl {
    pub fn new(name: impl Into<SmolStr>, ty: &str) -> Self {
        Self {
            name: name.into(),
            ty: CppType::parse(ty),
            ..Default::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_array(mut self, array: CArray) -> Self {
        self.c_array = Some(array);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(tag = "node", rename_all = "snake_case"))]
pub enum MemberItem {
    Field(FieldDecl),
    Method(FunctionDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Comment(CommentDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassMember {
    #[cfg_attr(feature = "json", serde(default))]
    pub access: Access,
    pub item: MemberItem,
}

/// A class or struct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ClassDecl {
    pub name: SmolStr,
    pub kind: ClassKind,
    /// Public bases, native spelling
    pub bases: Vec<CppType>,
    /// Members in declaration order
    pub members: Vec<ClassMember>,
    pub template_params: Vec<SmolStr>,
    pub specialization: Vec<CppType>,
    pub instance_name: Option<SmolStr>,
    pub meta: DeclMeta,
}

impl ClassDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn new_struct(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Struct,
            ..Default::default()
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.bases.push(CppType::parse(base));
        self
    }

    pub fn with_member(mut self, access: Access, item: MemberItem) -> Self {
        self.members.push(ClassMember { access, item });
        self
    }

    pub fn with_public(self, item: MemberItem) -> Self {
        self.with_member(Access::Public, item)
    }

    pub fn with_method(self, method: FunctionDecl) -> Self {
        self.with_public(MemberItem::Method(method))
    }

    pub fn with_field(self, field: FieldDecl) -> Self {
        self.with_public(MemberItem::Field(field))
    }

    pub fn with_template_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.template_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.meta.location = location;
        self
    }

    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    /// `Vec<int>` once specialized, the plain name otherwise.
    pub fn native_name(&self) -> String {
        if self.specialization.is_empty() {
            self.name.to_string()
        } else {
            let args: Vec<String> = self.specialization.iter().map(CppType::str_code).collect();
            format!("{}<{}>", self.name, args.join(", "))
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = (Access, &FunctionDecl)> {
        self.members.iter().filter_map(|m| match &m.item {
            MemberItem::Method(f) => Some((m.access, f)),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = (Access, &FieldDecl)> {
        self.members.iter().filter_map(|m| match &m.item {
            MemberItem::Field(f) => Some((m.access, f)),
            _ => None,
        })
    }

    pub fn has_user_constructor(&self) -> bool {
        self.methods().any(|(_, f)| f.is_constructor())
    }

    pub fn has_virtual_methods(&self) -> bool {
        self.methods().any(|(_, f)| f.is_virtual)
    }
}

// ============================================================================
// ENUMS, NAMESPACES, CONSTANTS, COMMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct EnumValue {
    pub name: SmolStr,
    /// Explicit initializer, verbatim
    pub value: Option<String>,
    pub meta: DeclMeta,
}

impl EnumValue {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Integer value of an explicit literal initializer.
    pub fn integer_value(&self) -> Option<i64> {
        self.value.as_deref().and_then(parse_integer_literal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct EnumDecl {
    pub name: SmolStr,
    /// `enum class`
    pub is_scoped: bool,
    pub underlying: Option<CppType>,
    pub values: Vec<EnumValue>,
    pub meta: DeclMeta,
}

impl EnumDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn scoped(name: impl Into<SmolStr>) -> Self {
        Self {
            is_scoped: true,
            ..Self::new(name)
        }
    }

    pub fn with_value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn with_values<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.values.extend(names.into_iter().map(EnumValue::new));
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }
}

/// One physical `namespace x { ... }` occurrence. An empty name is an
/// anonymous namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct NamespaceDecl {
    pub name: SmolStr,
    pub children: Vec<Declaration>,
    pub meta: DeclMeta,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with(mut self, decl: impl Into<Declaration>) -> Self {
        self.children.push(decl.into());
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum ConstantKind {
    /// `#define NAME value`
    #[default]
    Macro,
    /// `const int NAME = value;`
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ConstantDecl {
    pub name: SmolStr,
    pub kind: ConstantKind,
    /// Declared type; macros have none
    pub ty: Option<CppType>,
    pub value: String,
    pub meta: DeclMeta,
}

impl ConstantDecl {
    pub fn define(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn global(name: impl Into<SmolStr>, ty: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ConstantKind::Global,
            ty: Some(CppType::parse(ty)),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Integer value of the initializer (`42`, `-3`, `0x10`, `8u`), if it is one.
    pub fn integer_value(&self) -> Option<i64> {
        parse_integer_literal(&self.value)
    }
}

/// A free-standing comment, kept in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CommentDecl {
    pub text: String,
    pub meta: DeclMeta,
}

impl CommentDecl {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// A top-level or namespace-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(tag = "node", rename_all = "snake_case"))]
pub enum Declaration {
    Function(FunctionDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Namespace(NamespaceDecl),
    Constant(ConstantDecl),
    Comment(CommentDecl),
}

impl Declaration {
    pub fn kind(&self) -> Option<DeclKind> {
        let kind = match self {
            Declaration::Function(f) if f.is_template() => DeclKind::TemplateFunction,
            Declaration::Function(_) => DeclKind::Function,
            Declaration::Class(c) if c.is_template() => DeclKind::TemplateClass,
            Declaration::Class(c) if c.kind == ClassKind::Struct => DeclKind::Struct,
            Declaration::Class(_) => DeclKind::Class,
            Declaration::Enum(_) => DeclKind::Enum,
            Declaration::Namespace(_) => DeclKind::Namespace,
            Declaration::Constant(_) => DeclKind::Constant,
            Declaration::Comment(_) => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Function(f) => &f.name,
            Declaration::Class(c) => &c.name,
            Declaration::Enum(e) => &e.name,
            Declaration::Namespace(n) => &n.name,
            Declaration::Constant(c) => &c.name,
            Declaration::Comment(_) => "",
        }
    }

    pub fn meta(&self) -> &DeclMeta {
        match self {
            Declaration::Function(f) => &f.meta,
            Declaration::Class(c) => &c.meta,
            Declaration::Enum(e) => &e.meta,
            Declaration::Namespace(n) => &n.meta,
            Declaration::Constant(c) => &c.meta,
            Declaration::Comment(c) => &c.meta,
        }
    }
}

impl From<FunctionDecl> for Declaration {
    fn from(decl: FunctionDecl) -> Self {
        Declaration::Function(decl)
    }
}

impl From<ClassDecl> for Declaration {
    fn from(decl: ClassDecl) -> Self {
        Declaration::Class(decl)
    }
}

impl From<EnumDecl> for Declaration {
    fn from(decl: EnumDecl) -> Self {
        Declaration::Enum(decl)
    }
}

impl From<NamespaceDecl> for Declaration {
    fn from(decl: NamespaceDecl) -> Self {
        Declaration::Namespace(decl)
    }
}

impl From<ConstantDecl> for Declaration {
    fn from(decl: ConstantDecl) -> Self {
        Declaration::Constant(decl)
    }
}

impl From<CommentDecl> for Declaration {
    fn from(decl: CommentDecl) -> Self {
        Declaration::Comment(decl)
    }
}

/// The parsed content of one header, top-level declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct TranslationUnit {
    pub file: Option<SmolStr>,
    pub decls: Vec<Declaration>,
}

impl TranslationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, decl: impl Into<Declaration>) -> Self {
        self.decls.push(decl.into());
        self
    }

    pub fn push(&mut self, decl: impl Into<Declaration>) {
        self.decls.push(decl.into());
    }
}

fn parse_integer_literal(text: &str) -> Option<i64> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text)
        .trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim()),
        None => (false, text),
    };
    let digits = digits.trim_end_matches(['u', 'U', 'l', 'L']);
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}
