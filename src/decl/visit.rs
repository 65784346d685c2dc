//! Pre-order traversal of a declaration tree.

use super::function::FunctionDecl;
use super::node::{
    ClassDecl, ConstantDecl, Declaration, EnumDecl, EnumValue, FieldDecl, MemberItem,
    NamespaceDecl,
};
use super::param::Parameter;
use crate::base::QualifiedName;

/// A borrowed view of any nameable node, handed to [`walk`] visitors.
#[derive(Debug, Clone, Copy)]
pub enum DeclRef<'a> {
    Function(&'a FunctionDecl),
    Param(&'a FunctionDecl, &'a Parameter),
    Class(&'a ClassDecl),
    Field(&'a FieldDecl),
    Enum(&'a EnumDecl),
    EnumValue(&'a EnumDecl, &'a EnumValue),
    Namespace(&'a NamespaceDecl),
    Constant(&'a ConstantDecl),
}

/// Visit every nameable node with its enclosing native scope.
///
/// Anonymous namespaces do not open a scope. Free comments are skipped.
pub fn walk<'a, F>(decls: &'a [Declaration], visitor: &mut F)
where
    F: FnMut(&QualifiedName, DeclRef<'a>),
{
    walk_in(&QualifiedName::root(), decls, visitor);
}

fn walk_in<'a, F>(scope: &QualifiedName, decls: &'a [Declaration], visitor: &mut F)
where
    F: FnMut(&QualifiedName, DeclRef<'a>),
{
    for decl in decls {
        match decl {
            Declaration::Function(f) => walk_function(scope, f, visitor),
            Declaration::Class(c) => walk_class(scope, c, visitor),
            Declaration::Enum(e) => walk_enum(scope, e, visitor),
            Declaration::Namespace(ns) => {
                visitor(scope, DeclRef::Namespace(ns));
                if ns.is_anonymous() {
                    walk_in(scope, &ns.children, visitor);
                } else {
                    walk_in(&scope.child(ns.name.clone()), &ns.children, visitor);
                }
            }
            Declaration::Constant(c) => visitor(scope, DeclRef::Constant(c)),
            Declaration::Comment(_) => {}
        }
    }
}

fn walk_function<'a, F>(scope: &QualifiedName, function: &'a FunctionDecl, visitor: &mut F)
where
    F: FnMut(&QualifiedName, DeclRef<'a>),
{
    visitor(scope, DeclRef::Function(function));
    let inner = scope.child(function.name.clone());
    for param in function.params.iter().filter(|p| !p.is_variadic) {
        visitor(&inner, DeclRef::Param(function, param));
    }
}

fn walk_class<'a, F>(scope: &QualifiedName, class: &'a ClassDecl, visitor: &mut F)
where
    F: FnMut(&QualifiedName, DeclRef<'a>),
{
    visitor(scope, DeclRef::Class(class));
    let inner = scope.child(class.name.clone());
    for member in &class.members {
        match &member.item {
            MemberItem::Field(field) => visitor(&inner, DeclRef::Field(field)),
            MemberItem::Method(method) => walk_function(&inner, method, visitor),
            MemberItem::Class(nested) => walk_class(&inner, nested, visitor),
            MemberItem::Enum(e) => walk_enum(&inner, e, visitor),
            MemberItem::Comment(_) => {}
        }
    }
}

fn walk_enum<'a, F>(scope: &QualifiedName, decl: &'a EnumDecl, visitor: &mut F)
where
    F: FnMut(&QualifiedName, DeclRef<'a>),
{
    visitor(scope, DeclRef::Enum(decl));
    let inner = scope.child(decl.name.clone());
    for value in &decl.values {
        visitor(&inner, DeclRef::EnumValue(decl, value));
    }
}
