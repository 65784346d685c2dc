//! Declaration model.
//!
//! The in-memory form of a parsed native header: functions, classes and
//! structs, enums, namespaces, constants and free comments, each carrying its
//! verbatim documentation and source location.
//!
//! Nodes are plain data. Later phases never mutate a node in place; a rule
//! driven transformation (template substitution, adapter tagging) produces a
//! new node.

mod function;
mod node;
mod param;
mod types;
mod visit;

pub use function::{FunctionDecl, FunctionKind};
pub use node::{
    Access, ClassDecl, ClassKind, ClassMember, CommentDecl, ConstantDecl, ConstantKind, DeclKind,
    DeclMeta, Declaration, EnumDecl, EnumValue, FieldDecl, MemberItem, NamespaceDecl,
    TranslationUnit,
};
pub use param::{AdaptationTag, CArray, Parameter};
pub use types::{CppType, TypeModifier};
pub use visit::{DeclRef, walk};

pub(crate) use types::{contains_word, replace_word, split_top_level};
