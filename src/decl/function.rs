//! Free functions, methods and constructors.

use smol_str::SmolStr;

use super::node::DeclMeta;
use super::param::Parameter;
use super::types::CppType;
use crate::base::SourceLocation;

/// Where a function lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "snake_case"))]
pub enum FunctionKind {
    #[default]
    Free,
    Method,
    Constructor,
}

/// A function-like declaration.
///
/// Template functions carry their `template_params`; once instantiated the
/// concrete arguments move to `specialization` and the parameters are
/// substituted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct FunctionDecl {
    pub name: SmolStr,
    pub kind: FunctionKind,
    pub return_type: CppType,
    pub params: Vec<Parameter>,
    pub template_params: Vec<SmolStr>,
    pub specialization: Vec<CppType>,
    /// Host base name chosen by the template resolver (`sum_int`)
    pub instance_name: Option<SmolStr>,
    pub is_static: bool,
    pub is_const: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_deleted: bool,
    pub meta: DeclMeta,
}

impl FunctionDecl {
    pub fn new(name: impl Into<SmolStr>, return_type: &str) -> Self {
        Self {
            name: name.into(),
            return_type: CppType::parse(return_type),
            ..Default::default()
        }
    }

    pub fn method(name: impl Into<SmolStr>, return_type: &str) -> Self {
        Self {
            kind: FunctionKind::Method,
            ..Self::new(name, return_type)
        }
    }

    pub fn constructor(class_name: impl Into<SmolStr>) -> Self {
        Self {
            name: class_name.into(),
            kind: FunctionKind::Constructor,
            return_type: CppType::void(),
            ..Default::default()
        }
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = Parameter>) -> Self {
        self.params.extend(params);
        self
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

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn as_pure_virtual(mut self) -> Self {
        self.is_virtual = true;
        self.is_pure_virtual = true;
        self
    }

    pub fn as_deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    pub fn is_method(&self) -> bool {
        self.kind == FunctionKind::Method
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == FunctionKind::Constructor
    }

    /// An uninstantiated template.
    pub fn is_template(&self) -> bool {
        !self.template_params.is_empty()
    }

    pub fn is_operator(&self) -> bool {
        self.name.starts_with("operator")
            && self.name[8..]
                .chars()
                .next()
                .is_some_and(|c| !(c.is_alphanumeric() || c == '_'))
    }

    pub fn is_variadic(&self) -> bool {
        self.params.iter().any(|p| p.is_variadic)
    }

    /// Name used at a native call site (`sum<int>` once specialized).
    pub fn native_call_name(&self) -> String {
        if self.specialization.is_empty() {
            self.name.to_string()
        } else {
            let args: Vec<String> = self.specialization.iter().map(CppType::str_code).collect();
            format!("{}<{}>", self.name, args.join(", "))
        }
    }

    pub fn param_list_code(&self) -> String {
        self.params
            .iter()
            .map(Parameter::decl_code)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Native signature, used in traceability comments.
    pub fn signature_code(&self) -> String {
        let mut s = String::new();
        if !self.template_params.is_empty() {
            let params: Vec<String> = self
                .template_params
                .iter()
                .map(|p| format!("typename {}", p))
                .collect();
            s.push_str(&format!("template<{}> ", params.join(", ")));
        }
        if self.is_static {
            s.push_str("static ");
        }
        if self.is_virtual {
            s.push_str("virtual ");
        }
        if !self.is_constructor() {
            s.push_str(&self.return_type.str_code());
            s.push(' ');
        }
        s.push_str(&self.native_call_name());
        s.push('(');
        s.push_str(&self.param_list_code());
        s.push(')');
        if self.is_const {
            s.push_str(" const");
        }
        if self.is_pure_virtual {
            s.push_str(" = 0");
        }
        if self.is_deleted {
            s.push_str(" = delete");
        }
        s
    }
}
