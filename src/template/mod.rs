//! Template resolution.
//!
//! Templates are never bound as such. Each instantiation request whose
//! pattern matches a template's name yields concrete declarations that then
//! go through adaptation like any other declaration:
//!
//! ```text
//! template<typename T> T sum(const T * v, int n)   + request ["int", "double"]
//!     │ substitute T
//!     ▼
//! int sum<int>(const int * v, int n)          host name sum_int
//! double sum<double>(const double * v, int n) host name sum_double
//! ```

use smol_str::SmolStr;

use crate::config::Config;
use crate::decl::{ClassDecl, CppType, FieldDecl, FunctionDecl, MemberItem, Parameter, contains_word, replace_word};
use crate::error::AdaptError;

/// Concrete declarations produced for one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion<T> {
    pub instances: Vec<T>,
    /// Requested argument lists that mention the template itself
    pub recursive: Vec<String>,
    /// Whether any request matched
    pub requested: bool,
}

impl<T> Default for Expansion<T> {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            recursive: Vec::new(),
            requested: false,
        }
    }
}

/// `std::string` → `string`, `unsigned int` → `unsigned_int`, `int *` → `int_ptr`.
pub fn type_suffix(ty: &CppType) -> String {
    let code = ty.str_code().replace("std::", "");
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '*' => out.push_str("_ptr"),
            '&' => out.push_str("_ref"),
            c if c.is_alphanumeric() || c == '_' => out.push(c),
            _ => out.push('_'),
        }
    }
    out.split('_').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("_")
}

fn instance_name(name: &str, args: &[CppType]) -> SmolStr {
    let suffixes: Vec<String> = args.iter().map(type_suffix).collect();
    SmolStr::new(format!("{}_{}", name, suffixes.join("_")))
}

fn bindings(params: &[SmolStr], args: &[CppType]) -> Vec<(SmolStr, CppType)> {
    params.iter().cloned().zip(args.iter().cloned()).collect()
}

/// Argument lists requested for `name`, checked against `arity`.
fn requests<'c>(
    config: &'c Config,
    name: &str,
    arity: usize,
) -> Result<(Vec<(&'c [CppType], bool)>, bool), AdaptError> {
    let mut lists = Vec::new();
    let mut requested = false;
    for request in config.templates.iter().filter(|r| r.matcher.matches(name)) {
        requested = true;
        for args in &request.type_args {
            if args.len() != arity {
                return Err(AdaptError::TemplateArity {
                    template: name.to_string(),
                    expected: arity,
                    found: args.len(),
                });
            }
            lists.push((args.as_slice(), request.spec.add_suffix));
        }
    }
    Ok((lists, requested))
}

fn is_recursive(name: &str, args: &[CppType]) -> bool {
    args.iter().any(|a| contains_word(&a.base, name))
}

fn describe(args: &[CppType]) -> String {
    args.iter().map(CppType::str_code).collect::<Vec<_>>().join(", ")
}

fn substitute_param(param: &Parameter, bindings: &[(SmolStr, CppType)]) -> Parameter {
    let mut p = param.clone();
    p.ty = param.ty.substitute_all(bindings);
    if let Some(default) = &p.default_value {
        let mut value = default.clone();
        for (name, concrete) in bindings {
            value = replace_word(&value, name, &concrete.str_code());
        }
        p.default_value = Some(value);
    }
    p
}

fn substitute_function(function: &FunctionDecl, bindings: &[(SmolStr, CppType)]) -> FunctionDecl {
    let mut f = function.clone();
    f.return_type = function.return_type.substitute_all(bindings);
    f.params = function.params.iter().map(|p| substitute_param(p, bindings)).collect();
    f
}

/// Instantiate a function template.
pub fn instantiate_function(config: &Config, function: &FunctionDecl) -> Result<Expansion<FunctionDecl>, AdaptError> {
    let (lists, requested) = requests(config, &function.name, function.template_params.len())?;
    let mut expansion = Expansion {
        requested,
        ..Default::default()
    };
    for (args, add_suffix) in lists {
        if is_recursive(&function.name, args) {
            expansion.recursive.push(describe(args));
            continue;
        }
        let mut instance = substitute_function(function, &bindings(&function.template_params, args));
        instance.template_params.clear();
        instance.specialization = args.to_vec();
        instance.instance_name = add_suffix.then(|| instance_name(&function.name, args));
        tracing::debug!(template = %function.name, args = %describe(args), "function template instantiated");
        expansion.instances.push(instance);
    }
    Ok(expansion)
}

/// Instantiate a class template; members are specialized, member templates
/// keep their own parameters.
pub fn instantiate_class(config: &Config, class: &ClassDecl) -> Result<Expansion<ClassDecl>, AdaptError> {
    let (lists, requested) = requests(config, &class.name, class.template_params.len())?;
    let mut expansion = Expansion {
        requested,
        ..Default::default()
    };
    for (args, add_suffix) in lists {
        if is_recursive(&class.name, args) {
            expansion.recursive.push(describe(args));
            continue;
        }
        let bindings = bindings(&class.template_params, args);
        let mut instance = class.clone();
        instance.template_params.clear();
        instance.specialization = args.to_vec();
        instance.instance_name = add_suffix.then(|| instance_name(&class.name, args));
        instance.bases = class.bases.iter().map(|b| b.substitute_all(&bindings)).collect();
        for member in &mut instance.members {
            match &mut member.item {
                MemberItem::Method(f) => *f = substitute_function(f, &bindings),
                MemberItem::Field(field) => *field = substitute_field(field, &bindings),
                _ => {}
            }
        }
        tracing::debug!(template = %class.name, args = %describe(args), "class template instantiated");
        expansion.instances.push(instance);
    }
    Ok(expansion)
}

fn substitute_field(field: &FieldDecl, bindings: &[(SmolStr, CppType)]) -> FieldDecl {
    let mut f = field.clone();
    f.ty = field.ty.substitute_all(bindings);
    f
}
