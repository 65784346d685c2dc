//! Class and struct composition.
//!
//! Private members never reach the host. Protected members do only for
//! classes matched by an expose-protected rule, through a publicist subclass
//! re-declaring them public. Classes matched by an override-virtual rule get
//! a trampoline so host subclasses can override virtual methods.

use super::{
    ClassItem, ClassProtocols, ComposedClass, ComposedComment, ComposedField, Composer, Publicist,
    Trampoline, TrampolineMethod, scope_identifier,
};
use crate::adapt::{HostParam, Owner};
use crate::base::QualifiedName;
use crate::base::constants::NUMERIC_NATIVE_TYPES;
use crate::config::{EffectCategory, RuleTarget};
use crate::decl::{Access, CArray, ClassDecl, ClassKind, CppType, FieldDecl, FunctionDecl, MemberItem};
use crate::diagnostics::codes;
use crate::template::instantiate_class;

impl Composer<'_> {
    /// One composed class, or one per instantiation of a class template.
    pub(super) fn compose_class(&mut self, class: &ClassDecl, scope: &QualifiedName) -> Vec<ComposedClass> {
        if self.config.rules.is_excluded(RuleTarget::Class, &class.name) {
            tracing::trace!(class = %scope.qualify(&class.name), "excluded by rule");
            return Vec::new();
        }
        if !class.is_template() {
            return vec![self.compose_concrete_class(class, scope)];
        }

        let qualified = scope.qualify(&class.name);
        let location = &class.meta.location;
        let expansion = match instantiate_class(self.config, class) {
            Ok(expansion) => expansion,
            Err(err) => {
                self.collector.adaptation_error(&qualified, location, &err);
                return Vec::new();
            }
        };
        for args in &expansion.recursive {
            self.collector.recursive_instantiation(&qualified, location, args);
        }
        if !expansion.requested {
            self.collector.unused_template(&qualified, location);
        }
        expansion
            .instances
            .iter()
            .map(|instance| self.compose_concrete_class(instance, scope))
            .collect()
    }

    fn compose_concrete_class(&mut self, class: &ClassDecl, scope: &QualifiedName) -> ComposedClass {
        let native_name = scope.qualify(&class.native_name());
        let class_scope = scope.child(class.native_name());
        let config = self.config;
        let rules = &config.rules;
        let expose_protected = rules.has(EffectCategory::ExposeProtected, RuleTarget::Class, &class.name);
        let override_virtual =
            rules.has(EffectCategory::OverrideVirtual, RuleTarget::Class, &class.name) && class.has_virtual_methods();

        let mut publicist = Publicist {
            name: format!("{}_publicist", scope_identifier(&native_name)),
            class_native: native_name.clone(),
            members: Vec::new(),
        };
        let mut trampoline = Trampoline {
            name: format!("{}_trampoline", scope_identifier(&native_name)),
            class_native: native_name.clone(),
            constructor_name: class.name.clone(),
            methods: Vec::new(),
        };
        let is_abstract = class.methods().any(|(_, f)| f.is_pure_virtual);

        let mut composed = ComposedClass {
            host_name: self.namer.class_name(class),
            bases: class
                .bases
                .iter()
                .map(|base| qualify_base(scope, base))
                .collect(),
            native_name: native_name.clone(),
            items: Vec::new(),
            publicist: None,
            trampoline: None,
            protocols: self.class_protocols(class),
            meta: class.meta.clone(),
            deleted: Vec::new(),
        };

        for member in &class.members {
            let protected = match member.access {
                Access::Public => false,
                Access::Protected if expose_protected => true,
                _ => continue,
            };
            match &member.item {
                MemberItem::Method(method) => {
                    if method.is_deleted {
                        composed.deleted.push(method.name.to_string());
                        continue;
                    }
                    if rules.is_excluded(RuleTarget::Function, &method.name) {
                        continue;
                    }
                    if override_virtual && method.is_virtual {
                        trampoline.methods.push(TrampolineMethod {
                            host_name: self.namer.identifier(RuleTarget::Function, &method.name),
                            function: method.clone(),
                        });
                    }
                    if method.is_constructor() && (protected || (is_abstract && !override_virtual)) {
                        self.collector.note(
                            &class_scope.qualify(&method.name),
                            &method.meta.location,
                            codes::ABSTRACT_CONSTRUCTOR,
                            "constructor of an abstract or protected-only class is not bound",
                            true,
                        );
                        continue;
                    }
                    let owner = Owner {
                        native_name: native_name.clone(),
                        publicist: protected.then(|| publicist.name.clone()),
                    };
                    if protected && !publicist.members.contains(&method.name) {
                        publicist.members.push(method.name.clone());
                    }
                    for bound in self.bind_function(method, &class_scope, Some(&owner)) {
                        composed.items.push(ClassItem::Method(bound));
                    }
                }
                MemberItem::Field(field) => {
                    if rules.is_excluded(RuleTarget::Member, &field.name) {
                        continue;
                    }
                    let via = protected.then(|| publicist.name.clone());
                    if let Some(composed_field) = self.compose_field(field, &class_scope, via) {
                        if protected && !publicist.members.contains(&field.name) {
                            publicist.members.push(field.name.clone());
                        }
                        composed.items.push(ClassItem::Field(composed_field));
                    }
                }
                MemberItem::Class(nested) if !protected => {
                    for nested in self.compose_class(nested, &class_scope) {
                        composed.items.push(ClassItem::Class(nested));
                    }
                }
                MemberItem::Enum(decl) if !protected => {
                    if let Some(e) = self.compose_enum(decl, &class_scope) {
                        composed.items.push(ClassItem::Enum(e));
                    }
                }
                MemberItem::Comment(comment) if !config.options.emit.exclude_comments => {
                    composed.items.push(ClassItem::Comment(ComposedComment {
                        text: comment.text.clone(),
                    }));
                }
                _ => {}
            }
        }

        if config.options.struct_default_ctor && class.kind == ClassKind::Struct && !class.has_user_constructor() {
            let params = self.default_ctor_params(class);
            composed.items.insert(0, ClassItem::DefaultConstructor(params));
        }
        if !publicist.members.is_empty() {
            composed.publicist = Some(publicist);
        }
        if override_virtual {
            composed.trampoline = Some(trampoline);
        }
        tracing::trace!(class = %native_name, items = composed.items.len(), "class composed");
        composed
    }

    fn class_protocols(&self, class: &ClassDecl) -> ClassProtocols {
        let config = self.config;
        let copyable = is_copyable(class);
        ClassProtocols {
            copy: copyable && config.class_copy.matches(&class.name),
            deep_copy: copyable && config.class_deep_copy.matches(&class.name),
            held_as_shared: config.class_held_as_shared.matches(&class.name),
            dynamic_attributes: config.class_dynamic_attributes.matches(&class.name),
            iterable: config
                .iterable_element(&class.name)
                .map(|element| self.types.host_type(element)),
        }
    }

    fn compose_field(&mut self, field: &FieldDecl, scope: &QualifiedName, publicist: Option<String>) -> Option<ComposedField> {
        let read_only = field.ty.is_const
            || self
                .config
                .rules
                .has(EffectCategory::ReadOnly, RuleTarget::Member, &field.name);
        let host_name = self.namer.identifier(RuleTarget::Member, &field.name);

        let (host_type, array_len) = match &field.c_array {
            None => (self.types.host_type(&field.ty), None),
            Some(array) => {
                let element = self.types.resolve_synonyms(&field.ty.unqualified());
                let len = match array {
                    CArray::Fixed(n) => Some(*n),
                    CArray::Symbolic(name) => self.config.constant(name).and_then(|n| usize::try_from(n).ok()),
                    CArray::Unsized => None,
                };
                match len {
                    Some(n) if n > 0 && NUMERIC_NATIVE_TYPES.contains(&element.base.as_str()) => {
                        ("np.ndarray".to_string(), Some(n))
                    }
                    _ => {
                        self.collector.note(
                            &scope.qualify(&field.name),
                            &field.meta.location,
                            codes::UNBOUND_ARRAY_FIELD,
                            format!("C array field of '{}' is not bound", field.ty.str_code()),
                            true,
                        );
                        return None;
                    }
                }
            }
        };

        Some(ComposedField {
            native_name: field.name.clone(),
            host_name,
            ty: field.ty.clone(),
            host_type,
            read_only,
            is_static: field.is_static,
            array_len,
            publicist,
            meta: field.meta.clone(),
        })
    }

    /// One parameter per public, assignable field.
    fn default_ctor_params(&self, class: &ClassDecl) -> Vec<HostParam> {
        class
            .members
            .iter()
            .filter(|m| m.access == Access::Public)
            .filter_map(|m| match &m.item {
                MemberItem::Field(f) => Some(f),
                _ => None,
            })
            .filter(|f| {
                !f.is_static
                    && !f.ty.is_const
                    && f.c_array.is_none()
                    && !self.config.rules.is_excluded(RuleTarget::Member, &f.name)
            })
            .map(|f| {
                let host_type = self.types.host_type(&f.ty);
                let host_default = match &f.default_value {
                    Some(value) => self.types.host_value(value),
                    None if host_type.contains('[') => "...".to_string(),
                    None => format!("{}()", host_type),
                };
                HostParam {
                    name: self.namer.identifier(RuleTarget::Member, &f.name),
                    native_name: f.name.clone(),
                    native_type: f.ty.clone(),
                    native_default: Some(
                        f.default_value
                            .clone()
                            .unwrap_or_else(|| format!("{}()", f.ty.str_code())),
                    ),
                    host_default: Some(host_default),
                    host_type,
                }
            })
            .collect()
    }
}

/// Bases are spelled relative to the class's scope; glue code is not.
fn qualify_base(scope: &QualifiedName, base: &CppType) -> String {
    let code = base.str_code();
    if code.contains("::") || scope.is_root() {
        code
    } else {
        scope.qualify(&code)
    }
}

/// A class is copyable unless it declares a copy constructor that is deleted
/// or not public.
fn is_copyable(class: &ClassDecl) -> bool {
    let mut copy_constructors = class.members.iter().filter_map(|member| match &member.item {
        MemberItem::Method(f) if f.is_constructor() && is_copy_signature(class, f) => Some((member.access, f)),
        _ => None,
    });
    copy_constructors.all(|(access, f)| access == Access::Public && !f.is_deleted)
}

fn is_copy_signature(class: &ClassDecl, f: &FunctionDecl) -> bool {
    match f.params.as_slice() {
        [param] => param.ty.is_reference() && param.ty.template_name() == class.name.as_str(),
        _ => false,
    }
}
