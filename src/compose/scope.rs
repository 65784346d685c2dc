//! Module level composition: namespaces, free functions, enums, constants.

use super::{
    BoundFunction, ComposedComment, ComposedConstant, ComposedEnum, ComposedEnumValue, Composer,
    ModuleScope, ScopeItem,
};
use crate::adapt::{Adaptation, Owner, adapt_function, is_buffer_dispatch_template};
use crate::base::QualifiedName;
use crate::config::RuleTarget;
use crate::decl::{ConstantDecl, ConstantKind, Declaration, EnumDecl, FunctionDecl, NamespaceDecl};
use crate::diagnostics::codes;
use crate::template::instantiate_function;

impl Composer<'_> {
    pub(super) fn compose_decls(&mut self, decls: &[Declaration], native: &QualifiedName, into: &mut ModuleScope) {
        for decl in decls {
            match decl {
                Declaration::Namespace(ns) => self.compose_namespace(ns, native, into),
                Declaration::Function(f) => {
                    if f.is_deleted {
                        into.deleted.push(f.name.to_string());
                        continue;
                    }
                    if self.config.rules.is_excluded(RuleTarget::Function, &f.name) {
                        tracing::trace!(function = %native.qualify(&f.name), "excluded by rule");
                        continue;
                    }
                    for bound in self.bind_function(f, native, None) {
                        into.items.push(ScopeItem::Function(bound));
                    }
                }
                Declaration::Class(c) => {
                    for class in self.compose_class(c, native) {
                        into.items.push(ScopeItem::Class(class));
                    }
                }
                Declaration::Enum(e) => {
                    if let Some(composed) = self.compose_enum(e, native) {
                        into.items.push(ScopeItem::Enum(composed));
                    }
                }
                Declaration::Constant(c) => {
                    if let Some(composed) = self.compose_constant(c, native) {
                        into.items.push(ScopeItem::Constant(composed));
                    }
                }
                Declaration::Comment(c) => {
                    if !self.config.options.emit.exclude_comments {
                        into.items.push(ScopeItem::Comment(ComposedComment { text: c.text.clone() }));
                    }
                }
            }
        }
    }

    /// Merge one physical namespace occurrence into `into`.
    fn compose_namespace(&mut self, ns: &NamespaceDecl, scope: &QualifiedName, into: &mut ModuleScope) {
        if ns.is_anonymous() {
            tracing::trace!(scope = %scope, "anonymous namespace dropped");
            return;
        }
        let native = scope.child(ns.name.clone());
        if self.config.rules.is_excluded(RuleTarget::Namespace, &ns.name)
            || self.config.namespaces_exclude.matches(&ns.name)
        {
            tracing::debug!(namespace = %native, "namespace excluded");
            return;
        }
        if self.config.namespaces_root.matches(&ns.name) {
            self.compose_decls(&ns.children, &native, into);
            return;
        }

        let index = match into.namespaces.get(&ns.name) {
            Some(&index) => index,
            None => {
                let host_name = self.namer.identifier(RuleTarget::Namespace, &ns.name);
                into.items.push(ScopeItem::Namespace(ModuleScope::new(
                    native.clone(),
                    host_name,
                    ns.meta.clone(),
                )));
                let index = into.items.len() - 1;
                into.namespaces.insert(ns.name.clone(), index);
                index
            }
        };
        if let ScopeItem::Namespace(merged) = &mut into.items[index] {
            if merged.meta.doc.is_none() {
                merged.meta.doc = ns.meta.doc.clone();
            }
            self.compose_decls(&ns.children, &native, merged);
        }
    }

    /// Adapt a function, instantiating it first when it is a template.
    pub(super) fn bind_function(
        &mut self,
        function: &FunctionDecl,
        scope: &QualifiedName,
        owner: Option<&Owner>,
    ) -> Vec<BoundFunction> {
        if !function.is_template() {
            return self.adapt(function, scope, owner).into_iter().collect();
        }

        let qualified = scope.qualify(&function.name);
        let location = &function.meta.location;
        let expansion = match instantiate_function(self.config, function) {
            Ok(expansion) => expansion,
            Err(err) => {
                self.collector.adaptation_error(&qualified, location, &err);
                return Vec::new();
            }
        };
        for args in &expansion.recursive {
            self.collector.recursive_instantiation(&qualified, location, args);
        }
        if expansion.requested {
            return expansion
                .instances
                .iter()
                .filter_map(|instance| self.adapt(instance, scope, owner))
                .collect();
        }
        if is_buffer_dispatch_template(self.config, function) {
            return self.adapt(function, scope, owner).into_iter().collect();
        }
        self.collector.unused_template(&qualified, location);
        Vec::new()
    }

    fn adapt(&mut self, function: &FunctionDecl, scope: &QualifiedName, owner: Option<&Owner>) -> Option<BoundFunction> {
        let qualified = scope.qualify(&function.native_call_name());
        let location = &function.meta.location;
        match adapt_function(self.config, function, scope, owner) {
            Ok(Adaptation::Adapted(adapted)) => {
                for (code, message) in &adapted.notes {
                    self.collector.note(&qualified, location, *code, message.as_str(), false);
                }
                Some(BoundFunction::new(*adapted))
            }
            Ok(Adaptation::Excluded { reason }) => {
                self.collector
                    .note(&qualified, location, codes::EXCLUDED_BY_PARAMETER_TYPE, reason, true);
                None
            }
            Err(err) => {
                self.collector.adaptation_error(&qualified, location, &err);
                None
            }
        }
    }

    pub(super) fn compose_enum(&mut self, decl: &EnumDecl, scope: &QualifiedName) -> Option<ComposedEnum> {
        if self.config.rules.is_excluded(RuleTarget::Enum, &decl.name) {
            return None;
        }
        // plain enum values live in the enclosing scope
        let value_scope = if decl.is_scoped {
            scope.child(decl.name.clone())
        } else {
            scope.clone()
        };

        let mut values = Vec::with_capacity(decl.values.len());
        let mut known: Vec<(&str, i64)> = Vec::new();
        let mut next = Some(0i64);
        for (index, value) in decl.values.iter().enumerate() {
            let number = match &value.value {
                None => next,
                Some(expr) => value
                    .integer_value()
                    .or_else(|| self.config.constant(expr.trim()))
                    .or_else(|| known.iter().find(|(n, _)| *n == expr.trim()).map(|(_, v)| *v)),
            };
            next = number.map(|n| n + 1);
            if let Some(n) = number {
                known.push((&value.name, n));
            }

            if self.namer.is_count_value(decl, index)
                || self.config.rules.is_excluded(RuleTarget::EnumValue, &value.name)
            {
                continue;
            }
            values.push(ComposedEnumValue {
                host_name: self.namer.enum_value_name(decl, value),
                native: value_scope.qualify(&value.name),
                number,
                expression: match number {
                    Some(_) => None,
                    None => value.value.clone(),
                },
                meta: value.meta.clone(),
            });
        }

        Some(ComposedEnum {
            native_name: scope.qualify(&decl.name),
            host_name: self.namer.enum_name(decl),
            is_scoped: decl.is_scoped,
            values,
            meta: decl.meta.clone(),
        })
    }

    fn compose_constant(&mut self, constant: &ConstantDecl, scope: &QualifiedName) -> Option<ComposedConstant> {
        if !self.config.exports_constant(constant) {
            return None;
        }
        let (native, host_type, host_value) = match (&constant.kind, &constant.ty) {
            (ConstantKind::Global, Some(ty)) => (
                scope.qualify(&constant.name),
                self.types.host_type(ty),
                self.types.host_value(&constant.value),
            ),
            _ => match literal(constant) {
                Some((host_type, host_value)) => (constant.name.to_string(), host_type.to_string(), host_value),
                None => {
                    self.collector.note(
                        &scope.qualify(&constant.name),
                        &constant.meta.location,
                        codes::NON_LITERAL_MACRO,
                        format!("macro value '{}' is not a literal", constant.value),
                        true,
                    );
                    return None;
                }
            },
        };
        Some(ComposedConstant {
            native,
            host_name: self.namer.identifier(RuleTarget::Constant, &constant.name),
            host_type,
            host_value,
            meta: constant.meta.clone(),
        })
    }
}

/// Host type and value of a literal macro.
fn literal(constant: &ConstantDecl) -> Option<(&'static str, String)> {
    if let Some(value) = constant.integer_value() {
        return Some(("int", value.to_string()));
    }
    let text = constant.value.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Some(("str", text.to_string()));
    }
    let number = text.trim_end_matches(['f', 'F', 'l', 'L']);
    if number.contains(['.', 'e', 'E']) && number.parse::<f64>().is_ok() {
        return Some(("float", number.to_string()));
    }
    None
}
