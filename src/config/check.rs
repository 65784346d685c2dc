//! Per-unit validation: constant folding, host name collisions, rule usage.

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::options::RuleTarget;
use super::rules::Rule;
use super::Config;
use crate::decl::{DeclRef, TranslationUnit, walk};
use crate::error::ConfigError;
use crate::naming::{Namer, is_valid_identifier};

impl Config {
    /// Bind the configuration to one translation unit.
    ///
    /// Integer macros and global constants join the constants table (explicit
    /// entries win). Two distinct native names translating to one host
    /// identifier in the same scope, or a host name that is not an
    /// identifier, is a configuration error.
    pub fn prepare(&self, unit: &TranslationUnit) -> Result<Config, ConfigError> {
        let mut config = self.clone();
        walk(&unit.decls, &mut |_, node| {
            if let DeclRef::Constant(constant) = node {
                if let Some(value) = constant.integer_value() {
                    config.constants.entry(constant.name.to_string()).or_insert(value);
                }
            }
        });
        config.check_host_names(unit)?;
        tracing::debug!(constants = config.constants.len(), "configuration bound to unit");
        Ok(config)
    }

    fn check_host_names(&self, unit: &TranslationUnit) -> Result<(), ConfigError> {
        let namer = Namer::new(self);
        let mut seen: IndexMap<(String, String), String> = IndexMap::new();
        let mut failure: Option<ConfigError> = None;

        walk(&unit.decls, &mut |scope, node| {
            if failure.is_some() {
                return;
            }
            let (target, native, host) = match node {
                DeclRef::Function(f) => {
                    if f.is_constructor() || f.is_operator() || f.is_template() {
                        return;
                    }
                    match namer.function_name(f) {
                        Ok(host) => (RuleTarget::Function, f.name.to_string(), host),
                        Err(_) => return,
                    }
                }
                DeclRef::Class(c) if !c.is_template() => {
                    (RuleTarget::Class, c.name.to_string(), namer.class_name(c))
                }
                DeclRef::Enum(e) => (RuleTarget::Enum, e.name.to_string(), namer.enum_name(e)),
                DeclRef::Field(f) => (
                    RuleTarget::Member,
                    f.name.to_string(),
                    namer.identifier(RuleTarget::Member, &f.name),
                ),
                DeclRef::EnumValue(e, v) => (
                    RuleTarget::EnumValue,
                    v.name.to_string(),
                    namer.enum_value_name(e, v),
                ),
                DeclRef::Namespace(ns) if !ns.is_anonymous() => (
                    RuleTarget::Namespace,
                    ns.name.to_string(),
                    namer.identifier(RuleTarget::Namespace, &ns.name),
                ),
                DeclRef::Constant(c) if !self.exports_constant(c) => return,
                DeclRef::Constant(c) => (
                    RuleTarget::Constant,
                    c.name.to_string(),
                    namer.identifier(RuleTarget::Constant, &c.name),
                ),
                DeclRef::Param(_, p) => {
                    let host = namer.identifier(RuleTarget::ParamName, &p.name);
                    if !p.name.is_empty() && !is_valid_identifier(&host) {
                        failure = Some(ConfigError::InvalidHostIdentifier {
                            name: p.name.to_string(),
                            host_name: host,
                        });
                    }
                    return;
                }
                _ => return,
            };

            if self.rules.is_excluded(target, &native) {
                return;
            }
            if !is_valid_identifier(&host) {
                failure = Some(ConfigError::InvalidHostIdentifier {
                    name: scope.qualify(&native),
                    host_name: host,
                });
                return;
            }
            match seen.entry((scope.to_string(), host.clone())) {
                Entry::Occupied(first) if first.get() != &native => {
                    failure = Some(ConfigError::NameCollision {
                        scope: scope.to_string(),
                        host_name: host,
                        first: first.get().clone(),
                        second: native,
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(native);
                }
            }
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Rules that match no declaration of `unit`, in configuration order.
    pub fn unmatched_rules(&self, unit: &TranslationUnit) -> Vec<&Rule> {
        let rules = self.rules.rules();
        let mut matched = vec![false; rules.len()];
        walk(&unit.decls, &mut |_, node| {
            let candidates: Vec<(RuleTarget, String)> = match node {
                DeclRef::Function(f) => vec![(RuleTarget::Function, f.name.to_string())],
                DeclRef::Param(_, p) => vec![
                    (RuleTarget::ParamName, p.name.to_string()),
                    (RuleTarget::ParamType, p.ty.str_code()),
                ],
                DeclRef::Class(c) => vec![(RuleTarget::Class, c.name.to_string())],
                DeclRef::Field(f) => vec![(RuleTarget::Member, f.name.to_string())],
                DeclRef::Enum(e) => vec![(RuleTarget::Enum, e.name.to_string())],
                DeclRef::EnumValue(_, v) => vec![(RuleTarget::EnumValue, v.name.to_string())],
                DeclRef::Namespace(n) => vec![(RuleTarget::Namespace, n.name.to_string())],
                DeclRef::Constant(c) => vec![(RuleTarget::Constant, c.name.to_string())],
            };
            for (i, rule) in rules.iter().enumerate() {
                if matched[i] {
                    continue;
                }
                matched[i] = candidates
                    .iter()
                    .any(|(target, name)| rule.target() == *target && rule.matches(name));
            }
        });
        rules
            .iter()
            .zip(matched)
            .filter(|(_, m)| !m)
            .map(|(rule, _)| rule)
            .collect()
    }
}
