//! Compiled rules and first-match lookup.

use regex::Regex;

use super::options::{EffectCategory, RuleEffect, RuleSpec, RuleTarget};
use crate::error::ConfigError;

/// A compiled optional regex. An empty pattern matches nothing.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    regex: Option<Regex>,
}

impl Matcher {
    pub fn compile(option: &str, pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Ok(Self::default());
        }
        Regex::new(pattern)
            .map(|regex| Self { regex: Some(regex) })
            .map_err(|e| ConfigError::invalid_regex(option, pattern, e))
    }

    /// Search semantics: the pattern may match anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }
}

/// One validated rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Position in the configured rule list
    pub index: usize,
    pub spec: RuleSpec,
    matcher: Matcher,
}

impl Rule {
    pub fn target(&self) -> RuleTarget {
        self.spec.target
    }

    pub fn effect(&self) -> &RuleEffect {
        &self.spec.effect
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matcher.matches(name)
    }

    /// Host name produced by a rename rule, `None` for other effects.
    pub fn rename(&self, name: &str) -> Option<String> {
        let RuleEffect::Rename(replacement) = &self.spec.effect else {
            return None;
        };
        let regex = self.matcher.regex.as_ref()?;
        Some(regex.replace(name, replacement.as_str()).into_owned())
    }
}

/// The ordered rule list. First match wins within an effect category.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            if !spec.effect.applies_to(spec.target) {
                return Err(ConfigError::IncompatibleRule {
                    pattern: spec.pattern.clone(),
                    effect: spec.effect.display(),
                    target: spec.target.display(),
                });
            }
            if let RuleEffect::Rename(replacement) = &spec.effect {
                if replacement.trim().is_empty() {
                    return Err(ConfigError::EmptyRename(spec.pattern.clone()));
                }
            }
            let matcher = Matcher::compile(&format!("rule #{}", index), &spec.pattern)?;
            rules.push(Rule {
                index,
                spec: spec.clone(),
                matcher,
            });
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn first_match(&self, category: EffectCategory, target: RuleTarget, name: &str) -> Option<&Rule> {
        let found = self.rules.iter().find(|r| {
            r.spec.target == target && r.spec.effect.category() == category && r.matches(name)
        });
        if let Some(rule) = found {
            tracing::trace!(rule = %rule.spec.describe(), name, "rule matched");
        }
        found
    }

    pub fn has(&self, category: EffectCategory, target: RuleTarget, name: &str) -> bool {
        self.first_match(category, target, name).is_some()
    }

    pub fn is_excluded(&self, target: RuleTarget, name: &str) -> bool {
        self.has(EffectCategory::Exclude, target, name)
    }

    pub fn rename(&self, target: RuleTarget, name: &str) -> Option<String> {
        self.first_match(EffectCategory::Rename, target, name)
            .and_then(|rule| rule.rename(name))
    }
}
