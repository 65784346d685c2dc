//! Overload resolution within one host scope.
//!
//! | host signatures | native signatures | forced | outcome                      |
//! |-----------------|-------------------|--------|------------------------------|
//! | distinct        | any               | any    | all bound                    |
//! | equal           | equal             | no     | first bound, rest covered    |
//! | equal           | distinct          | no     | first bound, rest ambiguous  |
//! | equal           | any               | yes    | all bound with explicit cast |

use rustc_hash::FxHashMap;

use super::AdaptedFunction;
use crate::config::{Config, EffectCategory, RuleTarget};

/// How a bound declaration is referenced from the glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrategy {
    /// `&ns::f`
    Direct,
    /// `py::overload_cast<int>(&ns::f)`
    OverloadCast,
    /// `[](int a) { return ns::f(a); }`
    DispatchLambda,
    /// `&ns__f_adapt_shim`
    Shim,
}

impl BindingStrategy {
    pub fn display(&self) -> &'static str {
        match self {
            BindingStrategy::Direct => "direct",
            BindingStrategy::OverloadCast => "overload-cast",
            BindingStrategy::DispatchLambda => "dispatch-lambda",
            BindingStrategy::Shim => "shim",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverloadOutcome {
    Bound {
        strategy: BindingStrategy,
        /// More than one binding shares the host name
        overloaded: bool,
    },
    /// Same native signature as an already bound declaration
    Covered { by: String },
    /// Same host signature as an already bound declaration
    Ambiguous { kept: String },
}

/// Outcome for one declaration of the scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadDecision {
    pub index: usize,
    pub outcome: OverloadOutcome,
}

fn native_key(function: &AdaptedFunction) -> String {
    function
        .original
        .instance_name
        .as_deref()
        .unwrap_or(&function.original.name)
        .to_string()
}

/// Decide how each declaration of one scope is bound.
///
/// `deleted` lists the native names of deleted declarations of the scope:
/// they are never bound but make `&f` ambiguous.
pub fn resolve_overloads(config: &Config, functions: &[AdaptedFunction], deleted: &[String]) -> Vec<OverloadDecision> {
    let mut native_counts: FxHashMap<String, usize> = FxHashMap::default();
    for f in functions {
        *native_counts.entry(native_key(f)).or_default() += 1;
    }
    for name in deleted {
        *native_counts.entry(name.clone()).or_default() += 1;
    }

    let forced = |f: &AdaptedFunction| {
        config
            .rules
            .has(EffectCategory::ForceOverload, RuleTarget::Function, &f.original.name)
    };

    let mut decisions: Vec<OverloadDecision> = Vec::with_capacity(functions.len());
    let mut bound: Vec<usize> = Vec::new();
    for (index, f) in functions.iter().enumerate() {
        let group_forced = functions
            .iter()
            .filter(|g| g.host_name == f.host_name && g.original.is_static == f.original.is_static)
            .any(forced);
        let clash = bound.iter().copied().find(|&j| {
            let other = &functions[j];
            other.host_name == f.host_name && other.host_signature() == f.host_signature()
        });

        let outcome = match clash {
            Some(j) if !group_forced => {
                let kept = functions[j].original.signature_code();
                if functions[j].native_signature() == f.native_signature() {
                    OverloadOutcome::Covered { by: kept }
                } else {
                    OverloadOutcome::Ambiguous { kept }
                }
            }
            _ => {
                bound.push(index);
                let overloaded_native = native_counts.get(&native_key(f)).copied().unwrap_or(0) > 1;
                let strategy = if f.plan.is_some() {
                    BindingStrategy::Shim
                } else if f.original.is_constructor() || !overloaded_native {
                    BindingStrategy::Direct
                } else if deleted.contains(&native_key(f)) || f.host_params.is_empty() {
                    BindingStrategy::DispatchLambda
                } else {
                    BindingStrategy::OverloadCast
                };
                OverloadOutcome::Bound {
                    strategy,
                    overloaded: false,
                }
            }
        };
        tracing::trace!(function = %f.qualified_name(), ?outcome, "overload resolved");
        decisions.push(OverloadDecision { index, outcome });
    }

    let mut host_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for &i in &bound {
        *host_counts.entry(functions[i].host_name.as_str()).or_default() += 1;
    }
    for decision in &mut decisions {
        let name = functions[decision.index].host_name.as_str();
        if let OverloadOutcome::Bound { overloaded, .. } = &mut decision.outcome {
            *overloaded = host_counts.get(name).copied().unwrap_or(0) > 1;
        }
    }
    decisions
}
