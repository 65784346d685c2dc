//! Per-scope overload settlement and shim naming.

use rustc_hash::FxHashMap;

use super::{
    BoundFunction, ClassItem, ComposedClass, Composer, ModuleScope, ScopeItem, c_identifier, scope_identifier,
};
use crate::adapt::{AdaptedFunction, OverloadOutcome, resolve_overloads};
use crate::diagnostics::codes;

/// Items of a scope that may hold a bound function.
trait FunctionSlot {
    fn function_mut(&mut self) -> Option<&mut BoundFunction>;
}

impl FunctionSlot for ScopeItem {
    fn function_mut(&mut self) -> Option<&mut BoundFunction> {
        match self {
            ScopeItem::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl FunctionSlot for ClassItem {
    fn function_mut(&mut self) -> Option<&mut BoundFunction> {
        match self {
            ClassItem::Method(f) => Some(f),
            _ => None,
        }
    }
}

impl Composer<'_> {
    /// Settle `scope` and everything below it.
    pub(super) fn settle_scope(&mut self, scope: &mut ModuleScope) {
        let prefix = scope_identifier(&scope.native.join("::"));
        self.settle_items(&mut scope.items, &scope.deleted, &prefix);
        scope.reindex_namespaces();
        for item in &mut scope.items {
            match item {
                ScopeItem::Namespace(ns) => self.settle_scope(ns),
                ScopeItem::Class(class) => self.settle_class(class),
                _ => {}
            }
        }
    }

    fn settle_class(&mut self, class: &mut ComposedClass) {
        let prefix = scope_identifier(&class.native_name);
        self.settle_items(&mut class.items, &class.deleted, &prefix);
        for item in &mut class.items {
            if let ClassItem::Class(nested) = item {
                self.settle_class(nested);
            }
        }
    }

    /// Resolve the overloads among the functions of `items`, drop the ones
    /// that are covered or ambiguous, then name the shims.
    fn settle_items<T: FunctionSlot>(&mut self, items: &mut Vec<T>, deleted: &[String], prefix: &str) {
        let positions: Vec<usize> = items
            .iter_mut()
            .enumerate()
            .filter_map(|(i, item)| item.function_mut().map(|_| i))
            .collect();
        if positions.is_empty() {
            return;
        }
        let functions: Vec<AdaptedFunction> = positions
            .iter()
            .filter_map(|&i| items[i].function_mut().map(|b| b.function.clone()))
            .collect();

        let mut dropped = vec![false; items.len()];
        for decision in resolve_overloads(self.config, &functions, deleted) {
            let position = positions[decision.index];
            let function = &functions[decision.index];
            let qualified = function.qualified_name();
            let location = &function.original.meta.location;
            match decision.outcome {
                OverloadOutcome::Bound { strategy, overloaded } => {
                    if let Some(bound) = items[position].function_mut() {
                        bound.strategy = strategy;
                        bound.overloaded = overloaded;
                    }
                }
                OverloadOutcome::Covered { by } => {
                    self.collector.note(
                        &qualified,
                        location,
                        codes::OVERLOAD_COVERED,
                        format!("already reachable through '{}'", by),
                        true,
                    );
                    dropped[position] = true;
                }
                OverloadOutcome::Ambiguous { kept } => {
                    self.collector.ambiguous_overload(&qualified, location, &kept);
                    dropped[position] = true;
                }
            }
        }
        let mut index = 0;
        items.retain(|_| {
            let keep = !dropped[index];
            index += 1;
            keep
        });

        name_shims(items, prefix);
    }
}

/// `<scope>__<name>[_overload<k>]_adapt_shim`; the overload number is only
/// added when several shims of the scope share a native name.
fn name_shims<T: FunctionSlot>(items: &mut [T], prefix: &str) {
    let mut totals: FxHashMap<String, usize> = FxHashMap::default();
    for item in items.iter_mut() {
        if let Some(bound) = item.function_mut().filter(|b| b.function.plan.is_some()) {
            *totals.entry(shim_base(bound)).or_default() += 1;
        }
    }
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    for item in items.iter_mut() {
        let Some(bound) = item.function_mut() else {
            continue;
        };
        let base = shim_base(bound);
        let Some(plan) = bound.function.plan.as_mut() else {
            continue;
        };
        let mut name = if prefix.is_empty() {
            base.clone()
        } else {
            format!("{}__{}", prefix, base)
        };
        if totals.get(&base).copied().unwrap_or(0) > 1 {
            let k = seen.entry(base).or_default();
            *k += 1;
            name.push_str(&format!("_overload{}", k));
        }
        name.push_str("_adapt_shim");
        plan.shim_name = name;
    }
}

fn shim_base(bound: &BoundFunction) -> String {
    let f = &bound.function.original;
    if f.is_constructor() {
        return "ctor".to_string();
    }
    c_identifier(f.instance_name.as_deref().unwrap_or(&f.name))
}
