//! Translation fixtures.

use litbind::{
    FunctionDecl, Parameter, RuleEffect, RuleSpec, TranslationOutput, TranslationUnit, TranslatorOptions, translate,
};

/// Translate `unit` with `options`, panicking on configuration errors.
pub fn translated(options: TranslatorOptions, unit: &TranslationUnit) -> TranslationOutput {
    translate(options, unit).unwrap_or_else(|e| panic!("configuration rejected: {e}"))
}

/// Translate `unit` with default options.
pub fn translated_default(unit: &TranslationUnit) -> TranslationOutput {
    translated(TranslatorOptions::default(), unit)
}

/// Default options plus function rules.
pub fn with_function_rules(rules: &[(&str, RuleEffect)]) -> TranslatorOptions {
    rules.iter().fold(TranslatorOptions::default(), |options, (pattern, effect)| {
        options.with_rule(RuleSpec::function(*pattern, effect.clone()))
    })
}

/// `void name(<ty> v)`
pub fn unary(name: &str, ty: &str) -> FunctionDecl {
    FunctionDecl::new(name, "void").with_param(Parameter::new("v", ty))
}
