//! Diagnostics reported by a run.

use litbind::{
    ConstantDecl, DiagnosticKind, FunctionDecl, Parameter, RuleEffect, RuleSpec, RuleTarget, Severity,
    SourceLocation, TranslationUnit, TranslatorOptions,
};

use crate::helpers::assertions::{assert_skipped, assert_well_terminated};
use crate::helpers::fixtures::{translated, translated_default, unary};

#[test]
fn test_unmatched_rule_is_a_warning() {
    let rule = RuleSpec::function("^Missing$", RuleEffect::Box);
    let description = rule.describe();
    let output = translated(TranslatorOptions::default().with_rule(rule), &TranslationUnit::new().with(unary("Present", "int")));

    let warnings: Vec<_> = output.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code.as_deref(), Some("W0202"));
    assert_eq!(&*warnings[0].declaration, description);
    assert!(!warnings[0].skipped);
    assert!(output.stub_code.contains("def present(v: int) -> None:"));
}

#[test]
fn test_matched_rule_is_silent() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamName, "^v$"));
    let output = translated(options, &TranslationUnit::new().with(unary("Present", "int")));
    assert!(output.warnings().all(|w| w.code.as_deref() != Some("W0202")));
}

#[test]
fn test_adaptation_error_skips_only_the_failing_declaration() {
    let mut options = TranslatorOptions::default();
    options.variadic_format = true;
    let unit = TranslationUnit::new()
        .with(FunctionDecl::new("Log", "void").with_param(Parameter::new("level", "int")).with_param(Parameter::variadic()))
        .with(unary("Flush", "int"));
    let output = translated(options, &unit);

    assert_skipped(&output, "Log", "E0105");
    let log = output.diagnostics.iter().find(|d| &*d.declaration == "Log").unwrap();
    assert_eq!(log.severity, Severity::Error);
    assert_eq!(log.kind, DiagnosticKind::Adaptation);
    assert!(output.stub_code.contains("def flush(v: int) -> None:"));
    assert_well_terminated(&output);
}

#[test]
fn test_skipped_declarations_keep_their_location() {
    let location = SourceLocation::new("net.h", 42, 1);
    let mut function = FunctionDecl::new("Send", "void")
        .with_param(Parameter::new("data", "const int").with_array(litbind::CArray::Fixed(4)))
        .with_param(Parameter::new("count", "int"));
    function.meta.location = location.clone();
    let output = translated_default(&TranslationUnit::new().with(function));

    let skipped = output.skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].location, location);
}

#[test]
fn test_non_literal_macro_is_noted() {
    let unit = TranslationUnit::new()
        .with(ConstantDecl::define("kCount", "3"))
        .with(ConstantDecl::define("kMask", "(1 << kShift) | kExtra"));
    let mut options = TranslatorOptions::default();
    options.macro_define_include_by_name = "^k".to_string();
    let output = translated(options, &unit);

    assert!(output.glue_code.contains("m.attr(\"kCount\") = kCount;"));
    assert!(output.diagnostics.iter().any(|d| d.code.as_deref() == Some("I0306")));
    assert_eq!(output.warnings().count(), 0);
}
