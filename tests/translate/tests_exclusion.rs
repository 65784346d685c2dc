//! Exclusion and rename rules through a whole run.

use litbind::{
    ClassDecl, EnumDecl, FunctionDecl, NamespaceDecl, Parameter, RuleSpec, RuleTarget, TranslationUnit, TranslatorOptions,
};
use rstest::rstest;

use crate::helpers::assertions::assert_not_mentioned;
use crate::helpers::fixtures::{translated, translated_default, unary};

fn library() -> TranslationUnit {
    TranslationUnit::new().with(
        NamespaceDecl::new("gfx")
            .with(unary("Draw", "int"))
            .with(ClassDecl::new_struct("Canvas").with_method(FunctionDecl::method("Clear", "void")))
            .with(EnumDecl::new("Mode").with_values(["Fill", "Stroke"]))
            .with(NamespaceDecl::new("detail").with(unary("Hidden", "int"))),
    )
}

#[test]
fn test_default_namespace_exclusion() {
    let output = translated_default(&library());
    assert_not_mentioned(&output, "Hidden");
    assert_not_mentioned(&output, "detail");
    assert!(output.stub_code.contains("def draw(v: int) -> None:"));
}

#[rstest]
#[case(RuleSpec::exclude(RuleTarget::Function, "^Draw$"), "Draw")]
#[case(RuleSpec::exclude(RuleTarget::Class, "^Canvas$"), "Canvas")]
#[case(RuleSpec::exclude(RuleTarget::Enum, "^Mode$"), "Mode")]
#[case(RuleSpec::exclude(RuleTarget::Namespace, "^gfx$"), "gfx")]
fn test_excluded_declaration_leaves_no_trace(#[case] rule: RuleSpec, #[case] native: &str) {
    let output = translated(TranslatorOptions::default().with_rule(rule), &library());
    assert_not_mentioned(&output, native);
    assert!(output.skipped().is_empty());
}

#[test]
fn test_excluded_class_takes_its_members() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::Class, "^Canvas$"));
    let output = translated(options, &library());
    assert_not_mentioned(&output, "Clear");
}

#[test]
fn test_excluded_enum_value() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::EnumValue, "^Stroke$"));
    let output = translated(options, &library());
    assert!(output.glue_code.contains("\"fill\""));
    assert_not_mentioned(&output, "Stroke");
}

#[test]
fn test_excluded_parameter_type_removes_the_function() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamType, "Handle"));
    let unit = TranslationUnit::new()
        .with(unary("Attach", "Handle *"))
        .with(unary("Detach", "int"));
    let output = translated(options, &unit);

    assert_not_mentioned(&output, "Attach");
    assert!(output.stub_code.contains("def detach(v: int) -> None:"));
}

#[test]
fn test_excluded_parameter_with_default_is_dropped() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamName, "^ctx$"));
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("Open", "void")
            .with_param(Parameter::new("path", "const char *"))
            .with_param(Parameter::new("ctx", "void *").with_default("nullptr")),
    );
    let output = translated(options, &unit);
    assert!(output.stub_code.contains("def open(path: str) -> None:"));
}

#[test]
fn test_rename_and_exclude_both_apply() {
    let options = TranslatorOptions::default()
        .with_rule(RuleSpec::rename(RuleTarget::Function, "^Draw$", "render"))
        .with_rule(RuleSpec::exclude(RuleTarget::Function, "^Draw$"));
    let output = translated(options, &library());

    assert_not_mentioned(&output, "render");
    assert_not_mentioned(&output, "Draw");
    assert_eq!(output.warnings().count(), 0);
}

#[test]
fn test_rename_overrides_snake_case() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::rename(RuleTarget::Function, "^Draw$", "render"));
    let output = translated(options, &library());
    assert!(output.stub_code.contains("def render(v: int) -> None:"));
    assert!(output.glue_code.contains("\"render\", &gfx::Draw"));
}
