//! Configuration errors abort a run before any output is produced.

use litbind::{
    ConfigError, FunctionDecl, InstantiationSpec, NamespaceDecl, RuleEffect, RuleSpec, RuleTarget, TranslationUnit,
    TranslatorOptions, Translator, translate,
};
use rstest::rstest;

use crate::helpers::fixtures::unary;

fn rejected(options: TranslatorOptions) -> ConfigError {
    Translator::new(options).unwrap_err()
}

#[test]
fn test_invalid_rule_pattern() {
    let err = rejected(TranslatorOptions::default().with_rule(RuleSpec::function("(unclosed", RuleEffect::Exclude)));
    assert!(matches!(err, ConfigError::InvalidRegex { .. }));
    assert!(err.to_string().contains("(unclosed"));
}

#[test]
fn test_invalid_namespace_pattern() {
    let mut options = TranslatorOptions::default();
    options.namespaces_exclude = "[".to_string();
    assert!(matches!(rejected(options), ConfigError::InvalidRegex { .. }));
}

#[test]
fn test_unauthorized_buffer_type() {
    let mut options = TranslatorOptions::default();
    options.buffer_types.push("char".to_string());
    let err = rejected(options);
    assert!(matches!(err, ConfigError::UnauthorizedBufferType(ref t) if t == "char"));
}

#[rstest]
#[case(vec!["size_type"])]
#[case(vec!["a=b", "b=a"])]
fn test_bad_synonyms(#[case] synonyms: Vec<&str>) {
    let mut options = TranslatorOptions::default();
    options.type_synonyms = synonyms.into_iter().map(String::from).collect();
    let err = rejected(options);
    assert!(matches!(err, ConfigError::MalformedSynonym(_) | ConfigError::CyclicSynonym(_)));
}

#[test]
fn test_empty_instantiation() {
    let request = InstantiationSpec::new("^sum$", Vec::<String>::new());
    let err = rejected(TranslatorOptions::default().with_template(request));
    assert!(matches!(err, ConfigError::EmptyInstantiation(_)));
}

#[test]
fn test_incompatible_and_empty_rules() {
    let err = rejected(TranslatorOptions::default().with_rule(RuleSpec::new(RuleTarget::Enum, "x", RuleEffect::Box)));
    assert!(matches!(err, ConfigError::IncompatibleRule { .. }));
    let err = rejected(TranslatorOptions::default().with_rule(RuleSpec::rename(RuleTarget::Function, "x", "")));
    assert!(matches!(err, ConfigError::EmptyRename(_)));
}

#[test]
fn test_host_name_collision() {
    let unit = TranslationUnit::new().with(unary("DoIt", "int")).with(unary("do_it", "float"));
    let err = translate(TranslatorOptions::default(), &unit).unwrap_err();
    match err {
        ConfigError::NameCollision { host_name, first, second, .. } => {
            assert_eq!(host_name, "do_it");
            assert_eq!((first.as_str(), second.as_str()), ("DoIt", "do_it"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_collision_in_distinct_scopes_is_allowed() {
    let unit = TranslationUnit::new()
        .with(unary("DoIt", "int"))
        .with(NamespaceDecl::new("sub").with(unary("do_it", "float")));
    assert!(translate(TranslatorOptions::default(), &unit).is_ok());
}

#[test]
fn test_excluded_declaration_cannot_collide() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::Function, "^DoIt$"));
    let unit = TranslationUnit::new().with(unary("DoIt", "int")).with(unary("do_it", "float"));
    assert!(translate(options, &unit).is_ok());
}

#[test]
fn test_rename_to_invalid_identifier() {
    let options = TranslatorOptions::default().with_rule(RuleSpec::rename(RuleTarget::Function, "^Run$", "run-fast"));
    let unit = TranslationUnit::new().with(FunctionDecl::new("Run", "void"));
    let err = translate(options, &unit).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHostIdentifier { ref host_name, .. } if host_name == "run-fast"));
}

#[test]
fn test_translator_is_reusable_after_a_rejected_unit() {
    let translator = Translator::new(TranslatorOptions::default()).unwrap();
    let clash = TranslationUnit::new().with(unary("DoIt", "int")).with(unary("do_it", "float"));
    assert!(translator.translate(&clash).is_err());
    assert!(translator.translate(&TranslationUnit::new().with(unary("DoIt", "int"))).is_ok());
}
