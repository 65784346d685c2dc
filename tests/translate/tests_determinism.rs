//! Repeated runs and fragment traceability.

use litbind::{
    ClassDecl, EnumDecl, FieldDecl, FragmentKind, FunctionDecl, NamespaceDecl, Parameter, RuleEffect, RuleSpec,
    TranslationUnit, TranslatorOptions, Translator,
};

use crate::helpers::assertions::assert_well_terminated;
use crate::helpers::fixtures::unary;

fn header() -> TranslationUnit {
    TranslationUnit::new()
        .with(
            NamespaceDecl::new("gfx")
                .with(unary("Scale", "double"))
                .with(unary("Inc", "int *"))
                .with(
                    ClassDecl::new_struct("Point")
                        .with_field(FieldDecl::new("x", "float"))
                        .with_field(FieldDecl::new("y", "float")),
                ),
        )
        .with(EnumDecl::new("Color").with_values(["Red", "Green"]))
        .with(NamespaceDecl::new("gfx").with(FunctionDecl::new("Reset", "void").with_param(Parameter::new("p", "Point &"))))
}

fn options() -> TranslatorOptions {
    TranslatorOptions::default().with_rule(RuleSpec::function("^Inc$", RuleEffect::Box))
}

#[test]
fn test_repeated_runs_are_identical() {
    let translator = Translator::new(options()).unwrap();
    let first = translator.translate(&header()).unwrap();
    let second = translator.translate(&header()).unwrap();
    assert_eq!(first, second);

    let fresh = Translator::new(options()).unwrap().translate(&header()).unwrap();
    assert_eq!(first.stub_code, fresh.stub_code);
    assert_eq!(first.glue_code, fresh.glue_code);
    assert_eq!(first.adapter_code, fresh.adapter_code);
    assert_well_terminated(&first);
}

#[test]
fn test_namespace_occurrences_are_merged_in_order() {
    let output = Translator::new(options()).unwrap().translate(&header()).unwrap();

    let opened = output.fragments.iter().filter(|f| f.kind == FragmentKind::Namespace).count();
    assert_eq!(opened, 1);
    let names: Vec<&str> = output
        .fragments
        .iter()
        .filter(|f| f.kind == FragmentKind::Function)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["gfx::Scale", "gfx::Inc", "gfx::Reset"]);
}

#[test]
fn test_every_fragment_traces_to_a_declaration() {
    let output = Translator::new(options()).unwrap().translate(&header()).unwrap();

    assert!(output.fragments.iter().all(|f| !f.name.is_empty()));
    let scale: Vec<_> = output.fragments_of("gfx::Scale").collect();
    assert_eq!(scale.len(), 1);
    assert!(!scale[0].stub.is_empty());
    assert!(!scale[0].glue.is_empty());
    assert!(output.glue_code.contains(&scale[0].glue));

    let inc = output.fragments_of("gfx::Inc").next().unwrap();
    assert!(output.adapter_code.contains(inc.adapter.as_deref().unwrap()));
}

#[test]
fn test_fragment_depth_follows_nesting() {
    let output = Translator::new(options()).unwrap().translate(&header()).unwrap();

    let depth = |name: &str, kind: FragmentKind| {
        output
            .fragments
            .iter()
            .find(|f| f.name == name && f.kind == kind)
            .map(|f| f.depth)
    };
    assert_eq!(depth("gfx", FragmentKind::Namespace), Some(0));
    assert_eq!(depth("gfx::Point", FragmentKind::Class), Some(1));
    assert_eq!(depth("gfx::Point::x", FragmentKind::Field), Some(2));
    assert_eq!(depth("Color", FragmentKind::Enum), Some(0));
}
