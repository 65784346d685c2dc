//! Overload settlement through a whole run.

use litbind::{FunctionDecl, NamespaceDecl, Parameter, RuleEffect, TranslationUnit};

use crate::helpers::assertions::assert_skipped;
use crate::helpers::fixtures::{translated, translated_default, unary, with_function_rules};

fn f_pair(first: &str, second: &str) -> TranslationUnit {
    TranslationUnit::new().with(unary("f", first)).with(unary("f", second))
}

#[test]
fn test_distinct_host_signatures_are_all_bound() {
    let output = translated_default(&f_pair("int", "float"));

    assert_eq!(output.stub_code.matches("@overload\ndef f(").count(), 2);
    assert!(output.glue_code.contains("m.def(\"f\", py::overload_cast<int>(&f), py::arg(\"v\"));"));
    assert!(output.glue_code.contains("m.def(\"f\", py::overload_cast<float>(&f), py::arg(\"v\"));"));
    assert!(output.skipped().is_empty());
}

#[test]
fn test_forced_overloads_stay_bound() {
    let output = translated(with_function_rules(&[("^f$", RuleEffect::ForceOverload)]), &f_pair("int", "float"));
    assert_eq!(output.glue_code.matches("m.def(\"f\"").count(), 2);
}

#[test]
fn test_same_host_signature_keeps_the_first() {
    let output = translated_default(&f_pair("float", "double"));

    assert_skipped(&output, "f", "W0101");
    assert_eq!(output.glue_code.matches("m.def(\"f\"").count(), 1);
    assert_eq!(output.warnings().filter(|w| w.code.as_deref() == Some("W0101")).count(), 1);
}

#[test]
fn test_forcing_exposes_same_host_signature() {
    let output = translated(with_function_rules(&[("^f$", RuleEffect::ForceOverload)]), &f_pair("float", "double"));

    assert!(output.glue_code.contains("py::overload_cast<float>(&f)"));
    assert!(output.glue_code.contains("py::overload_cast<double>(&f)"));
    assert!(output.skipped().is_empty());
}

#[test]
fn test_overloaded_shims_are_numbered() {
    let options = with_function_rules(&[("^Inc$", RuleEffect::Box)]);
    let unit = TranslationUnit::new().with(unary("Inc", "int *")).with(
        FunctionDecl::new("Inc", "void")
            .with_param(Parameter::new("v", "int *"))
            .with_param(Parameter::new("step", "int")),
    );
    let output = translated(options, &unit);

    assert!(output.adapter_code.contains("Inc_overload1_adapt_shim"));
    assert!(output.adapter_code.contains("Inc_overload2_adapt_shim"));
    assert!(output.glue_code.contains("&Inc_overload2_adapt_shim"));
}

#[test]
fn test_deleted_overload_is_never_bound() {
    let unit = TranslationUnit::new()
        .with(unary("f", "int"))
        .with(unary("f", "double").as_deleted());
    let output = translated_default(&unit);

    assert!(!output.stub_code.contains("v: float"));
    assert!(output.glue_code.contains("[](int v)"));
}

#[test]
fn test_shims_of_different_scopes_never_share_a_name() {
    let options = with_function_rules(&[("draw$", RuleEffect::Box)]);
    let unit = TranslationUnit::new()
        .with(unary("gfx_draw", "int *"))
        .with(NamespaceDecl::new("gfx").with(unary("draw", "int *")));
    let output = translated(options, &unit);

    assert!(output.adapter_code.contains("static void gfx_draw_adapt_shim(BoxedInt & v)"));
    assert!(output.adapter_code.contains("static void gfx__draw_adapt_shim(BoxedInt & v)"));
    assert!(output.glue_code.contains("m.def(\"gfx_draw\", &gfx_draw_adapt_shim, py::arg(\"v\"));"));
    assert!(output.glue_code.contains("pyNs_Gfx.def(\"draw\", &gfx__draw_adapt_shim, py::arg(\"v\"));"));
}
