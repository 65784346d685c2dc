//! Boxed values and output-to-return through a whole run.

use litbind::{FunctionDecl, OutputFlagPolicy, Parameter, RuleEffect, RuleSpec, TranslationUnit};

use crate::helpers::assertions::assert_well_terminated;
use crate::helpers::fixtures::{translated, unary, with_function_rules};

#[test]
fn test_boxed_types_are_declared_once_in_first_use_order() {
    let options = with_function_rules(&[("^(Inc|Scale|Dec)$", RuleEffect::Box)]);
    let unit = TranslationUnit::new()
        .with(unary("Inc", "int *"))
        .with(unary("Scale", "float &"))
        .with(unary("Dec", "int *"));
    let output = translated(options, &unit);

    for code in [&output.stub_code, &output.glue_code, &output.adapter_code] {
        let int_at = code.find("BoxedInt").expect("BoxedInt is declared");
        let float_at = code.find("BoxedFloat").expect("BoxedFloat is declared");
        assert!(int_at < float_at);
    }
    assert_eq!(output.stub_code.matches("class BoxedInt").count(), 1);
    assert_eq!(output.adapter_code.matches("struct BoxedInt").count(), 1);
    assert!(output.stub_code.contains("def inc(v: BoxedInt) -> None:"));
    assert!(output.stub_code.contains("def dec(v: BoxedInt) -> None:"));
    assert_well_terminated(&output);
}

#[test]
fn test_shims_are_attached_to_their_fragments() {
    let options = with_function_rules(&[("^Inc$", RuleEffect::Box)]);
    let unit = TranslationUnit::new().with(unary("Inc", "int *")).with(unary("Plain", "int"));
    let output = translated(options, &unit);

    let inc = output.fragments_of("Inc").next().unwrap();
    let adapter = inc.adapter.as_deref().unwrap();
    assert!(adapter.contains("static void Inc_adapt_shim(BoxedInt & v)"));
    assert!(output.glue_code.contains("m.def(\"inc\", &Inc_adapt_shim, py::arg(\"v\"));"));

    let plain = output.fragments_of("Plain").next().unwrap();
    assert!(plain.adapter.is_none());
    assert!(output.glue_code.contains("m.def(\"plain\", &Plain, py::arg(\"v\"));"));
}

#[test]
fn test_output_parameters_become_a_tuple() {
    let options = with_function_rules(&[("^GetValue$", RuleEffect::OutputToReturn)]);
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("GetValue", "bool")
            .with_param(Parameter::new("label", "const char *"))
            .with_param(Parameter::new("value", "int *")),
    );
    let output = translated(options, &unit);

    assert!(output.stub_code.contains("def get_value(label: str) -> Tuple[bool, int]:"));
    assert!(output.glue_code.contains("&GetValue_adapt_shim, py::arg(\"label\")"));
    assert!(output.adapter_code.contains("return std::make_tuple(lambda_result, value);"));
}

#[test]
fn test_kept_flag_is_boxed() {
    let mut options = litbind::TranslatorOptions::default()
        .with_rule(RuleSpec::function("^Fetch$", RuleEffect::OutputToReturn));
    options.output_flag_policy = OutputFlagPolicy::KeepAsParameter;
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("Fetch", "void")
            .with_param(Parameter::new("ok", "bool *"))
            .with_param(Parameter::new("count", "int *")),
    );
    let output = translated(options, &unit);

    assert!(output.stub_code.contains("def fetch(ok: BoxedBool) -> int:"));
    assert!(output.stub_code.contains("class BoxedBool"));
}
