//! Buffer adaptation through a whole run.

use litbind::{FunctionDecl, Parameter, RuleEffect, TranslationUnit};

use crate::helpers::assertions::{assert_not_mentioned, assert_skipped};
use crate::helpers::fixtures::{translated, translated_default, with_function_rules};

fn fill() -> FunctionDecl {
    FunctionDecl::new("fill", "void")
        .with_param(Parameter::new("buf", "uint32_t *"))
        .with_param(Parameter::new("count", "size_t"))
}

#[test]
fn test_buffer_and_count_collapse_into_one_array() {
    let options = with_function_rules(&[("^fill$", RuleEffect::BufferAdapt)]);
    let output = translated(options, &TranslationUnit::new().with(fill()));

    assert!(output.stub_code.contains("def fill(buf: np.ndarray) -> None:"));
    assert!(output.glue_code.contains("m.def(\"fill\", &fill_adapt_shim, py::arg(\"buf\"));"));
    assert!(output.adapter_code.contains("fill_adapt_shim("));
    assert!(output.adapter_code.contains("static_cast<size_t>(buf_count)"));
    assert!(output.skipped().is_empty());
}

#[test]
fn test_pointer_without_rule_is_bound_as_is() {
    let output = translated_default(&TranslationUnit::new().with(fill()));
    assert!(output.adapter_code.is_empty());
    assert!(output.glue_code.contains("m.def(\"fill\", &fill, py::arg(\"buf\"), py::arg(\"count\"));"));
}

#[test]
fn test_unsupported_element_type_skips_only_that_function() {
    let options = with_function_rules(&[("^(flags|fill)$", RuleEffect::BufferAdapt)]);
    let unit = TranslationUnit::new()
        .with(
            FunctionDecl::new("flags", "void")
                .with_param(Parameter::new("values", "bool *"))
                .with_param(Parameter::new("count", "int")),
        )
        .with(fill());
    let output = translated(options, &unit);

    assert_skipped(&output, "flags", "E0101");
    assert_not_mentioned(&output, "flags");
    assert!(output.stub_code.contains("def fill(buf: np.ndarray) -> None:"));
}

#[test]
fn test_shared_count_keeps_stride_parameter() {
    let options = with_function_rules(&[("^blend$", RuleEffect::BufferAdapt)]);
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("blend", "void")
            .with_param(Parameter::new("a", "const float *"))
            .with_param(Parameter::new("b", "float *"))
            .with_param(Parameter::new("nb", "int"))
            .with_param(Parameter::new("stride", "int").with_default("sizeof(float)")),
    );
    let output = translated(options, &unit);

    assert!(output.stub_code.contains("def blend(a: np.ndarray, b: np.ndarray, stride: int"));
    assert!(output.glue_code.contains("py::arg(\"stride\") = -1"));
    assert!(output.adapter_code.contains("if (b.shape()[0] != a_count)"));
}

#[test]
fn test_template_buffer_is_dispatched_without_instantiation() {
    let options = with_function_rules(&[("^scale$", RuleEffect::BufferAdapt)]);
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("scale", "void")
            .with_template_params(["T"])
            .with_param(Parameter::new("values", "T *"))
            .with_param(Parameter::new("count", "int"))
            .with_param(Parameter::new("factor", "double")),
    );
    let output = translated(options, &unit);

    assert!(output.stub_code.contains("def scale(values: np.ndarray, factor: float) -> None:"));
    assert!(output.adapter_code.contains("else if (values_type == 'd')"));
    assert!(output.warnings().all(|w| w.code.as_deref() != Some("W0201")));
}
