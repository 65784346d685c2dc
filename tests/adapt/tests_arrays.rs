//! C array parameters through a whole run.

use litbind::{CArray, ConstantDecl, FunctionDecl, Parameter, TranslationUnit, TranslatorOptions};

use crate::helpers::assertions::{assert_not_mentioned, assert_skipped};
use crate::helpers::fixtures::{translated, translated_default};

fn get() -> FunctionDecl {
    FunctionDecl::new("get", "void").with_param(Parameter::new("v", "int").with_array(CArray::Symbolic("N".into())))
}

#[test]
fn test_const_array_becomes_list() {
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("set_color", "void").with_param(Parameter::new("rgb", "const float").with_array(CArray::Fixed(3))),
    );
    let output = translated_default(&unit);

    assert!(output.stub_code.contains("def set_color(rgb: List[float]) -> None:"));
    assert!(output.adapter_code.contains("const std::array<float, 3> & rgb"));
}

#[test]
fn test_modifiable_array_becomes_boxed_values() {
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("get_pos", "void").with_param(Parameter::new("pos", "float").with_array(CArray::Fixed(2))),
    );
    let output = translated_default(&unit);

    assert!(output.stub_code.contains("def get_pos(pos_0: BoxedFloat, pos_1: BoxedFloat) -> None:"));
    assert!(output.glue_code.contains("py::arg(\"pos_0\"), py::arg(\"pos_1\")"));
}

#[test]
fn test_dimension_from_header_constant() {
    let unit = TranslationUnit::new().with(ConstantDecl::define("N", "2")).with(get());
    let output = translated_default(&unit);

    assert!(output.stub_code.contains("def get(v_0: BoxedInt, v_1: BoxedInt) -> None:"));
    assert!(output.skipped().is_empty());
    // folded for array sizes, still not exported
    assert!(!output.glue_code.contains("m.attr(\"N\")"));
}

#[test]
fn test_dimension_from_options() {
    let output = translated(TranslatorOptions::default().with_constant("N", 3), &TranslationUnit::new().with(get()));
    assert!(output.stub_code.contains("v_2: BoxedInt"));
}

#[test]
fn test_unknown_dimension_is_skipped() {
    let output = translated_default(&TranslationUnit::new().with(get()));
    assert_skipped(&output, "get", "E0102");
    assert_not_mentioned(&output, "get");
}

#[test]
fn test_bounds_conflict_is_skipped() {
    let unit = TranslationUnit::new().with(
        FunctionDecl::new("sum", "int")
            .with_param(Parameter::new("values", "const int").with_array(CArray::Fixed(4)))
            .with_param(Parameter::new("count", "int")),
    );
    let output = translated_default(&unit);

    assert_skipped(&output, "sum", "E0103");
    let skipped = output.skipped();
    assert_eq!(
        &*skipped[0].reason,
        "parameter 'values': declared size 4 conflicts with count parameter 'count'"
    );
}

#[test]
fn test_oversized_modifiable_array_is_skipped() {
    let unit = TranslationUnit::new()
        .with(FunctionDecl::new("dump", "void").with_param(Parameter::new("v", "int").with_array(CArray::Fixed(64))));
    let output = translated_default(&unit);
    assert_skipped(&output, "dump", "E0104");
}
