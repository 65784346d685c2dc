//! Template instantiation through a whole run.

use litbind::{ClassDecl, FunctionDecl, InstantiationSpec, Parameter, TranslationUnit, TranslatorOptions};

use crate::helpers::assertions::{assert_not_mentioned, assert_skipped};
use crate::helpers::fixtures::{translated, translated_default};

fn max() -> FunctionDecl {
    FunctionDecl::new("max", "T")
        .with_template_params(["T"])
        .with_param(Parameter::new("a", "T"))
        .with_param(Parameter::new("b", "T"))
}

#[test]
fn test_suffixed_instances() {
    let options = TranslatorOptions::default().with_template(InstantiationSpec::new("^max$", ["int", "double"]));
    let output = translated(options, &TranslationUnit::new().with(max()));

    assert!(output.stub_code.contains("def max_int(a: int, b: int) -> int:"));
    assert!(output.stub_code.contains("def max_double(a: float, b: float) -> float:"));
    assert!(output.glue_code.contains("m.def(\"max_int\", &max<int>, py::arg(\"a\"), py::arg(\"b\"));"));
    assert!(!output.stub_code.contains("@overload"));
}

#[test]
fn test_unsuffixed_instances_become_overloads() {
    let options =
        TranslatorOptions::default().with_template(InstantiationSpec::new("^max$", ["int", "double"]).without_suffix());
    let output = translated(options, &TranslationUnit::new().with(max()));

    assert_eq!(output.stub_code.matches("@overload\ndef max(").count(), 2);
    assert!(output.glue_code.contains("py::overload_cast<int, int>(&max<int>)"));
    assert!(output.glue_code.contains("py::overload_cast<double, double>(&max<double>)"));
}

#[test]
fn test_unrequested_template_is_skipped() {
    let output = translated_default(&TranslationUnit::new().with(max()));
    assert_skipped(&output, "max", "W0201");
    assert_not_mentioned(&output, "max");
}

#[test]
fn test_arity_mismatch_is_skipped() {
    let mut request = InstantiationSpec::new("^max$", ["int"]);
    request.type_args = vec![vec!["int".to_string(), "float".to_string()]];
    let output = translated(TranslatorOptions::default().with_template(request), &TranslationUnit::new().with(max()));

    assert_skipped(&output, "max", "E0106");
    let reason = output.skipped()[0].reason.clone();
    assert_eq!(&*reason, "template 'max' expects 1 type argument(s), got 2");
}

#[test]
fn test_class_template_instances() {
    let options = TranslatorOptions::default().with_template(InstantiationSpec::new("^Matrix$", ["float"]));
    let unit = TranslationUnit::new().with(
        ClassDecl::new("Matrix")
            .with_template_params(["T"])
            .with_method(FunctionDecl::method("At", "T").with_param(Parameter::new("i", "int"))),
    );
    let output = translated(options, &unit);

    assert!(output.stub_code.contains("class Matrix_float:"));
    assert!(output.stub_code.contains("def at(self, i: int) -> float:"));
    assert!(output.glue_code.contains("py::class_<Matrix<float>>"));
}
