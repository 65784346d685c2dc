use super::*;
use crate::config::{OutputFlagPolicy, RuleEffect, RuleSpec, TranslatorOptions};
use crate::decl::CArray;
use rstest::rstest;

fn config(options: TranslatorOptions) -> Config {
    Config::new(options).unwrap()
}

fn with_rule(pattern: &str, effect: RuleEffect) -> Config {
    config(TranslatorOptions::default().with_rule(RuleSpec::function(pattern, effect)))
}

fn adapted(config: &Config, function: FunctionDecl) -> AdaptedFunction {
    match adapt_function(config, &function, &QualifiedName::root(), None).unwrap() {
        Adaptation::Adapted(f) => *f,
        other => panic!("not adapted: {other:?}"),
    }
}

fn shim(mut function: AdaptedFunction) -> String {
    let name = format!("{}_adapt_shim", function.original.name);
    if let Some(plan) = function.plan.as_mut() {
        plan.shim_name = name;
    }
    render_shim(&function, &crate::config::EmitOptions::default()).unwrap()
}

// ============================================================================
// DIRECT BINDINGS
// ============================================================================

#[test]
fn test_plain_function_needs_no_shim() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("AddNumbers", "int")
            .with_param(Parameter::new("a", "int"))
            .with_param(Parameter::new("b", "int").with_default("2")),
    );
    assert!(!f.is_adapted());
    assert_eq!(f.host_name, "add_numbers");
    assert_eq!(f.host_signature(), vec!["int", "int"]);
    assert_eq!(f.host_params[1].host_default.as_deref(), Some("2"));
    assert_eq!(f.host_return, "int");
}

#[test]
fn test_unnamed_parameters_are_named() {
    let config = config(TranslatorOptions::default());
    let f = adapted(&config, FunctionDecl::new("f", "void").with_param(Parameter::new("", "int")));
    assert_eq!(f.host_params[0].name, "arg_0");
}

// ============================================================================
// BOXING AND OUTPUT-TO-RETURN
// ============================================================================

#[test]
fn test_boxing_pointer() {
    let config = with_rule("^inc$", RuleEffect::Box);
    let f = adapted(&config, FunctionDecl::new("inc", "void").with_param(Parameter::new("value", "int *")));

    assert_eq!(f.original.params[0].tag, AdaptationTag::BoxedReference);
    assert_eq!(f.host_params[0].host_type, "BoxedInt");
    let plan = f.plan.as_ref().unwrap();
    assert_eq!(plan.boxed_types.len(), 1);
    assert_eq!(plan.boxed_types[0].name, "BoxedInt");

    let code = shim(f);
    assert!(code.starts_with("// void inc(int * value)\nstatic void inc_adapt_shim(BoxedInt & value)\n{\n"));
    assert!(code.contains("auto inc_adapt_modifiable_immutable = [&](BoxedInt & value)\n"));
    assert!(code.contains("int * value_boxed_value = & (value.value);"));
    assert!(code.contains("        inc(value_boxed_value);\n"));
    assert!(code.contains("    inc_adapt_modifiable_immutable(value);\n}"));
}

#[test]
fn test_boxing_nullable_pointer_and_reference() {
    let config = with_rule("^update$", RuleEffect::Box);
    let f = adapted(
        &config,
        FunctionDecl::new("update", "void")
            .with_param(Parameter::new("scale", "float &"))
            .with_param(Parameter::new("flag", "bool *").with_default("nullptr")),
    );
    assert_eq!(f.host_params[0].host_type, "BoxedFloat");
    assert_eq!(f.host_params[1].host_type, "Optional[BoxedBool]");
    assert_eq!(f.host_params[1].native_default.as_deref(), Some("py::none()"));
    assert_eq!(f.host_params[1].host_default.as_deref(), Some("None"));

    let code = shim(f);
    assert!(code.contains("float & scale_boxed_value = scale.value;"));
    assert!(code.contains("bool * flag_boxed_value = nullptr;"));
    assert!(code.contains("if (flag != nullptr)"));
    assert!(code.contains("flag_boxed_value = & (flag->value);"));
}

#[test]
fn test_output_to_return_with_flag() {
    let config = with_rule("^GetValue$", RuleEffect::OutputToReturn);
    let f = adapted(
        &config,
        FunctionDecl::new("GetValue", "bool")
            .with_param(Parameter::new("label", "const char *"))
            .with_param(Parameter::new("value", "int *")),
    );
    assert_eq!(f.host_signature(), vec!["str"]);
    assert_eq!(f.host_return, "Tuple[bool, int]");

    let code = shim(f);
    assert!(code.contains("int value{};"));
    assert!(code.contains("int * value_adapt_modifiable = & value;"));
    assert!(code.contains("auto lambda_result = GetValue(label, value_adapt_modifiable);"));
    assert!(code.contains("return std::make_tuple(lambda_result, value);"));
}

#[test]
fn test_output_to_return_void() {
    let config = with_rule("^size$", RuleEffect::OutputToReturn);
    let f = adapted(
        &config,
        FunctionDecl::new("size", "void")
            .with_param(Parameter::new("w", "int &"))
            .with_param(Parameter::new("h", "int &")),
    );
    assert!(f.host_params.is_empty());
    assert_eq!(f.host_return, "Tuple[int, int]");
    let code = shim(f);
    assert!(code.contains("size(w, h);"));
    assert!(code.contains("return std::make_tuple(w, h);"));
}

#[test]
fn test_flag_policy_keeps_bool_as_boxed_parameter() {
    let mut options = TranslatorOptions::default()
        .with_rule(RuleSpec::function("^Fetch$", RuleEffect::OutputToReturn));
    options.output_flag_policy = OutputFlagPolicy::KeepAsParameter;
    let config = config(options);
    let f = adapted(
        &config,
        FunctionDecl::new("Fetch", "void")
            .with_param(Parameter::new("ok", "bool *"))
            .with_param(Parameter::new("count", "int *")),
    );
    assert_eq!(f.host_signature(), vec!["BoxedBool"]);
    assert_eq!(f.host_return, "int");
}

// ============================================================================
// BUFFERS
// ============================================================================

#[test]
fn test_buffer_with_count() {
    let config = with_rule("^fill$", RuleEffect::BufferAdapt);
    let f = adapted(
        &config,
        FunctionDecl::new("fill", "void")
            .with_param(Parameter::new("buf", "uint32_t *"))
            .with_param(Parameter::new("count", "size_t")),
    );
    assert_eq!(f.host_signature(), vec!["np.ndarray"]);
    assert_eq!(f.original.params[0].tag, AdaptationTag::Buffer);
    assert_eq!(f.original.params[1].tag, AdaptationTag::Buffer);

    let code = shim(f);
    assert!(code.contains("if (! (buf.ndim() == 1 && buf.strides(0) == buf.itemsize()) )"));
    assert!(code.contains("void * buf_from_pyarray = buf.mutable_data();"));
    assert!(code.contains("py::ssize_t buf_count = buf.shape()[0];"));
    assert!(code.contains("if (buf_type != 'I')"));
    assert!(code.contains("fill(static_cast<uint32_t *>(buf_from_pyarray), static_cast<size_t>(buf_count));"));
}

#[test]
fn test_shared_count_and_stride() {
    let config = with_rule("^blend$", RuleEffect::BufferAdapt);
    let f = adapted(
        &config,
        FunctionDecl::new("blend", "void")
            .with_param(Parameter::new("a", "const float *"))
            .with_param(Parameter::new("b", "float *"))
            .with_param(Parameter::new("nb", "int"))
            .with_param(Parameter::new("stride", "int").with_default("sizeof(float)")),
    );
    assert_eq!(f.host_signature(), vec!["np.ndarray", "np.ndarray", "int"]);
    assert_eq!(f.host_params[2].native_default.as_deref(), Some("-1"));

    let code = shim(f);
    assert!(code.contains("const void * a_from_pyarray = a.data();"));
    assert!(code.contains("if (b.shape()[0] != a_count)"));
    assert!(code.contains("a_stride = (int)a.itemsize();"));
    assert!(code.contains(
        "blend(static_cast<const float *>(a_from_pyarray), static_cast<float *>(b_from_pyarray), \
         static_cast<int>(a_count), static_cast<int>(a_stride));"
    ));
}

#[test]
fn test_unsupported_buffer_element() {
    let config = with_rule("^flags$", RuleEffect::BufferAdapt);
    let f = FunctionDecl::new("flags", "void")
        .with_param(Parameter::new("values", "bool *"))
        .with_param(Parameter::new("count", "int"));
    let err = adapt_function(&config, &f, &QualifiedName::root(), None).unwrap_err();
    assert_eq!(err, AdaptError::unsupported_buffer("values", "bool"));
}

#[test]
fn test_buffer_without_rule_is_untouched() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("fill", "void")
            .with_param(Parameter::new("buf", "uint32_t *"))
            .with_param(Parameter::new("count", "size_t")),
    );
    assert!(!f.is_adapted());
}

#[test]
fn test_template_buffer_dispatch() {
    let config = with_rule("^scale$", RuleEffect::BufferAdapt);
    let f = FunctionDecl::new("scale", "void")
        .with_template_params(["T"])
        .with_param(Parameter::new("values", "T *"))
        .with_param(Parameter::new("count", "int"))
        .with_param(Parameter::new("factor", "double"));
    assert!(buffers::is_buffer_dispatch_template(&config, &f));

    let code = shim(adapted(&config, f));
    assert!(code.contains("using np_uint_l = uint64_t;"));
    assert!(code.contains("if (values_type == 'B')"));
    assert!(code.contains("return scale(static_cast<uint8_t *>(values_from_pyarray), static_cast<int>(values_count), factor);"));
    assert!(code.contains("else if (values_type == 'd')"));
    assert!(code.contains("Bad array type ('\") + values_type + \"') for param values"));
}

#[test]
fn test_template_returning_t_is_not_dispatched() {
    let config = with_rule("^sum$", RuleEffect::BufferAdapt);
    let f = FunctionDecl::new("sum", "T")
        .with_template_params(["T"])
        .with_param(Parameter::new("values", "const T *"))
        .with_param(Parameter::new("count", "int"));
    assert!(!buffers::is_buffer_dispatch_template(&config, &f));
}

// ============================================================================
// C ARRAYS
// ============================================================================

#[test]
fn test_const_array_becomes_std_array() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("set_color", "void").with_param(Parameter::new("rgb", "const float").with_array(CArray::Fixed(3))),
    );
    assert_eq!(f.host_signature(), vec!["List[float]"]);
    assert_eq!(f.original.params[0].tag, AdaptationTag::FixedArray);
    let code = shim(f);
    assert!(code.contains("[&](const std::array<float, 3> & rgb)"));
    assert!(code.contains("set_color(rgb.data());"));
}

#[test]
fn test_modifiable_array_becomes_boxed_values() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("get_pos", "void").with_param(Parameter::new("pos", "float").with_array(CArray::Fixed(2))),
    );
    assert_eq!(f.host_signature(), vec!["BoxedFloat", "BoxedFloat"]);
    let names: Vec<&str> = f.host_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["pos_0", "pos_1"]);
    let code = shim(f);
    assert!(code.contains("float pos_raw[2];"));
    assert!(code.contains("pos_raw[1] = pos_1.value;"));
    assert!(code.contains("get_pos(pos_raw);"));
    assert!(code.contains("pos_0.value = pos_raw[0];"));
}

#[test]
fn test_array_bounds_conflict() {
    let config = config(TranslatorOptions::default());
    let f = FunctionDecl::new("sum", "int")
        .with_param(Parameter::new("values", "const int").with_array(CArray::Fixed(4)))
        .with_param(Parameter::new("count", "int"));
    let err = adapt_function(&config, &f, &QualifiedName::root(), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'values': declared size 4 conflicts with count parameter 'count'"
    );
}

#[test]
fn test_symbolic_dimension() {
    let f = FunctionDecl::new("get", "void").with_param(Parameter::new("v", "int").with_array(CArray::Symbolic("N".into())));

    let unresolved = config(TranslatorOptions::default());
    let err = adapt_function(&unresolved, &f, &QualifiedName::root(), None).unwrap_err();
    assert!(matches!(err, AdaptError::UnresolvedArrayDimension { .. }));

    let resolved = config(TranslatorOptions::default().with_constant("N", 2));
    assert_eq!(adapted(&resolved, f).host_params.len(), 2);
}

#[test]
fn test_oversized_modifiable_array() {
    let config = config(TranslatorOptions::default());
    let f = FunctionDecl::new("get", "void").with_param(Parameter::new("v", "int").with_array(CArray::Fixed(64)));
    let err = adapt_function(&config, &f, &QualifiedName::root(), None).unwrap_err();
    assert!(matches!(err, AdaptError::InvalidArraySize { .. }));
}

// ============================================================================
// STRINGS, EXCLUSION, VARIADIC
// ============================================================================

#[test]
fn test_optional_string() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("greet", "void").with_param(Parameter::new("name", "const char *").with_default("nullptr")),
    );
    let p = &f.host_params[0];
    assert_eq!(p.host_type, "Optional[str]");
    assert_eq!(p.host_default.as_deref(), Some("None"));
    assert_eq!(p.native_default.as_deref(), Some("py::none()"));
    let code = shim(f);
    assert!(code.contains("name_adapt_default_null = name.value().c_str();"));
}

fn use_foo() -> FunctionDecl {
    FunctionDecl::new("use_foo", "void").with_param(Parameter::new("foo", "const Foo &").with_default("Foo()"))
}

fn mutable_defaults_config() -> Config {
    let mut options = TranslatorOptions::default();
    options.fn_params_adapt_mutable_param_with_default_value = ".*".to_string();
    config(options)
}

#[test]
fn test_mutable_default_becomes_optional() {
    let f = adapted(&mutable_defaults_config(), use_foo());
    let p = &f.host_params[0];
    assert_eq!(p.host_type, "Optional[Foo]");
    assert_eq!(p.host_default.as_deref(), Some("None"));
    assert_eq!(
        f.original.meta.doc.as_deref(),
        Some("// ---\n// Python bindings defaults:\n// If foo is None, then its default value will be: Foo()")
    );

    let code = shim(f);
    assert!(code.contains("const std::optional<Foo> & foo = std::nullopt"));
    assert!(code.contains("const Foo & foo_or_default = [&]() -> const Foo {"));
    assert!(code.contains("return foo.value();"));
    assert!(code.contains("return Foo();"));
    assert!(code.contains("use_foo(foo_or_default);"));
}

#[test]
fn test_mutable_default_is_opt_in() {
    let f = adapted(&config(TranslatorOptions::default()), use_foo());
    assert!(!f.is_adapted());
    assert_eq!(f.host_params[0].host_type, "Foo");

    let mut options = TranslatorOptions::default();
    options.fn_params_adapt_mutable_param_with_default_value = ".*".to_string();
    options.fn_params_adapt_mutable_param_with_default_value_add_comment = false;
    let f = adapted(&config(options), use_foo());
    assert!(f.is_adapted());
    assert_eq!(f.original.meta.doc, None);
}

#[test]
fn test_immutable_defaults_are_kept() {
    let f = adapted(
        &mutable_defaults_config(),
        FunctionDecl::new("f", "void")
            .with_param(Parameter::new("e", "E").with_default("E::A"))
            .with_param(Parameter::new("n", "int").with_default("kCount"))
            .with_param(Parameter::new("label", "const std::string &").with_default("\"none\""))
            .with_param(Parameter::new("sizes", "std::vector<int>").with_default("std::vector<int>()")),
    );
    assert_eq!(f.host_signature(), vec!["E", "int", "str", "Optional[List[int]]"]);
}

#[rstest]
#[case("42", false)]
#[case("-2.71f", false)]
#[case("6.022e23", false)]
#[case("1.0e-10L", false)]
#[case("0x1F", false)]
#[case("0b1010u", false)]
#[case("'c'", false)]
#[case("\"text\"", false)]
#[case("nullptr", false)]
#[case("NULL", false)]
#[case("true", false)]
#[case("std::nullopt", false)]
#[case("int()", false)]
#[case("std::string()", false)]
#[case("Mode::Fast", false)]
#[case("my_var", true)]
#[case("SomeClass()", true)]
#[case("{1, 2, 3}", true)]
#[case("3.14 * 2", true)]
#[case("(int *)nullptr", true)]
#[case("Other::Fast", true)]
fn test_mutable_default_values(#[case] value: &str, #[case] mutable: bool) {
    assert_eq!(params::is_mutable_default(value, "Mode"), mutable);
}

#[test]
fn test_string_list_with_count() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("set_names", "void")
            .with_param(Parameter::new("names", "const char **"))
            .with_param(Parameter::new("nb_names", "int")),
    );
    assert_eq!(f.host_signature(), vec!["List[str]"]);
    let code = shim(f);
    assert!(code.contains("names_ptrs.push_back(v.c_str());"));
    assert!(code.contains("int names_count = static_cast<int>(names.size());"));
    assert!(code.contains("set_names(names_ptrs.data(), names_count);"));
}

#[test]
fn test_string_list_without_count_is_null_terminated() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("run", "int").with_param(Parameter::new("argv", "const char *").with_array(CArray::Unsized)),
    );
    let code = shim(f);
    assert!(code.contains("argv_ptrs.push_back(nullptr);"));
    assert!(code.contains("auto lambda_result = run(argv_ptrs.data());"));
}

#[test]
fn test_excluded_parameter_with_default() {
    let config = config(
        TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamName, "^user_data$")),
    );
    let f = adapted(
        &config,
        FunctionDecl::new("draw", "void")
            .with_param(Parameter::new("x", "int"))
            .with_param(Parameter::new("user_data", "void *").with_default("nullptr")),
    );
    assert_eq!(f.host_signature(), vec!["int"]);
    assert_eq!(f.original.params[1].tag, AdaptationTag::Excluded);
    assert!(shim(f).contains("draw(x, nullptr);"));
}

#[test]
fn test_excluded_parameter_without_default() {
    let by_name = config(TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamName, "^ctx$")));
    let f = FunctionDecl::new("draw", "void").with_param(Parameter::new("ctx", "Context *"));
    let kept = adapted(&by_name, f.clone());
    assert_eq!(kept.host_params.len(), 1);
    assert_eq!(kept.notes[0].0, "I0303");

    let by_type = config(TranslatorOptions::default().with_rule(RuleSpec::exclude(RuleTarget::ParamType, "^Context \\*$")));
    let outcome = adapt_function(&by_type, &f, &QualifiedName::root(), None).unwrap();
    assert!(matches!(outcome, Adaptation::Excluded { .. }));
}

#[test]
fn test_variadic_format() {
    let config = config(TranslatorOptions::default());
    let f = adapted(
        &config,
        FunctionDecl::new("log", "void")
            .with_param(Parameter::new("level", "int"))
            .with_param(Parameter::new("fmt", "const char *"))
            .with_param(Parameter::variadic()),
    );
    assert_eq!(f.host_signature(), vec!["int", "str"]);
    assert_eq!(f.original.params[2].tag, AdaptationTag::Variadic);
    assert!(shim(f).contains("log(level, \"%s\", fmt);"));

    let bad = FunctionDecl::new("bad", "void")
        .with_param(Parameter::new("a", "int"))
        .with_param(Parameter::variadic());
    let err = adapt_function(&config, &bad, &QualifiedName::root(), None).unwrap_err();
    assert_eq!(err, AdaptError::MissingFormatParameter);
}

#[test]
fn test_force_lambda() {
    let config = with_rule("^f$", RuleEffect::ForceLambda);
    let f = adapted(&config, FunctionDecl::new("f", "int").with_param(Parameter::new("a", "int")));
    let code = shim(f);
    assert!(code.contains("auto f_adapt_force_lambda = [&](int a) -> int"));
    assert!(code.contains("return f_adapt_force_lambda(a);"));
}

// ============================================================================
// METHODS AND CONSTRUCTORS
// ============================================================================

#[test]
fn test_method_shim_takes_self() {
    let config = with_rule("^Read$", RuleEffect::Box);
    let owner = Owner {
        native_name: "io::File".to_string(),
        publicist: None,
    };
    let method = FunctionDecl::method("Read", "bool").as_const().with_param(Parameter::new("n", "int &"));
    let Adaptation::Adapted(f) = adapt_function(&config, &method, &QualifiedName::parse("io::File"), Some(&owner)).unwrap()
    else {
        panic!("expected adaptation");
    };
    let code = shim(*f);
    assert!(code.contains("static bool Read_adapt_shim(const io::File & self, BoxedInt & n)"));
    assert!(code.contains("auto lambda_result = self.Read(n_boxed_value);"));
}

#[test]
fn test_constructor_shim_returns_unique_ptr() {
    let config = config(TranslatorOptions::default());
    let owner = Owner {
        native_name: "Color".to_string(),
        publicist: None,
    };
    let ctor = FunctionDecl::constructor("Color").with_param(Parameter::new("rgb", "const float").with_array(CArray::Fixed(3)));
    let Adaptation::Adapted(f) = adapt_function(&config, &ctor, &QualifiedName::parse("Color"), Some(&owner)).unwrap()
    else {
        panic!("expected adaptation");
    };
    assert_eq!(f.host_name, "__init__");
    assert_eq!(f.host_return, "None");
    let code = shim(*f);
    assert!(code.contains("static std::unique_ptr<Color> Color_adapt_shim(const std::array<float, 3> & rgb)"));
    assert!(code.contains("auto lambda_result = std::make_unique<Color>(rgb.data());"));
}

// ============================================================================
// OVERLOADS
// ============================================================================

fn overloads(config: &Config, functions: Vec<FunctionDecl>) -> Vec<OverloadOutcome> {
    let adapted: Vec<AdaptedFunction> = functions.into_iter().map(|f| adapted(config, f)).collect();
    resolve_overloads(config, &adapted, &[]).into_iter().map(|d| d.outcome).collect()
}

#[test]
fn test_distinct_host_signatures_are_all_bound() {
    let config = config(TranslatorOptions::default());
    let outcomes = overloads(
        &config,
        vec![
            FunctionDecl::new("f", "void").with_param(Parameter::new("v", "int")),
            FunctionDecl::new("f", "void").with_param(Parameter::new("v", "float")),
        ],
    );
    let expected = OverloadOutcome::Bound {
        strategy: BindingStrategy::OverloadCast,
        overloaded: true,
    };
    assert_eq!(outcomes, vec![expected.clone(), expected]);
}

#[test]
fn test_same_host_signature_is_ambiguous_unless_forced() {
    let functions = vec![
        FunctionDecl::new("f", "void").with_param(Parameter::new("v", "int")),
        FunctionDecl::new("f", "void").with_param(Parameter::new("v", "long")),
    ];
    let plain = config(TranslatorOptions::default());
    let outcomes = overloads(&plain, functions.clone());
    assert!(matches!(outcomes[0], OverloadOutcome::Bound { overloaded: false, .. }));
    assert!(matches!(&outcomes[1], OverloadOutcome::Ambiguous { kept } if kept == "void f(int v)"));

    let forced = with_rule("^f$", RuleEffect::ForceOverload);
    let outcomes = overloads(&forced, functions);
    assert!(outcomes.iter().all(|o| matches!(
        o,
        OverloadOutcome::Bound { strategy: BindingStrategy::OverloadCast, overloaded: true }
    )));
}

#[test]
fn test_const_overload_is_covered() {
    let config = config(TranslatorOptions::default());
    let outcomes = overloads(
        &config,
        vec![FunctionDecl::method("get", "int &"), FunctionDecl::method("get", "const int &").as_const()],
    );
    assert_eq!(
        outcomes[0],
        OverloadOutcome::Bound {
            strategy: BindingStrategy::DispatchLambda,
            overloaded: false
        }
    );
    assert!(matches!(outcomes[1], OverloadOutcome::Covered { .. }));
}

#[test]
fn test_deleted_overload_forces_dispatch_lambda() {
    let config = config(TranslatorOptions::default());
    let f = adapted(&config, FunctionDecl::new("take", "void").with_param(Parameter::new("v", "int")));
    let decisions = resolve_overloads(&config, &[f], &["take".to_string()]);
    assert_eq!(
        decisions[0].outcome,
        OverloadOutcome::Bound {
            strategy: BindingStrategy::DispatchLambda,
            overloaded: false
        }
    );
}
