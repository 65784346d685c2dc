//! Assertions over translation output.

use litbind::TranslationOutput;

/// Assert that `name` was skipped with diagnostic `code`.
pub fn assert_skipped(output: &TranslationOutput, name: &str, code: &str) {
    let skipped = output.skipped();
    assert!(
        skipped.iter().any(|s| &*s.name == name && s.code.as_deref() == Some(code)),
        "Expected '{}' to be skipped with {}, got:\n{}",
        name,
        code,
        skipped
            .iter()
            .map(|s| format!("  {} [{}]: {}", s.name, s.code.as_deref().unwrap_or("-"), s.reason))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Assert that no output stream mentions `text`.
pub fn assert_not_mentioned(output: &TranslationOutput, text: &str) {
    for (stream, code) in [
        ("stub", &output.stub_code),
        ("glue", &output.glue_code),
        ("adapter", &output.adapter_code),
    ] {
        assert!(!code.contains(text), "{} code mentions '{}':\n{}", stream, text, code);
    }
    assert!(
        output.fragments.iter().all(|f| !f.name.contains(text)),
        "a fragment is named after '{}'",
        text
    );
}

/// Assert that every stream ends with exactly one newline, or is empty.
pub fn assert_well_terminated(output: &TranslationOutput) {
    for code in [&output.stub_code, &output.glue_code, &output.adapter_code] {
        assert!(code.is_empty() || (code.ends_with('\n') && !code.ends_with("\n\n")));
    }
}
