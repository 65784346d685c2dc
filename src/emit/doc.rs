//! Comment and docstring text.

/// Text of a native comment without its markers, one entry per line.
/// Leading and trailing blank lines are dropped.
pub fn comment_lines(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = raw.lines().map(strip_markers).collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn strip_markers(line: &str) -> String {
    let mut text = line.trim();
    for prefix in ["///<", "//!<", "///", "//!", "//", "/**", "/*!", "/*"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest;
            break;
        }
    }
    text = text.strip_suffix("*/").unwrap_or(text);
    if let Some(rest) = text.trim_start().strip_prefix('*') {
        text = rest;
    }
    text.trim().to_string()
}

/// Python docstring; continuation lines get `indent`.
pub fn docstring(lines: &[String], indent: &str) -> String {
    let escaped: Vec<String> = lines.iter().map(|l| l.replace("\"\"\"", "\\\"\\\"\\\"")).collect();
    match escaped.as_slice() {
        [] => String::new(),
        [single] => format!("\"\"\"{}\"\"\"", single),
        [first, rest @ ..] => {
            let mut out = format!("\"\"\"{}", first);
            for line in rest {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(indent);
                    out.push_str(line);
                }
            }
            out.push('\n');
            out.push_str(indent);
            out.push_str("\"\"\"");
            out
        }
    }
}

/// C++ string literal holding `lines` joined by newlines.
pub fn c_string(lines: &[String]) -> String {
    let mut out = String::from("\"");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push_str("\\n");
        }
        for c in line.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
    }
    out.push('"');
    out
}
