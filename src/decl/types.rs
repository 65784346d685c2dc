//! Native type expressions.
//!
//! The parser hands types over as text; [`CppType::parse`] splits them into a
//! qualified base, leading constness and a pointer/reference chain. Template
//! arguments stay inside the base and are reachable through
//! [`CppType::template_args`].

use std::fmt;

use logos::Logos;
use regex::{NoExpand, Regex};
use smol_str::SmolStr;

/// A pointer or reference layered on top of a base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeModifier {
    /// `*`, optionally followed by `const` (`char * const`)
    Pointer { is_const: bool },
    /// `&`
    Reference,
    /// `&&`
    RValueReference,
}

/// A parsed native type expression such as `const std::vector<int> &`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize), serde(from = "String", into = "String"))]
pub struct CppType {
    /// `const T` / `T const`
    pub is_const: bool,
    /// Base spelling without qualifiers, e.g. `unsigned long`, `std::map<int, float>`
    pub base: SmolStr,
    /// Pointer/reference chain, innermost first
    pub modifiers: Vec<TypeModifier>,
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Star,
    Amp,
    AmpAmp,
}

/// Keywords that qualify a type without changing it.
const IGNORED_WORDS: &[&str] = &["volatile", "struct", "class", "enum", "typename", "union"];

impl CppType {
    pub fn parse(code: &str) -> Self {
        let mut is_const = false;
        let mut words: Vec<String> = Vec::new();
        let mut modifiers = Vec::new();

        for token in tokenize(code) {
            match token {
                Token::Word(word) if word == "const" => match modifiers.last_mut() {
                    Some(TypeModifier::Pointer { is_const: c }) => *c = true,
                    _ => is_const = true,
                },
                Token::Word(word) if IGNORED_WORDS.contains(&word.as_str()) => {}
                Token::Word(word) => words.push(word),
                Token::Star => modifiers.push(TypeModifier::Pointer { is_const: false }),
                Token::Amp => modifiers.push(TypeModifier::Reference),
                Token::AmpAmp => modifiers.push(TypeModifier::RValueReference),
            }
        }

        Self {
            is_const,
            base: SmolStr::new(normalize_template_spacing(&words.join(" "))),
            modifiers,
        }
    }

    /// A type with no qualifiers and no modifiers.
    pub fn simple(base: &str) -> Self {
        Self {
            is_const: false,
            base: SmolStr::new(base),
            modifiers: Vec::new(),
        }
    }

    pub fn void() -> Self {
        Self::simple("void")
    }

    /// Canonical native spelling: `const char * const`, `int &`, `std::string`.
    pub fn str_code(&self) -> String {
        let mut s = String::new();
        if self.is_const {
            s.push_str("const ");
        }
        s.push_str(&self.base);
        for modifier in &self.modifiers {
            match modifier {
                TypeModifier::Pointer { is_const } => {
                    s.push_str(" *");
                    if *is_const {
                        s.push_str(" const");
                    }
                }
                TypeModifier::Reference => s.push_str(" &"),
                TypeModifier::RValueReference => s.push_str(" &&"),
            }
        }
        s
    }

    pub fn is_void(&self) -> bool {
        self.base == "void" && self.modifiers.is_empty()
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.modifiers.last(), Some(TypeModifier::Pointer { .. }))
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self.modifiers.last(),
            Some(TypeModifier::Reference | TypeModifier::RValueReference)
        )
    }

    pub fn pointer_depth(&self) -> usize {
        self.modifiers
            .iter()
            .filter(|m| matches!(m, TypeModifier::Pointer { .. }))
            .count()
    }

    /// `T *` or `T &` where `T` is not const: the callee may write through it.
    pub fn is_mutable_single_indirection(&self) -> bool {
        !self.is_const
            && self.modifiers.len() == 1
            && matches!(
                self.modifiers[0],
                TypeModifier::Pointer { .. } | TypeModifier::Reference
            )
    }

    /// `const char *` and `const char * const`
    pub fn is_c_string(&self) -> bool {
        self.is_const && self.base == "char" && self.modifiers.len() == 1 && self.is_pointer()
    }

    /// The same type with its outermost modifier removed.
    pub fn pointee(&self) -> Self {
        let mut r = self.clone();
        r.modifiers.pop();
        r
    }

    /// The base type alone, without constness or modifiers.
    pub fn unqualified(&self) -> Self {
        Self::simple(&self.base)
    }

    pub fn with_modifier(&self, modifier: TypeModifier) -> Self {
        let mut r = self.clone();
        r.modifiers.push(modifier);
        r
    }

    pub fn with_const(&self, is_const: bool) -> Self {
        let mut r = self.clone();
        r.is_const = is_const;
        r
    }

    pub fn is_template_instance(&self) -> bool {
        self.base.contains('<')
    }

    /// `std::vector` for `std::vector<int>`, the whole base otherwise.
    pub fn template_name(&self) -> &str {
        match self.base.find('<') {
            Some(idx) => self.base[..idx].trim(),
            None => &self.base,
        }
    }

    /// Top-level template arguments of the base: `std::map<int, std::pair<a, b>>`
    /// yields `int` and `std::pair<a, b>`.
    pub fn template_args(&self) -> Vec<CppType> {
        let (Some(open), Some(close)) = (self.base.find('<'), self.base.rfind('>')) else {
            return Vec::new();
        };
        if close <= open {
            return Vec::new();
        }
        split_top_level(&self.base[open + 1..close], ',')
            .into_iter()
            .map(|arg| CppType::parse(&arg))
            .collect()
    }

    /// Rebuild the base from a template name and already-rendered arguments.
    pub fn with_template_args(&self, args: &[String]) -> Self {
        let mut r = self.clone();
        r.base = SmolStr::new(format!("{}<{}>", self.template_name(), args.join(", ")));
        r
    }

    /// Whole-word occurrences of `param` anywhere in the type.
    pub fn mentions(&self, param: &str) -> bool {
        contains_word(&self.base, param)
    }

    /// Substitute a template parameter by a concrete type.
    ///
    /// When the base *is* the parameter, qualifiers and modifiers of both
    /// sides are merged (`const T &` with `T = int *` gives `const int * &`).
    /// Otherwise whole-word occurrences inside the base are replaced textually.
    pub fn substitute(&self, param: &str, concrete: &CppType) -> Self {
        if self.base == param {
            let mut modifiers = concrete.modifiers.clone();
            modifiers.extend(self.modifiers.iter().copied());
            return Self {
                is_const: self.is_const || concrete.is_const,
                base: concrete.base.clone(),
                modifiers,
            };
        }
        if !self.mentions(param) {
            return self.clone();
        }
        let mut r = self.clone();
        r.base = SmolStr::new(normalize_template_spacing(&replace_word(
            &self.base,
            param,
            &concrete.str_code(),
        )));
        r
    }

    pub fn substitute_all(&self, bindings: &[(SmolStr, CppType)]) -> Self {
        bindings
            .iter()
            .fold(self.clone(), |ty, (param, concrete)| ty.substitute(param, concrete))
    }
}

impl Default for CppType {
    fn default() -> Self {
        Self::void()
    }
}

impl fmt::Display for CppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.str_code())
    }
}

impl From<&str> for CppType {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<String> for CppType {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<CppType> for String {
    fn from(ty: CppType) -> Self {
        ty.str_code()
    }
}

/// Lexemes of a type spelling. Anything else comes back as a lexer error and
/// is kept verbatim.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum TypeToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9][A-Za-z0-9_.]*")]
    Number,
    #[token("::")]
    Scope,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
}

impl TypeToken {
    fn is_word(self) -> bool {
        matches!(self, Self::Ident | Self::Number)
    }

    fn is_indirection(self) -> bool {
        matches!(self, Self::Star | Self::Amp | Self::AmpAmp)
    }

    fn opens(self) -> bool {
        matches!(self, Self::LAngle | Self::LParen | Self::LBracket)
    }

    fn closes(self) -> bool {
        matches!(self, Self::RAngle | Self::RParen | Self::RBracket)
    }
}

/// Whether two adjacent lexemes inside template or call brackets need a
/// separating space once the whitespace between them is gone.
fn needs_space(prev: Option<TypeToken>, next: Option<TypeToken>) -> bool {
    let (Some(prev), Some(next)) = (prev, next) else {
        return false;
    };
    (prev.is_word() && next.is_word())
        || (next.is_indirection() && (prev.is_word() || prev.closes() || prev.is_indirection()))
        || (prev.is_indirection() && next.is_word())
}

fn extend_last_word(tokens: &mut Vec<Token>, text: &str) {
    match tokens.last_mut() {
        Some(Token::Word(word)) => word.push_str(text),
        _ => tokens.push(Token::Word(text.to_string())),
    }
}

/// Split a spelling into words and indirections. Bracketed spans
/// (`<...>`, `(...)`, `[...]`) stay inside the word they follow.
fn tokenize(code: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut prev: Option<TypeToken> = None;
    // set after `::` or an unknown character: the next identifier continues the word
    let mut glue = false;
    let mut lexer = TypeToken::lexer(code);

    while let Some(lexeme) = lexer.next() {
        let kind = lexeme.ok();
        let slice = lexer.slice();

        if depth > 0 {
            if needs_space(prev, kind) {
                extend_last_word(&mut tokens, " ");
            }
            extend_last_word(&mut tokens, slice);
            match kind {
                Some(k) if k.opens() => depth += 1,
                Some(k) if k.closes() => depth = depth.saturating_sub(1),
                _ => {}
            }
            prev = kind;
            continue;
        }

        match kind {
            Some(TypeToken::Star) => tokens.push(Token::Star),
            Some(TypeToken::Amp) => tokens.push(Token::Amp),
            Some(TypeToken::AmpAmp) => tokens.push(Token::AmpAmp),
            Some(k) if k.is_word() && !glue => tokens.push(Token::Word(slice.to_string())),
            _ => {
                extend_last_word(&mut tokens, slice);
                if kind.is_some_and(TypeToken::opens) {
                    depth += 1;
                }
            }
        }
        glue = matches!(kind, None | Some(TypeToken::Scope));
        prev = kind;
    }
    tokens
}

/// Split on `separator` at nesting depth zero (`<>` and `()` nest).
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            _ => {}
        }
        if c == separator && depth == 0 {
            parts.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// `std::map< int ,float >` -> `std::map<int, float>`
fn normalize_template_spacing(text: &str) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let chars: Vec<char> = collapsed.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            ' ' => {
                let prev = if i > 0 { chars[i - 1] } else { ' ' };
                let next = chars.get(i + 1).copied().unwrap_or(' ');
                if prev == '<' || next == '>' || next == ',' || prev == '(' || next == ')' {
                    continue;
                }
                out.push(c);
            }
            ',' => {
                out.push(',');
                if chars.get(i + 1) != Some(&' ') {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

fn word_pattern(word: &str) -> Option<Regex> {
    if word.is_empty() {
        return None;
    }
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}

pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    word_pattern(word).is_some_and(|re| re.is_match(text))
}

pub(crate) fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    match word_pattern(word) {
        Some(re) => re.replace_all(text, NoExpand(replacement)).into_owned(),
        None => text.to_string(),
    }
}
