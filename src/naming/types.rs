//! Native → host type and value translation.

use crate::config::Config;
use crate::decl::{CppType, split_top_level};

/// Translates type expressions and default values to their host spelling.
#[derive(Debug, Clone, Copy)]
pub struct TypeTranslator<'a> {
    config: &'a Config,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Replace synonyms by their canonical type until none is left.
    pub fn resolve_synonyms(&self, ty: &CppType) -> CppType {
        let mut current = ty.clone();
        // synonyms are acyclic, so each pass strictly shortens the chain
        for _ in 0..=self.config.synonyms.len() {
            let next = self
                .config
                .synonyms
                .iter()
                .fold(current.clone(), |t, (alias, canonical)| t.substitute(alias, canonical));
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    /// Host spelling of a native type (`const std::vector<int> &` → `List[int]`).
    pub fn host_type(&self, ty: &CppType) -> String {
        let ty = self.resolve_synonyms(ty);
        if ty.template_name() == "std::function" {
            if let Some(callable) = self.callable(&ty) {
                return callable;
            }
        }
        let mut rebuilt = ty.clone();
        if ty.is_template_instance() {
            let args: Vec<String> = ty.template_args().iter().map(|a| self.host_type(a)).collect();
            rebuilt = ty.with_template_args(&args);
        }
        self.config.type_replacements.apply(&rebuilt.str_code())
    }

    /// `std::function<R(A, B)>` → `Callable[[A, B], R]`
    fn callable(&self, ty: &CppType) -> Option<String> {
        let signature = ty.template_args().into_iter().next()?;
        let text = signature.str_code();
        let open = text.find('(')?;
        let close = text.rfind(')')?;
        let ret = CppType::parse(&text[..open]);
        let args: Vec<String> = split_top_level(&text[open + 1..close], ',')
            .iter()
            .filter(|a| a.as_str() != "void")
            .map(|a| self.host_type(&CppType::parse(a)))
            .collect();
        Some(format!("Callable[[{}], {}]", args.join(", "), self.host_type(&ret)))
    }

    /// Host spelling of a native default value (`nullptr` → `None`, `1.5f` → `1.5`).
    pub fn host_value(&self, value: &str) -> String {
        self.config.value_replacements.apply(value)
    }
}
