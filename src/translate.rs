//! Translation entry point.
//!
//! ```text
//! TranslatorOptions ──Config::new──► Config          (ConfigError aborts)
//! TranslationUnit ───Config::prepare──► Config        (ConfigError aborts)
//!                    compose ──► CompositeModule       (diagnostics collected)
//!                    emit ─────► EmittedCode
//! ```
//!
//! A run either fails with a [`ConfigError`] before any declaration is
//! processed, or produces complete output plus the list of declarations it
//! had to leave out.

use std::sync::Arc;

use crate::base::SourceLocation;
use crate::compose::compose;
use crate::config::{Config, TranslatorOptions};
use crate::decl::TranslationUnit;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, Severity};
use crate::emit::{Fragment, emit};
use crate::error::ConfigError;

/// A declaration left out of the output, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    /// Qualified native name
    pub name: Arc<str>,
    pub code: Option<Arc<str>>,
    pub reason: Arc<str>,
    pub location: SourceLocation,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationOutput {
    pub fragments: Vec<Fragment>,
    pub diagnostics: Vec<Diagnostic>,
    /// Python stub source
    pub stub_code: String,
    /// pybind11 registration statements
    pub glue_code: String,
    /// C++ boxed types, shims and helper classes
    pub adapter_code: String,
}

impl TranslationOutput {
    /// Declarations that were skipped, in the order they were met.
    pub fn skipped(&self) -> Vec<SkippedDeclaration> {
        self.diagnostics
            .iter()
            .filter(|d| d.skipped)
            .map(|d| SkippedDeclaration {
                name: d.declaration.clone(),
                code: d.code.clone(),
                reason: d.message.clone(),
                location: d.location.clone(),
            })
            .collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Fragments generated from the declaration `name`.
    pub fn fragments_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Fragment> + 'a {
        self.fragments.iter().filter(move |f| f.name == name)
    }
}

/// A validated configuration, reusable across translation units.
#[derive(Debug, Clone)]
pub struct Translator {
    config: Config,
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Config::new(options)?,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate one unit.
    pub fn translate(&self, unit: &TranslationUnit) -> Result<TranslationOutput, ConfigError> {
        let config = self.config.prepare(unit)?;
        let mut collector = DiagnosticCollector::new();

        let module = compose(&config, unit, &mut collector);
        for rule in config.unmatched_rules(unit) {
            collector.unmatched_rule(&rule.spec.describe());
        }
        let code = emit(&config, &module);

        let diagnostics = collector.into_diagnostics();
        let skipped = diagnostics.iter().filter(|d| d.skipped).count();
        if skipped > 0 {
            tracing::warn!(skipped, "declarations left out of the output");
        }
        tracing::debug!(
            file = unit.file.as_deref().unwrap_or("<unit>"),
            fragments = code.fragments.len(),
            diagnostics = diagnostics.len(),
            "translation finished"
        );
        Ok(TranslationOutput {
            fragments: code.fragments,
            diagnostics,
            stub_code: code.stub_code,
            glue_code: code.glue_code,
            adapter_code: code.adapter_code,
        })
    }
}

/// Validate `options` and translate `unit` in one call.
pub fn translate(options: TranslatorOptions, unit: &TranslationUnit) -> Result<TranslationOutput, ConfigError> {
    Translator::new(options)?.translate(unit)
}
