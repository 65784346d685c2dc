//! JSON loading of options and declaration trees.
//!
//! Header parsing happens outside this crate; a front end hands over the
//! declaration tree of one header as JSON:
//!
//! ```json
//! { "file": "gfx.h",
//!   "decls": [ { "node": "function", "name": "Scale", "return_type": "double",
//!                "params": [ { "name": "x", "ty": "double" } ] } ] }
//! ```

use crate::config::TranslatorOptions;
use crate::decl::TranslationUnit;
use crate::error::ConfigError;

/// Options from JSON; missing fields keep their defaults.
pub fn options_from_json(text: &str) -> Result<TranslatorOptions, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::json(format!("options: {e}")))
}

pub fn unit_from_json(text: &str) -> Result<TranslationUnit, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::json(format!("declarations: {e}")))
}

pub fn options_to_json(options: &TranslatorOptions) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(options).map_err(|e| ConfigError::json(e.to_string()))
}
