//! Error code catalog and lookup.
//!
//! Maps error codes (like "CX-2-5") to their metadata. The catalog is
//! embedded at compile time from `error_catalog.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name ("xml" for the parser, "document" for strict access)
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// One-sentence description
    pub message_template: String,

    /// When this error was introduced (version)
    pub since_version: String,
}

/// Global error catalog, parsed lazily on first use.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in cxml")
});

/// Look up error code information.
///
/// ```
/// use cxml_error_reporting::get_error_info;
///
/// let info = get_error_info("CX-2-8").unwrap();
/// assert_eq!(info.title, "Unexpected XML Tag");
/// ```
pub fn get_error_info(code: &str) -> Option<&ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}

/// Get the subsystem name for an error code.
pub fn get_subsystem(code: &str) -> Option<&str> {
    ERROR_CATALOG.get(code).map(|info| info.subsystem.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        assert!(!ERROR_CATALOG.is_empty());
    }

    #[test]
    fn test_subsystems() {
        assert_eq!(get_subsystem("CX-1-1"), Some("xml"));
        assert_eq!(get_subsystem("CX-2-1"), Some("document"));
        assert_eq!(get_subsystem("CX-9-9"), None);
    }

    #[test]
    fn test_codes_are_well_formed() {
        for (code, info) in ERROR_CATALOG.iter() {
            assert!(code.starts_with("CX-"), "bad code {}", code);
            assert!(!info.title.is_empty());
        }
    }
}
