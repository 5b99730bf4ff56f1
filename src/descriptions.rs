//! Optional field-description decoration.
//!
//! Descriptions come from an external store keyed by the upper-snake-case
//! form of the field name. Absence of the store, or of any one key, is never
//! fatal; the schema is valid without descriptions.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;

/// Lookup seam: the writer only needs "maybe a description for this
/// normalized key".
pub trait DescriptionSource {
    fn description(&self, property: &str) -> Option<&str>;
}

/// `firstName` → `FIRST_NAME`: underscore before every interior uppercase,
/// then uppercase the whole key.
pub fn normalize_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() && i != 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out.to_uppercase()
}

/// Flat JSON map (`{"FIRST_NAME": "First name", ...}`) loaded once per run.
#[derive(Debug, Default)]
pub struct JsonDescriptions {
    entries: HashMap<String, String>,
}

impl JsonDescriptions {
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut de = serde_json::Deserializer::from_str(&source);
        let entries: HashMap<String, String> =
            serde_path_to_error::deserialize(&mut de).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self { entries })
    }
}

impl DescriptionSource for JsonDescriptions {
    fn description(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_camel_case() {
        assert_eq!(normalize_property_name("firstName"), "FIRST_NAME");
        assert_eq!(normalize_property_name("oTrnPrcS"), "O_TRN_PRC_S");
    }

    #[test]
    fn leading_uppercase_gets_no_separator() {
        assert_eq!(normalize_property_name("Name"), "NAME");
    }

    #[test]
    fn single_word_is_just_uppercased() {
        assert_eq!(normalize_property_name("city"), "CITY");
        assert_eq!(normalize_property_name(""), "");
    }

    #[test]
    fn json_source_resolves_normalized_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desc.json");
        std::fs::write(&path, r#"{"FIRST_NAME": "The first name"}"#).unwrap();

        let source = JsonDescriptions::from_file(&path).unwrap();
        assert_eq!(
            source.description(&normalize_property_name("firstName")),
            Some("The first name")
        );
        assert_eq!(source.description("LAST_NAME"), None);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desc.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            JsonDescriptions::from_file(&path),
            Err(Error::Config { .. })
        ));
    }
}
