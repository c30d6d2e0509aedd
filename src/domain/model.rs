use crate::utils::error::{EtlError, Result};
use crate::utils::validation::validate_one_of;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Raw catalog as loaded from disk: product id to product object, in
/// declared order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub entries: Vec<(String, Value)>,
}

impl Catalog {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(bytes)?;
        match document {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(EtlError::structural(format!(
                "catalog root must be an object of products, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One version record. Fields are untyped; lookups on a non-object
/// record simply find nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionEntry(pub Value);

impl VersionEntry {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// String fields come back as-is, numbers as their JSON text,
    /// anything else as an empty label.
    pub fn label(&self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub id: String,
    pub name: String,
    pub versions: Vec<VersionEntry>,
}

impl ProductEntry {
    /// Only a literal JSON `true` marks an operating system.
    pub fn is_os(product: &Value) -> bool {
        matches!(product.get("os"), Some(Value::Bool(true)))
    }

    pub fn from_json(id: &str, product: &Value) -> Result<Self> {
        let name = match product.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(EtlError::structural(format!(
                    "product '{}' has a {} 'name', expected a string",
                    id,
                    json_kind(other)
                )))
            }
            None => {
                return Err(EtlError::structural(format!(
                    "product '{}' has no 'name' field",
                    id
                )))
            }
        };

        let versions = match product.get("versions") {
            Some(Value::Array(items)) => items.iter().cloned().map(VersionEntry).collect(),
            Some(other) => {
                return Err(EtlError::structural(format!(
                    "product '{}' has a {} 'versions', expected an array",
                    id,
                    json_kind(other)
                )))
            }
            None => {
                return Err(EtlError::structural(format!(
                    "product '{}' has no 'versions' field",
                    id
                )))
            }
        };

        Ok(Self {
            id: id.to_string(),
            name,
            versions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResult {
    pub name: String,
    pub cycle: String,
    pub support_period_days: i64,
}

/// Names of the version fields the selector reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub release: String,
    #[serde(default)]
    pub release_aliases: Vec<String>,
    pub eol: String,
    pub cycle: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            release: "releaseDate".to_string(),
            release_aliases: Vec::new(),
            eol: "eol".to_string(),
            cycle: "cycle".to_string(),
        }
    }
}

impl FieldNames {
    /// First release field present on the record: the primary name, then
    /// each alias in order.
    pub fn release_field_of<'a>(&'a self, version: &VersionEntry) -> Option<&'a str> {
        std::iter::once(&self.release)
            .chain(self.release_aliases.iter())
            .map(String::as_str)
            .find(|field| version.contains(field))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["text", "csv", "json"];
}

impl FromStr for OutputFormat {
    type Err = EtlError;

    fn from_str(s: &str) -> Result<Self> {
        validate_one_of("report.format", s, Self::NAMES)?;
        Ok(match s {
            "csv" => OutputFormat::Csv,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_keeps_declared_order() {
        let raw = br#"{"zeta": {"os": true}, "alpha": {"os": false}, "mid": {}}"#;
        let catalog = Catalog::from_slice(raw).unwrap();
        let ids: Vec<&str> = catalog.entries.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_catalog_root_must_be_object() {
        let err = Catalog::from_slice(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, EtlError::StructuralError { .. }));

        let err = Catalog::from_slice(b"{not json").unwrap_err();
        assert!(matches!(err, EtlError::SerializationError(_)));
    }

    #[test]
    fn test_is_os_requires_boolean_true() {
        assert!(ProductEntry::is_os(&json!({"os": true})));
        assert!(!ProductEntry::is_os(&json!({"os": false})));
        assert!(!ProductEntry::is_os(&json!({"os": "true"})));
        assert!(!ProductEntry::is_os(&json!({"name": "x"})));
    }

    #[test]
    fn test_product_without_versions_is_structural_error() {
        let err = ProductEntry::from_json("debian", &json!({"name": "Debian", "os": true}))
            .unwrap_err();
        match err {
            EtlError::StructuralError { message } => assert!(message.contains("versions")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = ProductEntry::from_json("debian", &json!({"os": true, "versions": []}))
            .unwrap_err();
        assert!(matches!(err, EtlError::StructuralError { .. }));

        let err = ProductEntry::from_json("debian", &json!({"name": "Debian", "versions": {}}))
            .unwrap_err();
        assert!(matches!(err, EtlError::StructuralError { .. }));
    }

    #[test]
    fn test_version_label() {
        let version = VersionEntry(json!({"cycle": "22.04", "build": 7}));
        assert_eq!(version.label("cycle"), "22.04");
        assert_eq!(version.label("build"), "7");
        assert_eq!(version.label("missing"), "");
    }

    #[test]
    fn test_release_field_falls_back_to_alias() {
        let fields = FieldNames {
            release_aliases: vec!["releasedDate".to_string()],
            ..FieldNames::default()
        };
        let primary = VersionEntry(json!({"releaseDate": "2020-01-01", "releasedDate": "x"}));
        let aliased = VersionEntry(json!({"releasedDate": "2020-01-01"}));
        let neither = VersionEntry(json!({"eol": "2020-01-01"}));

        assert_eq!(fields.release_field_of(&primary), Some("releaseDate"));
        assert_eq!(fields.release_field_of(&aliased), Some("releasedDate"));
        assert_eq!(fields.release_field_of(&neither), None);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
