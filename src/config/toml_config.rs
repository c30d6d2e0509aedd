use crate::config::{Settings, DEFAULT_TOP_N};
use crate::domain::model::{FieldNames, OutputFormat};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: Option<CatalogConfig>,
    pub fields: Option<FieldsConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldsConfig {
    pub release: Option<String>,
    pub release_aliases: Option<Vec<String>>,
    pub eol: Option<String>,
    pub cycle: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub top_n: Option<usize>,
    pub format: Option<String>,
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// Load a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables
    /// are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().and_then(|c| c.path.as_deref())
    }

    pub fn top_n(&self) -> Option<usize> {
        self.report.as_ref().and_then(|r| r.top_n)
    }

    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.report
            .as_ref()
            .and_then(|r| r.format.as_deref())
            .map(str::parse)
            .transpose()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_path.as_deref())
    }

    /// Field names with unset entries falling back to the defaults.
    pub fn field_names(&self) -> FieldNames {
        let defaults = FieldNames::default();
        let Some(fields) = &self.fields else {
            return defaults;
        };
        FieldNames {
            release: fields.release.clone().unwrap_or(defaults.release),
            release_aliases: fields
                .release_aliases
                .clone()
                .unwrap_or(defaults.release_aliases),
            eol: fields.eol.clone().unwrap_or(defaults.eol),
            cycle: fields.cycle.clone().unwrap_or(defaults.cycle),
        }
    }

    /// Settings from this file alone. The catalog path must be present.
    pub fn to_settings(&self) -> Result<Settings> {
        let catalog_path = crate::utils::validation::validate_required_field(
            "catalog.path",
            &self.catalog.as_ref().and_then(|c| c.path.clone()),
        )?
        .clone();

        Ok(Settings {
            catalog_path,
            top_n: self.top_n().unwrap_or(DEFAULT_TOP_N),
            fields: self.field_names(),
            output_format: self.output_format()?.unwrap_or_default(),
            output_path: self.output_path().map(str::to_string),
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
        }

        if let Some(fields) = &self.fields {
            let named = [
                ("fields.release", &fields.release),
                ("fields.eol", &fields.eol),
                ("fields.cycle", &fields.cycle),
            ];
            for (field, value) in named {
                if let Some(value) = value {
                    validate_non_empty_string(field, value)?;
                }
            }
        }

        self.output_format()?;

        if let Some(path) = self.output_path() {
            validate_path("report.output_path", path)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[catalog]
path = "data/products.json"

[fields]
release = "releaseDate"
release_aliases = ["releasedDate"]
eol = "eol"
cycle = "cycle"

[report]
top_n = 5
format = "csv"
output_path = "out/top.csv"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        let settings = config.to_settings().unwrap();
        assert_eq!(settings.catalog_path, "data/products.json");
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.fields.release_aliases, vec!["releasedDate"]);
        assert_eq!(settings.output_format, OutputFormat::Csv);
        assert_eq!(settings.output_path.as_deref(), Some("out/top.csv"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.field_names(), FieldNames::default());
        assert_eq!(config.top_n(), None);
        assert!(matches!(
            config.to_settings(),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_format_fails_validation() {
        let config = TomlConfig::from_toml_str("[report]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(EtlError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LTS_ETL_TEST_CATALOG", "from-env.json");
        let config = TomlConfig::from_toml_str(
            "[catalog]\npath = \"${LTS_ETL_TEST_CATALOG}\"\n[fields]\neol = \"${LTS_ETL_TEST_UNSET}\"\n",
        )
        .unwrap();
        assert_eq!(config.catalog_path(), Some("from-env.json"));
        assert_eq!(config.field_names().eol, "${LTS_ETL_TEST_UNSET}");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[report\ntop_n = 3"),
            Err(EtlError::ConfigValidationError { .. })
        ));
    }
}
