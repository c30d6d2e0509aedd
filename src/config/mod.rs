#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::ConfigProvider;
use crate::domain::model::{FieldNames, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};

pub const DEFAULT_TOP_N: usize = 10;

/// Fully resolved run settings, after defaults, the TOML file and the
/// command line have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_path: String,
    pub top_n: usize,
    pub fields: FieldNames,
    pub output_format: OutputFormat,
    pub output_path: Option<String>,
}

impl Settings {
    pub fn new(catalog_path: impl Into<String>, top_n: usize) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            top_n,
            fields: FieldNames::default(),
            output_format: OutputFormat::default(),
            output_path: None,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("catalog.path", &self.catalog_path)?;
        validate_non_empty_string("fields.release", &self.fields.release)?;
        for alias in &self.fields.release_aliases {
            validate_non_empty_string("fields.release_aliases", alias)?;
        }
        validate_non_empty_string("fields.eol", &self.fields.eol)?;
        validate_non_empty_string("fields.cycle", &self.fields.cycle)?;
        if let Some(path) = &self.output_path {
            validate_path("report.output_path", path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn catalog_path(&self) -> &str {
        &self.catalog_path
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn fields(&self) -> &FieldNames {
        &self.fields
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}
