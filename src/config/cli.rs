use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, DEFAULT_TOP_N};
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lts-etl")]
#[command(about = "Rank operating systems by their longest support window")]
pub struct CliConfig {
    /// Path to the product catalog (JSON)
    pub catalog: Option<String>,

    /// Number of operating systems to report
    pub top_n: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: text, csv or json
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub release_field: Option<String>,

    /// Fallback names for the release date field, tried in order
    #[arg(long, value_delimiter = ',')]
    pub release_alias: Vec<String>,

    #[arg(long)]
    pub eol_field: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Merges the optional TOML file with the command line; flags given
    /// on the command line win.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        let catalog_path = self
            .catalog
            .clone()
            .or_else(|| file.catalog_path().map(str::to_string));
        let catalog_path = validate_required_field("catalog", &catalog_path)?.clone();

        let mut fields = file.field_names();
        if let Some(release) = &self.release_field {
            fields.release = release.clone();
        }
        if !self.release_alias.is_empty() {
            fields.release_aliases = self.release_alias.clone();
        }
        if let Some(eol) = &self.eol_field {
            fields.eol = eol.clone();
        }

        let output_format = match &self.format {
            Some(format) => format.parse::<OutputFormat>()?,
            None => file.output_format()?.unwrap_or_default(),
        };

        let settings = Settings {
            catalog_path,
            top_n: self.top_n.or(file.top_n()).unwrap_or(DEFAULT_TOP_N),
            fields,
            output_format,
            output_path: self
                .output
                .clone()
                .or_else(|| file.output_path().map(str::to_string)),
        };
        settings.validate()?;
        Ok(settings)
    }
}
