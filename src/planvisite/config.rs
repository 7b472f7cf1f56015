use crate::error::{PlanError, Result};
use crate::repository::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_IMPORT_DELIMITER: &str = ";";
const DEFAULT_EXPORT_FORMAT: &str = "csv-mymaps";
const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Every key accepted by [`PlanConfig::get`] and [`PlanConfig::set`].
pub const CONFIG_KEYS: [&str; 3] = ["import-delimiter", "export-format", "currency-symbol"];

/// Configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct PlanConfig {
    /// Field delimiter of client CSV imports (a single ASCII character)
    #[serde(default = "default_import_delimiter")]
    pub import_delimiter: String,

    /// Format used by `export` when none is given
    #[serde(default = "default_export_format")]
    pub export_format: String,

    /// Symbol appended to displayed amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_import_delimiter() -> String {
    DEFAULT_IMPORT_DELIMITER.to_string()
}

fn default_export_format() -> String {
    DEFAULT_EXPORT_FORMAT.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            import_delimiter: default_import_delimiter(),
            export_format: default_export_format(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl PlanConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PlanError::Io)?;
        let config: PlanConfig =
            serde_json::from_str(&content).map_err(PlanError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PlanError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PlanError::Serialization)?;
        fs::write(config_path, content).map_err(PlanError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "import-delimiter" => Some(self.import_delimiter.clone()),
            "export-format" => Some(self.export_format.clone()),
            "currency-symbol" => Some(self.currency_symbol.clone()),
            _ => None,
        }
    }

    /// Set a key after validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "import-delimiter" => {
                parse_delimiter(value)?;
                self.import_delimiter = value.to_string();
            }
            "export-format" => {
                let format: ExportFormat = value
                    .parse()
                    .map_err(|e: PlanError| PlanError::Config(e.to_string()))?;
                self.export_format = format.to_string();
            }
            "currency-symbol" => self.currency_symbol = value.trim().to_string(),
            other => {
                return Err(PlanError::Config(format!(
                    "unknown config key '{}' (known: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn delimiter(&self) -> Result<u8> {
        parse_delimiter(&self.import_delimiter)
    }

    pub fn export_format(&self) -> Result<ExportFormat> {
        self.export_format
            .parse()
            .map_err(|e: PlanError| PlanError::Config(e.to_string()))
    }
}

fn parse_delimiter(value: &str) -> Result<u8> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => Ok(*byte),
        _ => Err(PlanError::Config(format!(
            "invalid delimiter '{}': expected one punctuation or whitespace character",
            value
        ))),
    }
}
