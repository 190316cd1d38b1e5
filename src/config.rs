use crate::processor::DEFAULT_WINDOW;
use crate::utils::{check_name, check_num};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Analysis configuration.
///
/// Loaded from a TOML file and validated before use.
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub processing: ProcessingConfig,
}

/// Layout of the input CSV file.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Header of the date column.
    pub date_column: String,
    /// Header of the temperature column.
    pub value_column: String,
    /// `chrono` format string of the dates.
    pub date_format: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Rolling mean window, in rows.
    pub window: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            date_column: "date".to_string(),
            value_column: "temperature".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_name(&self.input.date_column).context("invalid date column")?;
        check_name(&self.input.value_column).context("invalid value column")?;
        check_name(&self.input.date_format).context("invalid date format")?;

        check_num(self.processing.window, 1..10_000).context("invalid window")?;

        Ok(())
    }
}
