//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// System salary definition configuration.
    #[serde(default)]
    pub salary: SalaryConfig,
}

/// Configuration for the auto-maintained salary definition.
///
/// Saving user settings regenerates a single system recurring income
/// definition; these knobs control the category it attaches to and the
/// description it carries.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryConfig {
    /// Name of the category the salary definition is filed under.
    #[serde(default = "default_salary_category")]
    pub category_name: String,
    /// Description written on the salary definition.
    #[serde(default = "default_salary_description")]
    pub description: String,
}

fn default_salary_category() -> String {
    "Lön".to_string()
}

fn default_salary_description() -> String {
    "Månadslön".to_string()
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self {
            category_name: default_salary_category(),
            description: default_salary_description(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASSA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
