use config::{Config, ConfigError, Environment as ConfigEnvironment, File, FileFormat};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use tracing::warn;

/// Relative path of the optional JSON configuration document. Missing file is
/// not an error; built-in defaults apply until overridden.
pub const CONFIG_FILE: &str = "configuration/config.json";

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub supabase_url: String,
    #[serde(default = "default_anon_key")]
    pub supabase_anon_key: Secret<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

fn default_anon_key() -> Secret<String> {
    Secret::new(String::new())
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Settings {
    /// The panel is unusable without Supabase credentials. Callers abort
    /// startup when this fails; there is no retry or interactive recovery.
    pub fn ensure_credentials(&self) -> Result<(), ConfigError> {
        if self.supabase_url.is_empty() || self.supabase_anon_key.expose_secret().is_empty() {
            return Err(ConfigError::Message(format!(
                "supabase_url and supabase_anon_key must be set in {} or via APP_* environment variables",
                CONFIG_FILE
            )));
        }
        Ok(())
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        ConfigError::Message(format!("failed to determine current directory: {}", e))
    })?;
    let config_path = base_path.join(CONFIG_FILE);

    if !config_path.exists() {
        warn!(
            "{} not found, continuing with built-in defaults",
            config_path.display()
        );
    }

    let settings = Config::builder()
        .add_source(
            File::from(config_path)
                .format(FileFormat::Json)
                .required(false),
        )
        .add_source(
            ConfigEnvironment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
