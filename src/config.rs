use crate::error::{Result, TerraCastError};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Key shipped in sample configs; treated as "no credential"
const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY_HERE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl GeminiConfig {
    /// Whether a usable API key is configured.
    /// Empty keys, unresolved `${VAR}` placeholders and the sample key don't count.
    pub fn has_credential(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !key.starts_with("${") && key != PLACEHOLDER_API_KEY
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Mock data synthesis settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    /// Lower bound of the simulated network delay
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound (exclusive) of the simulated network delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Fixed seed for reproducible forecasts; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    1000
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Characters typed before the search boxes query the catalog
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_search_min_chars() -> usize {
    3
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            search_min_chars: default_search_min_chars(),
        }
    }
}

impl Config {
    /// Load configuration from `config_override`, or the first config found in
    /// the standard locations. Without any file, defaults are used and the API
    /// key is taken from `GEMINI_API_KEY` (or `API_KEY`).
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(TerraCastError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::info!("No config file found, using defaults");
                    return Ok(Self::from_env());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| TerraCastError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::parse(&config_str)?;
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse YAML content after substituting `${VAR}` environment references
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| TerraCastError::Config(format!("Failed to parse config: {}", e)))?;

        if config.mock.max_delay_ms < config.mock.min_delay_ms {
            return Err(TerraCastError::Config(format!(
                "mock.max_delay_ms ({}) must not be below mock.min_delay_ms ({})",
                config.mock.max_delay_ms, config.mock.min_delay_ms
            )));
        }

        if !config.gemini.has_credential() {
            if let Some(key) = Self::api_key_from_env() {
                config.gemini.api_key = key;
            }
        }

        Ok(config)
    }

    fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(key) = Self::api_key_from_env() {
            config.gemini.api_key = key;
        }
        config
    }

    fn api_key_from_env() -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }

    /// Search for config.yaml in standard locations
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("terracast").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/terracast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TerraCastError::Config("Cannot determine config directory".into()))?
            .join("terracast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up TerraCast!");
        println!();

        println!("Gemini (leave API key blank to use offline summaries)");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| TerraCastError::Config(format!("Input error: {}", e)))?;

        let model: String = Input::new()
            .with_prompt("  Model")
            .default(default_model())
            .interact_text()
            .map_err(|e| TerraCastError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Mock weather data");
        let min_delay_ms: u64 = Input::new()
            .with_prompt("  Minimum simulated delay (ms)")
            .default(default_min_delay_ms())
            .interact_text()
            .map_err(|e| TerraCastError::Config(format!("Input error: {}", e)))?;

        let max_delay_ms: u64 = Input::new()
            .with_prompt("  Maximum simulated delay (ms)")
            .default(default_max_delay_ms().max(min_delay_ms))
            .interact_text()
            .map_err(|e| TerraCastError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            gemini: GeminiConfig {
                api_key,
                model,
                ..GeminiConfig::default()
            },
            mock: MockConfig {
                min_delay_ms,
                max_delay_ms: max_delay_ms.max(min_delay_ms),
                seed: None,
            },
            ui: UiConfig::default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| TerraCastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# TerraCast Configuration\n# Generated by `terracast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("TERRACAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| TerraCastError::Config("Cannot determine data directory".into()))?
            .join("terracast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("terracast.log"))
    }
}
