use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};
use url::Url;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Map configuration handed into the view, replacing the module-level
/// style/token constants of earlier revisions. `tile_style_id` picks the
/// basemap variant; `access_token` authorizes tile requests.
#[derive(Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MapSettings {
    #[serde(default = "default_map_style")]
    pub tile_style_id: String,

    #[serde(default)]
    pub access_token: String,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_map_style")]
    pub map_style: String,

    #[serde(default)]
    pub map_access_token: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_api_base_url() -> String {
    "http://localhost:3333".to_string()
}
fn default_map_style() -> String {
    "outdoors-v11".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // The tile token is the one value with no sane default
        config.map_access_token = fill_or_env(config.map_access_token, "APP_MAPBOX_TOKEN")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match Url::parse(&self.api_base_url) {
            Ok(url) => {
                if self.is_production() && url.scheme() != "https" {
                    errors.push("API_BASE_URL must use https in production".to_string());
                }
            }
            Err(e) => errors.push(format!("API_BASE_URL is not a valid URL: {}", e)),
        }
        if self.map_access_token.trim().is_empty() {
            errors.push("MAPBOX_TOKEN cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// The slice of configuration the view actually receives.
    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            tile_style_id: self.map_style.clone(),
            access_token: self.map_access_token.clone(),
        }
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("map_style", &self.map_style)
            .field("map_access_token", &self.map_access_token.redact())
            .finish()
    }
}

impl fmt::Debug for MapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSettings")
            .field("tile_style_id", &self.tile_style_id)
            .field("access_token", &self.access_token.redact())
            .finish()
    }
}
