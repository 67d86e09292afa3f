use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub url: String,
    /// Upper bound for acquiring a connection and for each statement (default: 10)
    #[serde(default = "default_db_timeout")]
    pub timeout_secs: u64,
}

fn default_db_timeout() -> u64 {
    10
}

/// Admin account to seed on startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialAdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    #[serde(default = "default_admin_name")]
    pub last_name: String,
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

/// Auth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Signs access tokens
    pub jwt_secret: String,
    /// Signs refresh tokens
    pub refresh_secret: String,
    pub initial_admin: Option<InitialAdminConfig>,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            bail!("auth.jwt_secret must not be empty");
        }
        if self.refresh_secret.is_empty() {
            bail!("auth.refresh_secret must not be empty");
        }
        if self.jwt_secret == self.refresh_secret {
            bail!("auth.jwt_secret and auth.refresh_secret must differ");
        }
        Ok(())
    }
}

/// External review classifier (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Requests fail without it; the server still starts.
    pub api_key: Option<String>,
    #[serde(default = "default_classifier_url")]
    pub base_url: String,
    #[serde(default = "default_classifier_model")]
    pub model: String,
    #[serde(default = "default_classifier_timeout")]
    pub timeout_secs: u64,
}

fn default_classifier_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_classifier_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_classifier_timeout() -> u64 {
    30
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_classifier_url(),
            model: default_classifier_model(),
            timeout_secs: default_classifier_timeout(),
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Server configuration - loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen: String, // "0.0.0.0:8080"
    pub db: DbConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    /// Raw cap on recommendation results; see [`crate::recommend::recommendation_limit`].
    #[serde(default)]
    pub recommended_movie_limit: Option<String>,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()
    }
}

/// Load server config from a YAML file with MARQUEE__ env var overrides.
pub fn load_config(path: &str) -> anyhow::Result<ServerConfig> {
    use anyhow::Context;
    let config: ServerConfig = config::Config::builder()
        .add_source(config::File::new(path, config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("MARQUEE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to build config from: {}", path))?
        .try_deserialize()
        .with_context(|| format!("Failed to deserialize config from: {}", path))?;
    config.validate()?;
    Ok(config)
}
