use std::env;

use auth::Authenticator;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;
use auth::TokenPolicy;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
    pub tokens: TokensConfig,
    pub cookie: CookieConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl TokenConfig {
    fn policy(&self) -> TokenPolicy {
        TokenPolicy::new(
            self.secret.as_bytes(),
            chrono::Duration::seconds(self.ttl_seconds),
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokensConfig {
    pub access: TokenConfig,
    pub refresh: TokenConfig,
    pub email_confirmation: TokenConfig,
    pub password_reset: TokenConfig,
}

/// Refresh token cookie.
#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub path: String,
    pub max_age_seconds: i64,
    pub secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// When false, mails are logged and dropped.
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    pub from: String,
    /// Base URL of the web client; links in mails point here.
    pub client_url: String,
    pub app_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    /// Public URL prefix of uploaded objects.
    pub public_base_url: String,
    /// Custom endpoint for S3-compatible services.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub force_path_style: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub avatar_max_bytes: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKENS__ACCESS__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKENS__REFRESH__SECRET=... overrides tokens.refresh.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tokens = [
            ("access", &self.tokens.access),
            ("refresh", &self.tokens.refresh),
            ("email_confirmation", &self.tokens.email_confirmation),
            ("password_reset", &self.tokens.password_reset),
        ];

        for (name, token) in tokens {
            if token.secret.trim().is_empty() {
                return Err(ConfigError::Message(format!(
                    "tokens.{}.secret must not be empty",
                    name
                )));
            }
            if token.ttl_seconds <= 0 {
                return Err(ConfigError::Message(format!(
                    "tokens.{}.ttl_seconds must be positive",
                    name
                )));
            }
        }

        if self.upload.avatar_max_bytes == 0 {
            return Err(ConfigError::Message(
                "upload.avatar_max_bytes must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the password hasher and token issuer from the configured cost and secrets.
    pub fn authenticator(&self) -> Result<Authenticator, PasswordError> {
        let hasher = PasswordHasher::with_cost(
            self.password.memory_kib,
            self.password.iterations,
            self.password.parallelism,
        )?;

        let tokens = TokenIssuer::new(
            self.tokens.access.policy(),
            self.tokens.refresh.policy(),
            self.tokens.email_confirmation.policy(),
            self.tokens.password_reset.policy(),
        );

        Ok(Authenticator::new(hasher, tokens))
    }
}
