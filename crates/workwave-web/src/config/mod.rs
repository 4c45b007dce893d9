//! Configuration loading for WorkWave.
//! Reads workwave.toml from the current directory or the path in the
//! WORKWAVE_CONFIG env var, then applies secret overrides from the
//! environment (and a `.env` file, if present).

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub payments: PaymentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String { "0.0.0.0:3002".to_string() }
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://work-wave-main.vercel.app".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind(), cors_origins: default_cors_origins() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url()    -> String { "sqlite://workwave.db".to_string() }
fn default_max_connections() -> u32    { 5 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: default_database_url(), max_connections: default_max_connections() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default, deserialize_with = "secret_opt")]
    pub jwt_secret: Option<SecretString>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl() -> i64 { 24 }

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_hours: default_token_ttl() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    #[serde(default = "default_otp_ttl")]
    pub ttl_minutes: u64,
}

fn default_otp_ttl() -> u64 { 15 }

impl Default for OtpConfig {
    fn default() -> Self {
        Self { ttl_minutes: default_otp_ttl() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailProvider {
    #[default]
    Log,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub provider: MailProvider,
    pub api_url: Option<String>,
    #[serde(default, deserialize_with = "secret_opt")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_mail_from")]
    pub from: String,
    #[serde(default = "default_support_email")]
    pub support_email: String,
}

fn default_mail_from()     -> String { "WorkWave Support <support@workwave.com>".to_string() }
fn default_support_email() -> String { "support@workwave.com".to_string() }

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            api_url: None,
            api_key: None,
            from: default_mail_from(),
            support_email: default_support_email(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default = "default_razorpay_url")]
    pub base_url: String,
    #[serde(default)]
    pub key_id: String,
    #[serde(default, deserialize_with = "secret_opt")]
    pub key_secret: Option<SecretString>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_razorpay_url() -> String { workwave_payments::razorpay::DEFAULT_BASE_URL.to_string() }
fn default_currency()     -> String { "INR".to_string() }

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            base_url: default_razorpay_url(),
            key_id: String::new(),
            key_secret: None,
            currency: default_currency(),
        }
    }
}

fn secret_opt<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}


impl Config {
    /// Load configuration from workwave.toml plus environment overrides.
    /// A missing file is not an error: every setting has a default.
    pub fn load() -> anyhow::Result<Self> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();

        let path = std::env::var("WORKWAVE_CONFIG")
            .unwrap_or_else(|_| "workwave.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)?
        } else {
            tracing::warn!("Config file not found: {path}; using defaults");
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay environment variables. Secrets are expected here rather than
    /// in the config file.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("WORKWAVE_BIND") {
            self.server.bind = bind;
        }
        if let Some(url) = get("WORKWAVE_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = get("WORKWAVE_JWT_SECRET") {
            self.auth.jwt_secret = Some(SecretString::from(secret));
        }
        if let Some(key) = get("WORKWAVE_MAIL_API_KEY") {
            self.mail.api_key = Some(SecretString::from(key));
        }
        if let Some(key_id) = get("RAZORPAY_KEY_ID") {
            self.payments.key_id = key_id;
        }
        if let Some(secret) = get("RAZORPAY_KEY_SECRET") {
            self.payments.key_secret = Some(SecretString::from(secret));
        }
    }
}
