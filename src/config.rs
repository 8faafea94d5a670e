use std::env;

use serde::{Deserialize, Serialize};

/// Outbound mail provider offered on the "choose service" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Gmail,
    Outlook,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Gmail => "gmail",
            Platform::Outlook => "outlook",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            Platform::Gmail => "GMAIL",
            Platform::Outlook => "OUTLOOK",
        }
    }

    fn default_host(&self) -> &'static str {
        match self {
            Platform::Gmail => "smtp.gmail.com",
            Platform::Outlook => "smtp.office365.com",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SMTP settings for one platform. The host doubles as the platform
/// identifier written to the mail log.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpSettings {
    fn from_env(platform: Platform) -> Result<Self, ConfigError> {
        let prefix = platform.env_prefix();
        let var = |name: &str| env::var(format!("{}_SMTP_{}", prefix, name)).ok();

        Ok(SmtpSettings {
            host: var("HOST").unwrap_or_else(|| platform.default_host().to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "587".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidSmtpPort(platform))?,
            username: var("USERNAME").filter(|v| !v.trim().is_empty()),
            password: var("PASSWORD").filter(|v| !v.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransportKind {
    Smtp,
    Stub,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub password_hash_cost: u32,
    pub mail_transport: MailTransportKind,
    pub gmail: SmtpSettings,
    pub outlook: SmtpSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "redis".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "redis" => StoreBackend::Redis,
            "memory" => StoreBackend::Memory,
            other => return Err(ConfigError::UnknownStoreBackend(other.to_string())),
        };

        let mail_transport = match env::var("MAIL_TRANSPORT")
            .unwrap_or_else(|_| "smtp".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "smtp" => MailTransportKind::Smtp,
            "stub" => MailTransportKind::Stub,
            other => return Err(ConfigError::UnknownMailTransport(other.to_string())),
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            store_backend,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            jwt_secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?,
            jwt_expiry_seconds: parse_jwt_expiry(env::var("JWT_EXPIRY_SECONDS").ok().as_deref())?,
            password_hash_cost: parse_hash_cost(env::var("PASSWORD_HASH_COST").ok().as_deref())?,
            mail_transport,
            gmail: SmtpSettings::from_env(Platform::Gmail)?,
            outlook: SmtpSettings::from_env(Platform::Outlook)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn smtp(&self, platform: Platform) -> &SmtpSettings {
        match platform {
            Platform::Gmail => &self.gmail,
            Platform::Outlook => &self.outlook,
        }
    }
}

const DEFAULT_JWT_EXPIRY_SECONDS: u64 = 3600;

/// bcrypt accepts costs in this range
const HASH_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

fn parse_jwt_expiry(raw: Option<&str>) -> Result<u64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_JWT_EXPIRY_SECONDS),
        Some(value) => match value.trim().parse() {
            Ok(seconds) if seconds > 0 => Ok(seconds),
            _ => Err(ConfigError::InvalidJwtExpiry(value.to_string())),
        },
    }
}

fn parse_hash_cost(raw: Option<&str>) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(bcrypt::DEFAULT_COST),
        Some(value) => match value.trim().parse() {
            Ok(cost) if HASH_COST_RANGE.contains(&cost) => Ok(cost),
            _ => Err(ConfigError::InvalidHashCost(value.to_string())),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SMTP port for {0}")]
    InvalidSmtpPort(Platform),
    #[error("Invalid JWT_EXPIRY_SECONDS: {0}")]
    InvalidJwtExpiry(String),
    #[error("Invalid PASSWORD_HASH_COST (expected 4..=31): {0}")]
    InvalidHashCost(String),
    #[error("JWT_SECRET environment variable is required")]
    MissingJwtSecret,
    #[error("Unknown STORE_BACKEND: {0}")]
    UnknownStoreBackend(String),
    #[error("Unknown MAIL_TRANSPORT: {0}")]
    UnknownMailTransport(String),
}
