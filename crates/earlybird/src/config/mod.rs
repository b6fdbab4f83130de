use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub admission: AdmissionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let admission = AdmissionConfig {
            max_waitlist_entries: limit_from_env(
                "APP_MAX_WAITLIST_ENTRIES",
                AdmissionConfig::DEFAULT_CAPACITY,
            )?,
            max_signups_per_ip_per_24h: limit_from_env(
                "APP_MAX_SIGNUPS_PER_IP_24H",
                AdmissionConfig::DEFAULT_SIGNUPS_PER_IP,
            )?,
            max_contacts_per_ip_per_24h: limit_from_env(
                "APP_MAX_CONTACTS_PER_IP_24H",
                AdmissionConfig::DEFAULT_CONTACTS_PER_IP,
            )?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admission,
        })
    }
}

/// Anti-abuse dials consumed by the admission pipelines. Resolved once at
/// startup and passed by value into the services.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionConfig {
    /// Hard ceiling on waitlist size, checked before every signup insert.
    pub max_waitlist_entries: u32,
    /// Rolling 24h signup limit per originating IP address.
    pub max_signups_per_ip_per_24h: u32,
    /// Rolling 24h contact-form limit per originating IP address.
    pub max_contacts_per_ip_per_24h: u32,
}

impl AdmissionConfig {
    pub const DEFAULT_CAPACITY: u32 = 10_000;
    pub const DEFAULT_SIGNUPS_PER_IP: u32 = 3;
    pub const DEFAULT_CONTACTS_PER_IP: u32 = 5;
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_waitlist_entries: Self::DEFAULT_CAPACITY,
            max_signups_per_ip_per_24h: Self::DEFAULT_SIGNUPS_PER_IP,
            max_contacts_per_ip_per_24h: Self::DEFAULT_CONTACTS_PER_IP,
        }
    }
}

fn limit_from_env(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(_) => return Ok(default),
    };

    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidLimit { name })?;

    // A zero limit would reject every request at startup; treat it as a
    // misconfiguration rather than silently disabling the pipeline.
    if value == 0 {
        return Err(ConfigError::InvalidLimit { name });
    }

    Ok(value)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLimit { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLimit { name } => {
                write!(f, "{name} must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidLimit { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
