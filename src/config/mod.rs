pub mod collections;

pub use collections::{Collection, CollectionFileError, CollectionTable, DEFAULT_COLLECTIONS};

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub collections: CollectionTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the Supabase project, without trailing slash
    pub url: Option<String>,
    pub service_key: Option<ServiceKey>,
    pub schema: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
}

/// Service-role credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceKey(***)")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY app settings ({0} is not set)")]
    MissingSetting(&'static str),

    #[error(transparent)]
    Collections(#[from] CollectionFileError),
}

/// Resolved backend endpoint and credential, borrowed from the config
#[derive(Debug, Clone, Copy)]
pub struct BackendCredentials<'a> {
    pub url: &'a str,
    pub service_key: &'a ServiceKey,
    pub schema: &'a str,
}

impl BackendConfig {
    pub fn credentials(&self) -> Result<BackendCredentials<'_>, ConfigError> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingSetting("SUPABASE_URL"))?;
        let service_key = self
            .service_key
            .as_ref()
            .filter(|k| !k.expose().is_empty())
            .ok_or(ConfigError::MissingSetting("SUPABASE_SERVICE_ROLE_KEY"))?;
        Ok(BackendCredentials { url, service_key, schema: &self.schema })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests never touch the process environment
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Backend
        if let Some(v) = lookup("SUPABASE_URL") {
            let v = v.trim().trim_end_matches('/').to_string();
            self.backend.url = if v.is_empty() { None } else { Some(v) };
        }
        if let Some(v) = lookup("SUPABASE_SERVICE_ROLE_KEY") {
            self.backend.service_key = if v.is_empty() { None } else { Some(ServiceKey::new(v)) };
        }
        if let Some(v) = lookup("SUPABASE_SCHEMA") {
            if !v.trim().is_empty() {
                self.backend.schema = v.trim().to_string();
            }
        }
        if let Some(v) = lookup("SUPABASE_TIMEOUT_SECS") {
            self.backend.timeout_secs = v.parse().unwrap_or(self.backend.timeout_secs).max(1);
        }

        // Server
        if let Some(v) = lookup("PORTFOLIO_API_HOST") {
            self.server.host = v;
        }
        if let Some(port) = lookup("PORTFOLIO_API_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Security
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Collections
        if let Some(path) = lookup("PORTFOLIO_COLLECTIONS_FILE").filter(|p| !p.trim().is_empty()) {
            self.collections = CollectionTable::from_yaml_file(path.trim())?;
        }

        Ok(self)
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                url: None,
                service_key: None,
                schema: "public".to_string(),
                timeout_secs: 30,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7071,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
            },
            collections: CollectionTable::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                url: None,
                service_key: None,
                schema: "public".to_string(),
                timeout_secs: 15,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 7071,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
            },
            collections: CollectionTable::default(),
        }
    }

    /// Point the backend at `url` with `key`; used by the CLI and tests
    pub fn with_backend(mut self, url: impl Into<String>, key: impl Into<String>) -> Self {
        self.backend.url = Some(url.into().trim_end_matches('/').to_string());
        self.backend.service_key = Some(ServiceKey::new(key));
        self
    }
}
