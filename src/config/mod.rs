use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::routing::EdgeConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub edge: EdgeConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub services: ServicesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Session cookie gets the Secure attribute outside development.
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

/// Settings for the external collaborators: the generative content service
/// and the image host. Keys may be absent; the services report a
/// configuration error at call time, not at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub imgbb_api_key: Option<String>,
    pub imgbb_upload_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("ROOT_DOMAIN") {
            self.edge.root_domain = v.trim().to_ascii_lowercase();
        }
        if let Ok(v) = env::var("PREVIEW_SUFFIXES") {
            self.edge.preview_suffixes =
                v.split(',').map(|s| s.trim().to_ascii_lowercase()).collect();
        }
        if let Ok(v) = env::var("SESSION_COOKIE") {
            self.edge.session_cookie = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("GEMINI_API_KEY") {
            self.services.gemini_api_key = Some(v);
        }
        if let Ok(v) = env::var("GEMINI_MODEL") {
            self.services.gemini_model = v;
        }
        if let Ok(v) = env::var("GEMINI_BASE_URL") {
            self.services.gemini_base_url = v;
        }
        if let Ok(v) = env::var("IMGBB_API_KEY") {
            self.services.imgbb_api_key = Some(v);
        }
        if let Ok(v) = env::var("IMGBB_UPLOAD_URL") {
            self.services.imgbb_upload_url = v;
        }
        self
    }

    fn base_services() -> ServicesConfig {
        ServicesConfig {
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            imgbb_api_key: None,
            imgbb_upload_url: "https://api.imgbb.com/1/upload".to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            edge: EdgeConfig::for_domain("localhost"),
            security: SecurityConfig {
                jwt_secret: "development-secret".to_string(),
                jwt_expiry_hours: 24 * 7,
                secure_cookies: false,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            services: Self::base_services(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            edge: EdgeConfig::for_domain("staging.example.com"),
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                secure_cookies: true,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            services: Self::base_services(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            edge: EdgeConfig::for_domain("example.com"),
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                secure_cookies: true,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            services: Self::base_services(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.edge.root_domain, "localhost");
        assert!(!config.security.secure_cookies);
    }

    #[test]
    fn production_requires_explicit_secret() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.security.secure_cookies);
    }
}
