use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the discrete parts below.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub dbname: String,
    pub sslmode: String,
    pub max_connections: u32,
    pub max_idle_connections: u32,
    /// Seconds; 0 means connections are reused forever.
    pub max_lifetime_secs: u64,
    pub connection_timeout: u64,
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expire_minutes: i64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    /// Store and compare passwords as plain text. Compatibility only.
    pub legacy_plaintext_passwords: bool,
    /// Restrict user update/delete to the token subject's own record.
    pub enforce_user_ownership: bool,
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
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DB_USERNAME") {
            self.database.username = v;
        }
        if let Ok(v) = env::var("DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DB_NAME") {
            self.database.dbname = v;
        }
        if let Ok(v) = env::var("DB_SSLMODE") {
            self.database.sslmode = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DB_MAX_IDLE_CONNECTIONS") {
            self.database.max_idle_connections = v.parse().unwrap_or(self.database.max_idle_connections);
        }
        if let Ok(v) = env::var("DB_MAX_LIFETIME_SECS") {
            self.database.max_lifetime_secs = v.parse().unwrap_or(self.database.max_lifetime_secs);
        }
        if let Ok(v) = env::var("DB_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DB_AUTO_MIGRATE") {
            self.database.auto_migrate = v.parse().unwrap_or(self.database.auto_migrate);
        }

        // API overrides
        if let Some(v) = env::var("HOUSER_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET_KEY") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_SECRET_KEY_EXPIRE_MINUTES_COUNT") {
            self.security.jwt_expire_minutes = v.parse().unwrap_or(self.security.jwt_expire_minutes);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("SECURITY_LEGACY_PLAINTEXT_PASSWORDS") {
            self.security.legacy_plaintext_passwords =
                v.parse().unwrap_or(self.security.legacy_plaintext_passwords);
        }
        if let Ok(v) = env::var("SECURITY_ENFORCE_USER_OWNERSHIP") {
            self.security.enforce_user_ownership =
                v.parse().unwrap_or(self.security.enforce_user_ownership);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                username: "postgres".to_string(),
                password: "postgres".to_string(),
                dbname: "houser".to_string(),
                sslmode: "disable".to_string(),
                max_connections: 10,
                max_idle_connections: 2,
                max_lifetime_secs: 0,
                connection_timeout: 30,
                auto_migrate: true,
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret: "houser-development-secret".to_string(),
                jwt_expire_minutes: 15,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                bcrypt_cost: 10,
                legacy_plaintext_passwords: false,
                enforce_user_ownership: false,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                auto_migrate: false,
                ..Self::development().database
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: true,
                max_request_size_bytes: 512 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expire_minutes: 15,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                bcrypt_cost: bcrypt::DEFAULT_COST,
                legacy_plaintext_passwords: false,
                enforce_user_ownership: false,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                sslmode: "require".to_string(),
                max_connections: 50,
                max_idle_connections: 10,
                connection_timeout: 5,
                auto_migrate: false,
                ..Self::development().database
            },
            api: ApiConfig {
                port: 8080,
                enable_request_logging: false,
                max_request_size_bytes: 256 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expire_minutes: 15,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                bcrypt_cost: bcrypt::DEFAULT_COST,
                legacy_plaintext_passwords: false,
                enforce_user_ownership: false,
            },
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, either `DATABASE_URL` verbatim or assembled from the parts.
    pub fn connection_url(&self) -> Result<String, url::ParseError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("postgres://localhost")?;
        url.set_host(Some(&self.host))?;
        // set_port/set_username/set_password only fail for cannot-be-a-base URLs
        let _ = url.set_port(Some(self.port));
        let _ = url.set_username(&self.username);
        if !self.password.is_empty() {
            let _ = url.set_password(Some(&self.password));
        }
        url.set_path(&format!("/{}", self.dbname));
        url.query_pairs_mut().append_pair("sslmode", &self.sslmode);
        Ok(url.into())
    }
}
