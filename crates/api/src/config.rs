use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Completion service configuration for the AI features.
    pub ai: AiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let ai = AiConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            ai,
        }
    }
}

/// Configuration for the completion service backing the AI features.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Provider base URL without the path.
    pub base_url: String,
    /// Bearer token for the provider.
    pub api_key: String,
    /// Model name passed with each completion request.
    pub model: String,
}

impl AiConfig {
    /// Load AI configuration from environment variables.
    ///
    /// | Env Var       | Required | Default                  |
    /// |---------------|----------|--------------------------|
    /// | `AI_BASE_URL` | no       | `https://api.openai.com` |
    /// | `AI_API_KEY`  | **yes**  | --                       |
    /// | `AI_MODEL`    | no       | `gpt-4o-mini`            |
    ///
    /// # Panics
    ///
    /// Panics if `AI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".into());

        let api_key = std::env::var("AI_API_KEY").expect("AI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "AI_API_KEY must not be empty");

        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

        Self {
            base_url,
            api_key,
            model,
        }
    }
}
