//! Server configuration
//!
//! All settings come from environment variables with defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/storefront | database + uploaded media root |
//! | HTTP_PORT | 8000 | HTTP API port |
//! | PUBLIC_BASE_URL | http://localhost:8000/ | base for public media URLs |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | daily rolling log files when set |

#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the database and uploaded media
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Public base URL prepended to stored media paths on read.
    /// The single source for the media resolver; nothing else may
    /// carry this value.
    pub public_base_url: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }
}
