use anyhow::Result;
use serde::Deserialize;
use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST.to_string(),
            cors_allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Upper bound on a whole multipart request body, in bytes
    pub max_body_bytes: usize,
    /// Number of characters echoed back as `preview` per ingested file
    pub preview_chars: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
                ),
            },
            upload: UploadConfig {
                max_body_bytes: env::var("UPLOAD_MAX_BYTES")
                    .unwrap_or_else(|_| DEFAULT_MAX_BODY_BYTES.to_string())
                    .parse()?,
                preview_chars: env::var("UPLOAD_PREVIEW_CHARS")
                    .unwrap_or_else(|_| DEFAULT_PREVIEW_CHARS.to_string())
                    .parse()?,
            },
        })
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
