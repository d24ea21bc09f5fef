use anyhow::{Context, Result};

const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: String,
    pub jwt_secret: String,
    pub list_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_bucket = require_env("S3_BUCKET")?;
        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let s3_public_url = std::env::var("S3_PUBLIC_URL").unwrap_or_else(|_| {
            format!("{}/{}", s3_endpoint.trim_end_matches('/'), s3_bucket)
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket,
            s3_endpoint,
            s3_region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_public_url,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            ai_gateway_url: std::env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_AI_GATEWAY_URL.to_string()),
            ai_gateway_api_key: require_env("AI_GATEWAY_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            list_cache_ttl_secs: std::env::var("LIST_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LIST_CACHE_TTL_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
