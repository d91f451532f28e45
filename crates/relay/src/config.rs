//! Configuration for the relay service.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};
use thiserror::Error;
use url::Url;

/// Errors in the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The webhook URL is not a valid absolute URL.
    #[error("invalid Discord webhook URL: {0}")]
    InvalidWebhookUrl(#[from] url::ParseError),

    /// The webhook URL does not use http or https.
    #[error("Discord webhook URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Relay Terraform Cloud notifications to a Discord webhook.
#[derive(Debug, Clone, Parser)]
#[command(name = "tfc-relay")]
#[command(about = "Relay Terraform Cloud notification webhooks to Discord")]
#[command(version)]
pub struct Config {
    /// Discord webhook URL (or set `DISCORD_WEBHOOK_URL` env var).
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true, value_parser = parse_webhook_url)]
    pub webhook_url: Url,

    /// Address to bind the HTTP server to.
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_address: IpAddr,

    /// HTTP server port.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    /// Socket address the HTTP server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Parse and validate a Discord webhook URL.
pub fn parse_webhook_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://discord.com/api/webhooks/123/token";

    #[test]
    fn test_parse_from_args() {
        let config = Config::try_parse_from([
            "tfc-relay",
            "--webhook-url",
            WEBHOOK,
            "--port",
            "9090",
            "--bind-address",
            "127.0.0.1",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.webhook_url.as_str(), WEBHOOK);
        assert_eq!(config.listen_addr(), "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_webhook_url_is_rejected() {
        std::env::remove_var("DISCORD_WEBHOOK_URL");

        let err = Config::try_parse_from(["tfc-relay"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_webhook_url_is_rejected() {
        let result = Config::try_parse_from(["tfc-relay", "--webhook-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_webhook_url() {
        assert!(parse_webhook_url(WEBHOOK).is_ok());
        assert!(parse_webhook_url(&format!("  {WEBHOOK}\n")).is_ok());
        assert!(matches!(
            parse_webhook_url("discord/api/webhooks"),
            Err(ConfigError::InvalidWebhookUrl(_))
        ));
        assert!(matches!(
            parse_webhook_url("ftp://discord.com/api/webhooks/1/x"),
            Err(ConfigError::UnsupportedScheme(ref scheme)) if scheme == "ftp"
        ));
    }
}
