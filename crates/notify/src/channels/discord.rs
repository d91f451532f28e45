//! Discord webhook channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::NotifyChannel;
use crate::error::ChannelError;
use crate::render::{MessageField, RenderedMessage};

/// Seconds to report when a 429 response carries no usable `retry-after`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Discord webhook notification channel.
#[derive(Debug, Clone)]
pub struct DiscordChannel {
    webhook_url: Url,
    client: reqwest::Client,
}

impl DiscordChannel {
    /// Create a Discord channel posting to `webhook_url`.
    #[must_use]
    pub fn new(webhook_url: Url) -> Self {
        Self::with_client(webhook_url, reqwest::Client::new())
    }

    /// Create a Discord channel that reuses an existing HTTP client.
    #[must_use]
    pub fn with_client(webhook_url: Url, client: reqwest::Client) -> Self {
        Self {
            webhook_url,
            client,
        }
    }

    /// Format a rendered message as a Discord webhook payload.
    fn format_payload(message: &RenderedMessage) -> DiscordPayload {
        let embed = DiscordEmbed {
            title: message.title.to_string(),
            description: message.description.clone(),
            color: message.color(),
            timestamp: message.timestamp.map(|ts| ts.to_rfc3339()),
            author: message
                .author
                .as_ref()
                .map(|name| DiscordAuthor { name: name.clone() }),
            fields: message.fields.iter().map(DiscordField::from).collect(),
        };

        DiscordPayload {
            username: message.username.to_string(),
            embeds: vec![embed],
        }
    }
}

#[async_trait]
impl NotifyChannel for DiscordChannel {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, message: &RenderedMessage) -> Result<(), ChannelError> {
        let payload = Self::format_payload(message);

        debug!(channel = "discord", title = message.title, "Sending notification");

        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            debug!(channel = "discord", "Notification sent successfully");
            Ok(())
        } else if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            warn!(
                channel = "discord",
                retry_after_secs = retry_after,
                "Rate limited by Discord"
            );

            Err(ChannelError::RateLimited {
                retry_after_secs: retry_after,
            })
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                channel = "discord",
                status = %status,
                body = %body,
                "Discord webhook request failed"
            );

            Err(ChannelError::Other(format!(
                "Discord returned {status}: {body}"
            )))
        }
    }
}

/// Discord may send fractional seconds; round up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_retry_after(value: &str) -> Option<u64> {
    let secs: f64 = value.trim().parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then(|| secs.ceil() as u64)
}

// =============================================================================
// Discord API types
// =============================================================================

#[derive(Debug, Serialize)]
struct DiscordPayload {
    username: String,
    embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<DiscordAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<DiscordField>,
}

#[derive(Debug, Serialize)]
struct DiscordAuthor {
    name: String,
}

#[derive(Debug, Serialize)]
struct DiscordField {
    name: String,
    value: String,
    inline: bool,
}

impl From<&MessageField> for DiscordField {
    fn from(field: &MessageField) -> Self {
        Self {
            name: field.name.to_string(),
            value: field.value.to_string(),
            inline: field.inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{NotificationBatch, NotificationEntry};
    use crate::render::render;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn applying_message() -> RenderedMessage {
        let batch = NotificationBatch {
            run_url: Some("https://app.terraform.io/app/acme/runs/run-1".to_string()),
            run_id: Some("run-1".to_string()),
            organization_name: Some("acme".to_string()),
            workspace_name: Some("prod".to_string()),
            notifications: vec![NotificationEntry {
                run_status: Some("applying".to_string()),
                run_updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
                run_updated_by: Some("alice".to_string()),
                ..NotificationEntry::new("Run applying", "run:applying")
            }],
            ..NotificationBatch::new(1, "nc-1")
        };

        render(&batch).unwrap().remove(0)
    }

    fn expected_body() -> Value {
        json!({
            "username": "Terraform Cloud",
            "embeds": [{
                "title": "Applying",
                "description": "Run applying",
                "color": 0x009b_59b6,
                "timestamp": "2024-03-01T12:30:00+00:00",
                "author": { "name": "alice" },
                "fields": [
                    { "name": "Run Status", "value": "Applying", "inline": false },
                    {
                        "name": "Organization",
                        "value": "[acme](https://app.terraform.io/app/acme/workspaces)",
                        "inline": true
                    },
                    {
                        "name": "Workspace",
                        "value": "[prod](https://app.terraform.io/app/acme/workspaces/prod)",
                        "inline": true
                    },
                    {
                        "name": "Run ID",
                        "value": "[run-1](https://app.terraform.io/app/acme/runs/run-1)",
                        "inline": true
                    }
                ]
            }]
        })
    }

    fn channel_for(server: &MockServer) -> DiscordChannel {
        let url = Url::parse(&format!("{}/api/webhooks/1/token", server.uri())).unwrap();
        DiscordChannel::new(url)
    }

    #[test]
    fn test_format_payload() {
        let payload = DiscordChannel::format_payload(&applying_message());
        assert_eq!(serde_json::to_value(payload).unwrap(), expected_body());
    }

    #[test]
    fn test_format_payload_omits_absent_optionals() {
        let batch = NotificationBatch {
            notifications: vec![NotificationEntry::new("Drift detected", "assessment:drifted")],
            ..NotificationBatch::new(1, "nc-1")
        };
        let message = render(&batch).unwrap().remove(0);

        let payload = serde_json::to_value(DiscordChannel::format_payload(&message)).unwrap();
        assert_eq!(
            payload,
            json!({
                "username": "Terraform Cloud",
                "embeds": [{ "title": "Drifted", "description": "Drift detected" }]
            })
        );
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("2"), Some(2));
        assert_eq!(parse_retry_after("0.25"), Some(1));
        assert_eq!(parse_retry_after("-1"), None);
        assert_eq!(parse_retry_after("soon"), None);
    }

    #[tokio::test]
    async fn test_send_posts_embed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/webhooks/1/token"))
            .and(body_json(expected_body()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        channel_for(&server).send(&applying_message()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_reports_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2.5"))
            .mount(&server)
            .await;

        let err = channel_for(&server)
            .send(&applying_message())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChannelError::RateLimited {
                retry_after_secs: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_send_reports_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid Form Body"))
            .mount(&server)
            .await;

        let err = channel_for(&server)
            .send(&applying_message())
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::Other(ref msg) if msg.contains("Invalid Form Body")));
    }
}
