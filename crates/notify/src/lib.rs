//! Terraform Cloud run notifications for Discord.
//!
//! This crate turns the webhook payloads that Terraform Cloud sends for run
//! lifecycle events into Discord embeds and delivers them.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tfc_notify::{DiscordChannel, Forwarder, NotificationBatch};
//!
//! # async fn example(batch: NotificationBatch) -> Result<(), Box<dyn std::error::Error>> {
//! let webhook = "https://discord.com/api/webhooks/123/token".parse()?;
//! let forwarder = Forwarder::new(Arc::new(DiscordChannel::new(webhook)));
//!
//! let delivered = forwarder.forward(&batch).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`trigger`] and [`run_state`] classify the closed Terraform Cloud
//!   vocabularies and reject unknown codes
//! - [`links`] derives deep links into the Terraform Cloud UI from the run URL
//! - [`render()`] builds one [`RenderedMessage`] per notification, without I/O
//! - [`NotifyChannel`] delivers messages; [`DiscordChannel`] posts to a webhook
//! - [`Forwarder`] renders a batch and delivers it through a channel

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;
pub mod links;
pub mod payload;
pub mod render;
pub mod run_state;
pub mod trigger;

pub use channels::discord::DiscordChannel;
pub use channels::NotifyChannel;
pub use error::{ChannelError, ForwardError, RenderError};
pub use payload::{NotificationBatch, NotificationEntry};
pub use render::{render, FieldValue, MessageField, RenderedMessage};
pub use run_state::{RunState, Severity};
pub use trigger::Trigger;

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Renders notification batches and delivers them through one channel.
#[derive(Clone)]
pub struct Forwarder {
    channel: Arc<dyn NotifyChannel>,
}

impl Forwarder {
    /// Create a forwarder delivering through `channel`.
    #[must_use]
    pub fn new(channel: Arc<dyn NotifyChannel>) -> Self {
        Self { channel }
    }

    /// Name of the underlying channel.
    #[must_use]
    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    /// Render `batch` and send each message in entry order.
    ///
    /// The whole batch is rendered before anything is sent, so an
    /// unrecognized code means nothing is delivered. Delivery stops at the
    /// first failed send. Returns the number of messages delivered.
    pub async fn forward(&self, batch: &NotificationBatch) -> Result<usize, ForwardError> {
        info!(
            notification_count = batch.notifications.len(),
            notification_configuration_id = %batch.notification_configuration_id,
            "Forwarding Terraform notification webhook"
        );

        let messages = render(batch).inspect_err(|e| {
            warn!(error = %e, "Rejecting notification payload");
        })?;

        let channel = self.channel.name();

        for (index, message) in messages.iter().enumerate() {
            self.channel
                .send(message)
                .await
                .map_err(|source| ForwardError::Delivery { channel, source })?;

            debug!(
                channel,
                index,
                title = message.title,
                severity = message.severity.map(|severity| severity.as_str()),
                "Notification delivered"
            );
        }

        Ok(messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Records titles and optionally fails on the nth send.
    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<&'static str>>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl NotifyChannel for RecordingChannel {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send(&self, message: &RenderedMessage) -> Result<(), ChannelError> {
            let mut sent = self.sent.lock().await;
            if self.fail_at == Some(sent.len()) {
                return Err(ChannelError::Other("boom".to_string()));
            }
            sent.push(message.title);
            Ok(())
        }
    }

    fn batch(triggers: &[&str]) -> NotificationBatch {
        NotificationBatch {
            notifications: triggers
                .iter()
                .map(|trigger| NotificationEntry::new("message", *trigger))
                .collect(),
            ..NotificationBatch::new(1, "nc-1")
        }
    }

    #[tokio::test]
    async fn test_forward_sends_in_order() {
        let channel = Arc::new(RecordingChannel::default());
        let forwarder = Forwarder::new(channel.clone());

        let delivered = forwarder
            .forward(&batch(&["run:created", "run:planning", "run:completed"]))
            .await
            .unwrap();

        assert_eq!(delivered, 3);
        assert_eq!(
            *channel.sent.lock().await,
            vec!["Created", "Planning", "Completed"]
        );
    }

    #[tokio::test]
    async fn test_forward_rejects_batch_before_sending() {
        let channel = Arc::new(RecordingChannel::default());
        let forwarder = Forwarder::new(channel.clone());

        let err = forwarder
            .forward(&batch(&["run:created", "run:exploded"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ForwardError::Render(RenderError::UnrecognizedTrigger(ref code)) if code == "run:exploded"
        ));
        assert!(channel.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_forward_stops_at_first_delivery_failure() {
        let channel = Arc::new(RecordingChannel {
            fail_at: Some(1),
            ..RecordingChannel::default()
        });
        let forwarder = Forwarder::new(channel.clone());

        let err = forwarder
            .forward(&batch(&["run:created", "run:planning", "run:completed"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ForwardError::Delivery {
                channel: "recording",
                ..
            }
        ));
        assert_eq!(*channel.sent.lock().await, vec!["Created"]);
    }

    #[tokio::test]
    async fn test_forward_empty_batch() {
        let forwarder = Forwarder::new(Arc::new(RecordingChannel::default()));
        assert_eq!(forwarder.forward(&batch(&[])).await.unwrap(), 0);
        assert_eq!(forwarder.channel_name(), "recording");
    }
}
