//! Delivery channels for rendered messages.

pub mod discord;

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::render::RenderedMessage;

/// Trait for outbound chat channels.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver one rendered message.
    async fn send(&self, message: &RenderedMessage) -> Result<(), ChannelError>;
}
