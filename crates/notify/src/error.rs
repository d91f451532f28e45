//! Error types for rendering and delivering notifications.

use thiserror::Error;

/// Errors raised while translating a payload into chat messages.
///
/// Both variants indicate that the upstream producer sent a code outside the
/// vocabulary this relay knows about. They are never recovered from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The notification trigger is not a known Terraform Cloud trigger.
    #[error("unrecognized notification trigger: {0:?}")]
    UnrecognizedTrigger(String),

    /// The run status is not a known Terraform Cloud run state.
    #[error("unrecognized run state: {0:?}")]
    UnrecognizedRunState(String),
}

/// Errors that can occur when sending a rendered message to a channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the service
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Errors returned by [`crate::Forwarder::forward`].
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The payload could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A rendered message could not be delivered.
    #[error("delivery to {channel} failed: {source}")]
    Delivery {
        channel: &'static str,
        #[source]
        source: ChannelError,
    },
}
