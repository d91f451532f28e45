//! Translation of a notification batch into chat messages.
//!
//! Rendering is pure: it performs no I/O and fails only when the payload
//! carries a trigger or run state code outside the known vocabulary.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::RenderError;
use crate::links::BaseUrl;
use crate::payload::{NotificationBatch, NotificationEntry};
use crate::run_state::{RunState, Severity};
use crate::trigger::Trigger;

/// Sender display name used for every message.
pub const SENDER_NAME: &str = "Terraform Cloud";

pub const FIELD_RUN_STATUS: &str = "Run Status";
/// Discord rejects field values that are empty or longer than 1024 characters.
pub const FIELD_RUN_MESSAGE: &str = "Run Message";
pub const FIELD_ORGANIZATION: &str = "Organization";
pub const FIELD_WORKSPACE: &str = "Workspace";
pub const FIELD_RUN_ID: &str = "Run ID";

/// A fully composed chat message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub username: &'static str,
    pub title: &'static str,
    pub description: String,
    /// Set when the entry carries a run state.
    pub severity: Option<Severity>,
    pub timestamp: Option<DateTime<Utc>>,
    pub author: Option<String>,
    /// Displayed in insertion order.
    pub fields: Vec<MessageField>,
}

impl RenderedMessage {
    /// Embed color derived from the run state severity.
    #[must_use]
    pub fn color(&self) -> Option<u32> {
        self.severity.as_ref().map(Severity::color)
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&MessageField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// A named field of a rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageField {
    pub name: &'static str,
    pub value: FieldValue,
    pub inline: bool,
}

impl MessageField {
    fn block(name: &'static str, value: FieldValue) -> Self {
        Self {
            name,
            value,
            inline: false,
        }
    }

    fn inline(name: &'static str, value: FieldValue) -> Self {
        Self {
            name,
            value,
            inline: true,
        }
    }
}

/// Field content, either plain text or a labelled link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Link { text: String, href: String },
}

impl FieldValue {
    fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Chat markdown: links render as `[text](href)`.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Link { text, href } => write!(f, "[{text}]({href})"),
        }
    }
}

/// Render one message per notification entry, preserving entry order.
///
/// # Errors
///
/// Returns the first [`RenderError`] encountered; no messages are returned
/// for a batch containing an unrecognized code.
pub fn render(batch: &NotificationBatch) -> Result<Vec<RenderedMessage>, RenderError> {
    let base_url = BaseUrl::from_run_url(batch.run_url.as_deref());

    batch
        .notifications
        .iter()
        .map(|entry| render_entry(batch, entry, base_url.as_ref()))
        .collect()
}

fn render_entry(
    batch: &NotificationBatch,
    entry: &NotificationEntry,
    base_url: Option<&BaseUrl>,
) -> Result<RenderedMessage, RenderError> {
    let trigger: Trigger = entry.trigger.parse()?;
    let run_state = RunState::classify(entry.run_status.as_deref())?;

    let mut fields = Vec::new();

    if let Some(state) = run_state {
        fields.push(MessageField::block(
            FIELD_RUN_STATUS,
            FieldValue::text(state.title()),
        ));
    }

    if let Some(message) = &batch.run_message {
        fields.push(MessageField::block(
            FIELD_RUN_MESSAGE,
            FieldValue::text(message),
        ));
    }

    if let Some(organization) = &batch.organization_name {
        let value = match base_url {
            Some(base) => FieldValue::link(organization, base.organization_link(organization)),
            None => FieldValue::text(organization),
        };
        fields.push(MessageField::inline(FIELD_ORGANIZATION, value));
    }

    if let Some(workspace) = &batch.workspace_name {
        let value = match (&batch.organization_name, base_url) {
            (Some(organization), Some(base)) => {
                FieldValue::link(workspace, base.workspace_link(organization, workspace))
            }
            _ => FieldValue::text(workspace),
        };
        fields.push(MessageField::inline(FIELD_WORKSPACE, value));
    }

    if let (Some(run_id), Some(run_url)) = (&batch.run_id, &batch.run_url) {
        fields.push(MessageField::inline(
            FIELD_RUN_ID,
            FieldValue::link(run_id, run_url),
        ));
    }

    Ok(RenderedMessage {
        username: SENDER_NAME,
        title: trigger.title(),
        description: entry.message.clone(),
        severity: run_state.map(|state| state.severity()),
        timestamp: entry.run_updated_at,
        author: entry.run_updated_by.clone(),
        fields,
    })
}
