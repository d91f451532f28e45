//! Inbound Terraform Cloud notification payload.
//!
//! Field names follow the run notification payload documented at
//! <https://developer.hashicorp.com/terraform/cloud-docs/api-docs/notification-configurations#run-notification-payload>.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One webhook delivery from Terraform Cloud.
///
/// Run, workspace and organization details are shared by every entry in
/// [`NotificationBatch::notifications`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationBatch {
    pub payload_version: i32,
    pub notification_configuration_id: String,
    #[serde(default)]
    pub run_url: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub run_message: Option<String>,
    #[serde(default)]
    pub run_created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub run_created_by: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    /// Rendered in this order, one chat message per entry.
    #[serde(default)]
    pub notifications: Vec<NotificationEntry>,
}

/// A single lifecycle notification within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub message: String,
    /// Raw trigger code, classified by [`crate::trigger::Trigger`].
    pub trigger: String,
    /// Raw run state code, classified by [`crate::run_state::RunState`].
    #[serde(default)]
    pub run_status: Option<String>,
    #[serde(default)]
    pub run_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub run_updated_by: Option<String>,
}

impl NotificationBatch {
    /// Create a batch with only the required fields set.
    #[must_use]
    pub fn new(payload_version: i32, notification_configuration_id: impl Into<String>) -> Self {
        Self {
            payload_version,
            notification_configuration_id: notification_configuration_id.into(),
            run_url: None,
            run_id: None,
            run_message: None,
            run_created_at: None,
            run_created_by: None,
            workspace_id: None,
            workspace_name: None,
            organization_name: None,
            notifications: Vec::new(),
        }
    }
}

impl NotificationEntry {
    /// Create an entry with only the required fields set.
    #[must_use]
    pub fn new(message: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trigger: trigger.into(),
            run_status: None,
            run_updated_at: None,
            run_updated_by: None,
        }
    }
}
