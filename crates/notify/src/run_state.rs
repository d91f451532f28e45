//! Run state classification and severity colors.
//!
//! See <https://developer.hashicorp.com/terraform/cloud-docs/api-docs/run#run-states>.

use std::str::FromStr;

use crate::error::RenderError;

/// Severity bucket used to color-code a run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The run failed or was thrown away
    Danger,
    /// The run stopped or needs a decision
    Warning,
    /// Waiting to start
    Pending,
    /// Somewhere between queued and applied
    Progressing,
    /// Applied
    Success,
}

impl Severity {
    /// Get the Discord embed color for this severity.
    #[must_use]
    pub const fn color(&self) -> u32 {
        match self {
            Self::Danger => 0x00e7_4c3c,      // Red
            Self::Warning => 0x00c2_7c0e,     // Light orange
            Self::Pending => 0x0097_9c9f,     // Light grey
            Self::Progressing => 0x009b_59b6, // Purple
            Self::Success => 0x002e_cc71,     // Green
        }
    }

    /// Get display name for this severity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Danger => "Danger",
            Self::Warning => "Warning",
            Self::Pending => "Pending",
            Self::Progressing => "Progressing",
            Self::Success => "Success",
        }
    }
}

/// State of a Terraform Cloud run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Pending,
    Fetching,
    FetchingCompleted,
    PrePlanRunning,
    PrePlanCompleted,
    Queuing,
    PlanQueued,
    Planning,
    Planned,
    CostEstimating,
    CostEstimated,
    PolicyChecking,
    PolicyOverride,
    PolicySoftFailed,
    PolicyChecked,
    Confirmed,
    PostPlanRunning,
    PostPlanCompleted,
    PlannedAndFinished,
    PlannedAndSaved,
    ApplyQueued,
    Applying,
    Applied,
    Discarded,
    Errored,
    Canceled,
    ForceCanceled,
}

impl RunState {
    /// Every run state, in documentation order.
    pub const ALL: [Self; 27] = [
        Self::Pending,
        Self::Fetching,
        Self::FetchingCompleted,
        Self::PrePlanRunning,
        Self::PrePlanCompleted,
        Self::Queuing,
        Self::PlanQueued,
        Self::Planning,
        Self::Planned,
        Self::CostEstimating,
        Self::CostEstimated,
        Self::PolicyChecking,
        Self::PolicyOverride,
        Self::PolicySoftFailed,
        Self::PolicyChecked,
        Self::Confirmed,
        Self::PostPlanRunning,
        Self::PostPlanCompleted,
        Self::PlannedAndFinished,
        Self::PlannedAndSaved,
        Self::ApplyQueued,
        Self::Applying,
        Self::Applied,
        Self::Discarded,
        Self::Errored,
        Self::Canceled,
        Self::ForceCanceled,
    ];

    /// Classify an optional run status.
    ///
    /// An absent status yields `Ok(None)`; the message then carries no
    /// status field and no color.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnrecognizedRunState`] for any unknown code,
    /// including the empty string.
    pub fn classify(status: Option<&str>) -> Result<Option<Self>, RenderError> {
        match status {
            None => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }

    /// Wire code as sent by Terraform Cloud.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::FetchingCompleted => "fetching_completed",
            Self::PrePlanRunning => "pre_plan_running",
            Self::PrePlanCompleted => "pre_plan_completed",
            Self::Queuing => "queuing",
            Self::PlanQueued => "plan_queued",
            Self::Planning => "planning",
            Self::Planned => "planned",
            Self::CostEstimating => "cost_estimating",
            Self::CostEstimated => "cost_estimated",
            Self::PolicyChecking => "policy_checking",
            Self::PolicyOverride => "policy_override",
            Self::PolicySoftFailed => "policy_soft_failed",
            Self::PolicyChecked => "policy_checked",
            Self::Confirmed => "confirmed",
            Self::PostPlanRunning => "post_plan_running",
            Self::PostPlanCompleted => "post_plan_completed",
            Self::PlannedAndFinished => "planned_and_finished",
            Self::PlannedAndSaved => "planned_and_saved",
            Self::ApplyQueued => "apply_queued",
            Self::Applying => "applying",
            Self::Applied => "applied",
            Self::Discarded => "discarded",
            Self::Errored => "errored",
            Self::Canceled => "canceled",
            Self::ForceCanceled => "force_canceled",
        }
    }

    /// Display title shown in the "Run Status" field.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Fetching => "Fetching",
            Self::FetchingCompleted => "Fetching Complete",
            Self::PrePlanRunning => "Pre-Planning Running",
            Self::PrePlanCompleted => "Pre-Planning Completed",
            Self::Queuing => "Queuing",
            Self::PlanQueued => "Plan Queued",
            Self::Planning => "Planning",
            Self::Planned => "Planned",
            Self::CostEstimating => "Cost Estimating",
            Self::CostEstimated => "Cost Estimated",
            Self::PolicyChecking => "Policy Checking",
            Self::PolicyOverride => "Policy Override",
            Self::PolicySoftFailed => "Policy Soft-Failed",
            Self::PolicyChecked => "Policy Checked",
            Self::Confirmed => "Confirmed",
            Self::PostPlanRunning => "Post-Plan Running",
            Self::PostPlanCompleted => "Post-Plan Completed",
            Self::PlannedAndFinished => "Planned and Finished",
            Self::PlannedAndSaved => "Planned and Saved",
            Self::ApplyQueued => "Apply Queued",
            Self::Applying => "Applying",
            Self::Applied => "Applied",
            Self::Discarded => "Discarded",
            Self::Errored => "Errored",
            Self::Canceled => "Canceled",
            Self::ForceCanceled => "Force-Canceled",
        }
    }

    /// Severity bucket for this state.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Pending => Severity::Pending,
            Self::PolicySoftFailed | Self::Canceled => Severity::Warning,
            Self::Applied => Severity::Success,
            Self::Discarded | Self::Errored | Self::ForceCanceled => Severity::Danger,
            Self::Fetching
            | Self::FetchingCompleted
            | Self::PrePlanRunning
            | Self::PrePlanCompleted
            | Self::Queuing
            | Self::PlanQueued
            | Self::Planning
            | Self::Planned
            | Self::CostEstimating
            | Self::CostEstimated
            | Self::PolicyChecking
            | Self::PolicyOverride
            | Self::PolicyChecked
            | Self::Confirmed
            | Self::PostPlanRunning
            | Self::PostPlanCompleted
            | Self::PlannedAndFinished
            | Self::PlannedAndSaved
            | Self::ApplyQueued
            | Self::Applying => Severity::Progressing,
        }
    }
}

impl FromStr for RunState {
    type Err = RenderError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.code() == code)
            .ok_or_else(|| RenderError::UnrecognizedRunState(code.to_string()))
    }
}
