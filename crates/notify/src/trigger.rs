//! Notification trigger classification.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// The lifecycle event that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    RunCreated,
    RunPlanning,
    RunNeedsAttention,
    RunApplying,
    RunCompleted,
    RunErrored,
    AssessmentDrifted,
    AssessmentCheckFailure,
    AssessmentFailed,
    AutoDestroyReminder,
    AutoDestroyRunResults,
}

impl Trigger {
    /// Every trigger, in documentation order.
    pub const ALL: [Self; 11] = [
        Self::RunCreated,
        Self::RunPlanning,
        Self::RunNeedsAttention,
        Self::RunApplying,
        Self::RunCompleted,
        Self::RunErrored,
        Self::AssessmentDrifted,
        Self::AssessmentCheckFailure,
        Self::AssessmentFailed,
        Self::AutoDestroyReminder,
        Self::AutoDestroyRunResults,
    ];

    /// Wire code as sent by Terraform Cloud.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RunCreated => "run:created",
            Self::RunPlanning => "run:planning",
            Self::RunNeedsAttention => "run:needs_attention",
            Self::RunApplying => "run:applying",
            Self::RunCompleted => "run:completed",
            Self::RunErrored => "run:errored",
            Self::AssessmentDrifted => "assessment:drifted",
            Self::AssessmentCheckFailure => "assessment:check_failure",
            Self::AssessmentFailed => "assessment:failed",
            // Upstream spelling, do not correct.
            Self::AutoDestroyReminder => "workspace:auto_destro_reminder",
            Self::AutoDestroyRunResults => "workspace:auto_destroy_run_results",
        }
    }

    /// Message title for this trigger.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::RunCreated => "Created",
            Self::RunPlanning => "Planning",
            Self::RunNeedsAttention => "Needs Attention",
            Self::RunApplying => "Applying",
            Self::RunCompleted => "Completed",
            Self::RunErrored => "Errored",
            Self::AssessmentDrifted => "Drifted",
            Self::AssessmentCheckFailure => "Checks Failed",
            Self::AssessmentFailed => "Health Assessment Failed",
            Self::AutoDestroyReminder => "Auto Destroy Reminder",
            Self::AutoDestroyRunResults => "Auto Destroy Results",
        }
    }
}

impl FromStr for Trigger {
    type Err = RenderError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trigger| trigger.code() == code)
            .ok_or_else(|| RenderError::UnrecognizedTrigger(code.to_string()))
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
