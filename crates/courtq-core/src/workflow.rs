//! Approval-workflow inspection for the ladder promotion trigger.
//!
//! A submittal escalates automatically when the ball bounces back to the
//! person who created it: the original submitter shows up as a pending
//! approver in the workflow step that is currently waiting. The service layer
//! reads the workflow from the upstream tracker, builds a
//! [`WorkflowSnapshot`], and feeds [`WorkflowSnapshot::ball_back_with_submitter`]
//! into the promotion engine's trigger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response state of a single approver entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    /// Entry was skipped or reassigned upstream; never blocks a step.
    Skipped,
}

/// One row of the workflow's approver list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowApprover {
    pub user_id: String,
    /// 1-based workflow step; lower steps respond first.
    pub step: u32,
    pub status: ApprovalStatus,
    pub responded_at: Option<DateTime<Utc>>,
}

/// The approval state of one submittal's workflow at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    /// The user who originally created the submittal.
    pub submitter_id: String,
    pub approvers: Vec<WorkflowApprover>,
}

impl WorkflowSnapshot {
    /// The lowest-numbered step that still has a pending approver, i.e. the
    /// step the workflow is currently waiting on.
    #[must_use]
    pub fn active_step(&self) -> Option<u32> {
        self.approvers
            .iter()
            .filter(|approver| approver.status == ApprovalStatus::Pending)
            .map(|approver| approver.step)
            .min()
    }

    /// `true` when the submitter is a pending approver in the active step.
    ///
    /// This is the ladder promotion trigger: the review has looped back to
    /// the original submitter and their queue should surface the item.
    #[must_use]
    pub fn ball_back_with_submitter(&self) -> bool {
        self.active_step().is_some_and(|step| {
            self.approvers.iter().any(|approver| {
                approver.step == step
                    && approver.status == ApprovalStatus::Pending
                    && approver.user_id == self.submitter_id
            })
        })
    }
}
