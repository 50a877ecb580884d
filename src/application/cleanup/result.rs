//! Cleanup result types

use serde::Serialize;

/// Where a cleanup stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupStatus {
    /// No bucket matched; no prompt was shown
    NothingToDelete,
    /// Matches were listed but nothing was deleted
    DryRun,
    /// The confirmation did not match; nothing was deleted
    Declined,
    /// Deletion was attempted for every match
    Finished,
}

/// Result of a cleanup operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupResult {
    pub status: CleanupStatus,
    /// Buckets selected for deletion
    pub matched: Vec<String>,
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl CleanupResult {
    pub fn new(status: CleanupStatus, matched: Vec<String>) -> Self {
        Self {
            status,
            matched,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Every matched bucket is gone (trivially true with no matches)
    pub fn is_success(&self) -> bool {
        match self.status {
            CleanupStatus::NothingToDelete | CleanupStatus::DryRun => true,
            CleanupStatus::Declined => false,
            CleanupStatus::Finished => {
                self.failed.is_empty() && self.deleted.len() == self.matched.len()
            }
        }
    }

    pub fn is_declined(&self) -> bool {
        self.status == CleanupStatus::Declined
    }
}
