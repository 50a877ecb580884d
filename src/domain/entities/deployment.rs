//! Deployment Results and Outcomes

use serde::Serialize;

/// Record of one deploy invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentResult {
    pub success: bool,
    pub bucket_name: String,
    pub region: String,
    pub files_uploaded: Vec<String>,
    pub website_url: Option<String>,
    pub direct_urls: Vec<String>,
    pub errors: Vec<String>,
    /// Non-fatal step failures (website, ACL, CORS)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub dry_run: bool,
}

impl DeploymentResult {
    /// Successful result with nothing uploaded yet
    pub fn empty(bucket_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            success: true,
            bucket_name: bucket_name.into(),
            region: region.into(),
            files_uploaded: Vec::new(),
            website_url: None,
            direct_urls: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            dry_run: false,
        }
    }

    pub fn dry_run(bucket_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            dry_run: true,
            ..Self::empty(bucket_name, region)
        }
    }

    pub fn failed(
        bucket_name: impl Into<String>,
        region: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            errors: vec![error.into()],
            ..Self::empty(bucket_name, region)
        }
    }

    pub fn file_count(&self) -> usize {
        self.files_uploaded.len()
    }
}

/// Why a deployment stopped without running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The user answered no at a confirmation prompt
    DeclinedByUser,
    /// The process received an interrupt
    Interrupted,
}

impl CancelReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancelReason::DeclinedByUser => "cancelled by user",
            CancelReason::Interrupted => "interrupted",
        }
    }
}

/// Terminal state of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Succeeded(DeploymentResult),
    /// Normal abort; nothing was deployed and this is not an error
    Cancelled(CancelReason),
    /// Carries a result when execution got far enough to produce one
    Failed {
        result: Option<DeploymentResult>,
        error: String,
    },
}

impl DeployOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        DeployOutcome::Failed {
            result: None,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeployOutcome::Succeeded(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DeployOutcome::Cancelled(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DeployOutcome::Failed { .. })
    }

    pub fn result(&self) -> Option<&DeploymentResult> {
        match self {
            DeployOutcome::Succeeded(result) => Some(result),
            DeployOutcome::Failed { result, .. } => result.as_ref(),
            DeployOutcome::Cancelled(_) => None,
        }
    }
}

/// States a deployment moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    Validating,
    ConfirmationPending,
    DryRunPreview,
    Executing,
    PostValidating,
    Succeeded,
    Cancelled,
    Failed,
}

impl DeployState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeployState::Succeeded | DeployState::Cancelled | DeployState::Failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_result_is_successful_and_empty() {
        let result = DeploymentResult::dry_run("b", "GRA");
        assert!(result.success);
        assert!(result.dry_run);
        assert_eq!(result.file_count(), 0);
    }

    #[test]
    fn failed_result_carries_error() {
        let result = DeploymentResult::failed("b", "GRA", "boom");
        assert!(!result.success);
        assert_eq!(result.errors, vec!["boom"]);
    }

    #[test]
    fn cancelled_outcome_has_no_result() {
        let outcome = DeployOutcome::Cancelled(CancelReason::DeclinedByUser);
        assert!(outcome.result().is_none());
        assert!(outcome.is_cancelled());
        assert!(!outcome.is_failure());
    }

    #[test]
    fn failed_outcome_may_carry_result() {
        let outcome = DeployOutcome::Failed {
            result: Some(DeploymentResult::failed("b", "GRA", "x")),
            error: "x".to_string(),
        };
        assert!(outcome.is_failure());
        assert!(outcome.result().is_some());
        assert!(DeployOutcome::failed("y").result().is_none());
    }

    #[test]
    fn only_final_states_are_terminal() {
        assert!(DeployState::Cancelled.is_terminal());
        assert!(!DeployState::Executing.is_terminal());
    }
}
