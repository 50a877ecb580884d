//! Confirmation Prompts
//!
//! `InteractiveConfirmer` reads answers from the terminal. Non-interactive
//! runs use the domain's `AutoConfirm` (`--yes`) or `AlwaysDecline`.

use std::sync::Arc;

use dialoguer::Input;

use crate::domain::ports::{AlwaysDecline, AutoConfirm, Confirmer};
use crate::error::{BucketshipError, BucketshipResult};

/// Reads free-text answers with dialoguer
pub struct InteractiveConfirmer;

impl Confirmer for InteractiveConfirmer {
    fn ask(&self, prompt: &str) -> BucketshipResult<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|err| BucketshipError::Prompt(err.to_string()))
    }
}

/// Pick the confirmer for this run.
///
/// Without a terminal nobody can answer, so prompts are declined.
pub fn select_confirmer(assume_yes: bool, interactive: bool) -> Arc<dyn Confirmer> {
    if assume_yes {
        Arc::new(AutoConfirm)
    } else if interactive {
        Arc::new(InteractiveConfirmer)
    } else {
        Arc::new(AlwaysDecline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::confirm;

    #[test]
    fn yes_flag_wins_over_terminal_detection() {
        let confirmer = select_confirmer(true, false);
        assert!(confirm(confirmer.as_ref(), "Proceed?"));
    }

    #[test]
    fn non_interactive_runs_decline() {
        let confirmer = select_confirmer(false, false);
        assert!(!confirm(confirmer.as_ref(), "Proceed?"));
    }
}
