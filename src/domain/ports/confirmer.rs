//! Confirmer Port
//!
//! Gates destructive or outward-facing steps behind a user answer.
//! Implementations can prompt on a terminal or answer from a fixed policy.

use crate::error::BucketshipResult;

/// Source of answers to confirmation prompts.
///
/// Implementations can be:
/// - `InteractiveConfirmer`: reads a line from the terminal
/// - `AutoConfirm`: answers every yes/no prompt with "yes"
/// - `AlwaysDecline`: answers every prompt with an empty line
pub trait Confirmer: Send + Sync {
    /// Show `prompt` and return the raw answer.
    fn ask(&self, prompt: &str) -> BucketshipResult<String>;
}

/// True for `y`/`yes` in any case, ignoring surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask a yes/no question; unreadable input counts as "no".
pub fn confirm(confirmer: &dyn Confirmer, prompt: &str) -> bool {
    match confirmer.ask(prompt) {
        Ok(answer) => is_affirmative(&answer),
        Err(err) => {
            tracing::warn!(error = %err, "confirmation prompt failed; treating as declined");
            false
        }
    }
}

/// Ask for an exact phrase; anything else, including unreadable input, is a refusal.
pub fn confirm_phrase(confirmer: &dyn Confirmer, prompt: &str, phrase: &str) -> bool {
    match confirmer.ask(prompt) {
        Ok(answer) => answer.trim() == phrase,
        Err(err) => {
            tracing::warn!(error = %err, "confirmation prompt failed; treating as declined");
            false
        }
    }
}

/// Confirmer that agrees to every yes/no prompt.
///
/// Use this when `--no-confirm` or `--yes` is passed. Phrase prompts still
/// fail, so callers must skip those explicitly.
pub struct AutoConfirm;

impl Confirmer for AutoConfirm {
    fn ask(&self, _prompt: &str) -> BucketshipResult<String> {
        Ok("yes".to_string())
    }
}

/// Confirmer that declines everything.
///
/// Use this when no terminal is attached.
pub struct AlwaysDecline;

impl Confirmer for AlwaysDecline {
    fn ask(&self, _prompt: &str) -> BucketshipResult<String> {
        Ok(String::new())
    }
}
