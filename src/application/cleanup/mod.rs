//! Cleanup Use Case
//!
//! Bulk bucket deletion behind typed confirmations:
//! - one environment's buckets, matched by name prefix, after typing `DELETE-{env}`
//! - every visible bucket, after typing today's date and then `yes`

mod options;
mod result;
mod use_case;

pub use options::CleanupOptions;
pub use result::{CleanupResult, CleanupStatus};
pub use use_case::{date_prompt, phrase_prompt, CleanupUseCase, FINAL_PROMPT};
