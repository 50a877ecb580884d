//! One render function per command result
//!
//! Views return strings; commands decide where they are printed.

pub mod buckets;
pub mod cleanup;
pub mod cors;
pub mod deploy;
pub mod multi_env;
pub mod regions;
pub mod urls;
