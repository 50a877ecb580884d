//! Common test utilities for Bucketship integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated working directory and home for running the binary
//! - In-memory port implementations (`MemoryStore`, `ScriptedConfirmer`, ...)
//! - Site fixtures written with `tempfile`

#![allow(dead_code)]

pub mod env;
pub mod fixtures;
pub mod memory;

pub use env::*;
pub use fixtures::*;
pub use memory::*;
