//! Concurrent file writer with guaranteed teardown.
//!
//! A run has three phases:
//!
//! - **[`dirs::initialize`]**: create `<base>/out` (idempotent).
//! - **[`batch::run_batch`]**: write `file_0.txt` … `file_{n-1}.txt`
//!   concurrently. Each write may raise an injected failure after it
//!   completes; failures are collected per task, never propagated.
//! - **[`dirs::flush`]**: delete everything in the output directory, whatever
//!   the batch produced.
//!
//! [`run::run`] sequences the three. Only directory errors are fatal.

pub mod batch;
pub mod config;
pub mod dirs;
pub mod error;
pub mod fault;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
