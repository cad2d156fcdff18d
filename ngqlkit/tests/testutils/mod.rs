//! Test utilities for ngqlkit integration tests
//!
//! - models: sample tag and edge models shared by the suites
//! - init_logger: env_logger set up for test output

#![allow(dead_code)]

pub mod models;

/// Install env_logger once; later calls are no-ops
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
