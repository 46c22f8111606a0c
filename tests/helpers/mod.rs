//! Test helpers and fixtures for kdmapi integration tests
//!
//! Every test drives a [`MockDriver`] so no native library is needed.

#![allow(dead_code)]

use kdmapi::Kdmapi;
use kdmapi_core::mock::{Call, MockDriver};

/// Install a fmt subscriber once so `debug!`/`warn!` output shows with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Facade over a default mock (version 1.30.0 Rev. 51, every call succeeds).
pub fn mock_kdmapi() -> Kdmapi<MockDriver> {
    init_tracing();
    Kdmapi::with_driver(MockDriver::new())
}

/// Facade over a caller-configured mock.
pub fn kdmapi_with(driver: MockDriver) -> Kdmapi<MockDriver> {
    init_tracing();
    Kdmapi::with_driver(driver)
}

pub fn prepares(kdmapi: &Kdmapi<MockDriver>) -> usize {
    kdmapi
        .driver()
        .count(|c| matches!(c, Call::PrepareLongData { .. }))
}

pub fn unprepares(kdmapi: &Kdmapi<MockDriver>) -> usize {
    kdmapi
        .driver()
        .count(|c| matches!(c, Call::UnprepareLongData { .. }))
}
