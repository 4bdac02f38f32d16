//! Shared helpers for the backend's unit and HTTP tests.
//!
//! Nothing here depends on backend types, so both the library's own unit
//! tests and the integration tests can use it.

pub mod logging;
pub mod problem_details;
