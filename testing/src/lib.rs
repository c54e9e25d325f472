//! Shared test fixtures for the Inkpad workspace.
//!
//! Canned JSON payloads matching the backend's wire format, plus small
//! helpers for generating unique test data. Integration tests pair these
//! with wiremock response templates.

mod fixtures;

pub use fixtures::*;
