//! Common test utilities for migration verification
//!
//! An in-process JSON:API server serving a canned resource set, plus
//! helpers for editing that set before a test starts the server.

mod fixtures;
mod mock_jsonapi;

pub use fixtures::*;
pub use mock_jsonapi::*;
