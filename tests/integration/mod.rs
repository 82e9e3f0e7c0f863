//! Integration test suite for memorycat.
//!
//! These tests drive the public API end to end: key messages through
//! `update`, commands through the runtime's `dispatch`, and records through
//! the on-disk store.
//!
//! # Test Categories
//!
//! - `session_flow`: Interactive scenarios (add, copy, templates, delete)
//! - `headless`: Piped/non-interactive add path
//! - `runtime`: Commands executed against real collaborators
//!
//! # CI Compatibility
//!
//! No test talks to the description API; generation is either stubbed or
//! run without a key so it fails fast.

mod fixtures;

mod headless;
mod runtime;
mod session_flow;
