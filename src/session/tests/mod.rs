//! Unit tests for session-wide validation.

mod service_tests;
mod tool_chain_tests;
