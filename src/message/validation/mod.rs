//! Message validation implementation.
//!
//! This module provides the default implementation of message validation:
//! the structural schema walker, the individual semantic rules, and the
//! composite validator service.

pub mod rules;
pub mod schema;
pub mod service;

pub use schema::parse_canonical_message;
pub use service::{DefaultMessageValidator, validate_canonical_message};
