//! Port trait definitions for the message subsystem.
//!
//! Ports define the abstract interfaces that the session orchestrator
//! requires from a per-message validator, along with the configuration
//! every rule reads its thresholds from.

pub mod validator;

pub use validator::{MessageValidator, ValidationConfig};
