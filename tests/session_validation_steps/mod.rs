//! Step definitions for session validation BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
