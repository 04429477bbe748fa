//! Shared plumbing for the CogniCheck service crates: logging setup,
//! startup environment checks, the health payload and process metrics.

pub mod types;
pub mod utils;
pub mod env;
pub mod observability;
