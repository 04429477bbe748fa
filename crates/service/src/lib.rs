//! Record stores behind the CogniCheck HTTP API.
//! - `domain`: lead and user record shapes plus the partial-merge rule.
//! - `stores`: async traits the HTTP layer programs against.
//! - `file`: implementations persisting each collection to one JSON document.
//! - `storage`: the generic read-modify-write JSON document primitive.

pub mod errors;
pub mod domain;
pub mod stores;
pub mod storage;
pub mod file;
#[cfg(test)]
pub mod test_support;
