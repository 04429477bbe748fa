//! Storage primitives for the service layer
//!
//! File-backed JSON documents and record id generation shared by the lead
//! and user stores.

pub mod json_list_store;

use uuid::Uuid;

/// Random opaque record id for which `taken` returns false.
pub fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !taken(&id) {
            return id;
        }
    }
}
