//! JSON-file implementations of the store traits.

pub mod lead_store;
pub mod user_store;

pub use lead_store::FileLeadStore;
pub use user_store::FileUserStore;
