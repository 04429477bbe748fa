pub mod lead_store;
pub mod user_store;

pub use lead_store::LeadStore;
pub use user_store::UserStore;
