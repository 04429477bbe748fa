pub mod lead;
pub mod user;

use chrono::{DateTime, SubsecRound, Utc};

pub use lead::{Lead, NewLead};
pub use user::{NewUser, User, UserPatch};

/// Creation timestamp at millisecond precision, matching what browsers emit for ISO strings.
pub fn created_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
