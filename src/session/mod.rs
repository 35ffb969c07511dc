//! Session-record persistence
//!
//! The session record itself is created by the scheduling side before the
//! pipeline ever runs; this module only writes the terminal outcome onto it,
//! success or failure, exactly once per invocation.

mod record;
mod store;

pub use record::SessionUpdate;
pub use store::{FirestoreSessions, SessionStore};
