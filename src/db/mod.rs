//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Linked users, polled by the external bot (keyed by Discord ID)
    pub const USERS: &str = "oauth_users";
}
