//! Pool user model for storage.

use serde::{Deserialize, Serialize};

use crate::services::provider::UserProfile;

/// A linked Discord user, stored in the `oauth_users` collection.
///
/// The external bot polls this collection for documents with
/// `processed == false`; this service only ever writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolUser {
    /// Discord user ID, stored verbatim (also used as document ID)
    pub id: String,
    /// Username at link time
    pub username: String,
    /// Legacy discriminator; absent or "0" on migrated accounts
    pub discriminator: Option<String>,
    /// Avatar hash (may be None)
    pub avatar: Option<String>,
    /// When this link happened (seconds since epoch); overwritten on re-link
    pub connected_at: i64,
    /// Set to false on every upsert; flipped by the downstream consumer
    pub processed: bool,
    /// Resources already pulled by the consumer; reset on every upsert
    pub pulled_resources: Vec<String>,
}

impl PoolUser {
    /// Build a fresh pool record from a fetched profile.
    ///
    /// Re-linking an existing user produces the same shape: `processed`
    /// back to false and `pulled_resources` emptied, so the downstream
    /// consumer treats a re-auth as a re-queue.
    pub fn from_profile(profile: &UserProfile, connected_at: i64) -> Self {
        Self {
            id: profile.id.clone(),
            username: profile.username.clone(),
            discriminator: profile.discriminator.clone(),
            avatar: profile.avatar.clone(),
            connected_at,
            processed: false,
            pulled_resources: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_profile_resets_queue_fields() {
        let profile = UserProfile {
            id: "123".to_string(),
            username: "alice".to_string(),
            discriminator: Some("4242".to_string()),
            avatar: None,
        };

        let user = PoolUser::from_profile(&profile, 1_700_000_000);

        assert_eq!(user.id, "123");
        assert_eq!(user.connected_at, 1_700_000_000);
        assert!(!user.processed);
        assert!(user.pulled_resources.is_empty());
    }
}
