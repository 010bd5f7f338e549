//! Profile service.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::info;

use library_cache::{CacheAsideReader, keys};
use library_core::error::AppError;
use library_core::result::AppResult;
use library_database::ProfileStore;
use library_entity::user::{Profile, ProfileUpdate};

/// Addresses accepted when a user changes their email.
static GMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@gmail\.com$").expect("Invalid gmail address regex")
});

/// Reads and updates the caller's profile.
#[derive(Debug, Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    reader: CacheAsideReader,
    ttl: Duration,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(profiles: Arc<dyn ProfileStore>, reader: CacheAsideReader, ttl: Duration) -> Self {
        Self {
            profiles,
            reader,
            ttl,
        }
    }

    /// The profile of `user_id`, cached per user.
    pub async fn get(&self, user_id: i64) -> AppResult<Profile> {
        self.reader
            .read(&keys::profile(user_id), self.ttl, || self.load(user_id))
            .await
    }

    async fn load(&self, user_id: i64) -> AppResult<Profile> {
        self.profiles
            .find_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Applies `update` to the stored profile and returns the result.
    ///
    /// Blank fields keep their value. A changed email must be a gmail
    /// address not held by another user. The cached profile is left alone.
    pub async fn update(&self, user_id: i64, update: ProfileUpdate) -> AppResult<Profile> {
        let current = self.load(user_id).await?;
        let (username, email) = update.resolve(&current);

        if !email.eq_ignore_ascii_case(&current.email) {
            if !GMAIL_ADDRESS.is_match(&email) {
                return Err(AppError::validation("Email must be a gmail.com address"));
            }
            if self.profiles.email_taken_by_other(&email, user_id).await? {
                return Err(AppError::conflict("Email is already in use"));
            }
        }

        self.profiles
            .update_profile(user_id, &username, &email)
            .await?;
        info!(user_id, "Profile updated");

        Ok(Profile {
            username,
            email,
            ..current
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_cache::memory::MemoryCacheProvider;
    use library_core::config::MemoryCacheConfig;
    use library_core::error::ErrorKind;
    use library_database::CredentialStore;
    use library_database::memory::MemoryStore;
    use library_entity::user::{NewUser, Role};

    async fn setup(ttl: Duration) -> (ProfileService, Arc<MemoryStore>, i64, i64) {
        let store = Arc::new(MemoryStore::new());
        let mut ids = Vec::new();
        for (name, email) in [("wati", "wati@gmail.com"), ("joko", "joko@gmail.com")] {
            let user = store
                .create(&NewUser {
                    username: name.to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    role: Role::Student,
                })
                .await
                .unwrap();
            ids.push(user.id);
        }
        let cache = Arc::new(MemoryCacheProvider::new(&MemoryCacheConfig {
            max_capacity: 100,
        }));
        let service = ProfileService::new(store.clone(), CacheAsideReader::new(cache), ttl);
        (service, store, ids[0], ids[1])
    }

    fn update(username: Option<&str>, email: Option<&str>) -> ProfileUpdate {
        ProfileUpdate {
            username: username.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_gmail_pattern() {
        assert!(GMAIL_ADDRESS.is_match("budi.s+lib@gmail.com"));
        assert!(!GMAIL_ADDRESS.is_match("budi@yahoo.com"));
        assert!(!GMAIL_ADDRESS.is_match("budi@gmail.com.id"));
    }

    #[tokio::test]
    async fn test_update_resolves_blank_fields() {
        let (service, _store, wati, _joko) = setup(Duration::from_secs(10)).await;
        let profile = service
            .update(wati, update(Some("Wati S."), Some("")))
            .await
            .unwrap();
        assert_eq!(profile.username, "Wati S.");
        assert_eq!(profile.email, "wati@gmail.com");
        assert_eq!(profile.role, Role::Student);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_or_taken_email() {
        let (service, _store, wati, _joko) = setup(Duration::from_secs(10)).await;
        let bad = service.update(wati, update(None, Some("wati@yahoo.com"))).await;
        assert_eq!(bad.unwrap_err().kind, ErrorKind::Validation);

        let taken = service.update(wati, update(None, Some("joko@gmail.com"))).await;
        assert_eq!(taken.unwrap_err().kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_cached_profile_is_stale_until_ttl() {
        let (service, _store, wati, _joko) = setup(Duration::from_millis(100)).await;
        assert_eq!(service.get(wati).await.unwrap().username, "wati");

        service.update(wati, update(Some("wati2"), None)).await.unwrap();
        assert_eq!(service.get(wati).await.unwrap().username, "wati");

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(service.get(wati).await.unwrap().username, "wati2");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (service, _store, _wati, _joko) = setup(Duration::from_secs(10)).await;
        assert_eq!(service.get(999).await.unwrap_err().kind, ErrorKind::NotFound);
    }
}
