use std::{fmt, sync::Arc};

use tokio::sync::RwLock;

use scribe_common::{AuthSnapshot, Role, User};

use super::persist::{FileStorage, MemoryStorage, SnapshotStorage};
use crate::errors::Result;

/// Client-side view of the current session.
///
/// `initialized` is never persisted: it flips to `true` once [`AuthStore::rehydrate`]
/// has run, so guards can tell "not signed in" from "not loaded yet".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Cached copy of the signed-in user, for display only.
    pub user: Option<User>,
    /// Access token sent as `Authorization: Bearer <token>`.
    pub token: Option<String>,
    /// Long-lived token exchanged for a new access token on `401`.
    pub refresh_token: Option<String>,
    #[allow(missing_docs)]
    pub is_authenticated: bool,
    /// True once the persisted snapshot has been loaded.
    pub initialized: bool,
}

impl AuthState {
    /// Role of the cached user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Signed in as an admin.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.role() == Some(Role::Admin)
    }

    fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            user: self.user.clone(),
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    fn restore(&mut self, snapshot: AuthSnapshot) {
        self.user = snapshot.user;
        self.token = snapshot.token;
        self.refresh_token = snapshot.refresh_token;
        self.is_authenticated = snapshot.is_authenticated;
    }
}

// Tokens are bearer secrets; keep them out of logs.
impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("is_authenticated", &self.is_authenticated)
            .field("initialized", &self.initialized)
            .finish()
    }
}

/// Injectable container for the auth session.
///
/// Cheap to clone; clones share the same state. The HTTP client reads the
/// access token from here at call time and writes refreshed tokens back, and
/// every transition is persisted through the configured [`SnapshotStorage`].
///
/// ```
/// # async fn run() -> scribe::Result<()> {
/// use scribe::AuthStore;
///
/// let store = AuthStore::in_memory();
/// assert!(store.state().await.initialized);
/// assert!(!store.is_authenticated().await);
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct AuthStore {
    state: Arc<RwLock<AuthState>>,
    storage: Arc<dyn SnapshotStorage>,
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    /// Create an uninitialized store backed by `storage`.
    ///
    /// Call [`Self::rehydrate`] before consulting guards.
    pub fn new<S: SnapshotStorage + 'static>(storage: S) -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            storage: Arc::new(storage),
        }
    }

    /// Memory-only store. There is nothing to load, so it starts initialized.
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState {
                initialized: true,
                ..AuthState::default()
            })),
            storage: Arc::new(MemoryStorage::default()),
        }
    }

    /// Uninitialized store persisting to the JSON file at `path`.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self::new(FileStorage::new(path))
    }

    /// Uninitialized store persisting under the platform data directory.
    pub fn default_file() -> Result<Self> {
        Ok(Self::new(FileStorage::default_location()?))
    }

    /// Load the persisted snapshot and mark the store initialized.
    ///
    /// A missing or unreadable snapshot leaves the store signed out; the store
    /// is initialized either way.
    pub async fn rehydrate(&self) -> AuthState {
        let loaded = match self.storage.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Ignoring unreadable auth snapshot: {e}");
                None
            }
        };

        let mut state = self.state.write().await;
        if let Some(snapshot) = loaded {
            state.restore(snapshot);
            tracing::debug!(
                authenticated = state.is_authenticated,
                "Rehydrated auth snapshot"
            );
        }
        state.initialized = true;
        state.clone()
    }

    // === Getters ===

    /// Copy of the whole state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Current access token.
    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    /// Current refresh token.
    pub async fn refresh_token(&self) -> Option<String> {
        self.state.read().await.refresh_token.clone()
    }

    /// Cached user.
    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    #[allow(missing_docs)]
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    #[allow(missing_docs)]
    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.initialized
    }

    // === Transitions ===

    /// Record a successful login/registration.
    pub async fn sign_in(
        &self,
        user: User,
        token: String,
        refresh_token: Option<String>,
    ) -> Result<()> {
        self.update(|state| {
            state.user = Some(user);
            state.token = Some(token);
            state.refresh_token = refresh_token;
            state.is_authenticated = true;
        })
        .await
    }

    /// Replace the access token (after a refresh).
    pub async fn set_token(&self, token: String) -> Result<()> {
        self.update(|state| state.token = Some(token)).await
    }

    /// Replace the refresh token (when the server rotates it).
    pub async fn set_refresh_token(&self, refresh_token: String) -> Result<()> {
        self.update(|state| state.refresh_token = Some(refresh_token))
            .await
    }

    /// Replace the cached user, e.g. after a profile update.
    pub async fn set_user(&self, user: User) -> Result<()> {
        self.update(|state| state.user = Some(user)).await
    }

    /// Refresh the cached user from `/auth/me`; the session is live.
    pub(crate) async fn confirm_user(&self, user: User) -> Result<()> {
        self.update(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
        })
        .await
    }

    /// Forget user and tokens. `initialized` is kept.
    pub async fn clear(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.user = None;
        state.token = None;
        state.refresh_token = None;
        state.is_authenticated = false;
        // Storage writes happen under the lock so they land in the same order as
        // the memory updates.
        self.storage.clear()?;
        tracing::debug!("Cleared auth state");
        Ok(())
    }

    /// Apply `f` and persist the new snapshot, both under the write lock.
    async fn update<F: FnOnce(&mut AuthState)>(&self, f: F) -> Result<()> {
        let mut state = self.state.write().await;
        f(&mut state);
        self.storage.save(&state.snapshot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Ann".into(),
            email: "ann@example.com".into(),
            role,
            avatar: None,
            bio: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn starts_uninitialized_until_rehydrated() {
        let store = AuthStore::new(MemoryStorage::default());
        assert!(!store.is_initialized().await);

        let state = store.rehydrate().await;
        assert!(state.initialized);
        assert!(!state.is_authenticated);
    }

    #[tokio::test]
    async fn rehydrate_restores_persisted_snapshot() {
        let storage = MemoryStorage::with_snapshot(AuthSnapshot {
            user: Some(user(Role::Admin)),
            token: Some("t".into()),
            refresh_token: Some("r".into()),
            is_authenticated: true,
        });
        let store = AuthStore::new(storage);

        let state = store.rehydrate().await;
        assert!(state.is_admin());
        assert_eq!(store.token().await.as_deref(), Some("t"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("r"));
    }

    #[tokio::test]
    async fn sign_in_persists_and_clear_forgets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        let store = AuthStore::from_file(&path);
        store.rehydrate().await;

        store
            .sign_in(user(Role::User), "t".into(), Some("r".into()))
            .await
            .unwrap();

        // A second store over the same file sees the session.
        let reloaded = AuthStore::from_file(&path);
        let state = reloaded.rehydrate().await;
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("t"));
        assert!(!state.is_admin());

        store.clear().await.unwrap();
        let state = store.state().await;
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(state.refresh_token.is_none());
        assert!(!state.is_authenticated);
        assert!(state.initialized);
        assert!(!path.exists());
    }

    /// Memory storage whose `save` blocks for a while.
    #[derive(Debug)]
    struct SlowStorage {
        inner: Arc<MemoryStorage>,
        saving: Arc<std::sync::atomic::AtomicBool>,
    }

    impl SnapshotStorage for SlowStorage {
        fn load(&self) -> std::result::Result<Option<AuthSnapshot>, StorageError> {
            self.inner.load()
        }

        fn save(&self, snapshot: &AuthSnapshot) -> std::result::Result<(), StorageError> {
            self.saving.store(true, std::sync::atomic::Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(200));
            self.inner.save(snapshot)
        }

        fn clear(&self) -> std::result::Result<(), StorageError> {
            self.inner.clear()
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn clear_wins_over_an_inflight_token_update() {
        let persisted = Arc::new(MemoryStorage::with_snapshot(AuthSnapshot {
            user: Some(user(Role::User)),
            token: Some("t".into()),
            refresh_token: Some("r".into()),
            is_authenticated: true,
        }));
        let saving = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let store = AuthStore::new(SlowStorage {
            inner: persisted.clone(),
            saving: saving.clone(),
        });
        store.rehydrate().await;

        let refreshing = {
            let store = store.clone();
            tokio::spawn(async move { store.set_token("refreshed".into()).await })
        };
        while !saving.load(std::sync::atomic::Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        store.clear().await.unwrap();
        refreshing.await.unwrap().unwrap();

        assert!(store.token().await.is_none());
        assert!(persisted.load().unwrap().is_none());

        // A restart over the same storage stays signed out.
        let restarted = AuthStore::new(SlowStorage {
            inner: persisted,
            saving,
        });
        assert!(!restarted.rehydrate().await.is_authenticated);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = AuthStore::in_memory();
        let other = store.clone();
        store.set_token("fresh".into()).await.unwrap();
        assert_eq!(other.token().await.as_deref(), Some("fresh"));
    }

    #[test]
    fn debug_redacts_tokens() {
        let state = AuthState {
            token: Some("secret-access".into()),
            refresh_token: Some("secret-refresh".into()),
            ..AuthState::default()
        };
        let printed = format!("{state:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
