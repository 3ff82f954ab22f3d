//! Shared session state with change notifications and disk persistence.
//!
//! The store is the single holder of the current session. Interested
//! parties subscribe for change notifications and receive a token whose
//! drop (or explicit unsubscribe) removes exactly one receiver.
//!
//! Persisted sessions live in `<home>/session.json` with restricted
//! permissions (0600). Tokens are never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, Weak};

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::backend::Session;

/// Receiver half of a session subscription (None = signed out).
pub type SessionRx = UnboundedReceiver<Option<Session>>;

struct Subscriber {
    id: u64,
    tx: UnboundedSender<Option<Session>>,
}

#[derive(Default)]
struct Inner {
    session: Option<Session>,
    next_subscriber_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Single holder of the current session.
///
/// Clones share state. Subscribers observe every change, in order;
/// receivers that have gone away are pruned on the next publish.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.inner.lock().unwrap().session.clone()
    }

    /// Replaces the current session and notifies subscribers.
    ///
    /// Publishes on every call, including same-presence replacements
    /// (e.g. a fresh sign-in replacing a restored session).
    pub fn set(&self, session: Option<Session>) {
        tracing::debug!(signed_in = session.is_some(), "session updated");
        let mut inner = self.inner.lock().unwrap();
        inner.session.clone_from(&session);
        inner
            .subscribers
            .retain(|sub| sub.tx.send(session.clone()).is_ok());
    }

    /// Registers a subscriber for session changes.
    ///
    /// Returns the receiver plus a token that removes exactly this
    /// subscriber, either explicitly or when dropped.
    pub fn subscribe(&self) -> (SessionRx, SessionSubscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.push(Subscriber { id, tx });

        let token = SessionSubscription {
            store: Arc::downgrade(&self.inner),
            id,
        };
        (rx, token)
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap().subscribers.len()
    }
}

/// Unsubscription token handed out by [`SessionStore::subscribe`].
///
/// Removal happens at most once: either through [`unsubscribe`] or when
/// the token is dropped, so a forgotten token cannot leak its receiver.
///
/// [`unsubscribe`]: SessionSubscription::unsubscribe
pub struct SessionSubscription {
    store: Weak<Mutex<Inner>>,
    id: u64,
}

impl SessionSubscription {
    /// Unsubscribes explicitly. Consumes the token so it cannot fire twice.
    pub fn unsubscribe(self) {
        // Removal runs in Drop.
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            let mut inner = inner.lock().unwrap();
            inner.subscribers.retain(|sub| sub.id != self.id);
        }
    }
}

/// Loads a persisted session from disk.
/// Returns None if the file doesn't exist.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;

    let session = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))?;
    Ok(Some(session))
}

/// Saves a session to disk with restricted permissions (0600).
///
/// # Errors
/// Returns an error if the operation fails.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let contents = serde_json::to_string_pretty(session).context("Failed to serialize session")?;

    // Write with restricted permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

/// Removes a persisted session. Missing files are not an error.
///
/// # Errors
/// Returns an error if the operation fails.
pub fn clear_session(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use uuid::Uuid;

    use super::*;
    use crate::backend::User;

    fn session_fixture(email: &str) -> Session {
        Session {
            access_token: "access-token".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_at: Some(1_764_950_400),
            user: User {
                id: Uuid::new_v4(),
                email: Some(email.to_string()),
            },
        }
    }

    /// Subscribers observe every set, in order.
    #[test]
    fn test_set_notifies_subscribers_in_order() {
        let store = SessionStore::new();
        let (mut rx, _token) = store.subscribe();

        store.set(Some(session_fixture("ada@example.com")));
        store.set(None);

        let first = rx.try_recv().unwrap();
        assert_eq!(
            first.unwrap().user.email.as_deref(),
            Some("ada@example.com")
        );
        let second = rx.try_recv().unwrap();
        assert!(second.is_none());
    }

    /// Current always reflects the latest set.
    #[test]
    fn test_current_tracks_latest_set() {
        let store = SessionStore::new();
        assert!(store.current().is_none());

        store.set(Some(session_fixture("ada@example.com")));
        assert!(store.current().is_some());

        store.set(None);
        assert!(store.current().is_none());
    }

    /// Explicit unsubscribe removes exactly the caller's receiver.
    #[test]
    fn test_unsubscribe_removes_only_own_receiver() {
        let store = SessionStore::new();
        let (_rx_a, token_a) = store.subscribe();
        let (mut rx_b, _token_b) = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        token_a.unsubscribe();
        assert_eq!(store.subscriber_count(), 1);

        store.set(None);
        assert!(rx_b.try_recv().is_ok());
    }

    /// Dropping the token unsubscribes too.
    #[test]
    fn test_dropping_token_unsubscribes() {
        let store = SessionStore::new();
        {
            let (_rx, _token) = store.subscribe();
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    /// Receivers that went away are pruned on the next publish.
    #[test]
    fn test_closed_receiver_pruned_on_publish() {
        let store = SessionStore::new();
        let (rx, _token) = store.subscribe();
        drop(rx);

        store.set(None);
        assert_eq!(store.subscriber_count(), 0);
    }

    /// Persistence: save then load roundtrips the session.
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = session_fixture("ada@example.com");
        save_session(&path, &session).unwrap();

        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token, session.access_token);
        assert_eq!(loaded.user, session.user);
    }

    /// Persistence: missing file loads as no session.
    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert!(load_session(&path).unwrap().is_none());
    }

    /// Persistence: clear removes the file, and is a no-op when absent.
    #[test]
    fn test_clear_session_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        clear_session(&path).unwrap();

        save_session(&path, &session_fixture("ada@example.com")).unwrap();
        assert!(path.exists());

        clear_session(&path).unwrap();
        assert!(!path.exists());
    }
}
