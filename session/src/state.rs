//! Published authentication state.
//!
//! [`AuthState`] is the single writer, owned by the composition root and
//! handed to the pipeline and the initial-load routine. Everything else
//! observes it through an [`AuthStateReader`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Point-in-time view of the authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Whether the last evidence says the session is valid
    pub authenticated: bool,
    /// Whether the first identity check is still pending
    pub initializing: bool,
}

impl AuthSnapshot {
    /// State at process start.
    pub const INITIAL: Self = Self {
        authenticated: false,
        initializing: true,
    };
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Writer handle for the authentication state.
///
/// Mutations are idempotent: writing a value that is already published does
/// not notify observers.
#[derive(Debug, Clone)]
pub struct AuthState {
    tx: Arc<watch::Sender<AuthSnapshot>>,
}

impl AuthState {
    /// Create state in its initial `{ authenticated: false, initializing: true }` form.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(AuthSnapshot::INITIAL);
        Self { tx: Arc::new(tx) }
    }

    /// Record evidence of a valid session. Returns whether the state changed.
    pub fn mark_authenticated(&self) -> bool {
        let changed = self.tx.send_if_modified(|state| {
            let changed = !state.authenticated;
            state.authenticated = true;
            changed
        });
        if changed {
            debug!("Auth state: authenticated");
        }
        changed
    }

    /// Record that the session is gone. Returns whether the state changed.
    pub fn mark_logged_out(&self) -> bool {
        let changed = self.tx.send_if_modified(|state| {
            let changed = state.authenticated;
            state.authenticated = false;
            changed
        });
        if changed {
            debug!("Auth state: logged out");
        }
        changed
    }

    /// End the initial-load phase. Only the first call has an effect.
    pub fn mark_initial_load_complete(&self) -> bool {
        let changed = self.tx.send_if_modified(|state| {
            let changed = state.initializing;
            state.initializing = false;
            changed
        });
        if changed {
            debug!("Auth state: initial load complete");
        }
        changed
    }

    /// Latest published value.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        *self.tx.borrow()
    }

    /// Read-only handle for guards and UI observers.
    #[must_use]
    pub fn reader(&self) -> AuthStateReader {
        AuthStateReader {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the authentication state.
#[derive(Debug, Clone)]
pub struct AuthStateReader {
    rx: watch::Receiver<AuthSnapshot>,
}

impl AuthStateReader {
    /// Latest published value.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        *self.rx.borrow()
    }

    /// Shorthand for `snapshot().authenticated`.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().authenticated
    }

    /// Shorthand for `snapshot().initializing`.
    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.snapshot().initializing
    }

    /// Wait for the next published change.
    ///
    /// Returns `None` once the writer is gone.
    pub async fn changed(&mut self) -> Option<AuthSnapshot> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AuthState::new();
        assert_eq!(state.snapshot(), AuthSnapshot::INITIAL);
        assert!(!state.reader().is_authenticated());
        assert!(state.reader().is_initializing());
    }

    #[test]
    fn test_mutations_are_idempotent() {
        let state = AuthState::new();
        assert!(state.mark_authenticated());
        assert!(!state.mark_authenticated());
        assert!(state.snapshot().authenticated);

        assert!(state.mark_logged_out());
        assert!(!state.mark_logged_out());
        assert!(!state.snapshot().authenticated);
    }

    #[test]
    fn test_initial_load_completes_once() {
        let state = AuthState::new();
        assert!(state.mark_initial_load_complete());
        assert!(!state.mark_initial_load_complete());
        assert!(!state.snapshot().initializing);

        state.mark_authenticated();
        state.mark_logged_out();
        assert!(!state.snapshot().initializing);
    }

    #[test]
    fn test_clones_share_state() {
        let state = AuthState::new();
        let handle = state.clone();
        handle.mark_authenticated();
        assert!(state.snapshot().authenticated);
    }

    #[tokio::test]
    async fn test_reader_observes_changes() {
        let state = AuthState::new();
        let mut reader = state.reader();

        state.mark_authenticated();
        let seen = reader.changed().await.unwrap();
        assert!(seen.authenticated);
        assert!(seen.initializing);
    }

    #[tokio::test]
    async fn test_reader_ends_when_writer_dropped() {
        let state = AuthState::new();
        let mut reader = state.reader();
        drop(state);
        assert_eq!(reader.changed().await, None);
    }
}
