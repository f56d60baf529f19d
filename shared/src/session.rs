//! Client-side session state
//!
//! Holds the signed-in user and their tokens. Mutations replace all three
//! fields at once and then notify subscribers with the new snapshot.
//! Mutations are serialized, so listeners observe changes in the order
//! they were applied and the last notification matches the final state.
//! State lives in memory only and does not survive a restart.

use crate::models::User;
use crate::types::AuthResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Handle returned by [`SessionStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

/// Shared session store with change notification
#[derive(Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    // held across write and notify
    mutation: Mutex<()>,
    next_id: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True once a user has signed in and until [`clear_auth`](Self::clear_auth)
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user
            .is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    /// Store the user and both tokens
    pub fn set_auth(&self, user: User, access_token: String, refresh_token: String) {
        self.replace(SessionState {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
        });
    }

    /// Store a signup/signin result
    pub fn apply(&self, result: AuthResult) {
        self.set_auth(result.user, result.access_token, result.refresh_token);
    }

    /// Reset everything to empty
    pub fn clear_auth(&self) {
        self.replace(SessionState::default());
    }

    /// Register a listener called after every mutation.
    ///
    /// Listeners may read the store but must not mutate it, subscribe or
    /// unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    fn replace(&self, next: SessionState) {
        let _mutation = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state = next.clone();
        }
        // state lock is released so listeners may read the store
        let listeners = self.listeners.read().unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in listeners.iter() {
            listener(&next);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
