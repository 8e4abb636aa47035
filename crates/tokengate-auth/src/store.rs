//! User store contract.
//!
//! The token service only ever reads user records. Whatever owns them (a
//! database, a directory service, a test fixture) implements [`UserStore`].
//! [`InMemoryUserStore`] is the implementation used by tests, the demo
//! server and the CLI dry runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use thiserror::Error;

pub type UserId = i64;

/// A user record as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// The identity record returned to an authenticated caller. Carries no
/// credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to user records. Implementations must tolerate
/// concurrent calls.
pub trait UserStore: Send + Sync {
    /// Finds a user by the login identifier (the email address).
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn find_by_id(&self, id: UserId)
    -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
}

/// Process-local user store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// Inserts or replaces the record with the same id.
    pub fn insert(&self, user: User) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id, user);
    }

    /// Returns `false` when no user has this id.
    pub fn set_active(&self, id: UserId, active: bool) -> bool {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        match users.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: UserId) -> Option<User> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.remove(&id)
    }

    fn read<T>(&self, f: impl FnOnce(&HashMap<UserId, User>) -> T) -> Result<T, StoreError> {
        self.users
            .read()
            .map(|users| f(&users))
            .map_err(|_| StoreError::Unavailable("in-memory user store lock poisoned".into()))
    }
}

impl UserStore for InMemoryUserStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        self.read(|users| users.values().find(|u| u.email == identifier).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.read(|users| users.get(&id).cloned())
    }
}

impl<S: UserStore> UserStore for Arc<S> {
    fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send {
        self.as_ref().find_by_identifier(identifier)
    }

    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send {
        self.as_ref().find_by_id(id)
    }
}
