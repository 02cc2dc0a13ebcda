//! Storage port for users and its in-memory adapter.
//!
//! Controllers and services only see [`UserRepository`]; swapping in a real
//! database means writing another adapter, not touching the handlers.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::{NewUser, User, UserChanges};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("user {0} not found")]
    NotFound(u64),
    #[error("email {0} is already in use")]
    DuplicateEmail(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Users in insertion order, optionally filtered by a case-insensitive
    /// substring of name or email.
    async fn list(&self, search: Option<&str>) -> Result<Vec<User>, RepositoryError>;

    async fn get(&self, id: u64) -> Result<Option<User>, RepositoryError>;

    /// Stores a user under a fresh id. Fails without writing when the email
    /// is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Applies `changes` to an existing user. Fails without writing when the
    /// user is missing or the new email belongs to someone else.
    async fn update(&self, id: u64, changes: UserChanges) -> Result<User, RepositoryError>;

    /// Removes and returns the user.
    async fn delete(&self, id: u64) -> Result<User, RepositoryError>;
}

#[derive(Debug)]
struct Store {
    users: Vec<User>,
    next_id: u64,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }
}

/// Process-local user store. Lost on restart.
///
/// Ids come from a counter that only grows, so an id is never handed out
/// twice even after deletions. Check-and-write sequences run under one
/// write lock.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            store: RwLock::new(Store { users, next_id }),
        }
    }

    /// Repository pre-filled with the two demo users.
    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                age: Some(25),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                age: Some(30),
            },
        ])
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, search: Option<&str>) -> Result<Vec<User>, RepositoryError> {
        let store = self.store.read().await;
        let users = match search.map(str::to_lowercase) {
            Some(needle) => store
                .users
                .iter()
                .filter(|u| {
                    u.name.to_lowercase().contains(&needle)
                        || u.email.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect(),
            None => store.users.clone(),
        };
        Ok(users)
    }

    async fn get(&self, id: u64) -> Result<Option<User>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;
        if store.email_taken(&user.email, None) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }

        let created = User {
            id: store.next_id,
            name: user.name,
            email: user.email,
            age: user.age,
        };
        store.next_id += 1;
        store.users.push(created.clone());

        Ok(created)
    }

    async fn update(&self, id: u64, changes: UserChanges) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;
        let index = store.position(id).ok_or(RepositoryError::NotFound(id))?;

        if let Some(email) = changes.email.as_deref() {
            if store.email_taken(email, Some(id)) {
                return Err(RepositoryError::DuplicateEmail(email.to_string()));
            }
        }

        let user = &mut store.users[index];
        changes.apply(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: u64) -> Result<User, RepositoryError> {
        let mut store = self.store.write().await;
        let index = store.position(id).ok_or(RepositoryError::NotFound(id))?;
        Ok(store.users.remove(index))
    }
}
