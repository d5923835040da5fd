//! Repositories for the in-memory store
//!
//! Each repository owns its table behind an async mutex; every critical
//! section is a single lock acquisition, so the invariants the store
//! enforces cannot be observed half-applied by concurrent requests.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::{Duration, Utc};
use common::error::{StoreError, StoreResult};
use common::store::Table;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Session, User};

pub mod catalog;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    users: Arc<Mutex<Table<User>>>,
}

impl UserRepository {
    /// Create an empty user repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Table::new())),
        }
    }

    /// Create a new user, hashing the password with argon2
    ///
    /// Username and email are unique; the check and the insert share one
    /// lock acquisition.
    pub async fn create(&self, new_user: &NewUser) -> StoreResult<User> {
        info!("Creating new user: {}", new_user.username);

        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(new_user.password.as_bytes(), &salt)
            .map_err(|e| StoreError::Internal(format!("Failed to hash password: {e}")))?
            .to_string();

        let mut users = self.users.lock().await;

        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Conflict("Username already taken".to_string()));
        }
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let user = users
            .insert(|id| User {
                id,
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                password_hash,
                first_name: new_user.first_name.clone(),
                last_name: new_user.last_name.clone(),
                created_at: Utc::now(),
            })
            .clone();

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(id).cloned())
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    /// Verify a user's password
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {e}"))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Session repository, keyed by the opaque bearer token
#[derive(Clone)]
pub struct SessionRepository {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionRepository {
    /// Create a session repository with the given token lifetime
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Issue a fresh session token for a user
    pub async fn create_session(&self, user_id: i32) -> Result<Session> {
        info!("Creating session for user: {}", user_id);

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.token, session.clone());

        Ok(session)
    }

    /// Resolve a token to its session, dropping it if expired
    pub async fn find_valid(&self, token: Uuid) -> Result<Option<Session>> {
        let mut sessions = self.sessions.lock().await;

        match sessions.get(&token) {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.clone())),
            Some(_) => {
                sessions.remove(&token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Delete a session by token (logout)
    pub async fn delete_session(&self, token: Uuid) -> Result<bool> {
        info!("Deleting session: {}", token);

        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(&token).is_some())
    }
}
