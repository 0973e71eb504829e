//! Users and their current game.
//!
//! The game process owns all game state; the only thing kept per user on this
//! side is which game they are playing.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::info;

use crate::logging::pii::Redacted;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    /// External user identifier (JWT `sub`)
    pub sub: String,
    pub email: Option<String>,
    pub current_game_id: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub trait UserStore: Send + Sync + Debug {
    fn find_by_sub(&self, sub: &str) -> Option<User>;

    /// Return the user for `sub`, creating it if needed. Idempotent.
    fn ensure_user(&self, sub: &str, email: Option<&str>) -> User;

    /// Set or clear the user's current game. Returns `None` for an unknown user.
    fn set_current_game(&self, sub: &str, game_id: Option<&str>) -> Option<User>;

    fn clear_current_game(&self, sub: &str) -> Option<User> {
        self.set_current_game(sub, None)
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_sub(&self, sub: &str) -> Option<User> {
        self.users.get(sub).map(|entry| entry.value().clone())
    }

    fn ensure_user(&self, sub: &str, email: Option<&str>) -> User {
        self.users
            .entry(sub.to_string())
            .or_insert_with(|| {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let now = OffsetDateTime::now_utc();
                info!(
                    user_id = id,
                    email = %Redacted(email.unwrap_or_default()),
                    "provisioned user"
                );
                User {
                    id,
                    sub: sub.to_string(),
                    email: email.map(str::to_string),
                    current_game_id: None,
                    created_at: now,
                    updated_at: now,
                }
            })
            .value()
            .clone()
    }

    fn set_current_game(&self, sub: &str, game_id: Option<&str>) -> Option<User> {
        let mut entry = self.users.get_mut(sub)?;
        let user = entry.value_mut();
        user.current_game_id = game_id.map(str::to_string);
        user.updated_at = OffsetDateTime::now_utc();
        Some(user.clone())
    }
}
