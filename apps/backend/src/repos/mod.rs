//! User storage used by the HTTP layer.

pub mod users;

pub use users::{InMemoryUserStore, User, UserStore};
