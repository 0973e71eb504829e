//! Error handling for the games backend.

pub mod error_code;
pub mod game_service;

pub use error_code::ErrorCode;
pub use game_service::GameServiceError;
