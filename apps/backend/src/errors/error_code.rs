//! Error codes for the games backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,

    // Request Validation
    /// Input rejected before reaching the game process
    ValidationError,

    // Resource Not Found
    /// The token's subject has no user and auto-provisioning is off
    UserNotFound,

    // Conflicts
    /// The user has no game in progress
    NoActiveGame,

    // Game process
    /// The game process exited with a non-zero status
    GameServiceRejected,
    /// The game process answered with output that could not be decoded
    GameServiceMalformed,
    /// The game process could not be launched
    GameServiceUnavailable,
    /// Reading from or waiting on the game process failed
    GameServiceIo,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",

            Self::ValidationError => "VALIDATION_ERROR",

            Self::UserNotFound => "USER_NOT_FOUND",

            Self::NoActiveGame => "NO_ACTIVE_GAME",

            Self::GameServiceRejected => "GAME_SERVICE_REJECTED",
            Self::GameServiceMalformed => "GAME_SERVICE_MALFORMED",
            Self::GameServiceUnavailable => "GAME_SERVICE_UNAVAILABLE",
            Self::GameServiceIo => "GAME_SERVICE_IO",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
