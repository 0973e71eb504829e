//! Test support for the games backend.
//!
//! Shared between unit and integration tests: logging bootstrap, problem
//! details assertions, unique identifiers and a scriptable stand-in for the
//! external game process.

pub mod fake_game_service;
pub mod logging;
pub mod problem_details;
pub mod unique;

pub use fake_game_service::FakeGameService;
