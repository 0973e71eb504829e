pub mod games;
pub mod validation;

pub use games::{GameService, NewGame, StartedGame};
