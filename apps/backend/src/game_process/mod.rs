//! Boundary to the external game process.
//!
//! Every game operation is one subprocess run: build a [`Command`], run it
//! through a [`ProcessInvoker`], then either [`decode`] the JSON output or
//! [`project_games_csv`] it.

pub mod command;
pub mod csv_projector;
pub mod decoder;
pub mod invoker;

pub use command::{Command, GameProcessConfig};
pub use csv_projector::{project_games_csv, CSV_HEADER};
pub use decoder::decode;
pub use invoker::{ProcessInvoker, ProcessResult, SubprocessInvoker};
