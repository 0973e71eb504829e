//! Response shapes produced by the game process and forwarded to clients.
//!
//! Known fields are typed; everything else the game process sends is kept in
//! the flattened `extra` map so nothing is dropped on the way through.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single game after start, move or quit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub game_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub player1_points: Option<Number>,
    #[serde(default)]
    pub player2_points: Option<Number>,
    #[serde(default, rename = "gameState")]
    pub game_state: Option<GameStateResponse>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome portion of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateResponse {
    /// Player label or index, depending on the game type.
    #[serde(default)]
    pub winner: Option<Value>,
    #[serde(default)]
    pub payoff1: Option<Number>,
    #[serde(default)]
    pub payoff2: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GetGamePointsResponse {
    #[serde(default)]
    pub player1_points: Option<Number>,
    #[serde(default)]
    pub player2_points: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregated analytics; the layout belongs to the game process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetGameAnalyticsResponse {
    pub data: Map<String, Value>,
}

/// Wrapper-then-collection envelope of game records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetGamesResponse {
    pub envelope: Map<String, Value>,
}
