pub mod game_responses;

pub use game_responses::{
    GameResponse, GameStateResponse, GetGameAnalyticsResponse, GetGamePointsResponse,
    GetGamesResponse,
};
