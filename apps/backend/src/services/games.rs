//! Game operations, each backed by one run of the external game process.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::GameServiceError;
use crate::game_process::{
    decode, project_games_csv, Command, GameProcessConfig, ProcessInvoker, SubprocessInvoker,
};
use crate::protocol::{
    GameResponse, GetGameAnalyticsResponse, GetGamePointsResponse, GetGamesResponse,
};
use crate::services::validation;

/// Parameters for starting a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGame {
    pub game_type: String,
    pub player1_type: String,
    pub player2_type: String,
    pub researcher_id: String,
    pub num_rounds: Option<String>,
    pub endowment: Option<String>,
}

/// A started game: the id generated for it and the game process's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedGame {
    pub game_id: String,
    pub response: GameResponse,
}

/// Stateless facade over the game process.
///
/// Knows nothing about users: callers own the "current game" bookkeeping.
/// Concurrent calls spawn concurrent processes; the game process is assumed
/// to cope with parallel invocations on distinct game ids.
#[derive(Clone)]
pub struct GameService {
    config: GameProcessConfig,
    invoker: Arc<dyn ProcessInvoker>,
}

impl GameService {
    pub fn new(config: GameProcessConfig) -> Self {
        Self::with_invoker(config, Arc::new(SubprocessInvoker))
    }

    pub fn with_invoker(config: GameProcessConfig, invoker: Arc<dyn ProcessInvoker>) -> Self {
        Self { config, invoker }
    }

    pub fn config(&self) -> &GameProcessConfig {
        &self.config
    }

    pub fn start_game_command(
        &self,
        game_id: &str,
        new_game: &NewGame,
    ) -> Result<Command, GameServiceError> {
        let num_rounds = validation::opt_count("num_rounds", new_game.num_rounds.as_deref())?;
        let endowment = validation::opt_amount("endowment", new_game.endowment.as_deref())?;

        Ok(Command::new(&self.config)
            .arg("-game_id", validation::token("game_id", game_id)?)
            .arg(
                "-game_type",
                validation::token("game_type", &new_game.game_type)?,
            )
            .arg(
                "-player1_type",
                validation::token("player1_type", &new_game.player1_type)?,
            )
            .arg(
                "-player2_type",
                validation::token("player2_type", &new_game.player2_type)?,
            )
            .arg(
                "-researcher_id",
                validation::token("researcher_id", &new_game.researcher_id)?,
            )
            .opt_arg("-num_rounds", num_rounds)
            .opt_arg("-endowment", endowment))
    }

    pub fn make_move_command(&self, game_id: &str, mv: &str) -> Result<Command, GameServiceError> {
        Ok(Command::new(&self.config)
            .arg("-game_id", validation::token("game_id", game_id)?)
            .arg("-make_move", validation::move_token(mv)?)
            .arg("-player_move", "player1"))
    }

    pub fn quit_game_command(&self, game_id: &str) -> Result<Command, GameServiceError> {
        Ok(Command::new(&self.config)
            .arg("-game_id", validation::token("game_id", game_id)?)
            .flag("-delete_game"))
    }

    pub fn game_analytics_command(
        &self,
        game_type: Option<&str>,
    ) -> Result<Command, GameServiceError> {
        let game_type = validation::opt_token("game_data_type", game_type)?;
        Ok(Command::new(&self.config)
            .flag("-retrieve_game_data")
            .opt_arg("-game_data_type", game_type))
    }

    pub fn games_command(&self, researcher_id: &str) -> Result<Command, GameServiceError> {
        Ok(Command::new(&self.config)
            .flag("-retrieve_game_data")
            .arg(
                "-researcher_id",
                validation::token("researcher_id", researcher_id)?,
            ))
    }

    /// The game process expects the id wrapped in literal double quotes here.
    pub fn game_points_command(&self, game_id: &str) -> Result<Command, GameServiceError> {
        let game_id = validation::token("game_id", game_id)?;
        Ok(Command::new(&self.config)
            .flag("-retrieve_game_points")
            .arg("-game_id", format!("\"{game_id}\"")))
    }

    /// Start a new game under a freshly generated id.
    pub async fn start_game(&self, new_game: &NewGame) -> Result<StartedGame, GameServiceError> {
        let game_id = Uuid::new_v4().to_string();
        let command = self.start_game_command(&game_id, new_game)?;
        let response = self.call(command).await?;
        info!(game_id = %game_id, game_type = %new_game.game_type, "game started");
        Ok(StartedGame { game_id, response })
    }

    /// Play `mv` as player 1 in `game_id`.
    pub async fn make_move(&self, game_id: &str, mv: &str) -> Result<GameResponse, GameServiceError> {
        self.call(self.make_move_command(game_id, mv)?).await
    }

    pub async fn quit_game(&self, game_id: &str) -> Result<GameResponse, GameServiceError> {
        let response = self.call(self.quit_game_command(game_id)?).await?;
        info!(game_id = %game_id, "game quit");
        Ok(response)
    }

    pub async fn game_analytics(
        &self,
        game_type: Option<&str>,
    ) -> Result<GetGameAnalyticsResponse, GameServiceError> {
        self.call(self.game_analytics_command(game_type)?).await
    }

    pub async fn games(&self, researcher_id: &str) -> Result<GetGamesResponse, GameServiceError> {
        self.call(self.games_command(researcher_id)?).await
    }

    /// Same query as [`GameService::games`], flattened to CSV.
    pub async fn games_csv(&self, researcher_id: &str) -> Result<String, GameServiceError> {
        let document: Value = self.call(self.games_command(researcher_id)?).await?;
        let csv = project_games_csv(&document)?;
        info!(researcher_id = %researcher_id, bytes = csv.len(), "game data exported");
        Ok(csv)
    }

    pub async fn game_points(
        &self,
        game_id: &str,
    ) -> Result<GetGamePointsResponse, GameServiceError> {
        self.call(self.game_points_command(game_id)?).await
    }

    async fn call<T: DeserializeOwned>(&self, command: Command) -> Result<T, GameServiceError> {
        let result = self.invoker.invoke(&command).await?;
        decode(result)
    }
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
