//! Game HTTP routes.
//!
//! `start`, `move` and `quit` act on behalf of the authenticated player and
//! keep the player's current game id up to date. The `get*` routes are the
//! unauthenticated research queries.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::middleware::jwt_extract::JwtExtract;
use crate::middleware::structured_logger::LoggedGame;
use crate::services::games::NewGame;
use crate::state::app_state::AppState;

/// Missing parameters deserialize to empty strings so they are reported
/// by argument validation as problem details.
#[derive(Debug, Deserialize)]
pub struct StartGameQuery {
    #[serde(rename = "gameType", default)]
    pub game_type: String,
    #[serde(default)]
    pub player1_type: String,
    #[serde(default)]
    pub player2_type: String,
    #[serde(rename = "researcherId", default)]
    pub researcher_id: String,
    pub num_rounds: Option<String>,
    pub endowment: Option<String>,
}

impl From<StartGameQuery> for NewGame {
    fn from(q: StartGameQuery) -> Self {
        NewGame {
            game_type: q.game_type,
            player1_type: q.player1_type,
            player2_type: q.player2_type,
            researcher_id: q.researcher_id,
            num_rounds: q.num_rounds,
            endowment: q.endowment,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveQuery {
    #[serde(rename = "move", default)]
    pub mv: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "gameType")]
    pub game_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResearcherQuery {
    #[serde(rename = "researcherId", default)]
    pub researcher_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GamePointsQuery {
    #[serde(rename = "gameId", default)]
    pub game_id: String,
}

/// POST /games/start
async fn start_game(
    user: CurrentUser,
    query: web::Query<StartGameQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let new_game = NewGame::from(query.into_inner());
    let started = app_state.games.start_game(&new_game).await?;

    app_state
        .users
        .set_current_game(&user.sub, Some(&started.game_id));
    info!(user_id = user.id, game_id = %started.game_id, "current game set");

    Ok(LoggedGame::attach(
        HttpResponse::Ok().json(started.response),
        &started.game_id,
    ))
}

/// POST /games/move
async fn make_move(
    user: CurrentUser,
    query: web::Query<MoveQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = require_current_game(&user)?;
    let response = app_state.games.make_move(game_id, &query.mv).await?;
    Ok(LoggedGame::attach(HttpResponse::Ok().json(response), game_id))
}

/// POST /games/quit
async fn quit_game(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let game_id = require_current_game(&user)?;
    let response = app_state.games.quit_game(game_id).await?;

    app_state.users.clear_current_game(&user.sub);

    Ok(LoggedGame::attach(HttpResponse::Ok().json(response), game_id))
}

/// GET /games/getGameAnalytics
async fn get_game_analytics(
    query: web::Query<AnalyticsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let analytics = app_state
        .games
        .game_analytics(query.game_type.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(analytics))
}

/// GET /games/getGames
async fn get_games(
    query: web::Query<ResearcherQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let games = app_state.games.games(&query.researcher_id).await?;
    Ok(HttpResponse::Ok().json(games))
}

/// GET /games/getGamesCsv
async fn get_games_csv(
    query: web::Query<ResearcherQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let csv = app_state.games.games_csv(&query.researcher_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename("games.csv".to_string())],
        })
        .body(csv))
}

/// GET /games/getGamePoints
async fn get_game_points(
    query: web::Query<GamePointsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let points = app_state.games.game_points(&query.game_id).await?;
    Ok(HttpResponse::Ok().json(points))
}

fn require_current_game(user: &CurrentUser) -> Result<&str, AppError> {
    user.current_game_id.as_deref().ok_or_else(|| {
        AppError::conflict(
            ErrorCode::NoActiveGame,
            "No game in progress; start a game first",
        )
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/start")
            .wrap(JwtExtract)
            .route(web::post().to(start_game)),
    );
    cfg.service(
        web::resource("/move")
            .wrap(JwtExtract)
            .route(web::post().to(make_move)),
    );
    cfg.service(
        web::resource("/quit")
            .wrap(JwtExtract)
            .route(web::post().to(quit_game)),
    );
    cfg.service(web::resource("/getGameAnalytics").route(web::get().to(get_game_analytics)));
    cfg.service(web::resource("/getGames").route(web::get().to(get_games)));
    cfg.service(web::resource("/getGamesCsv").route(web::get().to(get_games_csv)));
    cfg.service(web::resource("/getGamePoints").route(web::get().to(get_game_points)));
}
