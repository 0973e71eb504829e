use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::users::User;
use crate::state::app_state::AppState;

/// The authenticated player, resolved from the claims `JwtExtract` stored in
/// request extensions.
///
/// Unknown subjects are provisioned on first use when
/// `AppState::auto_provision_users` is set, otherwise rejected with 404.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub sub: String,
    pub email: Option<String>,
    pub current_game_id: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            sub: user.sub,
            email: user.email,
            current_game_id: user.current_game_id,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .clone();

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            resolve(app_state, &claims)
        })
    }
}

fn resolve(app_state: &AppState, claims: &Claims) -> Result<CurrentUser, AppError> {
    if let Some(user) = app_state.users.find_by_sub(&claims.sub) {
        return Ok(user.into());
    }

    if !app_state.auto_provision_users {
        security::unknown_user(&claims.sub);
        return Err(AppError::not_found(
            ErrorCode::UserNotFound,
            "No user is registered for this token",
        ));
    }

    let email = Some(claims.email.as_str()).filter(|e| !e.is_empty());
    Ok(app_state.users.ensure_user(&claims.sub, email).into())
}
