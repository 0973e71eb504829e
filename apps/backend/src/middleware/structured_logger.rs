//! One `request_completed` line per request.
//!
//! Besides method, path, status and timing, the line says whether the caller
//! presented a verified token and which game the request acted on. Game
//! handlers report the game by attaching [`LoggedGame`] to their response.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::auth::jwt::Claims;

/// Game id a handler acted on, carried in response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedGame(pub String);

impl LoggedGame {
    pub fn attach<B>(mut response: HttpResponse<B>, game_id: &str) -> HttpResponse<B> {
        response
            .extensions_mut()
            .insert(LoggedGame(game_id.to_string()));
        response
    }
}

/// 5xx at error, 4xx at warn, everything else at info.
pub fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[derive(Debug)]
struct CompletedRequest {
    method: String,
    path: String,
    trace_id: String,
    status: StatusCode,
    duration_us: u64,
    authenticated: bool,
    game_id: Option<String>,
}

macro_rules! emit {
    ($level:ident, $line:ident) => {
        $level!(
            http.method = %$line.method,
            url.path = %$line.path,
            http.status_code = $line.status.as_u16(),
            duration_us = $line.duration_us,
            trace_id = %$line.trace_id,
            authenticated = $line.authenticated,
            game_id = $line.game_id.as_deref(),
            message = "request_completed"
        )
    };
}

impl CompletedRequest {
    fn log(&self) {
        let level = level_for(self.status);
        if level == Level::ERROR {
            emit!(error, self);
        } else if level == Level::WARN {
            emit!(warn, self);
        } else {
            emit!(info, self);
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        // Path only: query strings carry researcher and game ids.
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, authenticated, game_id) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request().extensions().contains::<Claims>(),
                    res.response()
                        .extensions()
                        .get::<LoggedGame>()
                        .map(|game| game.0.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), false, None),
            };

            CompletedRequest {
                method,
                path,
                trace_id,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                authenticated,
                game_id,
            }
            .log();

            result
        })
    }
}
