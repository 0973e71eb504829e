//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::AppError;
use crate::game_process::GameProcessConfig;

const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub jwt_secret: String,

    // Game process
    pub game_process: GameProcessConfig,

    // Users
    pub auto_provision_users: bool,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::config(format!(
                "BACKEND_JWT_SECRET is too short. It should be at least {MIN_JWT_SECRET_LEN} characters."
            )));
        }

        let script_path = PathBuf::from(must_var("GAME_SERVICE_PATH")?);
        let interpreter =
            env::var("GAME_SERVICE_INTERPRETER").unwrap_or_else(|_| "python".to_string());
        if interpreter.trim().is_empty() {
            return Err(AppError::config("GAME_SERVICE_INTERPRETER must not be empty"));
        }

        let auto_provision_users = match env::var("AUTO_PROVISION_USERS") {
            Ok(raw) => parse_bool("AUTO_PROVISION_USERS", &raw)?,
            Err(_) => true,
        };

        Ok(Config {
            host,
            port,
            jwt_secret,
            game_process: GameProcessConfig::new(interpreter, script_path),
            auto_provision_users,
        })
    }
}

/// Get required, non-empty environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}
