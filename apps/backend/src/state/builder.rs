use std::sync::Arc;

use crate::config::app::Config;
use crate::error::AppError;
use crate::game_process::{GameProcessConfig, ProcessInvoker, SubprocessInvoker};
use crate::repos::users::{InMemoryUserStore, UserStore};
use crate::services::games::GameService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    game_process: Option<GameProcessConfig>,
    invoker: Option<Arc<dyn ProcessInvoker>>,
    users: Option<Arc<dyn UserStore>>,
    auto_provision_users: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            game_process: None,
            invoker: None,
            users: None,
            auto_provision_users: true,
        }
    }

    /// Take everything the environment configured.
    pub fn with_config(self, config: &Config) -> Self {
        self.with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
            .with_game_process(config.game_process.clone())
            .with_auto_provision_users(config.auto_provision_users)
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_game_process(mut self, game_process: GameProcessConfig) -> Self {
        self.game_process = Some(game_process);
        self
    }

    /// Replace the subprocess invoker, e.g. with a scripted one in tests.
    pub fn with_invoker(mut self, invoker: Arc<dyn ProcessInvoker>) -> Self {
        self.invoker = Some(invoker);
        self
    }

    pub fn with_users(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_auto_provision_users(mut self, enabled: bool) -> Self {
        self.auto_provision_users = enabled;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let game_process = self
            .game_process
            .ok_or_else(|| AppError::config("game process location is not configured"))?;
        let invoker = self
            .invoker
            .unwrap_or_else(|| Arc::new(SubprocessInvoker));
        let users = self
            .users
            .unwrap_or_else(|| Arc::new(InMemoryUserStore::new()));

        Ok(AppState::new(
            self.security_config,
            GameService::with_invoker(game_process, invoker),
            users,
            self.auto_provision_users,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
