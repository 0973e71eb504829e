use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::users::UserStore;
use crate::services::games::GameService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Facade over the external game process
    pub games: GameService,
    /// Users and their current game
    pub users: Arc<dyn UserStore>,
    /// Create unknown token subjects on first use instead of answering 404
    pub auto_provision_users: bool,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        games: GameService,
        users: Arc<dyn UserStore>,
        auto_provision_users: bool,
    ) -> Self {
        Self {
            security,
            games,
            users,
            auto_provision_users,
        }
    }
}
