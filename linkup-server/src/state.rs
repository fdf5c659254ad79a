//! Application state management

use linkup::core::NetworkManager;

use crate::api::auth_service::AuthService;
use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Linkup services over the configured store
    pub network: NetworkManager,

    /// Server configuration
    pub config: ServerConfig,

    /// Authentication service
    pub auth: AuthService,
}

impl AppState {
    /// Create new application state
    pub fn new(network: NetworkManager, config: ServerConfig) -> Self {
        let auth = AuthService::new(&config);
        Self {
            network,
            config,
            auth,
        }
    }
}
