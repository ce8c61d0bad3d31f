pub mod config;
pub mod gateway;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Gateway(#[from] gateway::GatewayError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
