//! Business logic services

pub mod catalog;
pub mod tokens;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tokens: tokens::TokenService,
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository and auth configuration
    pub fn new(repository: Repository, auth_config: &AuthConfig) -> Self {
        let tokens = tokens::TokenService::new(auth_config);
        Self {
            users: users::UsersService::new(repository.clone(), tokens.clone()),
            catalog: catalog::CatalogService::new(repository),
            tokens,
        }
    }
}
