//! Application state - the collaborators every handler receives.

use std::sync::Arc;

use postboard_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use postboard_infra::database::{PostgresPostRepository, PostgresUserRepository};
use postboard_infra::{Argon2PasswordService, Database, JwtTokenService};

use crate::config::{AppConfig, PostsConfig};

/// Shared application state, injected into handlers via `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub posts_config: PostsConfig,
}

impl AppState {
    /// Wire PostgreSQL-backed repositories over an already bootstrapped database.
    pub fn postgres(db: &Database, config: &AppConfig) -> Self {
        let users: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(db.pool()));
        let posts: Arc<dyn PostRepository> =
            Arc::new(PostgresPostRepository::new(db.pool()));

        let state = Self {
            users,
            posts,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            posts_config: config.posts,
        };

        tracing::info!("Application state initialized");
        state
    }
}
