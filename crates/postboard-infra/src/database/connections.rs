use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DbConn, DbErr, Schema};

use super::entity::{post, user};

/// Configuration for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Process-wide connection pool.
///
/// Repositories share the inner [`DbConn`] through [`Database::pool`] and
/// check a connection out per operation, so no request ever holds one beyond
/// its own handler.
pub struct Database {
    conn: Arc<DbConn>,
}

impl Database {
    /// Connect the pool. Callers abort startup on error.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let conn = SeaDatabase::connect(opts).await?;
        // Fail here rather than on the first request.
        conn.ping().await?;

        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Wrap an existing connection (mock connections in tests).
    pub fn from_conn(conn: impl Into<Arc<DbConn>>) -> Self {
        Self { conn: conn.into() }
    }

    /// Shared handle for a repository.
    pub fn pool(&self) -> Arc<DbConn> {
        Arc::clone(&self.conn)
    }

    /// Create the `users` and `posts` tables if they do not exist.
    ///
    /// Derived from the entity definitions. There is no versioning: an existing
    /// table is left untouched even if its columns differ.
    pub async fn bootstrap_schema(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // `posts.owner_id` references `users.id`, so users goes first.
        let mut users = schema.create_table_from_entity(user::Entity);
        users.if_not_exists();
        self.conn.execute(backend.build(&users)).await?;

        let mut posts = schema.create_table_from_entity(post::Entity);
        posts.if_not_exists();
        self.conn.execute(backend.build(&posts)).await?;

        tracing::info!("Schema bootstrap complete (users, posts)");
        Ok(())
    }
}
