//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::Authorizer;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the database pool and the authorizer capability.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(pool: SqlitePool, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pool, authorizer }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the authorizer capability.
    #[must_use]
    pub fn authorizer(&self) -> &dyn Authorizer {
        &*self.inner.authorizer
    }
}
