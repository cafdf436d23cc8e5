use anyhow::Result;
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;
use tracing::info;

use visitmeter_core::config::Config;
use visitmeter_core::store::VisitStore;
use visitmeter_core::visit::VisitRecord;

use crate::schema::CREATE_VISITORS_TABLE;

/// MySQL backend for visit records.
///
/// Wraps a [`MySqlPool`] created with `connect_lazy_with`: the pool lives for
/// the whole process, connections are established on first use and reused
/// across requests, and nothing is explicitly torn down. The pool is cheap to
/// clone and shared across Axum handlers through `AppState`.
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Build a store over a lazily-connecting pool.
    ///
    /// No connection is attempted here — an unreachable database surfaces as
    /// a per-request store error, not a startup failure.
    pub fn connect_lazy(config: &Config) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password)
            .database(&config.db_name);
        let pool = MySqlPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_lazy_with(options);
        info!(
            host = %config.db_host,
            database = %config.db_name,
            max_connections = config.db_max_connections,
            "MySQL pool ready (lazy connect)"
        );
        Self { pool }
    }

    /// Ensure the `visitors` table and its uniqueness constraint exist.
    ///
    /// Idempotent; safe to run on every startup.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_VISITORS_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl VisitStore for MySqlStore {
    async fn record_visit(&self, visit: &VisitRecord) -> Result<bool> {
        // INSERT IGNORE + the UNIQUE KEY makes this an atomic
        // insert-if-absent: rows_affected is 0 when the triple already exists.
        let result = sqlx::query(
            "INSERT IGNORE INTO visitors (ip_address, user_agent, visit_date) \
             VALUES (?, ?, ?)",
        )
        .bind(&visit.ip_address)
        .bind(&visit.user_agent)
        .bind(visit.visit_date)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn distinct_visitor_count(&self) -> Result<i64> {
        // DISTINCT over the full triple so duplicate rows written before the
        // uniqueness constraint existed still count once.
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT ip_address, user_agent, visit_date) FROM visitors",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        conn.ping().await?;
        Ok(())
    }
}
