//! Visit storage abstraction.

use anyhow::Result;
use async_trait::async_trait;

use crate::visit::VisitRecord;

/// Storage backend for visit records.
///
/// Implemented by the MySQL backend in `visitmeter-mysql`; tests substitute
/// in-memory implementations.
#[async_trait]
pub trait VisitStore: Send + Sync + 'static {
    /// Record a visit if its triple is not already present — atomically.
    ///
    /// Returns `true` when a new row was written, `false` when the triple was
    /// already recorded. Concurrent calls with the same triple must converge
    /// on a single row; the backend relies on a store-level uniqueness
    /// constraint rather than a separate existence check.
    async fn record_visit(&self, visit: &VisitRecord) -> Result<bool>;

    /// Count distinct (ip_address, user_agent, visit_date) triples over the
    /// whole table. Duplicate rows predating the uniqueness constraint count
    /// once.
    async fn distinct_visitor_count(&self) -> Result<i64>;

    /// Cheap liveness check against the store.
    async fn ping(&self) -> Result<()>;
}
