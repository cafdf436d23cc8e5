use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Placeholder identity for requests missing an IP or User-Agent.
pub const UNKNOWN: &str = "unknown";

/// Maximum stored User-Agent length — matches the `user_agent` column width.
pub const MAX_USER_AGENT_LEN: usize = 512;

/// One countable visit: the (ip, user-agent, calendar-day) triple.
///
/// The triple is unique in the store — the `visitors` table carries a
/// UNIQUE KEY over all three columns, and inserts go through an atomic
/// insert-if-absent. Rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VisitRecord {
    pub ip_address: String,
    pub user_agent: String,
    pub visit_date: NaiveDate,
}

impl VisitRecord {
    pub fn new(ip_address: String, user_agent: String, visit_date: NaiveDate) -> Self {
        Self {
            ip_address,
            user_agent,
            visit_date,
        }
    }

    /// Build a record for the current **UTC** calendar date.
    ///
    /// Visit dates bucket on UTC midnight regardless of host timezone, so a
    /// visitor seen at 23:59 UTC and again at 00:01 UTC counts twice.
    pub fn today(ip_address: String, user_agent: String) -> Self {
        Self::new(ip_address, user_agent, Utc::now().date_naive())
    }
}

/// Normalize a raw identity field (IP or User-Agent) from request metadata.
///
/// Missing or empty values become the literal [`UNKNOWN`] rather than an
/// error — an anonymous request is still a countable visit.
pub fn normalize_identity(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => UNKNOWN.to_string(),
        Some(value) => value.to_string(),
    }
}

/// Normalize a User-Agent: [`normalize_identity`] plus truncation to the
/// storage column width. Truncation keeps char boundaries intact.
pub fn normalize_user_agent(raw: Option<&str>) -> String {
    let ua = normalize_identity(raw);
    if ua.len() <= MAX_USER_AGENT_LEN {
        return ua;
    }
    let mut end = MAX_USER_AGENT_LEN;
    while !ua.is_char_boundary(end) {
        end -= 1;
    }
    ua[..end].to_string()
}
