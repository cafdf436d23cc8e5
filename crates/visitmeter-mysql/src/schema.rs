/// MySQL initialization SQL.
///
/// Executed once at startup. `IF NOT EXISTS` keeps it safe to re-run on every
/// boot (idempotent). Full migration tooling is an external concern; this only
/// guarantees the table and its uniqueness constraint exist.
///
/// The UNIQUE KEY over (ip_address, user_agent, visit_date) is what makes
/// `INSERT IGNORE` an atomic insert-if-absent — two concurrent requests from
/// the same visitor converge on a single row instead of double-counting.
///
/// Column widths: 45 chars covers an IPv6 address in full text form; the
/// User-Agent is capped at 512 chars (the ingest path truncates before
/// insert). With utf8mb4 the composite key stays under InnoDB's 3072-byte
/// index limit.
pub const CREATE_VISITORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS visitors (
    ip_address  VARCHAR(45)  NOT NULL,
    user_agent  VARCHAR(512) NOT NULL,
    visit_date  DATE         NOT NULL,
    created_at  TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE KEY uq_visitor_triple (ip_address, user_agent, visit_date)
)
"#;
