use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::info;

use visitmeter_core::visit::{normalize_identity, normalize_user_agent, VisitRecord};

use crate::{error::AppError, state::AppState};

/// `GET /api/visit` — record a visit and return the running visitor count.
///
/// ## Identity
/// The visitor is the (ip, user-agent, UTC day) triple. IP comes from the
/// first `X-Forwarded-For` entry; a missing IP or `User-Agent` becomes the
/// literal `"unknown"` — anonymous requests are still counted, never rejected.
///
/// ## Flow
/// Atomic insert-if-absent of today's triple, then a distinct count over the
/// whole table. The two store calls are sequential: the count must observe
/// the insert. At most one row is written per invocation.
///
/// ## Response
/// `200 OK` with `{ "visitorCount": <integer> }`. Any store failure renders
/// as a uniform 500 via [`AppError`].
#[tracing::instrument(skip(state, headers))]
pub async fn record_visit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let ip = extract_client_ip(&headers);
    let user_agent = normalize_user_agent(
        headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    let visit = VisitRecord::today(ip, user_agent);
    let inserted = state.store.record_visit(&visit).await?;
    if inserted {
        info!(ip = %visit.ip_address, date = %visit.visit_date, "New visitor recorded");
    } else {
        info!(ip = %visit.ip_address, date = %visit.visit_date, "Visitor already counted today");
    }

    let visitor_count = state.store.distinct_visitor_count().await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "visitorCount": visitor_count })),
    ))
}

/// `OPTIONS /api/visit` — CORS preflight.
///
/// The allow-origin/methods/headers values are stamped by the response-header
/// layers in `app.rs`; the handler only supplies the status.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Extract the real client IP from `X-Forwarded-For` (first entry).
///
/// Falls back to `"unknown"` when the header is absent. An unidentifiable
/// source is still a countable visitor, not an error.
fn extract_client_ip(headers: &HeaderMap) -> String {
    normalize_identity(
        headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(str::trim),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_takes_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 10.0.0.1"),
        );
        assert_eq!(extract_client_ip(&headers), "1.2.3.4");
    }

    #[test]
    fn client_ip_falls_back_to_unknown() {
        assert_eq!(extract_client_ip(&HeaderMap::new()), "unknown");
    }
}
