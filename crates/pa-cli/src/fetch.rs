//! HTTP fetch of the audit envelope (feature `fetch`).

use pa_common::{AuditRequest, AuditResponse, Error, Result};
use tracing::debug;

/// Default audit backend endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ga4-audit-backend.onrender.com/run-audit";

/// POST the request parameters and parse the response envelope.
///
/// Transport failures map to [`Error::Backend`]; the caller decides how to
/// surface them. No retries.
pub fn fetch_audit(endpoint: &str, request: &AuditRequest) -> Result<AuditResponse> {
    debug!(endpoint, property_id = %request.property_id, "requesting audit run");
    let response = ureq::post(endpoint)
        .send_json(serde_json::to_value(request)?)
        .map_err(|e| Error::Backend(e.to_string()))?;
    response
        .into_json::<AuditResponse>()
        .map_err(|e| Error::Backend(format!("malformed response envelope: {e}")))
}
