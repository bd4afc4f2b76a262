//! The `GetRequests` GraphQL document and its response envelope.

use govintake_core::wire::{resolve_intakes, resolve_trb_requests};
use govintake_core::{IntakeRecord, RawRequests, TrbRecord, Viewer};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::SyncError;

pub const OPERATION_NAME: &str = "GetRequests";

const SYSTEM_FIELDS: &str = "systems { id name acronym }";

/// Build the request body for fetching both lists.
///
/// The admin status is only selected for admins; requesters are not allowed
/// to query it.
pub fn build_query(viewer: Viewer) -> Value {
    let admin_field = match viewer {
        Viewer::Admin => "\n    statusAdmin",
        Viewer::Requester => "",
    };
    let query = format!(
        "query {OPERATION_NAME} {{
  mySystemIntakes {{
    id
    requestName
    submittedAt
    statusRequester{admin_field}
    lcid
    nextMeetingDate
    {SYSTEM_FIELDS}
  }}
  myTrbRequests(archived: false) {{
    id
    name
    submittedAt
    status
    nextMeetingDate
    {SYSTEM_FIELDS}
  }}
}}"
    );
    json!({
        "operationName": OPERATION_NAME,
        "query": query,
        "variables": {},
    })
}

#[derive(Deserialize)]
struct Envelope {
    data: Option<RequestsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestsData {
    #[serde(default)]
    my_system_intakes: Vec<IntakeRecord>,
    #[serde(default)]
    my_trb_requests: Vec<TrbRecord>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decode a `GetRequests` response body and resolve statuses for `viewer`.
pub fn decode_response(body: &str, viewer: Viewer) -> Result<RawRequests, SyncError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(SyncError::GraphQl(messages.join("; ")));
    }
    let data = envelope
        .data
        .ok_or_else(|| SyncError::GraphQl("response had no data".into()))?;

    let raw = RawRequests {
        governance: resolve_intakes(data.my_system_intakes, viewer)?,
        trb: resolve_trb_requests(data.my_trb_requests)?,
    };
    debug!(
        governance = raw.governance.len(),
        trb = raw.trb.len(),
        "decoded request lists"
    );
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use govintake_core::{GovernanceStatusView, IntakeError, RequesterStatus, TrbStatus};

    const RESPONSE: &str = r#"{
        "data": {
            "mySystemIntakes": [
                {
                    "id": "a1",
                    "requestName": "Data lake",
                    "submittedAt": "2024-02-01T10:00:00Z",
                    "statusRequester": "GRB_MEETING_READY",
                    "statusAdmin": "GRB_MEETING_READY",
                    "lcid": null,
                    "nextMeetingDate": "2024-03-01T15:00:00Z",
                    "systems": []
                }
            ],
            "myTrbRequests": [
                {
                    "id": "b1",
                    "name": null,
                    "submittedAt": null,
                    "status": "DRAFT_REQUEST_FORM",
                    "nextMeetingDate": null,
                    "systems": [{"id": "s1", "name": "Eligibility API", "acronym": null}]
                }
            ]
        }
    }"#;

    #[test]
    fn query_selects_admin_status_only_for_admins() {
        let admin = build_query(Viewer::Admin);
        let requester = build_query(Viewer::Requester);
        assert!(admin["query"].as_str().unwrap().contains("statusAdmin"));
        assert!(!requester["query"].as_str().unwrap().contains("statusAdmin"));
        assert_eq!(requester["operationName"], OPERATION_NAME);
        assert!(requester["query"].as_str().unwrap().contains("myTrbRequests"));
    }

    #[test]
    fn decodes_both_lists() {
        let raw = decode_response(RESPONSE, Viewer::Requester).unwrap();
        assert_eq!(raw.governance.len(), 1);
        assert_eq!(
            raw.governance[0].status,
            GovernanceStatusView::Requester(RequesterStatus::GrbMeetingReady)
        );
        assert_eq!(raw.trb[0].status, TrbStatus::DraftRequestForm);
        assert_eq!(raw.trb[0].systems[0].name, "Eligibility API");

        let merged = raw.merge();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let body = r#"{"data": null, "errors": [{"message": "not authorized"}, {"message": "retry later"}]}"#;
        let err = decode_response(body, Viewer::Requester).unwrap_err();
        assert!(matches!(err, SyncError::GraphQl(ref m) if m == "not authorized; retry later"));
    }

    #[test]
    fn missing_data_is_an_error() {
        let err = decode_response("{}", Viewer::Requester).unwrap_err();
        assert!(matches!(err, SyncError::GraphQl(_)));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let raw = decode_response(r#"{"data": {}}"#, Viewer::Admin).unwrap();
        assert_eq!(raw, RawRequests::default());
    }

    #[test]
    fn record_errors_are_decode_errors() {
        let body = r#"{"data": {"mySystemIntakes": [{"id": "a1", "statusRequester": "CLOSED"}]}}"#;
        let err = decode_response(body, Viewer::Admin).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Decode(IntakeError::MissingAdminStatus { .. })
        ));
    }
}
