//! Decoding of API request records into resolved domain requests.
//!
//! This is the fetch boundary: payloads that are not arrays, records without
//! an id, and admin lists lacking the admin status are all rejected here, so
//! the normaliser never sees them. Unknown status codes are kept as
//! `Unrecognized` and logged; they sort after every known status.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::IntakeError;
use crate::request::{IntakeRequest, SystemRef, TrbRequest};
use crate::status::{AdminStatus, GovernanceStatusView, RequesterStatus, TrbStatus, Viewer};

/// A governance intake as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    pub id: String,
    #[serde(default, alias = "name")]
    pub request_name: Option<String>,
    pub status_requester: RequesterStatus,
    #[serde(default)]
    pub status_admin: Option<AdminStatus>,
    #[serde(default, alias = "submissionDate")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub systems: Option<Vec<SystemRef>>,
    #[serde(default)]
    pub next_meeting_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lcid: Option<String>,
}

/// A TRB request as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrbRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: TrbStatus,
    #[serde(default, alias = "submissionDate")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub systems: Option<Vec<SystemRef>>,
    #[serde(default)]
    pub next_meeting_date: Option<DateTime<Utc>>,
}

impl IntakeRecord {
    /// Resolve the displayed status for `viewer`. `index` is used in error messages.
    pub fn resolve(self, index: usize, viewer: Viewer) -> Result<IntakeRequest, IntakeError> {
        if self.id.trim().is_empty() {
            return Err(IntakeError::BlankId { index });
        }

        let status = match viewer {
            Viewer::Requester => GovernanceStatusView::Requester(self.status_requester.clone()),
            Viewer::Admin => match self.status_admin {
                Some(admin) => GovernanceStatusView::Admin(admin),
                None => return Err(IntakeError::MissingAdminStatus { id: self.id }),
            },
        };

        if !self.status_requester.is_recognized() {
            warn!(id = %self.id, status = %self.status_requester, "unrecognised requester status");
        }
        if let GovernanceStatusView::Admin(admin) = &status
            && !admin.is_recognized()
        {
            warn!(id = %self.id, status = %admin, "unrecognised admin status");
        }

        if self.lcid.is_some() && !self.status_requester.carries_lcid() {
            warn!(
                id = %self.id,
                status = %self.status_requester,
                "lifecycle ID present on a request whose status does not carry one"
            );
        }

        Ok(IntakeRequest {
            id: self.id,
            name: self.request_name,
            status,
            status_requester: self.status_requester,
            submission_date: self.submitted_at,
            systems: self.systems.unwrap_or_default(),
            next_meeting_date: self.next_meeting_date,
            lcid: self.lcid,
        })
    }
}

impl TrbRecord {
    pub fn resolve(self, index: usize) -> Result<TrbRequest, IntakeError> {
        if self.id.trim().is_empty() {
            return Err(IntakeError::BlankId { index });
        }
        if !self.status.is_recognized() {
            warn!(id = %self.id, status = %self.status, "unrecognised TRB status");
        }
        Ok(TrbRequest {
            id: self.id,
            name: self.name,
            status: self.status,
            submission_date: self.submitted_at,
            systems: self.systems.unwrap_or_default(),
            next_meeting_date: self.next_meeting_date,
        })
    }
}

pub fn resolve_intakes(
    records: Vec<IntakeRecord>,
    viewer: Viewer,
) -> Result<Vec<IntakeRequest>, IntakeError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.resolve(i, viewer))
        .collect()
}

pub fn resolve_trb_requests(records: Vec<TrbRecord>) -> Result<Vec<TrbRequest>, IntakeError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.resolve(i))
        .collect()
}

/// Decode a JSON array of governance intakes.
pub fn decode_intakes(json: &str, viewer: Viewer) -> Result<Vec<IntakeRequest>, IntakeError> {
    let records: Vec<IntakeRecord> = serde_json::from_str(json)?;
    resolve_intakes(records, viewer)
}

/// Decode a JSON array of TRB requests.
pub fn decode_trb_requests(json: &str) -> Result<Vec<TrbRequest>, IntakeError> {
    let records: Vec<TrbRecord> = serde_json::from_str(json)?;
    resolve_trb_requests(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTAKES: &str = r#"[
        {
            "id": "8d4b1b5c-0f3e-4d5e-9a51-1f1c1f2a0001",
            "requestName": "Mainframe retirement",
            "statusRequester": "LCID_ISSUED",
            "statusAdmin": "LCID_ISSUED",
            "submittedAt": "2024-03-01T14:00:00Z",
            "systems": [{"id": "sys-1", "name": "Claims Hub", "acronym": "CH"}],
            "nextMeetingDate": null,
            "lcid": "240301"
        },
        {
            "id": "8d4b1b5c-0f3e-4d5e-9a51-1f1c1f2a0002",
            "requestName": null,
            "statusRequester": "INITIAL_REQUEST_FORM_IN_PROGRESS",
            "statusAdmin": "INITIAL_REQUEST_FORM_IN_PROGRESS",
            "submittedAt": null,
            "systems": null,
            "lcid": null
        }
    ]"#;

    #[test]
    fn requester_view_uses_requester_code() {
        let intakes = decode_intakes(INTAKES, Viewer::Requester).unwrap();
        assert_eq!(intakes.len(), 2);
        assert_eq!(
            intakes[0].status,
            GovernanceStatusView::Requester(RequesterStatus::LcidIssued)
        );
        assert_eq!(intakes[0].systems[0].name, "Claims Hub");
        assert_eq!(intakes[0].lcid.as_deref(), Some("240301"));
        assert!(intakes[1].systems.is_empty());
        assert!(intakes[1].submission_date.is_none());
    }

    #[test]
    fn admin_view_uses_admin_code_and_keeps_requester_code() {
        let intakes = decode_intakes(INTAKES, Viewer::Admin).unwrap();
        assert_eq!(
            intakes[1].status,
            GovernanceStatusView::Admin(AdminStatus::InitialRequestFormInProgress)
        );
        assert_eq!(
            intakes[1].status_requester,
            RequesterStatus::InitialRequestFormInProgress
        );
    }

    #[test]
    fn admin_view_requires_admin_status() {
        let json = r#"[{"id": "abc", "statusRequester": "CLOSED"}]"#;
        let err = decode_intakes(json, Viewer::Admin).unwrap_err();
        assert!(matches!(err, IntakeError::MissingAdminStatus { ref id } if id == "abc"));
        // The same record is fine for a requester.
        assert_eq!(decode_intakes(json, Viewer::Requester).unwrap().len(), 1);
    }

    #[test]
    fn non_array_payload_is_rejected() {
        let err = decode_trb_requests(r#"{"id": "x", "status": "NEW"}"#).unwrap_err();
        assert!(matches!(err, IntakeError::Payload(_)));
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = decode_trb_requests(r#"[{"status": "NEW"}]"#).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"), "{err}");
    }

    #[test]
    fn blank_id_reports_index() {
        let json = r#"[{"id": "t-1", "status": "NEW"}, {"id": "  ", "status": "OPEN"}]"#;
        let err = decode_trb_requests(json).unwrap_err();
        assert!(matches!(err, IntakeError::BlankId { index: 1 }));
    }

    #[test]
    fn non_array_intake_payload_is_rejected() {
        let json = r#"{"id": "a", "statusRequester": "CLOSED"}"#;
        let err = decode_intakes(json, Viewer::Requester).unwrap_err();
        assert!(matches!(err, IntakeError::Payload(_)));
    }

    #[test]
    fn unknown_status_keeps_the_rest_of_the_list() {
        let json = r#"[
            {"id": "a", "statusRequester": "LCID_ISSUED", "lcid": "A000001"},
            {"id": "b", "statusRequester": "LCID_EXPIRING_SOON"},
            {"id": "c", "statusRequester": "CLOSED"}
        ]"#;
        let intakes = decode_intakes(json, Viewer::Requester).unwrap();
        assert_eq!(intakes.len(), 3);
        assert_eq!(
            intakes[1].status_requester,
            RequesterStatus::Unrecognized("LCID_EXPIRING_SOON".into())
        );
        assert_eq!(intakes[1].status.code(), "LCID_EXPIRING_SOON");
    }

    #[test]
    fn unknown_admin_and_trb_statuses_are_kept() {
        let json = r#"[{"id": "a", "statusRequester": "CLOSED", "statusAdmin": "ON_HOLD"}]"#;
        let intakes = decode_intakes(json, Viewer::Admin).unwrap();
        assert_eq!(intakes[0].status.code(), "ON_HOLD");

        let trb = decode_trb_requests(r#"[{"id": "t", "status": "ARCHIVED"}]"#).unwrap();
        assert_eq!(trb[0].status, TrbStatus::Unrecognized("ARCHIVED".into()));
    }

    #[test]
    fn trb_record_decodes() {
        let json = r#"[{
            "id": "t-1",
            "name": "Cloud migration consult",
            "status": "CONSULT_SCHEDULED",
            "submittedAt": "2024-05-02T09:30:00Z",
            "systems": [],
            "nextMeetingDate": "2024-06-10T15:00:00Z"
        }]"#;
        let trb = decode_trb_requests(json).unwrap();
        assert_eq!(trb[0].status, TrbStatus::ConsultScheduled);
        assert!(trb[0].next_meeting_date.is_some());
    }
}
