//! Merges governance intakes and TRB requests into one list of [`MergedRequest`] rows.

use tracing::debug;

use crate::IntakeError;
use crate::status::GovernanceStatusView;
use crate::request::{
    DRAFT_NAME, GovernanceRow, IntakeRequest, MergedRequest, RowCommon, SystemRef, TrbRequest,
    TrbRow,
};

/// Both request lists for one refresh. The default value is the "not loaded yet" state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequests {
    pub governance: Vec<IntakeRequest>,
    pub trb: Vec<TrbRequest>,
}

impl RawRequests {
    pub fn merge(&self) -> Vec<MergedRequest> {
        merge_requests(&self.governance, &self.trb)
    }

    /// Fail on the first status code this build does not recognise.
    pub fn ensure_recognized(&self) -> Result<(), IntakeError> {
        for r in &self.governance {
            r.status_requester.ensure_recognized()?;
            if let GovernanceStatusView::Admin(admin) = &r.status {
                admin.ensure_recognized()?;
            }
        }
        for r in &self.trb {
            r.status.ensure_recognized()?;
        }
        Ok(())
    }
}

/// Project both lists into merged rows.
///
/// Every input record yields exactly one row; nothing is dropped, deduplicated
/// or validated. Row order is unspecified, so sort before display.
pub fn merge_requests(governance: &[IntakeRequest], trb: &[TrbRequest]) -> Vec<MergedRequest> {
    let mut merged = Vec::with_capacity(governance.len() + trb.len());

    merged.extend(governance.iter().map(|r| {
        MergedRequest::Governance(GovernanceRow {
            common: RowCommon {
                id: r.id.clone(),
                name: display_name(r.name.as_deref()),
                submission_date: r.submission_date,
                systems: system_names(&r.systems),
                next_meeting_date: r.next_meeting_date,
            },
            status: r.status.clone(),
            status_requester: r.status_requester.clone(),
            lcid: r.lcid.clone(),
        })
    }));

    merged.extend(trb.iter().map(|r| {
        MergedRequest::Trb(TrbRow {
            common: RowCommon {
                id: r.id.clone(),
                name: display_name(r.name.as_deref()),
                submission_date: r.submission_date,
                systems: system_names(&r.systems),
                next_meeting_date: r.next_meeting_date,
            },
            status: r.status.clone(),
        })
    }));

    debug!(
        governance = governance.len(),
        trb = trb.len(),
        merged = merged.len(),
        "merged request lists"
    );
    merged
}

fn display_name(name: Option<&str>) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.to_string(),
        _ => DRAFT_NAME.to_string(),
    }
}

fn system_names(systems: &[SystemRef]) -> Vec<String> {
    systems.iter().map(|s| s.name.clone()).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};

    use crate::request::{IntakeRequest, SystemRef, TrbRequest};
    use crate::status::{GovernanceStatusView, RequesterStatus, TrbStatus};

    pub fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
    }

    pub fn intake(id: &str, status: RequesterStatus, lcid: Option<&str>) -> IntakeRequest {
        IntakeRequest {
            id: id.into(),
            name: Some(format!("Intake {id}")),
            status: GovernanceStatusView::Requester(status.clone()),
            status_requester: status,
            submission_date: None,
            systems: Vec::new(),
            next_meeting_date: None,
            lcid: lcid.map(String::from),
        }
    }

    pub fn trb(id: &str, status: TrbStatus) -> TrbRequest {
        TrbRequest {
            id: id.into(),
            name: Some(format!("TRB {id}")),
            status,
            submission_date: None,
            systems: Vec::new(),
            next_meeting_date: None,
        }
    }

    pub fn system(name: &str) -> SystemRef {
        SystemRef {
            id: format!("sys-{name}"),
            name: name.into(),
            acronym: None,
        }
    }
}
