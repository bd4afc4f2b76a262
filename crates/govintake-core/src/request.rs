//! Request records as fetched from the two processes, and the merged row
//! shape produced for list display.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{GovernanceStatusView, RequesterStatus, TrbStatus};

/// Name shown for a request that has not been given one yet.
pub const DRAFT_NAME: &str = "Draft";

/// The process a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Process {
    ItGovernance,
    Trb,
}

impl Process {
    pub fn as_str(self) -> &'static str {
        match self {
            Process::ItGovernance => "IT Governance",
            Process::Trb => "TRB",
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A system associated with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub acronym: Option<String>,
}

/// A governance intake with its display status already resolved for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeRequest {
    pub id: String,
    pub name: Option<String>,
    pub status: GovernanceStatusView,
    pub status_requester: RequesterStatus,
    pub submission_date: Option<DateTime<Utc>>,
    pub systems: Vec<SystemRef>,
    pub next_meeting_date: Option<DateTime<Utc>>,
    pub lcid: Option<String>,
}

/// A technical-assistance request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrbRequest {
    pub id: String,
    pub name: Option<String>,
    pub status: TrbStatus,
    pub submission_date: Option<DateTime<Utc>>,
    pub systems: Vec<SystemRef>,
    pub next_meeting_date: Option<DateTime<Utc>>,
}

/// Columns shared by both kinds of merged row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCommon {
    pub id: String,
    pub name: String,
    pub submission_date: Option<DateTime<Utc>>,
    pub systems: Vec<String>,
    pub next_meeting_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceRow {
    #[serde(flatten)]
    pub common: RowCommon,
    pub status: GovernanceStatusView,
    pub status_requester: RequesterStatus,
    pub lcid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrbRow {
    #[serde(flatten)]
    pub common: RowCommon,
    pub status: TrbStatus,
}

/// One row of the combined request list.
///
/// TRB rows have no lifecycle ID and no requester status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "process")]
pub enum MergedRequest {
    #[serde(rename = "IT Governance")]
    Governance(GovernanceRow),
    #[serde(rename = "TRB")]
    Trb(TrbRow),
}

impl MergedRequest {
    fn common(&self) -> &RowCommon {
        match self {
            MergedRequest::Governance(row) => &row.common,
            MergedRequest::Trb(row) => &row.common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn process(&self) -> Process {
        match self {
            MergedRequest::Governance(_) => Process::ItGovernance,
            MergedRequest::Trb(_) => Process::Trb,
        }
    }

    /// The "type" column. Always the same as [`process`](Self::process).
    pub fn request_type(&self) -> Process {
        self.process()
    }

    /// Raw status code as shown to the viewer.
    pub fn status_code(&self) -> &str {
        match self {
            MergedRequest::Governance(row) => row.status.code(),
            MergedRequest::Trb(row) => row.status.as_str(),
        }
    }

    pub fn submission_date(&self) -> Option<DateTime<Utc>> {
        self.common().submission_date
    }

    pub fn systems(&self) -> &[String] {
        &self.common().systems
    }

    pub fn next_meeting_date(&self) -> Option<DateTime<Utc>> {
        self.common().next_meeting_date
    }

    pub fn lcid(&self) -> Option<&str> {
        match self {
            MergedRequest::Governance(row) => row.lcid.as_deref(),
            MergedRequest::Trb(_) => None,
        }
    }

    pub fn status_requester(&self) -> Option<&RequesterStatus> {
        match self {
            MergedRequest::Governance(row) => Some(&row.status_requester),
            MergedRequest::Trb(_) => None,
        }
    }
}
