//! Status vocabularies for governance intakes and TRB requests.
//!
//! Governance intakes carry two parallel status codes describing the same
//! underlying state: the requester-facing code and the admin-facing code.
//! Which one a list shows is decided by the [`Viewer`] when the records are
//! fetched. Sorting always uses the requester-facing code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IntakeError;

/// Declares a closed status enumeration with its wire codes.
///
/// Each variant maps to exactly one canonical code; extra `| "ALIAS"` codes
/// are accepted when parsing but never produced. Codes this build does not
/// know decode from the wire as `Unrecognized`, which keeps the code for
/// display and ranks after every known status. `FromStr` stays strict.
macro_rules! status_codes {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $code:literal $(| $alias:literal)*,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            /// Every known variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The wire code, canonical for known variants.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Unrecognized(code) => code,
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }

            /// Fail with [`IntakeError::UnknownStatus`] if the code was not recognised.
            pub fn ensure_recognized(&self) -> Result<(), IntakeError> {
                match self {
                    $name::Unrecognized(code) => Err(IntakeError::UnknownStatus {
                        kind: $kind,
                        code: code.clone(),
                    }),
                    _ => Ok(()),
                }
            }

            fn parse_known(s: &str) -> Option<Self> {
                match s {
                    $($code $(| $alias)* => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl FromStr for $name {
            type Err = IntakeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::parse_known(s).ok_or_else(|| IntakeError::UnknownStatus {
                    kind: $kind,
                    code: s.to_string(),
                })
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                $name::parse_known(&code).unwrap_or($name::Unrecognized(code))
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                status.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

status_codes! {
    /// Requester-facing governance status.
    RequesterStatus, "requester" {
        InitialRequestFormNew => "INITIAL_REQUEST_FORM_NEW",
        InitialRequestFormInProgress => "INITIAL_REQUEST_FORM_IN_PROGRESS" | "INTAKE_DRAFT",
        InitialRequestFormSubmitted => "INITIAL_REQUEST_FORM_SUBMITTED",
        InitialRequestFormEditsRequested => "INITIAL_REQUEST_FORM_EDITS_REQUESTED",
        DraftBusinessCaseInProgress => "DRAFT_BUSINESS_CASE_IN_PROGRESS",
        DraftBusinessCaseSubmitted => "DRAFT_BUSINESS_CASE_SUBMITTED",
        DraftBusinessCaseEditsRequested => "DRAFT_BUSINESS_CASE_EDITS_REQUESTED",
        GrtMeetingReady => "GRT_MEETING_READY",
        GrtMeetingAwaitingDecision => "GRT_MEETING_AWAITING_DECISION",
        FinalBusinessCaseInProgress => "FINAL_BUSINESS_CASE_IN_PROGRESS",
        FinalBusinessCaseSubmitted => "FINAL_BUSINESS_CASE_SUBMITTED",
        FinalBusinessCaseEditsRequested => "FINAL_BUSINESS_CASE_EDITS_REQUESTED",
        GrbMeetingReady => "GRB_MEETING_READY",
        GrbMeetingAwaitingDecision => "GRB_MEETING_AWAITING_DECISION",
        LcidIssued => "LCID_ISSUED",
        LcidExpired => "LCID_EXPIRED",
        LcidRetired => "LCID_RETIRED",
        NotGovernance => "NOT_GOVERNANCE",
        NotApproved => "NOT_APPROVED",
        Closed => "CLOSED",
    }
}

status_codes! {
    /// Admin-facing governance status.
    AdminStatus, "admin" {
        InitialRequestFormInProgress => "INITIAL_REQUEST_FORM_IN_PROGRESS",
        InitialRequestFormSubmitted => "INITIAL_REQUEST_FORM_SUBMITTED",
        DraftBusinessCaseInProgress => "DRAFT_BUSINESS_CASE_IN_PROGRESS",
        DraftBusinessCaseSubmitted => "DRAFT_BUSINESS_CASE_SUBMITTED",
        GrtMeetingReady => "GRT_MEETING_READY",
        GrtMeetingComplete => "GRT_MEETING_COMPLETE",
        GrbMeetingReady => "GRB_MEETING_READY",
        GrbMeetingComplete => "GRB_MEETING_COMPLETE",
        FinalBusinessCaseInProgress => "FINAL_BUSINESS_CASE_IN_PROGRESS",
        FinalBusinessCaseSubmitted => "FINAL_BUSINESS_CASE_SUBMITTED",
        LcidIssued => "LCID_ISSUED",
        LcidExpired => "LCID_EXPIRED",
        LcidRetired => "LCID_RETIRED",
        NotGovernance => "NOT_GOVERNANCE",
        NotApproved => "NOT_APPROVED",
        Closed => "CLOSED",
    }
}

status_codes! {
    /// TRB request status. `OPEN` and `CLOSED` are the coarse request states
    /// some list queries return instead of the detailed step.
    TrbStatus, "TRB" {
        New => "NEW",
        DraftRequestForm => "DRAFT_REQUEST_FORM",
        RequestFormComplete => "REQUEST_FORM_COMPLETE",
        ReadyForConsult => "READY_FOR_CONSULT",
        ConsultScheduled => "CONSULT_SCHEDULED",
        ConsultComplete => "CONSULT_COMPLETE",
        DraftGuidanceLetter => "DRAFT_GUIDANCE_LETTER",
        GuidanceLetterInReview => "GUIDANCE_LETTER_IN_REVIEW",
        GuidanceLetterSent => "GUIDANCE_LETTER_SENT",
        FollowUpRequested => "FOLLOW_UP_REQUESTED",
        Open => "OPEN",
        Closed => "CLOSED",
    }
}

/// Rank shared by the three statuses that carry a lifecycle ID.
pub const LCID_TIER: u8 = 14;

/// Rank of a status code this build does not know. Sorts after every known status.
pub const UNRECOGNIZED_RANK: u8 = u8::MAX;

impl RequesterStatus {
    /// Ordinal rank in the governance lifecycle; earlier stages rank lower.
    ///
    /// `LCID_ISSUED`, `LCID_EXPIRED` and `LCID_RETIRED` share [`LCID_TIER`]
    /// so that rows in that tier can be ordered by their lifecycle ID.
    pub fn rank(&self) -> u8 {
        match self {
            RequesterStatus::InitialRequestFormNew => 0,
            RequesterStatus::InitialRequestFormInProgress => 1,
            RequesterStatus::InitialRequestFormSubmitted => 2,
            RequesterStatus::InitialRequestFormEditsRequested => 3,
            RequesterStatus::DraftBusinessCaseInProgress => 4,
            RequesterStatus::DraftBusinessCaseSubmitted => 5,
            RequesterStatus::DraftBusinessCaseEditsRequested => 6,
            RequesterStatus::GrtMeetingReady => 7,
            RequesterStatus::GrtMeetingAwaitingDecision => 8,
            RequesterStatus::FinalBusinessCaseInProgress => 9,
            RequesterStatus::FinalBusinessCaseSubmitted => 10,
            RequesterStatus::FinalBusinessCaseEditsRequested => 11,
            RequesterStatus::GrbMeetingReady => 12,
            RequesterStatus::GrbMeetingAwaitingDecision => 13,
            RequesterStatus::LcidIssued
            | RequesterStatus::LcidExpired
            | RequesterStatus::LcidRetired => LCID_TIER,
            RequesterStatus::NotGovernance => 15,
            RequesterStatus::NotApproved => 16,
            RequesterStatus::Closed => 17,
            RequesterStatus::Unrecognized(_) => UNRECOGNIZED_RANK,
        }
    }

    /// Whether a request in this status has been issued a lifecycle ID.
    pub fn carries_lcid(&self) -> bool {
        matches!(
            self,
            RequesterStatus::LcidIssued
                | RequesterStatus::LcidExpired
                | RequesterStatus::LcidRetired
        )
    }
}

impl TrbStatus {
    pub fn rank(&self) -> u8 {
        match self {
            TrbStatus::New => 0,
            TrbStatus::DraftRequestForm => 1,
            TrbStatus::RequestFormComplete => 2,
            TrbStatus::ReadyForConsult => 3,
            TrbStatus::ConsultScheduled => 4,
            TrbStatus::ConsultComplete => 5,
            TrbStatus::DraftGuidanceLetter => 6,
            TrbStatus::GuidanceLetterInReview => 7,
            TrbStatus::GuidanceLetterSent => 8,
            TrbStatus::FollowUpRequested => 9,
            TrbStatus::Open => 10,
            TrbStatus::Closed => 11,
            TrbStatus::Unrecognized(_) => UNRECOGNIZED_RANK,
        }
    }
}

/// Who is looking at the list. Decides which governance status code is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewer {
    Admin,
    #[default]
    Requester,
}

/// The governance status code a list row displays, already resolved for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GovernanceStatusView {
    Admin(AdminStatus),
    Requester(RequesterStatus),
}

impl GovernanceStatusView {
    pub fn code(&self) -> &str {
        match self {
            GovernanceStatusView::Admin(s) => s.as_str(),
            GovernanceStatusView::Requester(s) => s.as_str(),
        }
    }
}

impl fmt::Display for GovernanceStatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
