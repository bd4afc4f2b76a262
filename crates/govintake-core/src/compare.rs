//! Column comparators for merged request rows.
//!
//! Status codes from the two processes are unrelated enumerations, so the
//! status comparator never compares codes across processes: every IT
//! Governance row sorts before every TRB row, in either direction, then each
//! process is ordered by its own lifecycle rank.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::request::{MergedRequest, Process};
use crate::status::LCID_TIER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Sort key for the status column: process, then lifecycle rank, then
/// lifecycle ID. The lifecycle ID only participates for governance rows in
/// the LCID tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSortKey<'a> {
    process: Process,
    rank: u8,
    lcid: LcidKey<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LcidKey<'a> {
    Unused,
    Present(&'a str),
    Missing,
}

impl<'a> LcidKey<'a> {
    fn as_option(self) -> Option<&'a str> {
        match self {
            LcidKey::Present(lcid) => Some(lcid),
            LcidKey::Unused | LcidKey::Missing => None,
        }
    }
}

pub fn status_sort_key(row: &MergedRequest) -> StatusSortKey<'_> {
    match row {
        MergedRequest::Governance(g) => {
            let rank = g.status_requester.rank();
            let lcid = if rank == LCID_TIER {
                g.lcid.as_deref().map_or(LcidKey::Missing, LcidKey::Present)
            } else {
                LcidKey::Unused
            };
            StatusSortKey {
                process: Process::ItGovernance,
                rank,
                lcid,
            }
        }
        MergedRequest::Trb(t) => StatusSortKey {
            process: Process::Trb,
            rank: t.status.rank(),
            lcid: LcidKey::Unused,
        },
    }
}

impl StatusSortKey<'_> {
    /// Governance before TRB regardless of `dir`; rank and lifecycle ID follow
    /// `dir`, with a missing lifecycle ID last in the LCID tier.
    pub fn compare(&self, other: &Self, dir: SortDirection) -> Ordering {
        self.process
            .cmp(&other.process)
            .then_with(|| dir.apply(self.rank.cmp(&other.rank)))
            .then_with(|| nulls_last(self.lcid.as_option(), other.lcid.as_option(), dir))
    }
}

/// Order rows by status, ascending. Meant for sorting only; `Equal` does not
/// mean the rows are equal.
pub fn compare_status(a: &MergedRequest, b: &MergedRequest) -> Ordering {
    compare_status_directed(a, b, SortDirection::Ascending)
}

pub fn compare_status_directed(
    a: &MergedRequest,
    b: &MergedRequest,
    dir: SortDirection,
) -> Ordering {
    status_sort_key(a).compare(&status_sort_key(b), dir)
}

/// Present values ordered by `dir`; `None` after every value in both directions.
pub fn nulls_last<T: Ord>(a: Option<T>, b: Option<T>, dir: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => dir.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    dir: SortDirection,
) -> Ordering {
    nulls_last(a, b, dir)
}

/// Unsubmitted requests sort last.
pub fn compare_submission_date(
    a: &MergedRequest,
    b: &MergedRequest,
    dir: SortDirection,
) -> Ordering {
    compare_dates(a.submission_date(), b.submission_date(), dir)
}

pub fn compare_next_meeting_date(
    a: &MergedRequest,
    b: &MergedRequest,
    dir: SortDirection,
) -> Ordering {
    compare_dates(a.next_meeting_date(), b.next_meeting_date(), dir)
}

/// Rows without a lifecycle ID sort last.
pub fn compare_lcid(a: &MergedRequest, b: &MergedRequest, dir: SortDirection) -> Ordering {
    nulls_last(a.lcid(), b.lcid(), dir)
}

/// Case-sensitive, byte-wise.
pub fn compare_name(a: &MergedRequest, b: &MergedRequest) -> Ordering {
    a.name().cmp(b.name())
}

pub fn compare_process(a: &MergedRequest, b: &MergedRequest) -> Ordering {
    a.process().cmp(&b.process())
}

/// Lexicographic over the lists of system names.
pub fn compare_systems(a: &MergedRequest, b: &MergedRequest) -> Ordering {
    a.systems().cmp(b.systems())
}
