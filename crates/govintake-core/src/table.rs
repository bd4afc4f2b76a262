//! Filtering, sorting and pagination over merged request rows.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::IntakeError;
pub use crate::compare::SortDirection;
use crate::compare::{
    compare_lcid, compare_name, compare_next_meeting_date, compare_process,
    compare_status_directed, compare_submission_date, compare_systems,
};
use crate::request::{MergedRequest, Process};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Process,
    Status,
    SubmissionDate,
    NextMeetingDate,
    Lcid,
    Systems,
}

impl Column {
    pub const ALL: &'static [Column] = &[
        Column::Name,
        Column::Process,
        Column::Status,
        Column::SubmissionDate,
        Column::Systems,
        Column::NextMeetingDate,
        Column::Lcid,
    ];

    /// Short name accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Process => "process",
            Column::Status => "status",
            Column::SubmissionDate => "submitted",
            Column::NextMeetingDate => "next-meeting",
            Column::Lcid => "lcid",
            Column::Systems => "systems",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Process => "Process",
            Column::Status => "Status",
            Column::SubmissionDate => "Submitted",
            Column::NextMeetingDate => "Next meeting",
            Column::Lcid => "LCID",
            Column::Systems => "Systems",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Column::Name),
            "process" | "type" => Ok(Column::Process),
            "status" => Ok(Column::Status),
            "submitted" | "submission-date" | "submission_date" => Ok(Column::SubmissionDate),
            "next-meeting" | "next_meeting_date" => Ok(Column::NextMeetingDate),
            "lcid" => Ok(Column::Lcid),
            "systems" => Ok(Column::Systems),
            _ => Err(IntakeError::UnknownColumn(s.to_string())),
        }
    }
}

/// Which column to sort by. Defaults to newest submissions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: Column::SubmissionDate,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    /// Compare two rows in this column and direction.
    ///
    /// Empty dates and lifecycle IDs stay at the end in either direction, and
    /// the status column keeps governance rows ahead of TRB rows.
    pub fn compare(&self, a: &MergedRequest, b: &MergedRequest) -> Ordering {
        let dir = self.direction;
        match self.column {
            Column::Name => dir.apply(compare_name(a, b)),
            Column::Process => dir.apply(compare_process(a, b)),
            Column::Status => compare_status_directed(a, b, dir),
            Column::Systems => dir.apply(compare_systems(a, b)),
            Column::SubmissionDate => compare_submission_date(a, b, dir),
            Column::NextMeetingDate => compare_next_meeting_date(a, b, dir),
            Column::Lcid => compare_lcid(a, b, dir),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub sort: SortSpec,
    pub process: Option<Process>,
    /// Case-insensitive text matched against name, process, status, LCID and systems.
    pub filter: Option<String>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            sort: SortSpec::default(),
            process: None,
            filter: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableQuery {
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.page_size == 0 {
            return Err(IntakeError::InvalidPageSize);
        }
        Ok(())
    }

    fn needle(&self) -> Option<String> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a MergedRequest>,
    /// Rows matching the filters, across all pages.
    pub total_rows: usize,
    pub page: usize,
    pub page_count: usize,
}

/// Filter, sort (stable) and paginate `rows`.
pub fn run_query<'a>(
    rows: &'a [MergedRequest],
    query: &TableQuery,
) -> Result<TablePage<'a>, IntakeError> {
    query.validate()?;
    let needle = query.needle();

    let mut matched: Vec<&MergedRequest> = rows
        .iter()
        .filter(|r| query.process.is_none_or(|p| r.process() == p))
        .filter(|r| needle.as_deref().is_none_or(|n| matches_text(r, n)))
        .collect();
    matched.sort_by(|a, b| query.sort.compare(a, b));

    let total_rows = matched.len();
    let page_count = total_rows.div_ceil(query.page_size).max(1);
    let page = query.page.max(1);
    let rows: Vec<&MergedRequest> = matched
        .into_iter()
        .skip((page - 1).saturating_mul(query.page_size))
        .take(query.page_size)
        .collect();

    debug!(
        total_rows,
        page,
        page_count,
        shown = rows.len(),
        sort = %query.sort.column,
        "ran table query"
    );

    Ok(TablePage {
        rows,
        total_rows,
        page,
        page_count,
    })
}

fn matches_text(row: &MergedRequest, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    hit(row.name())
        || hit(row.process().as_str())
        || hit(row.status_code())
        || row.lcid().is_some_and(hit)
        || row.systems().iter().any(|s| hit(s.as_str()))
}
