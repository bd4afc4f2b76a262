//! Fixed-width text rendering for request pages and cost rollups.

use chrono::{DateTime, Utc};
use govintake_core::cost::{CostRollup, LIFECYCLE_YEARS};
use govintake_core::{Column, MergedRequest, TablePage};

/// Column order and widths of the request table.
const LAYOUT: &[(Column, usize)] = &[
    (Column::Name, 30),
    (Column::Process, 13),
    (Column::Status, 36),
    (Column::SubmissionDate, 10),
    (Column::Systems, 24),
    (Column::NextMeetingDate, 12),
    (Column::Lcid, 10),
];

// ── Requests ──

pub fn print_request_page(page: &TablePage<'_>) {
    let header: Vec<String> = LAYOUT
        .iter()
        .map(|&(col, width)| pad(col.header(), width))
        .collect();
    println!("{}", header.join("  ").trim_end());
    let rule: Vec<String> = LAYOUT.iter().map(|&(_, width)| "-".repeat(width)).collect();
    println!("{}", rule.join("  "));

    for row in &page.rows {
        let cells: Vec<String> = LAYOUT
            .iter()
            .map(|&(col, width)| pad(&cell(row, col), width))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }

    println!();
    println!(
        "page {} of {} ({} requests)",
        page.page, page.page_count, page.total_rows
    );
}

fn cell(row: &MergedRequest, col: Column) -> String {
    match col {
        Column::Name => row.name().to_string(),
        Column::Process => row.process().to_string(),
        Column::Status => row.status_code().to_string(),
        Column::SubmissionDate => date(row.submission_date()),
        Column::NextMeetingDate => date(row.next_meeting_date()),
        Column::Systems => row.systems().join(", "),
        Column::Lcid => row.lcid().unwrap_or("").to_string(),
    }
}

fn date(d: Option<DateTime<Utc>>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Pad or truncate to exactly `width` characters.
fn pad(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        format!("{s:<width$}")
    }
}

// ── Costs ──

pub fn print_cost_rollup(rollup: &CostRollup) {
    println!("=== {} ===", rollup.solution);

    print!("  {:<28}", "");
    for year in 1..=LIFECYCLE_YEARS {
        print!("{:>12}", format!("Year {year}"));
    }
    println!("{:>14}", "Total");

    for phase in &rollup.phases {
        print!("  {:<28}", phase.phase.label());
        for cost in phase.by_year {
            print!("{:>12}", dollars(cost));
        }
        println!("{:>14}", dollars(phase.total));
    }

    print!("  {:<28}", "Total");
    for cost in rollup.by_year {
        print!("{:>12}", dollars(cost));
    }
    println!("{:>14}", dollars(rollup.total));
    println!();
}

/// `1234567` → `$1,234,567`.
fn dollars(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_truncates_long_values() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("Mainframe retirement", 10), "Mainfra...");
        assert_eq!(pad("Mainframe retirement", 10).chars().count(), 10);
    }

    #[test]
    fn pad_counts_characters_not_bytes() {
        assert_eq!(pad("Négociation", 11), "Négociation");
    }

    #[test]
    fn dollars_group_thousands() {
        assert_eq!(dollars(0), "$0");
        assert_eq!(dollars(999), "$999");
        assert_eq!(dollars(1_000), "$1,000");
        assert_eq!(dollars(1_234_567), "$1,234,567");
        assert_eq!(dollars(-45_000), "-$45,000");
    }

    #[test]
    fn missing_dates_render_as_dash() {
        assert_eq!(date(None), "-");
    }
}
