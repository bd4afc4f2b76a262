//! Lifecycle cost rollup for business case solutions.
//!
//! A business case estimates costs for each solution over a five-year
//! lifecycle, split by phase. Reviewers see per-phase and per-year totals.

use serde::{Deserialize, Serialize};

use crate::IntakeError;

pub const LIFECYCLE_YEARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostPhase {
    Development,
    OperationsAndMaintenance,
    Other,
}

impl CostPhase {
    pub const ALL: [CostPhase; 3] = [
        CostPhase::Development,
        CostPhase::OperationsAndMaintenance,
        CostPhase::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostPhase::Development => "Development",
            CostPhase::OperationsAndMaintenance => "Operations and Maintenance",
            CostPhase::Other => "Other",
        }
    }

    fn index(self) -> usize {
        match self {
            CostPhase::Development => 0,
            CostPhase::OperationsAndMaintenance => 1,
            CostPhase::Other => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleYear {
    #[serde(rename = "1")]
    Year1,
    #[serde(rename = "2")]
    Year2,
    #[serde(rename = "3")]
    Year3,
    #[serde(rename = "4")]
    Year4,
    #[serde(rename = "5")]
    Year5,
}

impl LifecycleYear {
    fn index(self) -> usize {
        match self {
            LifecycleYear::Year1 => 0,
            LifecycleYear::Year2 => 1,
            LifecycleYear::Year3 => 2,
            LifecycleYear::Year4 => 3,
            LifecycleYear::Year5 => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub phase: CostPhase,
    pub year: LifecycleYear,
    /// Whole dollars. `None` is an estimate the requester left blank.
    #[serde(default)]
    pub cost: Option<i64>,
}

/// Cost estimates for one business case solution ("Preferred", "A", "B").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleCosts {
    pub solution: String,
    #[serde(default)]
    pub lines: Vec<CostLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTotals {
    pub phase: CostPhase,
    pub by_year: [i64; LIFECYCLE_YEARS],
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostRollup {
    pub solution: String,
    /// One entry per [`CostPhase`], in [`CostPhase::ALL`] order.
    pub phases: Vec<PhaseTotals>,
    pub by_year: [i64; LIFECYCLE_YEARS],
    pub total: i64,
}

/// Sum a solution's cost lines by phase and year. Blank estimates count as zero.
pub fn rollup(costs: &LifecycleCosts) -> Result<CostRollup, IntakeError> {
    let overflow = || IntakeError::CostOverflow {
        solution: costs.solution.clone(),
    };

    let mut grid = [[0i64; LIFECYCLE_YEARS]; 3];
    for line in &costs.lines {
        let cost = line.cost.unwrap_or(0);
        if cost < 0 {
            return Err(IntakeError::NegativeCost {
                solution: costs.solution.clone(),
                cost,
            });
        }
        let cell = &mut grid[line.phase.index()][line.year.index()];
        *cell = cell.checked_add(cost).ok_or_else(overflow)?;
    }

    let mut by_year = [0i64; LIFECYCLE_YEARS];
    let mut total = 0i64;
    let mut phases = Vec::with_capacity(CostPhase::ALL.len());
    for phase in CostPhase::ALL {
        let row = grid[phase.index()];
        let mut phase_total = 0i64;
        for (year, cost) in row.iter().enumerate() {
            phase_total = phase_total.checked_add(*cost).ok_or_else(overflow)?;
            by_year[year] = by_year[year].checked_add(*cost).ok_or_else(overflow)?;
        }
        total = total.checked_add(phase_total).ok_or_else(overflow)?;
        phases.push(PhaseTotals {
            phase,
            by_year: row,
            total: phase_total,
        });
    }

    Ok(CostRollup {
        solution: costs.solution.clone(),
        phases,
        by_year,
        total,
    })
}

/// Decode a JSON array of solutions.
pub fn decode_lifecycle_costs(json: &str) -> Result<Vec<LifecycleCosts>, IntakeError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(phase: CostPhase, year: LifecycleYear, cost: Option<i64>) -> CostLine {
        CostLine { phase, year, cost }
    }

    #[test]
    fn totals_by_phase_and_year() {
        let costs = LifecycleCosts {
            solution: "Preferred".into(),
            lines: vec![
                line(CostPhase::Development, LifecycleYear::Year1, Some(100_000)),
                line(CostPhase::Development, LifecycleYear::Year2, Some(50_000)),
                line(CostPhase::OperationsAndMaintenance, LifecycleYear::Year2, Some(20_000)),
                line(CostPhase::OperationsAndMaintenance, LifecycleYear::Year5, Some(25_000)),
                line(CostPhase::Other, LifecycleYear::Year3, None),
            ],
        };
        let r = rollup(&costs).unwrap();
        assert_eq!(r.phases.len(), 3);
        assert_eq!(r.phases[0].by_year, [100_000, 50_000, 0, 0, 0]);
        assert_eq!(r.phases[0].total, 150_000);
        assert_eq!(r.phases[1].total, 45_000);
        assert_eq!(r.phases[2].total, 0);
        assert_eq!(r.by_year, [100_000, 70_000, 0, 0, 25_000]);
        assert_eq!(r.total, 195_000);
    }

    #[test]
    fn repeated_cells_accumulate() {
        let costs = LifecycleCosts {
            solution: "A".into(),
            lines: vec![
                line(CostPhase::Other, LifecycleYear::Year4, Some(7)),
                line(CostPhase::Other, LifecycleYear::Year4, Some(8)),
            ],
        };
        let r = rollup(&costs).unwrap();
        assert_eq!(r.phases[2].by_year[3], 15);
        assert_eq!(r.total, 15);
    }

    #[test]
    fn empty_solution_rolls_up_to_zero() {
        let r = rollup(&LifecycleCosts {
            solution: "B".into(),
            lines: Vec::new(),
        })
        .unwrap();
        assert_eq!(r.total, 0);
        assert!(r.phases.iter().all(|p| p.total == 0));
    }

    #[test]
    fn negative_cost_is_rejected() {
        let costs = LifecycleCosts {
            solution: "A".into(),
            lines: vec![line(CostPhase::Development, LifecycleYear::Year1, Some(-5))],
        };
        assert!(matches!(
            rollup(&costs),
            Err(IntakeError::NegativeCost { cost: -5, .. })
        ));
    }

    #[test]
    fn overflow_is_reported() {
        let costs = LifecycleCosts {
            solution: "A".into(),
            lines: vec![
                line(CostPhase::Development, LifecycleYear::Year1, Some(i64::MAX)),
                line(CostPhase::Development, LifecycleYear::Year2, Some(1)),
            ],
        };
        assert!(matches!(
            rollup(&costs),
            Err(IntakeError::CostOverflow { .. })
        ));
    }

    #[test]
    fn decodes_business_case_export() {
        let json = r#"[{
            "solution": "Preferred",
            "lines": [
                {"phase": "DEVELOPMENT", "year": "1", "cost": 1200},
                {"phase": "OPERATIONS_AND_MAINTENANCE", "year": "3", "cost": null}
            ]
        }]"#;
        let solutions = decode_lifecycle_costs(json).unwrap();
        assert_eq!(solutions[0].lines.len(), 2);
        assert_eq!(solutions[0].lines[1].year, LifecycleYear::Year3);
        assert_eq!(rollup(&solutions[0]).unwrap().total, 1200);
    }
}
