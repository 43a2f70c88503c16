//! Execution-cost estimation over a catalog of operations.
//!
//! Costs come from an external catalog provider (the unit depends on the
//! target runtime). Operations above half the configured ceiling get a
//! proposed optimized estimate at a fixed 30% reduction.

use crate::core::{Severity, Violation};
use crate::errors::AuditError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationCost {
    pub name: String,
    pub cost: u64,
}

pub trait CostProvider: Send + Sync {
    fn catalog(&self) -> Result<Vec<OperationCost>, AuditError>;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostEstimate {
    pub name: String,
    pub cost: u64,
    pub optimized: u64,
    pub savings: u64,
}

#[derive(Clone, Debug, Default)]
pub struct CostReport {
    pub average: f64,
    pub max: u64,
    pub estimates: Vec<CostEstimate>,
    pub average_over_budget: bool,
    pub violations: Vec<Violation>,
}

pub fn analyze_costs(catalog: &[OperationCost], ceiling: u64) -> CostReport {
    if catalog.is_empty() {
        return CostReport::default();
    }

    let total: u64 = catalog.iter().map(|op| op.cost).sum();
    let average = total as f64 / catalog.len() as f64;
    let max = catalog.iter().map(|op| op.cost).max().unwrap_or(0);
    let half_ceiling = ceiling / 2;

    let estimates: Vec<CostEstimate> = catalog
        .iter()
        .filter(|op| op.cost > half_ceiling)
        .map(|op| {
            let optimized = op.cost * 7 / 10;
            CostEstimate {
                name: op.name.clone(),
                cost: op.cost,
                optimized,
                savings: op.cost - optimized,
            }
        })
        .collect();

    let mut violations = Vec::new();
    for op in catalog.iter().filter(|op| op.cost > ceiling) {
        violations.push(Violation {
            rule: "performance/operation-cost".to_string(),
            severity: Severity::High,
            file: PathBuf::from(&op.name),
            line: 1,
            column: 0,
            message: format!("Operation '{}' costs {} (ceiling: {ceiling})", op.name, op.cost),
            recommendation: format!(
                "Optimize '{}'; an estimated {} is achievable",
                op.name,
                op.cost * 7 / 10
            ),
            excerpt: None,
        });
    }

    CostReport {
        average,
        max,
        estimates,
        average_over_budget: average > half_ceiling as f64,
        violations,
    }
}
