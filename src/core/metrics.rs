use crate::core::FunctionRecord;

pub fn average_cyclomatic(functions: &[FunctionRecord]) -> f64 {
    if functions.is_empty() {
        return 0.0;
    }
    let total: u32 = functions.iter().map(|f| f.metrics.cyclomatic).sum();
    f64::from(total) / functions.len() as f64
}

pub fn max_cyclomatic(functions: &[FunctionRecord]) -> u32 {
    functions
        .iter()
        .map(|f| f.metrics.cyclomatic)
        .max()
        .unwrap_or(0)
}

pub fn count_exceeding(functions: &[FunctionRecord], threshold: u32) -> usize {
    functions
        .iter()
        .filter(|f| f.metrics.cyclomatic > threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComplexityMetrics, FunctionRecord};
    use std::path::PathBuf;

    fn record(cyclomatic: u32) -> FunctionRecord {
        FunctionRecord {
            name: "f".to_string(),
            file: PathBuf::from("a.js"),
            line: 1,
            column: 0,
            metrics: ComplexityMetrics {
                cyclomatic,
                ..Default::default()
            },
        }
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_cyclomatic(&[]), 0.0);
    }

    #[test]
    fn average_and_max() {
        let fns = vec![record(1), record(3), record(8)];
        assert_eq!(average_cyclomatic(&fns), 4.0);
        assert_eq!(max_cyclomatic(&fns), 8);
        assert_eq!(count_exceeding(&fns, 2), 2);
    }
}
