//! Aggregate Calculator — counts and rounded percentages for stat cards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::listing::predicate::Predicate;
use crate::models::Record;

/// Which collection a stat card summarizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatScope {
    /// Whole collection, regardless of active filters.
    #[default]
    Full,
    /// Only records matching the active filters.
    Filtered,
}

/// Count of records per value of `group_field`. Records without the field are skipped.
pub fn summarize<R: Record>(records: &[R], group_field: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(value) = record.field(group_field) {
            *counts.entry(value.into_owned()).or_insert(0) += 1;
        }
    }
    counts
}

pub fn count_where<R: Record>(records: &[R], predicate: &Predicate) -> usize {
    records.iter().filter(|r| predicate.matches(*r)).count()
}

/// `count / total * 100` rounded half-up; `0` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count * 100 + total / 2) / total) as u32
}

/// Summary block returned by every board's stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BoardStats {
    pub scope: StatScope,
    pub total: usize,
    pub by_group: BTreeMap<String, usize>,
    pub share_by_group: BTreeMap<String, u32>,
}

pub fn board_stats<R: Record>(records: &[R], scope: StatScope) -> BoardStats {
    let total = records.len();
    let by_group = summarize(records, R::GROUP_FIELD);
    let share_by_group = by_group
        .iter()
        .map(|(k, v)| (k.clone(), percentage(*v, total)))
        .collect();
    BoardStats {
        scope,
        total,
        by_group,
        share_by_group,
    }
}

/// Mean of the values, rounded to one decimal; `0.0` for an empty input.
pub fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().map(|v| *v as u64).sum();
    ((sum as f64 / values.len() as f64) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::predicate::{build, Facets};
    use crate::models::Application;
    use crate::seed;

    #[test]
    fn test_summarize_counts_by_status() {
        let counts = summarize(&seed::applications(), "status");
        assert_eq!(counts.get("New"), Some(&3));
        assert_eq!(counts.get("Shortlisted"), Some(&2));
        assert_eq!(counts.get("Rejected"), Some(&1));
    }

    #[test]
    fn test_summarize_skips_missing_fields() {
        let counts = summarize(&seed::applications(), "fit_score");
        assert_eq!(counts.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_empty_collection_is_zero_not_nan() {
        let empty: Vec<Application> = vec![];
        assert!(summarize(&empty, "status").is_empty());
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(mean(&[]), 0.0);

        let stats = board_stats(&empty, StatScope::Full);
        assert_eq!(stats.total, 0);
        assert!(stats.share_by_group.is_empty());
    }

    #[test]
    fn test_percentage_rounds_to_nearest() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(6, 6), 100);
    }

    #[test]
    fn test_count_where_uses_predicate() {
        let mut facets = Facets::new();
        facets.insert("status".to_string(), "New".to_string());
        let p = build::<Application>("", &facets, Application::SEARCHABLE);
        assert_eq!(count_where(&seed::applications(), &p), 3);
    }

    #[test]
    fn test_mean_rounds_to_one_decimal() {
        assert_eq!(mean(&[85, 72, 45, 92]), 73.5);
        assert_eq!(mean(&[1, 2]), 1.5);
    }
}
