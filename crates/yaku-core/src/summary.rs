//! Numeric summary of the active flow table

use crate::format::format_number;
use crate::models::ActiveFlowTable;

/// Summary card contents
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// Entries with positive flow
    pub active_count: usize,
    /// All entries in the table
    pub total_count: usize,
    pub total_flow: f64,
}

impl Summary {
    /// `"active/total"` as shown on the summary card
    #[must_use]
    pub fn ratio_label(&self) -> String {
        format!("{}/{}", self.active_count, self.total_count)
    }

    #[must_use]
    pub fn total_flow_label(&self) -> String {
        format!("{} L/h", format_number(self.total_flow))
    }
}

/// Computed solely from `active`, so it always matches what is drawn.
#[must_use]
pub fn summarize(active: &ActiveFlowTable) -> Summary {
    Summary {
        active_count: active.values().filter(|flow| *flow > 0.0).count(),
        total_count: active.len(),
        total_flow: active.values().sum(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::NodeId;

    #[test]
    fn test_empty_table_is_all_zero() {
        let summary = summarize(&ActiveFlowTable::new());
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.ratio_label(), "0/0");
    }

    #[test]
    fn test_counts_and_total() {
        let mut active = ActiveFlowTable::new();
        active.record(&NodeId::new("N1").unwrap(), 100.0);
        active.record(&NodeId::new("N2").unwrap(), 300.0);

        let summary = summarize(&active);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.total_count, 2);
        assert!((summary.total_flow - 400.0).abs() < 1e-9);
        assert_eq!(summary.ratio_label(), "2/2");
        assert_eq!(summary.total_flow_label(), "400 L/h");
    }

    #[test]
    fn test_summary_is_deterministic() {
        let mut active = ActiveFlowTable::new();
        active.record(&NodeId::new("a").unwrap(), 1234.5);
        assert_eq!(summarize(&active), summarize(&active));
    }
}
