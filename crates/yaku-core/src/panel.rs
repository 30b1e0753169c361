//! Results panel view model

use crate::format::format_number;
use crate::models::{ActiveFlowTable, NodeId};
use crate::summary::Summary;

/// One `node, n L/h` badge
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEntry {
    pub node: NodeId,
    pub flow: f64,
}

impl FlowEntry {
    #[must_use]
    pub fn flow_label(&self) -> String {
        format!("{} L/h", format_number(self.flow))
    }
}

/// Body of the results panel after a successful cycle
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPanel {
    /// Reservoir the cycle was computed from
    pub source: String,
    pub entries: Vec<FlowEntry>,
    pub summary: Summary,
    pub processing_ms: Option<f64>,
    /// Backend id of the stored run, when it was persisted
    pub processing_id: Option<i64>,
}

impl ResultsPanel {
    #[must_use]
    pub fn new(source: impl Into<String>, active: &ActiveFlowTable, summary: Summary) -> Self {
        Self {
            source: source.into(),
            entries: active
                .iter()
                .map(|(node, flow)| FlowEntry {
                    node: node.clone(),
                    flow,
                })
                .collect(),
            summary,
            processing_ms: None,
            processing_id: None,
        }
    }

    #[must_use]
    pub fn with_processing_ms(mut self, processing_ms: Option<f64>) -> Self {
        self.processing_ms = processing_ms;
        self
    }

    #[must_use]
    pub fn with_processing_id(mut self, processing_id: Option<i64>) -> Self {
        self.processing_id = processing_id;
        self
    }

    /// Entries grouped in pairs, one pair per column block
    pub fn rows(&self) -> impl Iterator<Item = &[FlowEntry]> + '_ {
        self.entries.chunks(2)
    }

    #[must_use]
    pub fn processing_label(&self) -> Option<String> {
        let time = self
            .processing_ms
            .map(|ms| format!("Processing time: {} ms", format_number(ms)));
        match (time, self.processing_id) {
            (Some(time), Some(id)) => Some(format!("{time} (run #{id})")),
            (Some(time), None) => Some(time),
            (None, Some(id)) => Some(format!("Run #{id}")),
            (None, None) => None,
        }
    }
}

/// What the results panel shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelView {
    #[default]
    Idle,
    Processing,
    Results(ResultsPanel),
    /// The cycle succeeded but no route node carries flow
    NoActiveRoutes { source: String },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::summary::summarize;

    fn table(entries: &[(&str, f64)]) -> ActiveFlowTable {
        let mut active = ActiveFlowTable::new();
        for (id, flow) in entries {
            active.record(&NodeId::new(*id).unwrap(), *flow);
        }
        active
    }

    #[test]
    fn test_rows_pair_entries() {
        let active = table(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        let panel = ResultsPanel::new("E1", &active, summarize(&active));
        let rows: Vec<usize> = panel.rows().map(<[FlowEntry]>::len).collect();
        assert_eq!(rows, vec![2, 1]);
    }

    #[test]
    fn test_entries_keep_table_order() {
        let active = table(&[("z", 1500.0), ("a", 2.0)]);
        let panel = ResultsPanel::new("E1", &active, summarize(&active));
        assert_eq!(panel.entries[0].node.as_str(), "z");
        assert_eq!(panel.entries[0].flow_label(), "1,500 L/h");
    }

    #[test]
    fn test_processing_label_is_optional() {
        let active = table(&[("a", 1.0)]);
        let panel = ResultsPanel::new("E1", &active, summarize(&active));
        assert!(panel.processing_label().is_none());
        let panel = panel.with_processing_ms(Some(1234.0));
        assert_eq!(panel.processing_label().as_deref(), Some("Processing time: 1,234 ms"));
    }

    #[test]
    fn test_processing_label_names_the_stored_run() {
        let active = table(&[("a", 1.0)]);
        let panel = ResultsPanel::new("E1", &active, summarize(&active)).with_processing_id(Some(42));
        assert_eq!(panel.processing_label().as_deref(), Some("Run #42"));
        let panel = panel.with_processing_ms(Some(12.5));
        assert_eq!(
            panel.processing_label().as_deref(),
            Some("Processing time: 12.5 ms (run #42)")
        );
    }
}
