//! Plotting seam between the loader and whatever draws the traces.

use crate::data::model::{Trace, TraceKey};

/// X axis caption of every trace chart.
pub const X_AXIS_LABEL: &str = "Time (samples)";
/// Y axis caption of every trace chart.
pub const Y_AXIS_LABEL: &str = "RSSI [dBm]";

/// Receives every trace the loader stores when plotting is enabled.
///
/// Plotting is terminal: implementations draw or buffer the trace and
/// return nothing to the loader.
pub trait TracePlotter {
    fn plot(&mut self, key: &TraceKey, trace: &Trace);
}

/// Legend label of a trace: `mode@modem`.
pub fn trace_label(key: &TraceKey) -> String {
    format!("{}@{}", key.mode, key.modem)
}

/// A trace queued for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedTrace {
    pub key: TraceKey,
    pub label: String,
    pub trace: Trace,
}

impl PlottedTrace {
    /// `[sample index, value]` pairs, ready for a line chart.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.trace
            .samples()
            .iter()
            .enumerate()
            .map(|(i, &y)| [i as f64, y])
            .collect()
    }
}

/// Buffers plotted traces in arrival order so a window can show them after
/// the scan finished.
#[derive(Debug, Default)]
pub struct TraceCollector {
    pub traces: Vec<PlottedTrace>,
}

impl TraceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    pub fn into_traces(self) -> Vec<PlottedTrace> {
        self.traces
    }
}

impl TracePlotter for TraceCollector {
    fn plot(&mut self, key: &TraceKey, trace: &Trace) {
        self.traces.push(PlottedTrace {
            key: key.clone(),
            label: trace_label(key),
            trace: trace.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_mode_at_modem() {
        let key = TraceKey::new("UE_A", "pedestrian_track2", "5G_prx_rsrp", 1);
        assert_eq!(trace_label(&key), "pedestrian_track2@UE_A");
    }

    #[test]
    fn collector_keeps_arrival_order() {
        let mut collector = TraceCollector::new();
        let a = TraceKey::new("UE_B", "los", "m", 2);
        let b = TraceKey::new("UE_A", "los", "m", 1);
        collector.plot(&a, &Trace::new(vec![-90.0, -91.0]));
        collector.plot(&b, &Trace::new(vec![-80.0]));

        let traces = collector.into_traces();
        assert_eq!(traces[0].key, a);
        assert_eq!(traces[0].label, "los@UE_B");
        assert_eq!(traces[0].points(), vec![[0.0, -90.0], [1.0, -91.0]]);
        assert_eq!(traces[1].key, b);
    }
}
