use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trace – one measurement run
// ---------------------------------------------------------------------------

/// An ordered sequence of signal samples (dBm) from a single run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace(Vec<f64>);

impl Trace {
    pub fn new(samples: Vec<f64>) -> Self {
        Trace(samples)
    }

    pub fn samples(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(min, max)` over all samples, `None` for an empty trace.
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.0.is_empty() {
            return None;
        }
        let min = self.0.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.0.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

impl PartialEq<Vec<f64>> for Trace {
    fn eq(&self, other: &Vec<f64>) -> bool {
        &self.0 == other
    }
}

// ---------------------------------------------------------------------------
// TraceKey – the classification tuple of a trace file
// ---------------------------------------------------------------------------

/// The `(modem, mode, metric, trial_id)` tuple decoded from a trace path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TraceKey {
    pub modem: String,
    pub mode: String,
    pub metric: String,
    pub trial_id: i64,
}

impl TraceKey {
    pub fn new(
        modem: impl Into<String>,
        mode: impl Into<String>,
        metric: impl Into<String>,
        trial_id: i64,
    ) -> Self {
        TraceKey {
            modem: modem.into(),
            mode: mode.into(),
            metric: metric.into(),
            trial_id,
        }
    }

    /// The value of one dimension, rendered as text.
    pub fn field(&self, dimension: Dimension) -> String {
        match dimension {
            Dimension::Modem => self.modem.clone(),
            Dimension::Mode => self.mode.clone(),
            Dimension::Metric => self.metric.clone(),
            Dimension::Trial => self.trial_id.to_string(),
        }
    }
}

impl fmt::Display for TraceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.modem, self.mode, self.metric, self.trial_id
        )
    }
}

// ---------------------------------------------------------------------------
// Dimension – one level of the store hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Modem,
    Mode,
    Metric,
    Trial,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Modem,
        Dimension::Mode,
        Dimension::Metric,
        Dimension::Trial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Modem => "modem",
            Dimension::Mode => "mode",
            Dimension::Metric => "metric",
            Dimension::Trial => "trial",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_joins_fields() {
        let key = TraceKey::new("UE_A", "agv_track1", "5G_drx_rsrp", 3);
        assert_eq!(key.to_string(), "UE_A/agv_track1/5G_drx_rsrp/3");
        assert_eq!(key.field(Dimension::Trial), "3");
        assert_eq!(key.field(Dimension::Mode), "agv_track1");
    }

    #[test]
    fn trace_range() {
        let trace = Trace::new(vec![-80.0, -95.5, -71.0]);
        assert_eq!(trace.range(), Some((-95.5, -71.0)));
        assert_eq!(Trace::default().range(), None);
    }

    #[test]
    fn trace_serializes_as_plain_array() {
        let trace = Trace::new(vec![1.5, 2.5]);
        assert_eq!(serde_json::to_string(&trace).unwrap(), "[1.5,2.5]");
    }
}
