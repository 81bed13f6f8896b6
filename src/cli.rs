use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use trace_panda::{PathSchema, TraceFilters, TraceLoader, TraceStore};

/// Parse and plot RSRP/RSSI trace data.
#[derive(Parser, Debug)]
#[command(name = "trace-panda", version, about)]
pub struct Cli {
    /// Modems to include, e.g. UE_A,UE_B,UE_C
    #[arg(long, value_delimiter = ',')]
    pub modems: Vec<String>,

    /// Channel metrics to include, e.g. 5G_drx_rsrp,5G_prx_rsrp,4G_prx_rsrp
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<String>,

    /// Modes to include, e.g. agv,pedestrian,los
    #[arg(long, value_delimiter = ',')]
    pub modes: Vec<String>,

    /// Tracks to include, e.g. track1,track2
    #[arg(long, value_delimiter = ',')]
    pub tracks: Vec<String>,

    /// Directory holding the CSV tree
    #[arg(long, default_value = "csv")]
    pub root: PathBuf,

    /// Show the loaded traces in a plot window
    #[arg(long)]
    pub plot: bool,

    /// JSON file describing which path segment holds which key
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn filters(&self) -> TraceFilters {
        TraceFilters::new()
            .modems(self.modems.iter().cloned())
            .metrics(self.metrics.iter().cloned())
            .modes(self.modes.iter().cloned())
            .tracks(self.tracks.iter().cloned())
    }

    pub fn loader(&self) -> Result<TraceLoader> {
        let schema = match &self.schema {
            Some(path) => PathSchema::from_file(path)
                .with_context(|| format!("loading path schema {}", path.display()))?,
            None => PathSchema::default(),
        };
        Ok(TraceLoader::with_schema(&self.root, schema))
    }
}

// ---------------------------------------------------------------------------
// Summary output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub modem: String,
    pub mode: String,
    pub metric: String,
    pub trial_id: i64,
    pub samples: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn summary_rows(store: &TraceStore) -> Vec<SummaryRow> {
    store
        .iter()
        .map(|(key, trace)| {
            let range = trace.range();
            SummaryRow {
                modem: key.modem,
                mode: key.mode,
                metric: key.metric,
                trial_id: key.trial_id,
                samples: trace.len(),
                min: range.map(|(min, _)| min),
                max: range.map(|(_, max)| max),
            }
        })
        .collect()
}

pub fn render_summary(store: &TraceStore, json: bool) -> Result<String> {
    let rows = summary_rows(store);
    if json {
        return serde_json::to_string_pretty(&rows).context("serializing summary");
    }

    let mut out = String::new();
    for row in &rows {
        out.push_str(&format!(
            "{}/{}/{}/{}: {} samples\n",
            row.modem, row.mode, row.metric, row.trial_id, row.samples
        ));
    }
    out.push_str(&format!("{} traces loaded", rows.len()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_panda::{Trace, TraceKey};

    #[test]
    fn lists_split_on_commas() {
        let cli = Cli::try_parse_from([
            "trace-panda",
            "--modems",
            "UE_A,UE_B",
            "--tracks",
            "track1",
        ])
        .unwrap();
        assert_eq!(cli.modems, vec!["UE_A", "UE_B"]);
        assert_eq!(cli.tracks, vec!["track1"]);
        assert!(cli.metrics.is_empty());
        assert_eq!(cli.root, PathBuf::from("csv"));
        assert!(!cli.plot);

        let filters = cli.filters();
        assert_eq!(filters.modems, vec!["UE_A", "UE_B"]);
        assert!(filters.modes.is_empty());
    }

    #[test]
    fn absent_lists_mean_no_filter() {
        let cli = Cli::try_parse_from(["trace-panda", "--root", "data", "--plot"]).unwrap();
        assert!(cli.filters().is_empty());
        assert!(cli.plot);
        assert_eq!(cli.loader().unwrap().root(), PathBuf::from("data").as_path());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["trace-panda", "--verbose-ish"]).is_err());
    }

    #[test]
    fn summary_lists_every_trace() {
        let mut store = TraceStore::new();
        store.insert(
            TraceKey::new("UE_A", "los", "5G_drx_rsrp", 1),
            Trace::new(vec![-80.0, -81.0, -79.0]),
        );

        let text = render_summary(&store, false).unwrap();
        assert_eq!(text, "UE_A/los/5G_drx_rsrp/1: 3 samples\n1 traces loaded");

        let rows = summary_rows(&store);
        assert_eq!(rows[0].min, Some(-81.0));
        assert_eq!(rows[0].max, Some(-79.0));

        let json = render_summary(&store, true).unwrap();
        assert!(json.contains("\"samples\": 3"));
    }
}
