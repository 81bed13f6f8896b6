use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use trace_panda::plot::{PlottedTrace, TraceCollector};
use trace_panda::{Dimension, TraceFilters, TraceLoader, TraceStore};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Selection: which values are shown per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state. A missing dimension shows everything; an
/// empty set shows nothing.
pub type Selection = BTreeMap<Dimension, BTreeSet<String>>;

/// Indices of traces whose every dimension value is selected.
pub fn visible_indices(traces: &[PlottedTrace], selection: &Selection) -> Vec<usize> {
    traces
        .iter()
        .enumerate()
        .filter(|(_, tr)| {
            selection
                .iter()
                .all(|(dim, selected)| selected.contains(&tr.key.field(*dim)))
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Scanner used for "Open folder…"; keeps the schema of the first scan.
    pub loader: TraceLoader,

    /// Command line filters, re-applied on every rescan.
    pub filters: TraceFilters,

    /// Result of the last scan.
    pub store: TraceStore,

    /// Traces in the order the loader produced them.
    pub traces: Vec<PlottedTrace>,

    /// Every value seen per dimension in `store`.
    pub unique: BTreeMap<Dimension, BTreeSet<String>>,

    /// Values currently ticked in the side panel.
    pub selection: Selection,

    /// Indices of traces passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Which dimension is used for colouring.
    pub color_dimension: Option<Dimension>,

    /// Active colour map.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Rescale every visible trace to [0, 1].
    pub minmax_scaling: bool,
}

impl AppState {
    pub fn new(
        loader: TraceLoader,
        filters: TraceFilters,
        store: TraceStore,
        traces: Vec<PlottedTrace>,
    ) -> Self {
        let mut state = AppState {
            loader,
            filters,
            store: TraceStore::new(),
            traces: Vec::new(),
            unique: BTreeMap::new(),
            selection: Selection::new(),
            visible_indices: Vec::new(),
            color_dimension: Some(Dimension::Modem),
            color_map: None,
            status_message: None,
            minmax_scaling: false,
        };
        state.set_scan(store, traces);
        state
    }

    /// Ingest a fresh scan, select everything and rebuild colours.
    pub fn set_scan(&mut self, store: TraceStore, traces: Vec<PlottedTrace>) {
        self.unique = Dimension::ALL
            .into_iter()
            .map(|dim| (dim, store.unique_values(dim)))
            .collect();
        self.store = store;
        self.selection = self.unique.clone();
        self.visible_indices = (0..traces.len()).collect();
        self.traces = traces;
        self.rebuild_color_map();
        self.status_message = None;
    }

    /// Scan another root with the current schema and filters.
    pub fn rescan(&mut self, root: &Path) {
        let loader = TraceLoader::with_schema(root, self.loader.schema().clone());
        let mut collector = TraceCollector::new();
        match loader.load_with(&self.filters, &mut collector) {
            Ok(store) => {
                log::info!("Loaded {} traces from {}", store.len(), root.display());
                self.loader = loader;
                self.set_scan(store, collector.into_traces());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", root.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn rebuild_color_map(&mut self) {
        self.color_map = self.color_dimension.and_then(|dim| {
            self.unique
                .get(&dim)
                .map(|vals| ColorMap::new(dim, vals))
        });
    }

    pub fn set_color_dimension(&mut self, dim: Dimension) {
        self.color_dimension = Some(dim);
        self.rebuild_color_map();
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = visible_indices(&self.traces, &self.selection);
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_value(&mut self, dim: Dimension, value: &str) {
        let selected = self.selection.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(all) = self.unique.get(&dim) {
            self.selection.insert(dim, all.clone());
            self.refilter();
        }
    }

    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.insert(dim, BTreeSet::new());
        self.refilter();
    }
}
