use anyhow::{anyhow, Result};
use eframe::egui;

use trace_panda::plot::PlottedTrace;
use trace_panda::{TraceFilters, TraceLoader, TraceStore};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TracePandaApp {
    pub state: AppState,
}

impl TracePandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TracePandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::trace_plot(ui, &self.state);
        });
    }
}

/// Open the viewer window and block until it is closed.
pub fn run_viewer(
    loader: TraceLoader,
    filters: TraceFilters,
    store: TraceStore,
    traces: Vec<PlottedTrace>,
) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(loader, filters, store, traces);
    eframe::run_native(
        "Trace Panda – Signal Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(TracePandaApp::new(state)))),
    )
    .map_err(|e| anyhow!("plot window failed: {e}"))
}
