mod app;
mod cli;
mod color;
mod state;
mod ui;

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use trace_panda::plot::TraceCollector;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let loader = cli.loader()?;
    let filters = cli.filters();

    let start = Instant::now();
    let mut collector = TraceCollector::new();
    let loaded = if cli.plot {
        loader.load_with(&filters, &mut collector)
    } else {
        loader.load(&filters)
    };
    let store =
        loaded.with_context(|| format!("loading traces from {}", loader.root().display()))?;
    log::info!("Elapsed time: {:.2}s", start.elapsed().as_secs_f64());

    println!("{}", cli::render_summary(&store, cli.json)?);

    if cli.plot {
        if collector.is_empty() {
            log::warn!("No traces to plot");
        } else {
            app::run_viewer(loader, filters, store, collector.into_traces())?;
        }
    }
    Ok(())
}
