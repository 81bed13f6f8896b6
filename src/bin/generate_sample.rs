use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use trace_panda::{PathSchema, TraceKey};

/// Write a synthetic trace tree in the layout the loader expects.
#[derive(Parser, Debug)]
struct Args {
    /// Output root
    #[arg(long, default_value = "csv")]
    out: PathBuf,

    /// Trials per modem, mode and metric
    #[arg(long, default_value_t = 3)]
    trials: i64,

    /// Samples per trace
    #[arg(long, default_value_t = 600)]
    samples: usize,
}

/// Mean-reverting random walk around `level` dBm, rounded to whole dB like
/// modem reports.
fn generate_trace(level: f64, noise: &Normal<f64>, n: usize, rng: &mut StdRng) -> Vec<f64> {
    let mut value = level;
    (0..n)
        .map(|_| {
            value += 0.1 * (level - value) + noise.sample(rng);
            value.round()
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(42);
    let schema = PathSchema::default();

    let modes = [
        ("agv_track1", 2.0),
        ("agv_track2", 2.5),
        ("pedestrian_track1", 1.0),
        ("los", 0.5),
    ];
    let modems = [("UE_A", -82.0), ("UE_B", -88.0), ("UE_C", -95.0)];
    let metrics = [("5G_drx_rsrp", 0.0), ("5G_prx_rsrp", -2.0), ("4G_prx_rsrp", 4.0)];

    let mut written = 0usize;
    for (mode, volatility) in modes {
        let noise = Normal::new(0.0, volatility)
            .with_context(|| format!("invalid volatility {volatility}"))?;
        for (modem, level) in modems {
            for (metric, offset) in metrics {
                for trial in 0..args.trials {
                    let key = TraceKey::new(modem, mode, metric, trial);
                    let path = args.out.join(schema.path_for("campaign", &key));
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }

                    let trace = generate_trace(level + offset, &noise, args.samples, &mut rng);
                    let mut writer = csv::Writer::from_path(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    writer
                        .write_record(trace.iter().map(|v| v.to_string()))
                        .with_context(|| format!("writing {}", path.display()))?;
                    writer
                        .flush()
                        .with_context(|| format!("flushing {}", path.display()))?;
                    written += 1;
                }
            }
        }
    }

    println!(
        "Wrote {written} traces ({} samples each) below {}",
        args.samples,
        args.out.display()
    );
    Ok(())
}
