use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use firewatch_app::config::AppConfig;
use firewatch_app::controller::Controller;
use firewatch_app::drill::{capture_frame, play_realtime, run_drill, DrillScript};
use firewatch_sim::SimulationEngine;

#[derive(Parser)]
#[command(author, version, about = "Fire-detection training simulator")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level data (JSON), overrides `levels_path` from the config
    #[arg(long)]
    levels: Option<PathBuf>,
    /// RNG seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,
    /// Detector the drill triggers
    #[arg(long, default_value = "D-101")]
    detector: String,
    /// Level index the drill runs on
    #[arg(long, default_value_t = 0)]
    level: usize,
    /// Stop the drill after this many frames
    #[arg(long)]
    max_frames: Option<u64>,
    /// Print the display list of this frame as JSON
    #[arg(long)]
    dump_frame: Option<u64>,
    /// Run the drill on the wall clock through the frame-loop thread
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(levels) = args.levels.clone() {
        config.levels_path = Some(levels);
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting firewatch v{}", env!("CARGO_PKG_VERSION"));

    let levels = config.load_levels().context("loading levels")?;
    let Some(level) = levels.get(args.level).cloned() else {
        bail!("level index {} out of range ({} levels)", args.level, levels.len());
    };
    let script = DrillScript::standard(&level, &args.detector, &config.simulation.dwell)
        .with_context(|| format!("detector {} not found on {}", args.detector, level.name))?;

    let mut engine = SimulationEngine::new(config.sim_config(), levels);
    engine.set_current_level(args.level);

    if args.realtime {
        let mut controller = Controller::new();
        controller.start(engine, config.simulation.frame_rate)?;
        let snapshot = play_realtime(&controller, &script, Duration::from_millis(50))?;
        controller.shutdown()?;
        if let Some(snapshot) = snapshot {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        return Ok(());
    }

    let frame_ms = 1000.0 / config.simulation.frame_rate;
    if let Some(index) = args.dump_frame {
        let list = capture_frame(&mut engine, &script, &level, frame_ms, args.max_frames, index)?;
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    let report = run_drill(&mut engine, &script, frame_ms, args.max_frames, |_, _| {});

    for entry in &report.transitions {
        println!("{:>9.1} ms  {:?}", entry.at_ms, entry.stage);
    }
    let stats = &report.final_snapshot.statistics;
    println!(
        "frames={} resolved={} response_time={:.1}s detectors={} zones={} cameras={}",
        report.frames,
        report.resolved(),
        stats.average_response_time,
        stats.total_detectors,
        stats.total_zones,
        stats.active_cameras,
    );
    Ok(())
}
