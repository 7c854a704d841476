use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use evolving_organisms::simulation::generations::simulate_all_generations;
use evolving_organisms::simulation::observer::{ConsoleReporter, FrameRecorder, NoopRenderer, Renderer};
use evolving_organisms::simulation::rng::RngStreams;
use evolving_organisms::simulation::settings::Settings;

/// Evolve organisms and predators with perceptron brains.
#[derive(Debug, Parser)]
#[command(name = "evolving-organisms", version, about = "Evolve organisms and predators in a 2D arena")]
struct Cli {
    /// JSON settings file; missing keys keep their defaults.
    #[arg(short, long, env = "EVO_SETTINGS")]
    config: Option<PathBuf>,
    /// Override the random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of generations.
    #[arg(long)]
    gens: Option<usize>,
    /// Override the ticks per generation.
    #[arg(long)]
    ticks: Option<usize>,
    /// Record frames of the plotted generations into this directory.
    #[arg(long, value_name = "DIR")]
    frames: Option<PathBuf>,
    /// Write the per-generation statistics to this JSON file.
    #[arg(long, value_name = "FILE")]
    stats_out: Option<PathBuf>,
    /// Print the effective settings as JSON and exit.
    #[arg(long)]
    dump_settings: bool,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(gens) = cli.gens {
        settings.gens = gens;
    }
    if let Some(ticks) = cli.ticks {
        settings.ticks = ticks;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    if cli.dump_settings {
        serde_json::to_writer_pretty(io::stdout().lock(), &settings).context("printing settings")?;
        println!();
        return Ok(());
    }

    let mut renderer: Box<dyn Renderer> = match &cli.frames {
        Some(dir) => Box::new(
            FrameRecorder::new(dir).with_context(|| format!("creating frame directory {}", dir.display()))?,
        ),
        None => Box::new(NoopRenderer),
    };
    let mut reporter = ConsoleReporter::new(io::stdout().lock());
    let mut streams = RngStreams::from_seed(settings.seed);

    let history = simulate_all_generations(&settings, &mut streams, renderer.as_mut(), &mut reporter)
        .context("simulation failed")?;

    if let Some(path) = &cli.stats_out {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &history)
            .with_context(|| format!("writing statistics to {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flushing statistics to {}", path.display()))?;
    }
    Ok(())
}
