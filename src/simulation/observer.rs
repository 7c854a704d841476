//! Collaborators that watch a run: frame renderers and stats reporters.
//!
//! The core calls these at fixed points and never lets them change the
//! simulation state.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::info;

use super::agent::Agent;
use super::ecosystem::Ecosystem;
use super::error::SimError;
use super::settings::Settings;
use super::stats::GenerationStats;

/// A read-only view of the ecosystem at one tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Generation index, from zero.
    pub generation: usize,
    /// Tick index within the generation.
    pub tick: usize,
    /// The state after the tick's shuffle.
    pub ecosystem: &'a Ecosystem,
}

/// Receives frames of plotted generations.
pub trait Renderer {
    /// Called once per tick of a generation listed in `plot_gens`.
    fn frame(&mut self, settings: &Settings, frame: &Frame<'_>) -> Result<(), SimError>;

    /// Called after a plotted generation has finished, to assemble its frames.
    fn finish_generation(&mut self, settings: &Settings, generation: usize) -> Result<(), SimError>;
}

/// Receives the statistics of every generation.
pub trait Reporter {
    /// Called once per generation after evolution.
    fn report(&mut self, generation: usize, stats: &GenerationStats) -> Result<(), SimError>;
}

/// Renderer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn frame(&mut self, _settings: &Settings, _frame: &Frame<'_>) -> Result<(), SimError> {
        Ok(())
    }

    fn finish_generation(&mut self, _settings: &Settings, _generation: usize) -> Result<(), SimError> {
        Ok(())
    }
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _generation: usize, _stats: &GenerationStats) -> Result<(), SimError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct AgentRecord<'a> {
    name: &'a str,
    x: f32,
    y: f32,
    heading: f32,
    fitness: f32,
}

impl<'a> From<&'a Agent> for AgentRecord<'a> {
    fn from(agent: &'a Agent) -> Self {
        Self {
            name: &agent.name,
            x: agent.pos[0],
            y: agent.pos[1],
            heading: agent.heading,
            fitness: agent.fitness,
        }
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    generation: usize,
    tick: usize,
    organisms: Vec<AgentRecord<'a>>,
    predators: Vec<AgentRecord<'a>>,
    food: Vec<[f32; 2]>,
}

/// Writes every frame of a plotted generation as one JSON line in
/// `gen-{generation}.jsonl` under a directory.
#[derive(Debug)]
pub struct FrameRecorder {
    dir: PathBuf,
    open: Option<(usize, BufWriter<File>)>,
    written: Vec<PathBuf>,
}

impl FrameRecorder {
    /// Creates the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SimError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            open: None,
            written: Vec::new(),
        })
    }

    /// Path of the frame file for `generation`.
    pub fn path_for(&self, generation: usize) -> PathBuf {
        self.dir.join(format!("gen-{generation}.jsonl"))
    }

    /// Frame files completed so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn writer(&mut self, generation: usize) -> Result<&mut BufWriter<File>, SimError> {
        if matches!(&self.open, Some((open_gen, _)) if *open_gen != generation) {
            self.close()?;
        }
        let writer = match self.open.take() {
            Some((_, writer)) => writer,
            None => BufWriter::new(File::create(self.path_for(generation))?),
        };
        let (_, writer) = self.open.insert((generation, writer));
        Ok(writer)
    }

    fn close(&mut self) -> Result<(), SimError> {
        if let Some((generation, mut writer)) = self.open.take() {
            writer.flush()?;
            self.written.push(self.path_for(generation));
        }
        Ok(())
    }
}

impl Renderer for FrameRecorder {
    fn frame(&mut self, _settings: &Settings, frame: &Frame<'_>) -> Result<(), SimError> {
        let record = FrameRecord {
            generation: frame.generation,
            tick: frame.tick,
            organisms: frame.ecosystem.organisms.iter().map(AgentRecord::from).collect(),
            predators: frame.ecosystem.predators.iter().map(AgentRecord::from).collect(),
            food: frame.ecosystem.food.iter().map(|f| [f.pos[0], f.pos[1]]).collect(),
        };
        let writer = self.writer(frame.generation)?;
        serde_json::to_writer(&mut *writer, &record)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish_generation(&mut self, _settings: &Settings, generation: usize) -> Result<(), SimError> {
        self.close()?;
        info!(generation = generation + 1, path = %self.path_for(generation).display(), "frames recorded");
        Ok(())
    }
}

/// Prints one colored line per generation.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    /// Reports to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Gives back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, generation: usize, stats: &GenerationStats) -> Result<(), SimError> {
        writeln!(
            self.out,
            " > GEN-{} : {} {} {}",
            generation + 1,
            format!("BEST: {:.2}", stats.best).green(),
            format!("AVG: {:.2}", stats.avg).blue(),
            format!("WORST: {:.2}", stats.worst).red(),
        )?;
        Ok(())
    }
}
