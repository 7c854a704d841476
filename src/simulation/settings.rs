//! Simulation settings.
//!
//! Every recognised option lives in [`Settings`] with a default. Settings are
//! loaded from a (possibly partial) JSON object and validated once, before any
//! simulation work starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::agent::SENSE_CHANNELS;
use super::arena::{Arena, Boundary};
use super::brain::MOTOR_OUTPUTS;

/// Errors raised while loading or validating [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A setting holds a value the simulation cannot run with.
    #[error("setting `{key}` is invalid: {reason}")]
    Invalid {
        /// Name of the offending key, as spelled in the settings file.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The settings file is not valid JSON or contains unknown keys.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Simulation parameters consumed by every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Number of generations to simulate.
    pub gens: usize,
    /// Ticks per generation.
    pub ticks: usize,
    /// Number of food items in the arena.
    pub food_num: usize,
    /// Organism population size, held constant across generations.
    pub org_num: usize,
    /// Number of predators (only used when `pred_create` is set).
    pub pred_num: usize,
    /// Whether predators are created at all.
    pub pred_create: bool,
    /// Hidden layer width.
    pub hnodes: usize,
    /// Number of sensory inputs fed to the brain.
    pub inodes: usize,
    /// Number of brain outputs (turn, thrust).
    pub onodes: usize,
    /// How far organisms can sense anything.
    pub org_vision_dist: f32,
    /// Distance at which an organism eats food.
    pub org_eat_dist: f32,
    /// Distance at which a predator catches an organism.
    pub pred_eat_dist: f32,
    /// How far predators can sense organisms.
    pub pred_vision_dist: f32,
    /// Distance under which two organisms are considered overlapping.
    pub org_org_dist: f32,
    /// Fitness lost by an organism per tick spent overlapping another.
    pub org_org_penalty: f32,
    /// Generations for which frames are rendered.
    pub plot_gens: Vec<usize>,

    /// Fraction of the ranked population kept as breeding stock.
    pub elitism: f32,
    /// Per-weight probability of a mutation.
    pub mutation_rate: f32,
    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// Weights are initialised in and clipped to `[-weight_limit, weight_limit]`.
    pub weight_limit: f32,
    /// Fresh random individuals injected each generation.
    pub fresh_num: usize,
    /// Blend two parents instead of cloning one.
    pub crossover: bool,
    /// Whether predators evolve too.
    pub pred_evolve: bool,

    /// Time step per tick.
    pub dt: f32,
    /// Maximum turn rate in radians per unit time.
    pub dr_max: f32,
    /// Maximum speed.
    pub v_max: f32,
    /// Maximum acceleration.
    pub dv_max: f32,
    /// Left arena edge.
    pub x_min: f32,
    /// Right arena edge.
    pub x_max: f32,
    /// Bottom arena edge.
    pub y_min: f32,
    /// Top arena edge.
    pub y_max: f32,
    /// What happens at the arena edges.
    pub boundary: Boundary,

    /// Energy of a food item, added to fitness when eaten.
    pub food_energy: f32,
    /// Fitness a predator gains per organism caught.
    pub pred_kill_reward: f32,
    /// Seed for all random streams.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gens: 50,
            ticks: 250,
            food_num: 100,
            org_num: 50,
            pred_num: 5,
            pred_create: false,
            hnodes: 5,
            inodes: 1,
            onodes: MOTOR_OUTPUTS,
            org_vision_dist: 1.0,
            org_eat_dist: 0.075,
            pred_eat_dist: 0.1,
            pred_vision_dist: 1.5,
            org_org_dist: 0.05,
            org_org_penalty: 0.1,
            plot_gens: Vec::new(),

            elitism: 0.2,
            mutation_rate: 0.1,
            mutation_sigma: 0.2,
            weight_limit: 1.0,
            fresh_num: 0,
            crossover: false,
            pred_evolve: false,

            dt: 0.04,
            dr_max: 4.0 * std::f32::consts::PI,
            v_max: 0.5,
            dv_max: 0.25,
            x_min: -2.0,
            x_max: 2.0,
            y_min: -2.0,
            y_max: 2.0,
            boundary: Boundary::Clamp,

            food_energy: 1.0,
            pred_kill_reward: 1.0,
            seed: 42,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses settings from a JSON string. Missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The arena described by these settings.
    pub fn arena(&self) -> Arena {
        Arena {
            x_min: self.x_min,
            x_max: self.x_max,
            y_min: self.y_min,
            y_max: self.y_max,
            boundary: self.boundary,
        }
    }

    /// Number of top-ranked organisms kept as breeding stock.
    pub fn survivor_count(&self) -> usize {
        Self::stock_size(self.elitism, self.org_num)
    }

    /// Number of top-ranked predators kept as breeding stock.
    pub fn predator_survivor_count(&self) -> usize {
        Self::stock_size(self.elitism, self.pred_num)
    }

    fn stock_size(elitism: f32, population: usize) -> usize {
        ((elitism * population as f32).floor() as usize)
            .max(1)
            .min(population)
    }

    /// Whether frames are rendered for `generation`.
    pub fn plots(&self, generation: usize) -> bool {
        self.plot_gens.contains(&generation)
    }

    /// Checks every option, reporting the first offending key.
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive_count("gens", self.gens)?;
        positive_count("ticks", self.ticks)?;
        positive_count("food_num", self.food_num)?;
        positive_count("org_num", self.org_num)?;
        if self.pred_create {
            positive_count("pred_num", self.pred_num)?;
        }
        positive_count("hnodes", self.hnodes)?;
        positive_count("inodes", self.inodes)?;
        if self.inodes > SENSE_CHANNELS {
            return Err(invalid(
                "inodes",
                format!("at most {SENSE_CHANNELS} sensory channels exist, got {}", self.inodes),
            ));
        }
        if self.onodes != MOTOR_OUTPUTS {
            return Err(invalid(
                "onodes",
                format!("brains drive exactly {MOTOR_OUTPUTS} outputs (turn, thrust), got {}", self.onodes),
            ));
        }

        non_negative("org_vision_dist", self.org_vision_dist)?;
        non_negative("org_eat_dist", self.org_eat_dist)?;
        non_negative("pred_eat_dist", self.pred_eat_dist)?;
        non_negative("pred_vision_dist", self.pred_vision_dist)?;
        non_negative("org_org_dist", self.org_org_dist)?;
        non_negative("org_org_penalty", self.org_org_penalty)?;
        positive("food_energy", self.food_energy)?;
        non_negative("pred_kill_reward", self.pred_kill_reward)?;

        if !(self.elitism > 0.0 && self.elitism <= 1.0) {
            return Err(invalid("elitism", format!("must be in (0, 1], got {}", self.elitism)));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid(
                "mutation_rate",
                format!("must be a probability in [0, 1], got {}", self.mutation_rate),
            ));
        }
        positive("mutation_sigma", self.mutation_sigma)?;
        positive("weight_limit", self.weight_limit)?;
        // survivor_count() never exceeds org_num
        if self.fresh_num > self.org_num - self.survivor_count() {
            return Err(invalid(
                "fresh_num",
                format!(
                    "{} fresh plus {} survivors exceed org_num {}",
                    self.fresh_num,
                    self.survivor_count(),
                    self.org_num
                ),
            ));
        }

        positive("dt", self.dt)?;
        non_negative("dr_max", self.dr_max)?;
        positive("v_max", self.v_max)?;
        non_negative("dv_max", self.dv_max)?;
        finite("x_min", self.x_min)?;
        finite("y_min", self.y_min)?;
        finite("x_max", self.x_max)?;
        finite("y_max", self.y_max)?;
        if self.x_max <= self.x_min {
            return Err(invalid("x_max", format!("must exceed x_min ({})", self.x_min)));
        }
        if self.y_max <= self.y_min {
            return Err(invalid("y_max", format!("must exceed y_min ({})", self.y_min)));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: String) -> SettingsError {
    SettingsError::Invalid { key, reason }
}

fn positive_count(key: &'static str, value: usize) -> Result<(), SettingsError> {
    if value == 0 {
        return Err(invalid(key, "must be greater than zero".to_string()));
    }
    Ok(())
}

fn finite(key: &'static str, value: f32) -> Result<(), SettingsError> {
    if !value.is_finite() {
        return Err(invalid(key, format!("must be finite, got {value}")));
    }
    Ok(())
}

fn non_negative(key: &'static str, value: f32) -> Result<(), SettingsError> {
    finite(key, value)?;
    if value < 0.0 {
        return Err(invalid(key, format!("must be non-negative, got {value}")));
    }
    Ok(())
}

fn positive(key: &'static str, value: f32) -> Result<(), SettingsError> {
    finite(key, value)?;
    if value <= 0.0 {
        return Err(invalid(key, format!("must be positive, got {value}")));
    }
    Ok(())
}
