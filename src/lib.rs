//! # Evolving Organisms
//!
//! Organisms and predators steered by small perceptron brains move around a
//! rectangular arena. Organisms eat food, avoid predators and each other;
//! predators hunt organisms. After a fixed number of ticks the fittest
//! individuals are kept, the rest of the population is refilled with mutated
//! offspring, and the next generation begins.
//!
//! ## Features
//!
//! - Two-layer perceptron brains (tanh, no bias)
//! - Truncation selection with elitism, Gaussian mutation and optional crossover
//! - Seeded, fully reproducible runs
//! - Per-generation fitness statistics
//! - Frame recording of selected generations
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - Agent state, senses and movement
//! - [`simulation::behavior`] - Sensing and interactions
//! - [`simulation::ecosystem`] - The per-tick loop
//! - [`simulation::evolution`] - Selection and breeding
//! - [`simulation::generations`] - Running a whole simulation

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents, their senses and the think step.
    pub mod agent;
    /// Arena bounds and edge policies.
    pub mod arena;
    /// Sensing and interaction between pairs of entities.
    pub mod behavior;
    /// Neural network implementation for agent brains.
    pub mod brain;
    /// Population container and tick loop.
    pub mod ecosystem;
    /// Simulation error type.
    pub mod error;
    /// Selection, breeding and mutation.
    pub mod evolution;
    /// Food items that organisms can consume.
    pub mod food;
    /// Whole-run orchestration.
    pub mod generations;
    /// Trait for locatable entities.
    ///
    /// The [`locatable::Locatable`] trait is implemented by everything an
    /// agent can sense (Food, Agent).
    pub mod locatable;
    /// Renderers and reporters observing a run.
    pub mod observer;
    /// Seeded random streams.
    pub mod rng;
    /// Simulation parameters.
    pub mod settings;
    /// Per-generation fitness statistics.
    pub mod stats;
}
