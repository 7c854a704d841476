//! Neural network implementation for agent brains.
//!
//! A two-layer perceptron: inputs → hidden → outputs, with tanh applied at
//! both layers and no biases. Weights only change between generations, via
//! mutation and crossover.

use ndarray::{Array1, Array2, Zip};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::{Distribution, Normal, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Number of brain outputs: turn and thrust.
pub const MOTOR_OUTPUTS: usize = 2;

/// Elementwise mutation: each weight is perturbed with probability `rate`
/// by Gaussian noise, then clipped to `[-limit, limit]`.
#[derive(Debug, Clone)]
pub struct Mutation {
    rate: f64,
    limit: f32,
    noise: Normal<f32>,
}

impl Mutation {
    /// Builds the operator. Fails if `sigma` is not a valid standard deviation.
    pub fn new(rate: f32, sigma: f32, limit: f32) -> Result<Self, SimError> {
        let noise = Normal::new(0.0, sigma).map_err(|e| SimError::Mutation(e.to_string()))?;
        Ok(Self {
            rate: f64::from(rate.clamp(0.0, 1.0)),
            limit,
            noise,
        })
    }
}

/// A single fully connected layer without bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
}

impl Mlp {
    /// Creates a new layer with weights drawn uniformly from `[-scale, scale)`.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            weights: Array2::random_using((output_size, input_size), Uniform::new(-scale, scale), rng),
        }
    }

    /// Performs forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output.mapv_inplace(f32::tanh);
        output
    }

    /// Perturbs each weight with probability `mutation.rate`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation: &Mutation, rng: &mut R) {
        for w in &mut self.weights {
            if rng.gen_bool(mutation.rate) {
                *w = (*w + mutation.noise.sample(rng)).clamp(-mutation.limit, mutation.limit);
            }
        }
    }

    /// Creates a new layer by weighted averaging two parent layers.
    pub fn crossover_weighted(parent1: &Mlp, parent2: &Mlp, weight1: f32) -> Self {
        let weight2 = 1.0 - weight1;
        Self {
            weights: Zip::from(&parent1.weights)
                .and(&parent2.weights)
                .map_collect(|a, b| a * weight1 + b * weight2),
        }
    }
}

/// The two-layer perceptron that steers an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Input → hidden weights (`hnodes` × `inodes`).
    pub wih: Mlp,
    /// Hidden → output weights (`onodes` × `hnodes`).
    pub who: Mlp,
}

impl Brain {
    /// Creates a brain with weights drawn uniformly from `[-scale, scale)`.
    ///
    /// The input→hidden matrix is drawn before the hidden→output one.
    pub fn new_random<R: Rng + ?Sized>(
        inodes: usize,
        hnodes: usize,
        onodes: usize,
        scale: f32,
        rng: &mut R,
    ) -> Self {
        let wih = Mlp::new_random(inodes, hnodes, scale, rng);
        let who = Mlp::new_random(hnodes, onodes, scale, rng);
        Self { wih, who }
    }

    /// Describes the first inconsistency between the weight shapes and the
    /// requested interface, if any.
    pub fn shape_error(&self, inputs: usize, outputs: usize) -> Option<String> {
        let (hidden, wih_inputs) = self.wih.weights.dim();
        let (who_outputs, who_hidden) = self.who.weights.dim();
        if wih_inputs != inputs {
            return Some(format!("input layer takes {wih_inputs} inputs, sensed {inputs}"));
        }
        if who_hidden != hidden {
            return Some(format!(
                "output layer takes {who_hidden} hidden values, hidden layer produces {hidden}"
            ));
        }
        if who_outputs != outputs {
            return Some(format!("output layer produces {who_outputs} values, expected {outputs}"));
        }
        None
    }

    /// Runs a forward pass. Shapes must already be consistent.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        self.who.forward(&self.wih.forward(inputs))
    }

    /// Mutates both weight matrices.
    pub fn mutate<R: Rng + ?Sized>(&mut self, mutation: &Mutation, rng: &mut R) {
        self.wih.mutate(mutation, rng);
        self.who.mutate(mutation, rng);
    }

    /// Creates a new brain by weighted averaging two parents.
    pub fn crossover_weighted(parent1: &Brain, parent2: &Brain, weight1: f32) -> Self {
        Self {
            wih: Mlp::crossover_weighted(&parent1.wih, &parent2.wih, weight1),
            who: Mlp::crossover_weighted(&parent1.who, &parent2.who, weight1),
        }
    }

    /// Iterates over every weight, input layer first.
    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.wih.weights.iter().chain(self.who.weights.iter()).copied()
    }
}
