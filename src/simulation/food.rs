//! Food items that organisms can consume for energy.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::locatable::Locatable;

/// A food item that organisms can consume for energy.
///
/// Eating a food item adds its energy to the organism's fitness. Consumed food
/// stays in place with zero energy until the respawn phase of the tick moves
/// it to a new random position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Energy value remaining. Zero once consumed.
    pub energy: f32,
}

impl Food {
    /// Creates a new food item at a random position.
    pub fn new_random<R: Rng + ?Sized>(arena: &Arena, energy: f32, rng: &mut R) -> Self {
        Self {
            pos: arena.random_point(rng),
            energy,
        }
    }

    /// Checks if this food item has been consumed.
    pub fn is_consumed(&self) -> bool {
        self.energy <= 0.0
    }

    /// Marks this food as consumed, returning the energy it held.
    pub fn consume(&mut self) -> f32 {
        std::mem::take(&mut self.energy)
    }

    /// Moves consumed food to a new random position and restores its energy.
    ///
    /// Uneaten food is left alone and draws nothing from `rng`.
    pub fn respawn<R: Rng + ?Sized>(&mut self, arena: &Arena, energy: f32, rng: &mut R) {
        if self.is_consumed() {
            self.pos = arena.random_point(rng);
            self.energy = energy;
        }
    }
}

impl Locatable for Food {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn is_present(&self) -> bool {
        !self.is_consumed()
    }
}
