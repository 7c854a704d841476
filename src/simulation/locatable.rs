//! Trait for entities that occupy a position in the arena.

use ndarray::Array1;

/// Anything an agent can sense: food, organisms and predators.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Whether the entity can currently be sensed or interacted with.
    fn is_present(&self) -> bool {
        true
    }
}
