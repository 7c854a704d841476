//! Sensing and interaction between an agent and one candidate target.
//!
//! Every function here follows the same contract: given the closest distance
//! sensed so far this tick for one kind of target, measure the candidate,
//! update the agent's sense slot if the candidate is strictly closer, fire the
//! interaction if it is within reach (inclusive), and return the new closest
//! distance. The returned distance never exceeds `closest`.
//!
//! The tick loop calls the four `*_on_*` functions, each shaped as
//! `(closest, interact_dist, .., agent, target) -> new closest`.
//! [`sense_and_maybe_act`] is the measuring step they share.

use super::agent::{Agent, Slot};
use super::arena::Arena;
use super::food::Food;
use super::locatable::Locatable;

/// Outcome of measuring one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    /// Distance from the agent to the candidate.
    pub distance: f32,
    /// Closest distance after considering the candidate.
    pub closest: f32,
}

/// Shared sensing step: measures `target` and updates the agent's `slot`.
///
/// Returns `None` when the target is absent (consumed food, dead organism).
pub fn sense_and_maybe_act<T: Locatable>(
    closest: f32,
    arena: &Arena,
    agent: &mut Agent,
    target: &T,
    slot: Slot,
) -> Option<Sighting> {
    if !target.is_present() {
        return None;
    }
    let (dx, dy) = arena.delta(&agent.pos, target.pos());
    let distance = (dx * dx + dy * dy).sqrt();
    let closest = agent.sight(slot, closest, distance, dx, dy);
    Some(Sighting { distance, closest })
}

/// Organism senses a food item and eats it when within `eat_dist`.
pub fn organism_on_food(
    closest: f32,
    eat_dist: f32,
    arena: &Arena,
    organism: &mut Agent,
    food: &mut Food,
) -> f32 {
    let Some(sighting) = sense_and_maybe_act(closest, arena, organism, &*food, Slot::Target) else {
        return closest;
    };
    if sighting.distance <= eat_dist {
        organism.fitness += food.consume();
    }
    sighting.closest
}

/// Organism senses a predator and is caught when within `eat_dist`.
pub fn organism_on_predator(
    closest: f32,
    eat_dist: f32,
    kill_reward: f32,
    arena: &Arena,
    organism: &mut Agent,
    predator: &mut Agent,
) -> f32 {
    let Some(sighting) = sense_and_maybe_act(closest, arena, organism, &*predator, Slot::Threat) else {
        return closest;
    };
    if sighting.distance <= eat_dist {
        organism.kill();
        predator.fitness += kill_reward;
    }
    sighting.closest
}

/// Organism senses another organism and pays `penalty` when overlapping it.
pub fn organism_on_organism(
    closest: f32,
    overlap_dist: f32,
    penalty: f32,
    arena: &Arena,
    organism: &mut Agent,
    other: &Agent,
) -> f32 {
    let Some(sighting) = sense_and_maybe_act(closest, arena, organism, other, Slot::Crowd) else {
        return closest;
    };
    if sighting.distance <= overlap_dist {
        organism.fitness -= penalty;
    }
    sighting.closest
}

/// Predator senses an organism and catches it when within `eat_dist`.
pub fn predator_on_organism(
    closest: f32,
    eat_dist: f32,
    kill_reward: f32,
    arena: &Arena,
    predator: &mut Agent,
    organism: &mut Agent,
) -> f32 {
    let Some(sighting) = sense_and_maybe_act(closest, arena, predator, &*organism, Slot::Target) else {
        return closest;
    };
    if sighting.distance <= eat_dist {
        organism.kill();
        predator.fitness += kill_reward;
    }
    sighting.closest
}

/// Splits `agents` into a mutable reference to `i` and a shared one to `j`.
///
/// Panics if `i == j` or either index is out of bounds.
pub fn pair_mut(agents: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &Agent) {
    assert_ne!(i, j, "an agent cannot be paired with itself");
    if i < j {
        let (head, tail) = agents.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = agents.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}
