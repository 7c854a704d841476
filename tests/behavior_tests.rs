#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evolving_organisms::simulation::agent::{Agent, Role};
use evolving_organisms::simulation::arena::{Arena, Boundary};
use evolving_organisms::simulation::behavior::{
    organism_on_food, organism_on_organism, organism_on_predator, pair_mut, predator_on_organism,
};
use evolving_organisms::simulation::food::Food;
use evolving_organisms::simulation::settings::Settings;
use ndarray::array;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn agent_at(settings: &Settings, role: Role, name: &str, x: f32, y: f32) -> Agent {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut agent = Agent::new_random(settings, role, name.to_string(), &mut rng);
    agent.pos = array![x, y];
    agent.heading = 0.0;
    agent
}

fn food_at(x: f32, y: f32) -> Food {
    Food {
        pos: array![x, y],
        energy: 1.0,
    }
}

#[test]
fn test_food_within_reach_is_eaten() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut food = food_at(0.05, 0.0);

    let closest = organism_on_food(1.0, 0.075, &arena, &mut organism, &mut food);

    assert!((closest - 0.05).abs() < 1e-6);
    assert!(food.is_consumed());
    assert_eq!(organism.fitness, 1.0);
    assert!(organism.senses.target.detected);
    assert!(organism.senses.target.bearing.abs() < 1e-6);
}

#[test]
fn test_interaction_distance_is_inclusive() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);

    let mut at_edge = food_at(0.5, 0.0);
    organism_on_food(1.0, 0.5, &arena, &mut organism, &mut at_edge);
    assert!(at_edge.is_consumed());

    let mut beyond = food_at(0.75, 0.0);
    organism_on_food(1.0, 0.5, &arena, &mut organism, &mut beyond);
    assert!(!beyond.is_consumed());
    assert_eq!(organism.fitness, 1.0);
}

#[test]
fn test_closest_distance_never_increases() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut far = food_at(0.5, 0.0);

    let closest = organism_on_food(0.2, 0.075, &arena, &mut organism, &mut far);

    assert_eq!(closest, 0.2);
    assert!(!organism.senses.target.detected);
    assert!(!far.is_consumed());
}

#[test]
fn test_consumed_food_is_invisible() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut food = food_at(0.01, 0.0);
    food.energy = 0.0;

    let closest = organism_on_food(1.0, 0.075, &arena, &mut organism, &mut food);

    assert_eq!(closest, 1.0);
    assert_eq!(organism.fitness, 0.0);
    assert!(!organism.senses.target.detected);
}

#[test]
fn test_equal_distance_keeps_first_candidate() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut ahead = food_at(0.5, 0.0);
    let mut left = food_at(0.0, 0.5);

    let closest = organism_on_food(1.0, 0.0, &arena, &mut organism, &mut ahead);
    let closest = organism_on_food(closest, 0.0, &arena, &mut organism, &mut left);

    assert_eq!(closest, 0.5);
    assert!(organism.senses.target.bearing.abs() < 1e-6);
}

#[test]
fn test_bearing_to_the_left_is_positive() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut food = food_at(0.0, 0.5);

    organism_on_food(1.0, 0.0, &arena, &mut organism, &mut food);

    assert!((organism.senses.target.bearing - 0.5).abs() < 1e-6);
}

#[test]
fn test_predator_catches_organism_in_reach() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut predator = agent_at(&settings, Role::Predator, "pred", 0.05, 0.0);

    organism_on_predator(1.0, 0.1, 2.0, &arena, &mut organism, &mut predator);

    assert!(!organism.alive);
    assert_eq!(predator.fitness, 2.0);
}

#[test]
fn test_threat_bearing_points_away_from_predator() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.0, 0.0);
    let mut predator = agent_at(&settings, Role::Predator, "pred", 0.0, 0.5);

    let closest = organism_on_predator(1.0, 0.1, 1.0, &arena, &mut organism, &mut predator);

    assert!((closest - 0.5).abs() < 1e-6);
    assert!(organism.alive);
    assert!(organism.senses.threat.detected);
    assert!((organism.senses.threat.bearing + 0.5).abs() < 1e-6);
}

#[test]
fn test_predator_hunts_organism() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut predator = agent_at(&settings, Role::Predator, "pred", 0.0, 0.0);
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.08, 0.0);

    let closest = predator_on_organism(1.5, 0.1, 1.0, &arena, &mut predator, &mut organism);

    assert!((closest - 0.08).abs() < 1e-6);
    assert!(!organism.alive);
    assert_eq!(predator.fitness, 1.0);
    assert!(predator.senses.target.detected);
}

#[test]
fn test_dead_organism_is_ignored_by_predator() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut predator = agent_at(&settings, Role::Predator, "pred", 0.0, 0.0);
    let mut organism = agent_at(&settings, Role::Organism, "org", 0.05, 0.0);
    organism.kill();

    let closest = predator_on_organism(1.5, 0.1, 1.0, &arena, &mut predator, &mut organism);

    assert_eq!(closest, 1.5);
    assert_eq!(predator.fitness, 0.0);
}

#[test]
fn test_overlapping_organisms_pay_penalty() {
    let settings = Settings::default();
    let arena = settings.arena();
    let mut organism = agent_at(&settings, Role::Organism, "a", 0.0, 0.0);
    let other = agent_at(&settings, Role::Organism, "b", 0.03, 0.0);

    organism_on_organism(1.0, 0.05, 0.1, &arena, &mut organism, &other);

    assert!((organism.fitness + 0.1).abs() < 1e-6);
    assert!(organism.senses.crowd.detected);
    assert_eq!(other.fitness, 0.0);
}

#[test]
fn test_pair_mut_splits_both_orders() {
    let settings = Settings::default();
    let mut agents = vec![
        agent_at(&settings, Role::Organism, "a", 0.0, 0.0),
        agent_at(&settings, Role::Organism, "b", 0.0, 0.0),
        agent_at(&settings, Role::Organism, "c", 0.0, 0.0),
    ];

    let (first, second) = pair_mut(&mut agents, 0, 2);
    assert_eq!((first.name.as_str(), second.name.as_str()), ("a", "c"));
    first.fitness = 3.0;

    let (first, second) = pair_mut(&mut agents, 2, 1);
    assert_eq!((first.name.as_str(), second.name.as_str()), ("c", "b"));
    assert_eq!(agents[0].fitness, 3.0);
}

#[test]
fn test_wrapped_arena_senses_across_the_edge() {
    let arena = Arena {
        x_min: -2.0,
        x_max: 2.0,
        y_min: -2.0,
        y_max: 2.0,
        boundary: Boundary::Wrap,
    };
    let settings = Settings::default();
    let mut organism = agent_at(&settings, Role::Organism, "org", 1.9, 0.0);
    let mut food = food_at(-1.9, 0.0);

    let closest = organism_on_food(1.0, 0.075, &arena, &mut organism, &mut food);

    assert!((closest - 0.2).abs() < 1e-4);
    assert!(organism.senses.target.bearing.abs() < 1e-4);
}
