//! Generation-to-generation evolution.
//!
//! Truncation selection: rank by fitness, keep the top fraction unchanged as
//! breeding stock, refill the population with mutated offspring of the stock,
//! and optionally inject fresh random individuals.

use rand::Rng;
use tracing::{debug, warn};

use super::agent::{Agent, Lineage, Role};
use super::brain::{Brain, Mutation};
use super::ecosystem::founders;
use super::error::SimError;
use super::settings::Settings;

/// Breeds the next organism generation. The result always holds `org_num`
/// organisms.
pub fn evolve_organisms<R: Rng + ?Sized>(
    settings: &Settings,
    organisms: Vec<Agent>,
    generation: usize,
    rng: &mut R,
) -> Result<Vec<Agent>, SimError> {
    evolve(
        settings,
        organisms,
        Role::Organism,
        Population {
            size: settings.org_num,
            stock: settings.survivor_count(),
            fresh: settings.fresh_num,
        },
        generation,
        rng,
    )
}

/// Breeds the next predator generation when `pred_evolve` is set.
///
/// When disabled the predators are returned untouched and `rng` is not used.
pub fn evolve_predators<R: Rng + ?Sized>(
    settings: &Settings,
    predators: Vec<Agent>,
    generation: usize,
    rng: &mut R,
) -> Result<Vec<Agent>, SimError> {
    if !settings.pred_evolve || predators.is_empty() {
        return Ok(predators);
    }
    evolve(
        settings,
        predators,
        Role::Predator,
        Population {
            size: settings.pred_num,
            stock: settings.predator_survivor_count(),
            fresh: 0,
        },
        generation,
        rng,
    )
}

/// Target shape of the next generation.
#[derive(Debug, Clone, Copy)]
struct Population {
    size: usize,
    stock: usize,
    fresh: usize,
}

fn evolve<R: Rng + ?Sized>(
    settings: &Settings,
    mut agents: Vec<Agent>,
    role: Role,
    population: Population,
    generation: usize,
    rng: &mut R,
) -> Result<Vec<Agent>, SimError> {
    let next_generation = generation + 1;

    if agents.is_empty() {
        warn!(
            generation = next_generation,
            role = role.prefix(),
            "population wiped out, restarting from random founders"
        );
        return Ok(founders(settings, role, population.size, next_generation, rng));
    }

    let mutation = Mutation::new(
        settings.mutation_rate,
        settings.mutation_sigma,
        settings.weight_limit,
    )?;

    rank(&mut agents);
    let stock_size = population.stock.min(agents.len());
    let offspring_target = population.size.saturating_sub(population.fresh);
    let mut next = Vec::with_capacity(population.size);

    // Elites keep their weights and names but start over at a new position.
    for parent in &agents[..stock_size] {
        next.push(Agent::spawn(
            settings,
            role,
            parent.name.clone(),
            parent.lineage.clone(),
            parent.brain.clone(),
            rng,
        ));
    }

    let stock = &agents[..stock_size];
    let mut index = 0;
    while next.len() < offspring_target {
        let parent_index = rng.gen_range(0..stock.len());
        let parent = &stock[parent_index];
        let mut brain = if settings.crossover && stock.len() >= 2 {
            // Any other member of the stock, uniformly.
            let mate = &stock[(parent_index + rng.gen_range(1..stock.len())) % stock.len()];
            let weight = rng.gen_range(0.0..1.0);
            Brain::crossover_weighted(&parent.brain, &mate.brain, weight)
        } else {
            parent.brain.clone()
        };
        brain.mutate(&mutation, rng);

        let name = offspring_name(parent, next_generation, index);
        let lineage = Lineage::child_of(parent);
        next.push(Agent::spawn(settings, role, name, lineage, brain, rng));
        index += 1;
    }

    let fresh = population.size - next.len();
    next.extend(founders(settings, role, fresh, next_generation, rng));

    debug!(
        generation = next_generation,
        role = role.prefix(),
        elites = stock_size,
        offspring = index,
        fresh,
        best = agents[0].fitness,
        "bred next generation"
    );
    Ok(next)
}

/// Sorts by fitness, best first. Equal fitness keeps the incoming order.
pub fn rank(agents: &mut [Agent]) {
    agents.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Name of the `index`-th offspring bred for `generation` from `parent`.
pub fn offspring_name(parent: &Agent, generation: usize, index: usize) -> String {
    format!("{}/{}.{}", parent.lineage.founder, generation, index)
}
