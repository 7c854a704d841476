//! The arena's population and the per-tick interaction loop.
//!
//! The ecosystem owns every organism, predator and food item for a run. One
//! tick shuffles the organisms, lets every agent sense and interact with every
//! relevant entity (plain O(N·M) nested loops), removes caught organisms,
//! respawns eaten food and finally lets every agent think and move.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use super::agent::{Agent, Role};
use super::arena::Arena;
use super::behavior;
use super::error::SimError;
use super::food::Food;
use super::observer::{Frame, Renderer};
use super::settings::Settings;

/// Everything living in the arena.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    /// Organisms alive this generation, in the order of the last shuffle.
    pub organisms: Vec<Agent>,
    /// Predators; empty unless `pred_create` is set.
    pub predators: Vec<Agent>,
    /// Food items. Their number never changes.
    pub food: Vec<Food>,
}

impl Ecosystem {
    /// Creates the initial world.
    ///
    /// Random draws happen in a fixed order: all food, then all organisms,
    /// then all predators.
    pub fn genesis<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Self {
        let arena = settings.arena();
        let food = (0..settings.food_num)
            .map(|_| Food::new_random(&arena, settings.food_energy, rng))
            .collect();
        let organisms = founders(settings, Role::Organism, settings.org_num, 0, rng);
        let predators = if settings.pred_create {
            founders(settings, Role::Predator, settings.pred_num, 0, rng)
        } else {
            Vec::new()
        };

        debug!(
            food = settings.food_num,
            organisms = settings.org_num,
            predators = if settings.pred_create { settings.pred_num } else { 0 },
            "world created"
        );

        Self {
            organisms,
            predators,
            food,
        }
    }

    /// Prepares persistent agents for a new generation.
    ///
    /// Predators carry over between generations; their fitness restarts at
    /// zero.
    pub fn begin_generation(&mut self, settings: &Settings) {
        for predator in &mut self.predators {
            predator.fitness = 0.0;
            predator.alive = true;
            predator.reset_senses(settings);
        }
    }

    /// Runs every tick of one generation.
    ///
    /// When `generation` is listed in `plot_gens`, `renderer` receives a frame
    /// after each tick's shuffle.
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        settings: &Settings,
        generation: usize,
        rng: &mut R,
        renderer: &mut dyn Renderer,
    ) -> Result<(), SimError> {
        self.begin_generation(settings);
        let plotting = settings.plots(generation);

        for tick in 0..settings.ticks {
            self.step(settings, rng, |ecosystem| {
                if plotting {
                    renderer.frame(
                        settings,
                        &Frame {
                            generation,
                            tick,
                            ecosystem,
                        },
                    )
                } else {
                    Ok(())
                }
            })?;
        }
        Ok(())
    }

    /// Advances one tick without observing it.
    pub fn tick<R: Rng + ?Sized>(&mut self, settings: &Settings, rng: &mut R) -> Result<(), SimError> {
        self.step(settings, rng, |_| Ok(()))
    }

    /// Advances one tick, handing the freshly shuffled state to `observe`
    /// before any sensing happens.
    pub fn step<R, F>(&mut self, settings: &Settings, rng: &mut R, observe: F) -> Result<(), SimError>
    where
        R: Rng + ?Sized,
        F: FnOnce(&Ecosystem) -> Result<(), SimError>,
    {
        let arena = settings.arena();

        self.organisms.shuffle(rng);
        observe(&*self)?;

        self.sense_for_organisms(settings, &arena);
        self.sense_for_predators(settings, &arena);

        let before = self.organisms.len();
        self.organisms.retain(|organism| organism.alive);
        if self.organisms.len() < before {
            trace!(caught = before - self.organisms.len(), "organisms removed");
        }

        for food in &mut self.food {
            food.respawn(&arena, settings.food_energy, rng);
        }

        for organism in &mut self.organisms {
            organism.think(settings, &arena)?;
        }
        for predator in &mut self.predators {
            predator.think(settings, &arena)?;
        }
        Ok(())
    }

    /// Each live organism senses food, then predators, then the other
    /// organisms, each with its own closest-distance accumulator.
    fn sense_for_organisms(&mut self, settings: &Settings, arena: &Arena) {
        let vision = settings.org_vision_dist;

        for i in 0..self.organisms.len() {
            if !self.organisms[i].alive {
                continue;
            }
            self.organisms[i].reset_senses(settings);

            let mut closest = vision;
            for food in &mut self.food {
                closest = behavior::organism_on_food(
                    closest,
                    settings.org_eat_dist,
                    arena,
                    &mut self.organisms[i],
                    food,
                );
            }

            let mut closest = vision;
            for predator in &mut self.predators {
                closest = behavior::organism_on_predator(
                    closest,
                    settings.pred_eat_dist,
                    settings.pred_kill_reward,
                    arena,
                    &mut self.organisms[i],
                    predator,
                );
                if !self.organisms[i].alive {
                    break;
                }
            }
            if !self.organisms[i].alive {
                continue;
            }

            let mut closest = vision;
            for j in 0..self.organisms.len() {
                if j == i {
                    continue;
                }
                let (organism, other) = behavior::pair_mut(&mut self.organisms, i, j);
                closest = behavior::organism_on_organism(
                    closest,
                    settings.org_org_dist,
                    settings.org_org_penalty,
                    arena,
                    organism,
                    other,
                );
            }
        }
    }

    fn sense_for_predators(&mut self, settings: &Settings, arena: &Arena) {
        for predator in &mut self.predators {
            predator.reset_senses(settings);
            let mut closest = settings.pred_vision_dist;
            for organism in &mut self.organisms {
                closest = behavior::predator_on_organism(
                    closest,
                    settings.pred_eat_dist,
                    settings.pred_kill_reward,
                    arena,
                    predator,
                    organism,
                );
            }
        }
    }
}

/// Creates `count` random founders named `{prefix}{generation}-{index}`.
pub fn founders<R: Rng + ?Sized>(
    settings: &Settings,
    role: Role,
    count: usize,
    generation: usize,
    rng: &mut R,
) -> Vec<Agent> {
    (0..count)
        .map(|index| {
            let name = format!("{}{}-{}", role.prefix(), generation, index);
            Agent::new_random(settings, role, name, rng)
        })
        .collect()
}
