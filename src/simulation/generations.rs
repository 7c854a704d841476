//! Runs a whole simulation, generation after generation.

use tracing::info;

use super::ecosystem::Ecosystem;
use super::error::SimError;
use super::evolution::{evolve_organisms, evolve_predators};
use super::observer::{NoopRenderer, NoopReporter, Renderer, Reporter};
use super::rng::RngStreams;
use super::settings::Settings;
use super::stats::GenerationStats;

/// Simulates `settings.gens` generations and returns one summary per
/// generation, in order.
///
/// Settings are validated before anything is created. Each generation runs
/// its ticks, is summarised, evolves organisms then predators, and is
/// reported. Plotted generations are finished on `renderer` last.
pub fn simulate_all_generations(
    settings: &Settings,
    streams: &mut RngStreams,
    renderer: &mut dyn Renderer,
    reporter: &mut dyn Reporter,
) -> Result<Vec<GenerationStats>, SimError> {
    settings.validate()?;
    info!(
        gens = settings.gens,
        ticks = settings.ticks,
        organisms = settings.org_num,
        predators = settings.pred_create,
        "starting simulation"
    );

    let mut ecosystem = Ecosystem::genesis(settings, &mut streams.world);
    let mut history = Vec::with_capacity(settings.gens);

    for generation in 0..settings.gens {
        ecosystem.run_generation(settings, generation, &mut streams.world, renderer)?;

        let stats = GenerationStats::from_fitness(ecosystem.organisms.iter().map(|o| o.fitness));
        info!(
            generation = generation + 1,
            best = stats.best,
            avg = stats.avg,
            survivors = stats.count,
            "generation finished"
        );

        let organisms = std::mem::take(&mut ecosystem.organisms);
        ecosystem.organisms = evolve_organisms(settings, organisms, generation, &mut streams.organisms)?;
        let predators = std::mem::take(&mut ecosystem.predators);
        ecosystem.predators = evolve_predators(settings, predators, generation, &mut streams.predators)?;

        reporter.report(generation, &stats)?;
        if settings.plots(generation) {
            renderer.finish_generation(settings, generation)?;
        }
        history.push(stats);
    }

    info!(generations = history.len(), "simulation complete");
    Ok(history)
}

/// Runs a simulation seeded from `settings.seed` with nobody watching.
pub fn simulate(settings: &Settings) -> Result<Vec<GenerationStats>, SimError> {
    let mut streams = RngStreams::from_seed(settings.seed);
    simulate_all_generations(settings, &mut streams, &mut NoopRenderer, &mut NoopReporter)
}
