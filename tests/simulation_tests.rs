#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use evolving_organisms::simulation::error::SimError;
use evolving_organisms::simulation::generations::{simulate, simulate_all_generations};
use evolving_organisms::simulation::observer::{
    ConsoleReporter, Frame, FrameRecorder, NoopRenderer, Renderer, Reporter,
};
use evolving_organisms::simulation::rng::RngStreams;
use evolving_organisms::simulation::settings::{Settings, SettingsError};
use evolving_organisms::simulation::stats::GenerationStats;

fn small_settings() -> Settings {
    Settings {
        gens: 3,
        ticks: 20,
        org_num: 10,
        food_num: 10,
        seed: 1234,
        ..Settings::default()
    }
}

#[derive(Default)]
struct RecordingReporter {
    generations: Vec<usize>,
}

impl Reporter for RecordingReporter {
    fn report(&mut self, generation: usize, _stats: &GenerationStats) -> Result<(), SimError> {
        self.generations.push(generation);
        Ok(())
    }
}

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    finished: Vec<usize>,
}

impl Renderer for CountingRenderer {
    fn frame(&mut self, _settings: &Settings, _frame: &Frame<'_>) -> Result<(), SimError> {
        self.frames += 1;
        Ok(())
    }

    fn finish_generation(&mut self, _settings: &Settings, generation: usize) -> Result<(), SimError> {
        self.finished.push(generation);
        Ok(())
    }
}

#[test]
fn test_single_generation_single_tick() {
    let settings = Settings {
        gens: 1,
        ticks: 1,
        org_num: 5,
        pred_create: false,
        food_num: 3,
        ..Settings::default()
    };

    let history = simulate(&settings).unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].count, 5);
    assert!(history[0].best >= history[0].avg && history[0].avg >= history[0].worst);
}

#[test]
fn test_same_seed_same_run() {
    let settings = small_settings();

    assert_eq!(simulate(&settings).unwrap(), simulate(&settings).unwrap());
}

#[test]
fn test_run_with_evolving_predators() {
    let settings = Settings {
        pred_create: true,
        pred_num: 4,
        pred_evolve: true,
        crossover: true,
        fresh_num: 2,
        inodes: 7,
        ..small_settings()
    };

    let history = simulate(&settings).unwrap();

    assert_eq!(history.len(), settings.gens);
    assert!(history.iter().all(|s| s.count <= settings.org_num));
}

#[test]
fn test_invalid_settings_fail_before_running() {
    let settings = Settings {
        ticks: 0,
        ..small_settings()
    };
    let mut reporter = RecordingReporter::default();
    let mut streams = RngStreams::from_seed(settings.seed);

    let result = simulate_all_generations(&settings, &mut streams, &mut NoopRenderer, &mut reporter);

    match result {
        Err(SimError::Settings(SettingsError::Invalid { key, .. })) => assert_eq!(key, "ticks"),
        other => panic!("expected a settings error, got {other:?}"),
    }
    assert!(reporter.generations.is_empty());
}

#[test]
fn test_every_generation_is_reported() {
    let settings = small_settings();
    let mut reporter = RecordingReporter::default();
    let mut streams = RngStreams::from_seed(settings.seed);

    simulate_all_generations(&settings, &mut streams, &mut NoopRenderer, &mut reporter).unwrap();

    assert_eq!(reporter.generations, vec![0, 1, 2]);
}

#[test]
fn test_renderer_sees_plotted_generations_only() {
    let settings = Settings {
        plot_gens: vec![1, 5],
        ..small_settings()
    };
    let mut renderer = CountingRenderer::default();
    let mut streams = RngStreams::from_seed(settings.seed);

    simulate_all_generations(&settings, &mut streams, &mut renderer, &mut RecordingReporter::default())
        .unwrap();

    assert_eq!(renderer.frames, settings.ticks);
    assert_eq!(renderer.finished, vec![1]);
}

#[test]
fn test_observers_do_not_change_the_outcome() {
    let settings = Settings {
        plot_gens: vec![0, 2],
        ..small_settings()
    };
    let mut renderer = CountingRenderer::default();
    let mut streams = RngStreams::from_seed(settings.seed);

    let watched =
        simulate_all_generations(&settings, &mut streams, &mut renderer, &mut RecordingReporter::default())
            .unwrap();

    assert_eq!(watched, simulate(&settings).unwrap());
}

#[test]
fn test_frame_recorder_writes_one_file_per_plotted_generation() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        gens: 2,
        ticks: 5,
        plot_gens: vec![0],
        ..small_settings()
    };
    let mut recorder = FrameRecorder::new(dir.path().join("frames")).unwrap();
    let mut streams = RngStreams::from_seed(settings.seed);

    simulate_all_generations(&settings, &mut streams, &mut recorder, &mut RecordingReporter::default())
        .unwrap();

    assert_eq!(recorder.written(), &[recorder.path_for(0)]);
    let text = fs::read_to_string(recorder.path_for(0)).unwrap();
    let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["generation"], 0);
    assert_eq!(lines[4]["tick"], 4);
    assert_eq!(lines[0]["organisms"].as_array().unwrap().len(), settings.org_num);
    assert_eq!(lines[0]["food"].as_array().unwrap().len(), settings.food_num);
    assert!(!recorder.path_for(1).exists());
}

#[test]
fn test_console_reporter_prints_one_line_per_generation() {
    let settings = Settings {
        gens: 2,
        ..small_settings()
    };
    let mut reporter = ConsoleReporter::new(Vec::new());
    let mut streams = RngStreams::from_seed(settings.seed);

    simulate_all_generations(&settings, &mut streams, &mut NoopRenderer, &mut reporter).unwrap();

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(" > GEN-1 : "));
    assert!(lines[1].starts_with(" > GEN-2 : "));
    assert!(output.contains("BEST: "));
    assert!(output.contains("WORST: "));
}
