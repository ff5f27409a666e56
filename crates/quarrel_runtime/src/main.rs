//! Quarrel Runtime
//!
//! Headless entry point: builds a small arena, drives it with scripted
//! input at a fixed step and logs what happens.
//!
//! Run with: cargo run -p quarrel_runtime -- [config.json] [ticks]

mod arena;
mod script;

use arena::Arena;
use quarrel_scene::SceneConfig;
use script::InputScript;

/// Fixed simulation step
const DT: f32 = 1.0 / 60.0;
const DEFAULT_TICKS: u64 = 900;
const REPORT_EVERY: u64 = 60;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SceneConfig::load(&path).unwrap_or_else(|err| {
            log::warn!("Couldn't load config {}: {}, using defaults", path, err);
            SceneConfig::default()
        }),
        None => SceneConfig::default(),
    };
    let ticks = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(ticks)) => ticks,
        Some(Err(err)) => {
            log::warn!("Bad tick count: {}, running {}", err, DEFAULT_TICKS);
            DEFAULT_TICKS
        }
        None => DEFAULT_TICKS,
    };

    let mut arena = Arena::build(config);
    let mut script = InputScript::new();

    log::info!("Running {} ticks at {:.1} Hz", ticks, 1.0 / DT);
    for tick in 1..=ticks {
        let input = script.next_input();
        arena.scene_mut().tick(&input, DT);

        if tick % REPORT_EVERY == 0 {
            log::info!("{}", arena.report());
        }
    }

    let report = arena.report();
    log::info!("Finished: {}", report);

    match arena.scene().save_behavior(arena.player()) {
        Ok(doc) => match serde_json::to_string_pretty(&doc) {
            Ok(text) => println!("{}", text),
            Err(err) => log::error!("Couldn't format player document: {}", err),
        },
        Err(err) => log::warn!("No player document: {}", err),
    }
}
