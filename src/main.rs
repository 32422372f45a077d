//! Arena Survivor - headless demo runner
//!
//! Plays one run with the autopilot at a steady 60 fps and prints the run
//! summary as JSON.
//!
//! Usage: `arena-survivor [seed] [tuning.json] [data-dir]`

use std::path::Path;

use arena_survivor::autopilot;
use arena_survivor::sim::Arena;
use arena_survivor::{Game, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much wall-clock game time
const MAX_RUN_SECS: f64 = 15.0 * 60.0;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Arena Survivor (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Bad seed ({e}), using 1");
            1
        }
        None => 1,
    };
    let tuning = args
        .next()
        .map(|path| Tuning::load(Path::new(&path)))
        .unwrap_or_default();

    let mut game = Game::new(seed, tuning, Arena::default());
    if let Some(dir) = args.next() {
        game = game.with_storage(dir);
    }
    game.start();

    let mut time = 0.0;
    let mut sounds = 0usize;
    while game.last_summary.is_none() && time < MAX_RUN_SECS * 1000.0 {
        let input = autopilot::drive(&game.world);
        sounds += game.frame(time, &input).len();
        time += FRAME_MS;
    }
    log::info!("Finished after {:.1}s wall time, {} sounds played", time / 1000.0, sounds);

    let summary = game
        .last_summary
        .clone()
        .unwrap_or_else(|| game.world.build_summary());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode summary: {e}"),
    }
    if game.new_best {
        println!("New best: {}", game.high_score.best_score);
    }
    if let Some(notice) = &game.notice {
        eprintln!("{notice}");
    }
}
