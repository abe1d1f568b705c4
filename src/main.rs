//! Geo Dash entry point
//!
//! Headless driver: loads config and scores, then plays one run at the
//! configured frame rate with the autopilot on the controls.

use std::path::Path;
use std::time::{Duration, Instant};

use geo_dash::autopilot::autopilot_input;
use geo_dash::sim::TickOutcome;
use geo_dash::{Game, GameConfig, ScoreLedger, Screen, ScreenAction};

const CONFIG_PATH: &str = "geo-dash.json";
/// Maximum catch-up frames per wakeup to prevent spiral of death
const MAX_SUBSTEPS: u32 = 8;

fn main() {
    env_logger::init();
    log::info!("Geo Dash (headless) starting...");

    let config = GameConfig::load_or_default(Path::new(CONFIG_PATH));
    if let Err(e) = config.validate() {
        log::error!("Invalid config: {e}");
        std::process::exit(1);
    }

    let ledger = ScoreLedger::load(&config.score_file);
    let mut game = match Game::new(config, ledger, rand::random()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };
    game.apply(ScreenAction::StartGame);

    let dt = game.config().frame_dt();
    let step = Duration::from_secs_f32(dt);
    let mut accumulator = Duration::ZERO;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        accumulator += now - last;
        last = now;

        let mut substeps = 0;
        while accumulator >= step && substeps < MAX_SUBSTEPS {
            let input = autopilot_input(game.run(), game.config());
            let frame = game.update(&input, dt);
            if let TickOutcome::Ended { .. } = frame.outcome {
                break;
            }
            accumulator -= step;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            accumulator = Duration::ZERO;
        }

        if let Screen::GameOver { score, high_score } = game.screen() {
            let run = game.run();
            log::info!(
                "Game over after {} frames in phase {}: score {score}, best {high_score}",
                run.frame,
                run.difficulty.phase_name()
            );
            for (i, record) in game.ledger().entries().iter().enumerate() {
                log::info!("#{:<2} {:>6}  {}", i + 1, record.score, record.timestamp);
            }
            break;
        }

        std::thread::sleep(step.saturating_sub(last.elapsed()));
    }
}
