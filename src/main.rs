//! Stampede entry point
//!
//! Runs the simulation headless: the autopilot plays, cues are logged in
//! place of sounds, and the high score is persisted like the full game does.
//! Usage: `stampede [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use stampede::sim::{GameEvent, GamePhase, GameState, Key, TickInput, TickStatus, autopilot, tick};
    use stampede::{FileHighScoreStore, Settings, load_high_score};

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&settings_path);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_filter.as_str()),
    )
    .init();

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Stampede (headless) starting with seed {}", seed);

    let mut store = FileHighScoreStore::new(&settings.high_score_path);
    let high_score = load_high_score(&mut store);
    let mut state = GameState::new(seed, settings.tuning.clone(), high_score);
    let mut runs = 0u32;

    for _ in 0..settings.demo_ticks {
        let input = if state.phase == GamePhase::GameOver && settings.auto_restart {
            TickInput::key(Key::Confirm)
        } else {
            autopilot(&state)
        };

        if tick(&mut state, &input, &mut store) == TickStatus::Quit {
            return;
        }

        for event in &state.events {
            match event {
                GameEvent::CaptureScored { reward } => {
                    log::debug!("Roped one for {} (score {})", reward, state.score)
                }
                GameEvent::PowerUpCollected => log::info!("Power-up! lives {}", state.lives),
                GameEvent::HazardHit => log::info!("Hit! lives {}", state.lives),
                GameEvent::PhaseChanged(GamePhase::GameOver) => {
                    runs += 1;
                    log::info!("Run {} over: score {}, high {}", runs, state.score, state.high_score);
                }
                _ => {}
            }
        }
    }

    // Quitting persists the high score
    tick(&mut state, &TickInput::key(Key::Quit), &mut store);

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => log::info!("Final frame:\n{}", json),
        Err(e) => log::warn!("Could not serialize final frame: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `stampede::sim::tick` from its own frame loop
}
