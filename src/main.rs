//! Silo Defense - headless demo runner
//!
//! Plays one game with the built-in autopilot and logs what happens.
//!
//! Usage: `silo-defense [arcade|command] [seed] [profile-dir]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use silo_defense::consts::FRAME_MS;
    use silo_defense::persistence::{self, FileStorage, MemoryStorage, Storage};
    use silo_defense::platform::TimeManager;
    use silo_defense::sim::{GameEvent, GameMode, GameState, TickInput, tick};

    /// Stop after ten minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mode = args.next().and_then(|s| GameMode::parse(&s));
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let mut storage: Box<dyn Storage> = match args.next() {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None => Box::new(MemoryStorage::new()),
    };

    let mut profile = persistence::load_profile(storage.as_ref());
    let mode = mode.unwrap_or(profile.settings.last_mode);
    profile.settings.last_mode = mode;
    log::info!("Silo Defense (headless) starting...");

    let mut state =
        GameState::new(mode, seed).with_achievements(profile.achievements.clone());
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    // Simulated wall clock at 60 fps
    let mut clock = TimeManager::new();
    let mut now = 0.0f64;
    clock.frame(now);

    for _ in 0..MAX_FRAMES {
        now += FRAME_MS as f64;
        let dt = clock.frame(now);
        tick(&mut state, &input, dt);

        for event in profile.settings.filter(state.drain_events()) {
            match event {
                GameEvent::WaveBreak(summary) => log::info!(
                    "Wave {} done: +{} scrap, {} cities saved",
                    summary.wave,
                    summary.total_scrap(),
                    summary.cities_saved
                ),
                GameEvent::DifficultyChanged { difficulty } => {
                    log::info!("Difficulty {:.1}", difficulty)
                }
                GameEvent::AchievementUnlocked(achievement) => {
                    log::info!("Unlocked: {}", achievement.title())
                }
                GameEvent::AchievementProgress(delta) => profile.achievements.apply(&delta),
                GameEvent::GameOver { score, wave } => {
                    let timestamp = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map(|d| d.as_millis() as f64)
                        .unwrap_or(0.0);
                    if let Some(rank) = profile.high_scores.add_score(score, wave, timestamp, mode)
                    {
                        log::info!("Made the leaderboard at #{}", rank);
                    }
                }
                _ => {}
            }
        }

        if state.is_game_over() {
            break;
        }
    }
    profile.achievements.check();

    let hud = state.hud();
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode HUD: {}", err),
    }

    let saved_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    if let Err(err) = persistence::save_profile(storage.as_mut(), &profile, saved_at) {
        log::warn!("Failed to save profile: {}", err);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the browser host on wasm32
}
