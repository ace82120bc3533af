//! Particle Arena headless runner
//!
//! Plays one session with the autopilot at the configured frame rate and
//! prints the final player stats as JSON.
//!
//! Usage: `particle-arena [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use particle_arena::input::{Autopilot, InputSource};
    use particle_arena::render::NullRenderer;
    use particle_arena::sim::{FirstChoice, GameEvent, GamePhase, Session, SessionEvent};
    use particle_arena::{GameLoop, Settings, SleepScheduler};

    env_logger::init();
    log::info!("Particle Arena (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Session initialized with seed: {seed}");

    let mut session = Session::new(settings.world_config(), seed, settings.cosmetic_opponents)
        .with_upgrade_surface(Box::<FirstChoice>::default());
    session.handle(SessionEvent::Start);
    let session = RefCell::new(session);

    let mut autopilot = Autopilot::default();
    let mut renderer = NullRenderer::default();
    let mut game_loop = GameLoop::new(SleepScheduler::new(settings.target_fps));
    let stop = game_loop.stop_handle();
    let max_frames = settings.max_frames;
    let mut frames: u64 = 0;

    game_loop.run(
        |dt| {
            let mut session = session.borrow_mut();
            let input = autopilot.next_input(session.state());
            for event in session.update(dt, &input) {
                match event {
                    GameEvent::EnemyKilled { enemy_id, score } => {
                        log::debug!("enemy {enemy_id} destroyed (+{score})");
                    }
                    GameEvent::Teleported { entity_id, exit_id } => {
                        log::debug!("entity {entity_id} came out of wormhole {exit_id}");
                    }
                    _ => {}
                }
            }

            frames += 1;
            if session.phase() == GamePhase::Ended || max_frames.is_some_and(|max| frames >= max) {
                stop.stop();
            }
        },
        || session.borrow().render(&mut renderer),
    );

    let session = session.into_inner();
    log::info!("Run finished after {frames} frames ({} rendered)", renderer.frames);
    if let Some(rank) = session.leaderboard().player_rank() {
        log::info!("Leaderboard rank: {rank}");
    }
    if let Some(stats) = session.stats() {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize stats: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive `Session` and `GameLoop` themselves on the web
}
