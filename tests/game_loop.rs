//! Driving a session through the frame scheduler

use std::cell::RefCell;

use glam::Vec2;
use particle_arena::input::{Autopilot, InputSource, ScriptedInput};
use particle_arena::render::NullRenderer;
use particle_arena::sim::{
    Enemy, Entity, FirstChoice, GamePhase, Session, SessionEvent, TickInput, WorldConfig,
};
use particle_arena::{GameLoop, ManualScheduler, Settings};
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn session(seed: u64) -> Session {
    let settings = Settings::default();
    let mut session = Session::new(settings.world_config(), seed, settings.cosmetic_opponents)
        .with_upgrade_surface(Box::<FirstChoice>::default());
    session.handle(SessionEvent::Start);
    session
}

/// Run `frames` frames through a manual scheduler and return the session
fn run_frames(
    session: Session,
    scheduler: ManualScheduler,
    frames: usize,
    input: &mut dyn InputSource,
) -> (Session, NullRenderer) {
    let session = RefCell::new(session);
    let mut renderer = NullRenderer::default();
    let mut game_loop = GameLoop::new(scheduler);
    let stop = game_loop.stop_handle();
    let mut count = 0;

    game_loop.run(
        |dt| {
            let mut s = session.borrow_mut();
            let snapshot = input.next_input(s.state());
            s.update(dt, &snapshot);
            count += 1;
            if count == frames || s.phase() == GamePhase::Ended {
                stop.stop();
            }
        },
        || session.borrow().render(&mut renderer),
    );
    (session.into_inner(), renderer)
}

#[test]
fn stalls_are_capped_per_frame() {
    let scheduler = ManualScheduler::new(16.0).with_steps([16.0, 10_000.0, 16.0]);
    let mut idle = ScriptedInput::default();
    let (session, renderer) = run_frames(session(1), scheduler, 3, &mut idle);

    assert_eq!(renderer.frames, 3);
    assert_eq!(session.state().frame, 3);
    let elapsed = session.state().elapsed;
    assert!((elapsed - 0.132).abs() < 1e-4, "elapsed {elapsed}");
}

#[test]
fn scripted_movement_moves_the_player() {
    let right = TickInput {
        right: true,
        ..Default::default()
    };
    let mut script = ScriptedInput::new(vec![right; 10]);
    let start = session(2);
    let before = start.state().player.as_ref().unwrap().body.pos;
    let (session, _) = run_frames(start, ManualScheduler::new(20.0), 10, &mut script);

    let after = session.state().player.as_ref().unwrap().body.pos;
    // 10 frames * 0.02s * 250 units/s, give or take hazard drift
    assert!(after.x - before.x > 40.0, "{before} -> {after}");
}

#[test]
fn death_ends_the_loop() {
    let mut start = session(3);
    {
        let state = start.state_mut();
        let player = state.player.as_mut().unwrap();
        player.health = 1.0;
        let pos = player.body.pos;
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = Enemy::random(10_000, 4000.0, 5, &mut rng);
        enemy.body.pos = pos + Vec2::new(5.0, 0.0);
        state.entities.push(Entity::Enemy(enemy));
    }
    let mut idle = ScriptedInput::default();
    let (session, renderer) = run_frames(start, ManualScheduler::new(16.0), 1_000, &mut idle);

    assert_eq!(session.phase(), GamePhase::Ended);
    assert_eq!(session.state().frame, 1);
    assert_eq!(renderer.frames, 1);
    assert_eq!(session.stats().unwrap().health, 0.0);
    assert!(session.leaderboard().player_rank().is_some());
}

#[test]
fn autopilot_session_is_deterministic() {
    let config = WorldConfig::default();
    let run = || {
        let mut autopilot = Autopilot::default();
        let mut start = Session::new(config.clone(), 42, 8)
            .with_upgrade_surface(Box::<FirstChoice>::default());
        start.handle(SessionEvent::Start);
        let (session, _) = run_frames(start, ManualScheduler::new(16.0), 300, &mut autopilot);
        session.stats()
    };
    assert_eq!(run(), run());
}

#[test]
fn restart_after_end_plays_again() {
    let mut s = session(5);
    s.handle(SessionEvent::End);
    assert_eq!(s.phase(), GamePhase::Ended);
    s.update(0.016, &TickInput::default());
    assert_eq!(s.state().frame, 0);

    s.handle(SessionEvent::Restart);
    let (s, _) = run_frames(s, ManualScheduler::new(16.0), 5, &mut ScriptedInput::default());
    assert_eq!(s.state().frame, 5);
}
