//! End-to-end frame scenarios against the public simulation API

use glam::Vec2;
use particle_arena::sim::{
    tick, BlackHole, Behavior, Enemy, Entity, Food, GameEvent, GameState, Player, Projectile,
    TickInput, VectorExt, WorldConfig, WormHole,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn arena() -> GameState {
    let mut state = GameState::empty(2024, &WorldConfig::default());
    let id = state.next_entity_id();
    state.player = Some(Player::new(id, Vec2::splat(2000.0), "tester"));
    state
}

fn player(state: &GameState) -> &Player {
    state.player.as_ref().unwrap()
}

fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

#[test]
fn eating_food_scores_and_replaces_it() {
    let mut state = arena();
    state.entities.push(Entity::Food(Food::new(500, Vec2::splat(2000.0), 4.0, 5)));

    tick(&mut state, &TickInput::default(), 1.0 / 60.0);

    assert_eq!(state.score, 5);
    assert_eq!(player(&state).xp, 5);
    assert_eq!(state.food_count(), 1);
    assert!(state.entities.iter().all(|e| e.id() != 500));
    assert!(state.events.contains(&GameEvent::FoodEaten { food_id: 500, value: 5 }));
}

#[test]
fn contact_death_fires_once() {
    let mut state = arena();
    state.player.as_mut().unwrap().health = 10.0;
    let mut rng = Pcg32::seed_from_u64(1);
    let mut enemy = Enemy::random(600, 4000.0, 2, &mut rng);
    enemy.body.pos = Vec2::splat(2000.0);
    enemy.body.radius = 20.0;
    state.entities.push(Entity::Enemy(enemy));

    tick(&mut state, &TickInput::default(), 0.1);
    assert_eq!(player(&state).health, 0.0);
    assert!(!player(&state).is_alive());

    tick(&mut state, &TickInput::default(), 0.1);
    assert_eq!(player(&state).health, 0.0);

    let hits = state
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerHit { damage, .. } if *damage == 10.0))
        .count();
    assert_eq!(hits, 2);
    assert_eq!(count(&state.events, &GameEvent::PlayerDied), 1);
}

#[test]
fn small_enemies_deal_minimum_contact_damage() {
    let mut state = arena();
    let mut rng = Pcg32::seed_from_u64(1);
    let mut enemy = Enemy::random(600, 4000.0, 1, &mut rng);
    enemy.body.pos = Vec2::splat(2000.0);
    enemy.body.radius = 6.0;
    state.entities.push(Entity::Enemy(enemy));

    tick(&mut state, &TickInput::default(), 0.01);
    assert_eq!(player(&state).health, 95.0);
}

#[test]
fn projectile_hit_damages_and_is_consumed() {
    let mut state = arena();
    let mut rng = Pcg32::seed_from_u64(3);
    let mut enemy = Enemy::random(700, 4000.0, 1, &mut rng);
    enemy.body.pos = Vec2::new(500.0, 500.0);
    enemy.health = 30.0;
    state.entities.push(Entity::Enemy(enemy));

    let owner = player(&state).body.id;
    state.projectiles.push(Projectile::new(
        701,
        owner,
        Vec2::new(500.0, 500.0),
        Vec2::X,
        600.0,
        10.0,
        player(&state).body.color,
    ));

    tick(&mut state, &TickInput::default(), 0.001);
    let enemy = state.entities[0].as_enemy().unwrap();
    assert_eq!(enemy.health, 20.0);
    assert!(state.projectiles.is_empty());
    assert_eq!(state.kills, 0);
}

#[test]
fn one_level_per_frame_even_with_overshoot() {
    let mut state = arena();
    // Enough for several levels in one bite
    state.entities.push(Entity::Food(Food::new(800, Vec2::splat(2000.0), 4.0, 1000)));

    tick(&mut state, &TickInput::default(), 1.0 / 60.0);

    let p = player(&state);
    assert_eq!(p.level, 2);
    assert_eq!(p.xp, 0);
    assert_eq!(p.xp_to_next_level, 150);
    let level_ups = state
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
        .count();
    assert_eq!(level_ups, 1);
    assert!(state.is_paused_for_upgrade());
}

#[test]
fn wormhole_does_not_refire_during_cooldown() {
    let mut state = arena();
    let mut rng = Pcg32::seed_from_u64(9);
    let mut entry = WormHole::new(900, Vec2::new(800.0, 800.0), 40.0, &mut rng);
    let mut exit = WormHole::new(901, Vec2::new(3200.0, 3200.0), 40.0, &mut rng);
    entry.link_to(&mut exit);
    state.hazards.push(Entity::WormHole(entry));
    state.hazards.push(Entity::WormHole(exit));
    state.entities.push(Entity::Food(Food::new(902, Vec2::new(800.0, 800.0), 3.0, 6)));

    let dt = 1.0 / 60.0;
    let mut teleports = 0;
    // Pin the food on the entry for just under three seconds
    for _ in 0..170 {
        state.entities[0].body_mut().pos = Vec2::new(800.0, 800.0);
        tick(&mut state, &TickInput::default(), dt);
        teleports += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Teleported { .. }))
            .count();
    }
    assert_eq!(teleports, 1);
}

#[test]
fn black_hole_damages_player_over_time() {
    let mut state = arena();
    let mut rng = Pcg32::seed_from_u64(9);
    let hole = BlackHole::new(950, Vec2::new(2040.0, 2000.0), 60.0, 500.0, &mut rng);
    state.hazards.push(Entity::BlackHole(hole));

    tick(&mut state, &TickInput::default(), 0.1);
    let health = player(&state).health;
    assert!((health - 98.0).abs() < 1e-3, "health {health}");
    assert!(player(&state).body.active);
}

#[test]
fn respawned_enemy_behaviour_depends_on_level_only() {
    let mut rng = Pcg32::seed_from_u64(5);
    for level in 1..=8 {
        let mut enemy = Enemy::random(1, 4000.0, level, &mut rng);
        enemy.behavior = Behavior::Passive;
        enemy.respawn(4000.0, &mut rng);
        assert_eq!(enemy.behavior, Behavior::for_level(level));
        assert_eq!(enemy.health, enemy.max_health);
    }
}

#[test]
fn populations_stay_constant_over_a_long_run() {
    let mut state = GameState::new(77, &WorldConfig::default());
    let foods = state.food_count();
    let enemies = state.enemy_count();
    let input = TickInput {
        shooting: true,
        right: true,
        mouse_position: Some(Vec2::new(1280.0, 360.0)),
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, 1.0 / 60.0);
        particle_arena::sim::choose_upgrade(&mut state, None);
    }
    assert_eq!(state.food_count(), foods);
    assert_eq!(state.enemy_count(), enemies);
    assert_eq!(state.hazards.len(), 4);
    let p = player(&state);
    assert!(p.body.pos.x <= 4000.0 - p.body.radius);
}

#[test]
fn zero_vectors_normalize_to_zero() {
    assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    assert_eq!(Vec2::ZERO.safe_div(0.0), Vec2::ZERO);
    assert_eq!(Vec2::new(3.0, 4.0).safe_div(0.0), Vec2::new(3.0, 4.0));
}

proptest! {
    #[test]
    fn hazards_exert_nothing_outside_their_field(
        angle in 0.0f32..std::f32::consts::TAU,
        extra in 0.5f32..2000.0,
        seed in any::<u64>(),
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let hole = BlackHole::new(1, Vec2::ZERO, 60.0, 500.0, &mut rng);
        let mut worm = WormHole::new(2, Vec2::ZERO, 40.0, &mut rng);
        let dir = Vec2::new(angle.cos(), angle.sin());

        let mut player = Player::new(3, dir * (hole.effect_radius + extra), "p");
        prop_assert!(hole.apply_gravity_to(&mut player, 0.1).is_none());
        prop_assert_eq!(player.body.vel, Vec2::ZERO);

        let start = dir * (worm.effect_radius + extra);
        let mut food = Entity::Food(Food::new(4, start, 3.0, 6));
        prop_assert!(worm.apply_suction_to(&mut food, None, 0.1, &mut rng).is_none());
        prop_assert_eq!(food.body().pos, start);
    }
}
