//! End-to-end scenarios through the public API

use glam::Vec2;

use stampede::sim::{
    CattleClass, Entity, GameEvent, GamePhase, GameState, InputEvent, Key, RopeState, TickInput,
    autopilot, segment_intersects_rect, tick, Rect,
};
use stampede::{MemoryHighScoreStore, Tuning, load_high_score};

fn start(seed: u64, high_score: u64) -> (GameState, MemoryHighScoreStore) {
    let mut store = MemoryHighScoreStore::with_value(high_score);
    let high = load_high_score(&mut store);
    let mut state = GameState::new(seed, Tuning::default(), high);
    tick(&mut state, &TickInput::key(Key::Confirm), &mut store);
    assert_eq!(state.phase, GamePhase::Play);
    (state, store)
}

fn idle(state: &mut GameState, store: &mut MemoryHighScoreStore) {
    tick(state, &TickInput::default(), store);
}

fn claim_all_lanes(state: &mut GameState) {
    for lane in state.lanes.lanes().to_vec() {
        state.lanes.claim(lane);
    }
}

#[test]
fn rope_segment_example_hits_cattle_box() {
    assert!(segment_intersects_rect(
        Vec2::new(100.0, 110.0),
        Vec2::new(280.0, 125.0),
        &Rect::new(150.0, 100.0, 100.0, 60.0),
    ));
}

#[test]
fn capture_awards_reward_and_updates_high_score() {
    let (mut state, mut store) = start(1, 0);
    state.player.x = 20.0;
    state.player.y = 100.0;
    state.player.rope = RopeState::Extending { length: 60.0 };

    assert!(state.lanes.claim(100));
    let mut rng = rand_pcg::Pcg32::new(1, 1);
    let mut cow = Entity::cattle(500, CattleClass::Fastest, 100, &state.tuning, &mut rng);
    cow.x = 150.0 + cow.speed;
    state.cattle.push(cow);

    idle(&mut state, &mut store);
    assert_eq!(state.score, 15);
    assert_eq!(state.high_score, 15);
    assert!(!state.lanes.is_occupied(100));
}

#[test]
fn coiled_rope_never_captures() {
    let (mut state, mut store) = start(2, 0);
    state.player.x = 20.0;
    state.player.y = 100.0;
    // Fully out: this tick coils it back to zero before captures are checked
    state.player.rope = RopeState::Extending { length: 180.0 };

    assert!(state.lanes.claim(100));
    let mut rng = rand_pcg::Pcg32::new(2, 1);
    let mut cow = Entity::cattle(501, CattleClass::Slow, 100, &state.tuning, &mut rng);
    cow.x = 150.0 + cow.speed;
    state.cattle.push(cow);

    idle(&mut state, &mut store);
    assert!(state.player.rope.is_idle());
    assert_eq!(state.score, 0);
    assert!(state.cattle.iter().any(|c| c.id == 501));
}

#[test]
fn power_up_capture_grants_life_and_clears_flag() {
    let (mut state, mut store) = start(3, 0);
    state.player.x = 20.0;
    state.player.y = 100.0;
    state.player.rope = RopeState::Extending { length: 60.0 };

    assert!(state.lanes.claim(100));
    let mut power_up = Entity::power_up(600, 100, &state.tuning);
    power_up.x = 152.0;
    state.power_ups.push(power_up);
    state.power_up_active = true;

    idle(&mut state, &mut store);
    assert_eq!(state.lives, 4);
    assert!(state.power_ups.is_empty());
    assert!(!state.power_up_active);
    assert!(state.events.contains(&GameEvent::PowerUpCollected));
}

#[test]
fn hazard_hit_is_silent_while_power_up_active() {
    let (mut state, mut store) = start(4, 0);
    state.player.y = 300.0;

    assert!(state.lanes.claim(450));
    let mut power_up = Entity::power_up(700, 450, &state.tuning);
    power_up.x = 600.0;
    state.power_ups.push(power_up);
    state.power_up_active = true;

    assert!(state.lanes.claim(300));
    let mut skull = Entity::skull(701, 300, &state.tuning);
    skull.x = 100.0;
    state.skulls.push(skull);

    idle(&mut state, &mut store);
    assert_eq!(state.lives, 2);
    assert!(state.skulls.is_empty());
    assert!(!state.lanes.is_occupied(300));
    assert!(!state.events.contains(&GameEvent::HazardHit));
}

#[test]
fn rebounding_cattle_retreats_and_returns() {
    let (mut state, mut store) = start(5, 0);
    state.player.y = 300.0;

    assert!(state.lanes.claim(300));
    let mut rng = rand_pcg::Pcg32::new(5, 1);
    let mut cow = Entity::cattle(800, CattleClass::Slow, 300, &state.tuning, &mut rng);
    let base = cow.speed;
    cow.x = 129.0 + base;
    state.cattle.push(cow);

    idle(&mut state, &mut store);
    let bumped = state.cattle.iter().find(|c| c.id == 800).unwrap();
    assert!(bumped.is_rebounding());
    assert_eq!(state.lives, 3);

    let mut last_x = bumped.x;
    loop {
        idle(&mut state, &mut store);
        let cow = state.cattle.iter().find(|c| c.id == 800).unwrap();
        if !cow.is_rebounding() {
            assert!(cow.x >= state.tuning.field_width);
            assert_eq!(cow.speed, base);
            break;
        }
        assert!((cow.x - last_x - base * 5.0).abs() < 1e-3);
        last_x = cow.x;
    }
    assert_eq!(state.lives, 3);
}

#[test]
fn last_life_ends_run_and_saves_once() {
    let (mut state, mut store) = start(6, 90);
    assert_eq!(state.high_score, 90);
    state.score = 120;
    state.lives = 1;
    state.player.y = 300.0;

    assert!(state.lanes.claim(300));
    let mut rock = Entity::obstacle(900, 300, &state.tuning);
    rock.x = 100.0;
    state.obstacles.push(rock);

    idle(&mut state, &mut store);
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(store.saves, 1);
    assert_eq!(store.value, Some(120));

    for _ in 0..10 {
        idle(&mut state, &mut store);
    }
    assert_eq!(store.saves, 1);
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn restart_resets_everything_but_high_score() {
    let (mut state, mut store) = start(7, 0);
    state.lives = 1;
    state.score = 400;
    state.high_score = 400;
    while state.phase == GamePhase::Play {
        idle(&mut state, &mut store);
    }

    let click = TickInput {
        events: vec![InputEvent::PointerDown(Vec2::new(400.0, 420.0))],
    };
    tick(&mut state, &click, &mut store);
    assert_eq!(state.phase, GamePhase::Play);
    assert_eq!(state.lives, 3);
    assert_eq!(state.score, 0);
    assert_eq!(state.high_score, 400);
    assert_eq!(state.entity_count(), 0);
    assert_eq!(state.lanes.occupied_count(), 0);
    assert_eq!(state.spawner.difficulty, 1.0);
    assert!(state.spawner.triggered_milestones.is_empty());
    assert!(!state.power_up_active);
}

#[test]
fn full_lanes_drop_spawn_but_difficulty_advances() {
    let (mut state, mut store) = start(8, 0);
    claim_all_lanes(&mut state);
    state.spawner.cattle_timer = 59;

    idle(&mut state, &mut store);
    assert!(state.cattle.is_empty());
    assert_eq!(state.spawner.cattle_timer, 0);
    assert!((state.spawner.difficulty - 1.01).abs() < 1e-6);
}

#[test]
fn milestone_is_spent_even_without_a_lane() {
    let (mut state, mut store) = start(9, 0);
    claim_all_lanes(&mut state);
    state.score = 360;

    idle(&mut state, &mut store);
    assert!(state.power_ups.is_empty());
    assert!(!state.power_up_active);
    assert!(state.spawner.triggered_milestones.contains(&350));

    state.lanes.clear();
    for _ in 0..5 {
        idle(&mut state, &mut store);
    }
    assert!(state.power_ups.is_empty());
}

#[test]
fn milestone_spawns_power_up_and_silences_hazards() {
    let (mut state, mut store) = start(10, 0);
    state.score = 500;

    idle(&mut state, &mut store);
    assert_eq!(state.power_ups.len(), 2);
    assert!(state.power_up_active);
    assert!(state.events.contains(&GameEvent::SilenceHazards));
}

#[test]
fn tap_gesture_throws_rope() {
    let (mut state, mut store) = start(11, 0);
    let tap = TickInput {
        events: vec![
            InputEvent::PointerDown(Vec2::new(300.0, 300.0)),
            InputEvent::PointerUp(Vec2::new(302.0, 301.0)),
        ],
    };
    tick(&mut state, &tap, &mut store);
    assert!(state.events.contains(&GameEvent::RopeFired));
    assert!(!state.player.rope.is_idle());
}

#[test]
fn autopilot_keeps_invariants_over_a_long_session() {
    let (mut state, mut store) = start(12, 0);
    let mut high = state.high_score;

    for _ in 0..20_000 {
        let input = if state.phase == GamePhase::GameOver {
            TickInput::key(Key::Confirm)
        } else {
            autopilot(&state)
        };
        let difficulty_before = state.spawner.difficulty;
        let was_playing = state.phase == GamePhase::Play;
        tick(&mut state, &input, &mut store);

        let mut held = state.held_lanes();
        held.sort_unstable();
        let occupied: Vec<_> = state.lanes.occupied().collect();
        assert_eq!(held, occupied, "lanes out of sync with entities");

        assert!(state.high_score >= high);
        high = state.high_score;

        assert!(state.spawner.difficulty <= 2.5);
        if was_playing && state.phase == GamePhase::Play {
            assert!(state.spawner.difficulty >= difficulty_before);
        }
        assert!(state.cattle.len() <= state.tuning.max_cattle);
    }
}
