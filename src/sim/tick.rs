//! Fixed timestep simulation tick
//!
//! One call advances the game by one nominal 1/60 s frame: inputs first, then
//! (in Play only) spawning, the player, every entity list, and the end-of-run
//! check.

use glam::Vec2;

use super::collision::aabb_overlap;
use super::entity::{Entity, EntityKind};
use super::lanes::LaneAllocator;
use super::spawner::{SpawnContext, SpawnPlan, plan_spawns};
use super::state::{GameEvent, GamePhase, GameState};
use crate::highscores::{HighScoreStore, save_high_score};

/// Discrete keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Fire,
    /// Start or restart
    Confirm,
    Quit,
}

/// Normalized input, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    /// Only sent while the button is held
    PointerMove(Vec2),
    PointerUp(Vec2),
    Key(Key),
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn key(key: Key) -> Self {
        Self {
            events: vec![InputEvent::Key(key)],
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }
}

/// Whether the host loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Quit,
}

/// Advance the game state by one fixed timestep
pub fn tick<S: HighScoreStore + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    store: &mut S,
) -> TickStatus {
    state.events.clear();

    for event in &input.events {
        if handle_input(state, *event) == TickStatus::Quit {
            save_high_score(store, state.high_score);
            return TickStatus::Quit;
        }
    }

    if state.phase == GamePhase::Play {
        step_play(state, store);
    }

    TickStatus::Running
}

fn handle_input(state: &mut GameState, event: InputEvent) -> TickStatus {
    let tuning = &state.tuning;
    match (state.phase, event) {
        (_, InputEvent::Key(Key::Quit)) => return TickStatus::Quit,

        (GamePhase::Start, InputEvent::Key(Key::Confirm)) => state.begin(),
        (GamePhase::GameOver, InputEvent::Key(Key::Confirm)) => state.restart(),
        (GamePhase::Start | GamePhase::GameOver, InputEvent::PointerDown(pos)) => {
            let button = tuning.start_button;
            let inside = pos.x >= button.x
                && pos.x <= button.x + button.w
                && pos.y >= button.y
                && pos.y <= button.y + button.h;
            if inside {
                if state.phase == GamePhase::Start {
                    state.begin();
                } else {
                    state.restart();
                }
            }
        }

        (_, InputEvent::Key(Key::Up)) => state.player.step_vertical(-1.0, tuning),
        (_, InputEvent::Key(Key::Down)) => state.player.step_vertical(1.0, tuning),

        (GamePhase::Play, InputEvent::Key(Key::Fire)) => {
            if state.player.fire() {
                state.events.push(GameEvent::RopeFired);
            }
        }
        (GamePhase::Play, InputEvent::PointerDown(pos)) => state.player.pointer_down(pos),
        (GamePhase::Play, InputEvent::PointerMove(pos)) => state.player.pointer_move(pos, tuning),
        (GamePhase::Play, InputEvent::PointerUp(pos)) => {
            if state.player.pointer_up(pos, tuning) {
                state.events.push(GameEvent::RopeFired);
            }
        }

        _ => {}
    }
    TickStatus::Running
}

fn step_play<S: HighScoreStore + ?Sized>(state: &mut GameState, store: &mut S) {
    state.play_ticks += 1;

    // Spawning
    let margin_edge = state.tuning.field_width - state.tuning.skull_spawn_margin;
    let ctx = SpawnContext {
        score: state.score,
        play_ticks: state.play_ticks,
        live_cattle: state.cattle.len(),
        skull_in_margin: state.skulls.iter().any(|s| s.x > margin_edge),
    };
    let (next, plan) = plan_spawns(&state.spawner, &ctx, &state.tuning, &mut state.rng);
    state.spawner = next;
    if !plan.is_empty() {
        execute_plan(state, &plan);
    }

    let herd_present = !state.cattle.is_empty();
    if state
        .spawner
        .tick_ambient(herd_present, state.power_up_active, &state.tuning, &mut state.rng)
    {
        state.events.push(GameEvent::AmbientHazard);
    }

    // Player
    state.player.advance_rope(&state.tuning);
    state.player.animate();

    resolve_entities(state);

    if state.lives <= 0 {
        state.high_score = state.high_score.max(state.score);
        state.set_phase(GamePhase::GameOver);
        save_high_score(store, state.high_score);
    }
}

/// Try to place each planned spawn in a free lane
fn execute_plan(state: &mut GameState, plan: &SpawnPlan) {
    if let Some(class) = plan.cattle {
        match state.lanes.acquire(&mut state.rng) {
            Some(lane) => {
                let id = state.next_entity_id();
                let cattle = Entity::cattle(id, class, lane, &state.tuning, &mut state.rng);
                log::debug!("Spawned {:?} cattle {} in lane {} (difficulty {:.2})", class, id, lane, state.spawner.difficulty);
                state.cattle.push(cattle);
            }
            None => log::debug!("No free lane for {:?} cattle, spawn dropped", class),
        }
    }

    for milestone in &plan.power_ups {
        match state.lanes.acquire(&mut state.rng) {
            Some(lane) => {
                let id = state.next_entity_id();
                state.power_ups.push(Entity::power_up(id, lane, &state.tuning));
                state.power_up_active = true;
                state.events.push(GameEvent::SilenceHazards);
                log::debug!("Milestone {} reached, power-up {} in lane {}", milestone, id, lane);
            }
            None => log::debug!("No free lane for milestone {} power-up, spawn dropped", milestone),
        }
    }

    if plan.obstacle {
        match state.lanes.acquire(&mut state.rng) {
            Some(lane) => {
                let id = state.next_entity_id();
                state.obstacles.push(Entity::obstacle(id, lane, &state.tuning));
            }
            None => log::debug!("No free lane for obstacle, spawn dropped"),
        }
    }

    if plan.skull {
        match state.lanes.acquire(&mut state.rng) {
            Some(lane) => {
                let id = state.next_entity_id();
                state.skulls.push(Entity::skull(id, lane, &state.tuning));
                state.spawner.record_skull(state.score);
            }
            None => log::debug!("No free lane for skull, spawn dropped"),
        }
    }
}

/// Outcome of an entity's per-tick pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fate {
    Keep,
    Remove,
}

/// Run `f` over each entity in order; removed entities give their lane back immediately
fn retain_entities(
    list: &mut Vec<Entity>,
    lanes: &mut LaneAllocator,
    mut f: impl FnMut(&mut Entity) -> Fate,
) {
    let mut kept = Vec::with_capacity(list.len());
    for mut entity in list.drain(..) {
        match f(&mut entity) {
            Fate::Keep => kept.push(entity),
            Fate::Remove => entity.on_remove(lanes),
        }
    }
    *list = kept;
}

/// Move everything, then resolve ropes, bumps and escapes
fn resolve_entities(state: &mut GameState) {
    let GameState {
        tuning,
        player,
        lanes,
        cattle,
        power_ups,
        obstacles,
        skulls,
        score,
        high_score,
        lives,
        power_up_active,
        events,
        ..
    } = state;

    let rope = player.rope_segment(tuning);
    let player_box = player.bounds();

    retain_entities(cattle, lanes, |c| {
        c.advance(tuning);

        if let Some(rope) = &rope {
            if rope.catches(&c.bounds()) {
                if let EntityKind::Cattle { reward, .. } = c.kind {
                    *score += reward;
                    *high_score = (*high_score).max(*score);
                    events.push(GameEvent::CaptureScored { reward });
                }
                return Fate::Remove;
            }
        }

        if !c.is_rebounding() && aabb_overlap(&c.bounds(), &player_box) {
            c.start_rebound();
            return Fate::Keep;
        }

        if c.x < 0.0 && !c.is_rebounding() {
            *lives -= 1;
            events.push(GameEvent::HazardHit);
            return Fate::Remove;
        }
        Fate::Keep
    });

    retain_entities(power_ups, lanes, |p| {
        p.advance(tuning);

        if let Some(rope) = &rope {
            if rope.catches(&p.bounds()) {
                *lives += 1;
                events.push(GameEvent::PowerUpCollected);
                return Fate::Remove;
            }
        }

        if p.is_off_left() {
            return Fate::Remove;
        }
        Fate::Keep
    });
    if power_ups.is_empty() {
        *power_up_active = false;
    }

    let shielded = *power_up_active;
    for hazards in [obstacles, skulls] {
        retain_entities(hazards, lanes, |h| {
            h.advance(tuning);

            if aabb_overlap(&h.bounds(), &player_box) {
                *lives -= 1;
                if !shielded {
                    events.push(GameEvent::HazardHit);
                }
                return Fate::Remove;
            }

            if h.is_off_left() {
                return Fate::Remove;
            }
            Fate::Keep
        });
    }
}
