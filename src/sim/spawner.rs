//! Entity spawning and the difficulty curve
//!
//! Spawning is split in two: [`plan_spawns`] is a pure step from the current
//! timers to the next timers plus a list of spawn *attempts*, and the tick
//! then tries to place each attempt in a free lane. Attempts that find no
//! lane are dropped, but the timers have already moved on.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::CattleClass;
use crate::tuning::Tuning;

/// Timers, difficulty and milestone bookkeeping for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerState {
    /// Ticks since the last cattle spawn attempt
    pub cattle_timer: u32,
    /// Ticks since the last obstacle spawn attempt
    pub obstacle_timer: u32,
    /// Spawn cadence multiplier, only ever grows within a run
    pub difficulty: f32,
    /// Power-up milestones already used this run
    pub triggered_milestones: BTreeSet<u64>,
    /// Score at the last successful skull spawn
    pub last_skull_score: u64,
    /// Ticks since the last ambient herd cue
    pub ambient_timer: u32,
    pub ambient_interval: u32,
}

impl SpawnerState {
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            cattle_timer: 0,
            obstacle_timer: 0,
            difficulty: tuning.difficulty_start,
            triggered_milestones: BTreeSet::new(),
            last_skull_score: 0,
            ambient_timer: 0,
            ambient_interval: roll_ambient_interval(tuning, rng),
        }
    }

    /// Back to run-start values. The ambient interval is kept as rolled.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.cattle_timer = 0;
        self.obstacle_timer = 0;
        self.difficulty = tuning.difficulty_start;
        self.triggered_milestones.clear();
        self.last_skull_score = 0;
        self.ambient_timer = 0;
    }

    /// A skull made it onto the field at `score`
    pub fn record_skull(&mut self, score: u64) {
        self.last_skull_score = score;
    }

    /// Count toward the next ambient herd cue. Returns true when the cue fires.
    ///
    /// The timer only runs while cattle are on the field and no power-up is out.
    pub fn tick_ambient<R: Rng + ?Sized>(
        &mut self,
        herd_present: bool,
        suppressed: bool,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if !herd_present || suppressed {
            return false;
        }
        self.ambient_timer += 1;
        if self.ambient_timer >= self.ambient_interval {
            self.ambient_timer = 0;
            self.ambient_interval = roll_ambient_interval(tuning, rng);
            return true;
        }
        false
    }
}

fn roll_ambient_interval<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> u32 {
    let lo = tuning.ambient_cue_min.min(tuning.ambient_cue_max);
    rng.random_range(lo..=tuning.ambient_cue_max.max(lo))
}

/// What the spawner sees of the world this tick
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    pub score: u64,
    /// Play ticks elapsed this run, including the current one
    pub play_ticks: u64,
    pub live_cattle: usize,
    /// A skull is still inside the right-hand spawn margin
    pub skull_in_margin: bool,
}

/// Spawn attempts for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnPlan {
    pub cattle: Option<CattleClass>,
    /// One power-up per milestone crossed for the first time, ascending
    pub power_ups: Vec<u64>,
    pub obstacle: bool,
    pub skull: bool,
}

impl SpawnPlan {
    pub fn is_empty(&self) -> bool {
        self.cattle.is_none() && self.power_ups.is_empty() && !self.obstacle && !self.skull
    }
}

/// Ticks between cattle spawns at a given difficulty
pub fn cattle_spawn_rate(difficulty: f32, tuning: &Tuning) -> u32 {
    let rate = (tuning.spawn_rate_base / difficulty).round().max(0.0) as u32;
    rate.max(tuning.spawn_rate_floor)
}

/// Chance that a spawn below the unlock score is "fast"
pub fn fast_chance(play_ticks: u64, tuning: &Tuning) -> f32 {
    if play_ticks <= tuning.fast_ramp_start || tuning.fast_ramp_ticks == 0 {
        return 0.0;
    }
    let t = (play_ticks - tuning.fast_ramp_start) as f32 / tuning.fast_ramp_ticks as f32;
    (tuning.fast_chance_cap * t).min(tuning.fast_chance_cap)
}

/// Chance that a spawn at or above the unlock score is "fastest"
pub fn fastest_chance(play_ticks: u64, tuning: &Tuning) -> f32 {
    if play_ticks <= tuning.fastest_ramp_start || tuning.fastest_ramp_ticks == 0 {
        return tuning.fastest_chance_base;
    }
    let t = (play_ticks - tuning.fastest_ramp_start) as f32 / tuning.fastest_ramp_ticks as f32;
    let span = tuning.fastest_chance_cap - tuning.fastest_chance_base;
    (tuning.fastest_chance_base + span * t).min(tuning.fastest_chance_cap)
}

/// Weighted class draw from a uniform `roll` in [0, 1)
pub fn pick_cattle_class(score: u64, play_ticks: u64, roll: f32, tuning: &Tuning) -> CattleClass {
    if score >= tuning.fastest_unlock_score {
        let fastest = fastest_chance(play_ticks, tuning);
        if roll < fastest {
            CattleClass::Fastest
        } else if roll < fastest + tuning.fast_band_after_unlock {
            CattleClass::Fast
        } else {
            CattleClass::Slow
        }
    } else if roll < fast_chance(play_ticks, tuning) {
        CattleClass::Fast
    } else {
        CattleClass::Slow
    }
}

/// Advance the spawn timers one tick and decide which spawns to attempt
pub fn plan_spawns<R: Rng + ?Sized>(
    state: &SpawnerState,
    ctx: &SpawnContext,
    tuning: &Tuning,
    rng: &mut R,
) -> (SpawnerState, SpawnPlan) {
    let mut next = state.clone();
    let mut plan = SpawnPlan::default();

    // Cattle: cadence shortens as difficulty grows
    next.cattle_timer += 1;
    if next.cattle_timer >= cattle_spawn_rate(next.difficulty, tuning)
        && ctx.live_cattle < tuning.max_cattle
    {
        let roll: f32 = rng.random();
        plan.cattle = Some(pick_cattle_class(ctx.score, ctx.play_ticks, roll, tuning));
        next.cattle_timer = 0;
        // Advances on every attempt, even if no lane turns out to be free
        next.difficulty = (next.difficulty + tuning.difficulty_step).min(tuning.difficulty_cap);
    }

    // Power-ups: each milestone is used at most once per run
    let mut milestones = tuning.power_up_milestones.clone();
    milestones.sort_unstable();
    milestones.dedup();
    for milestone in milestones {
        if ctx.score >= milestone && next.triggered_milestones.insert(milestone) {
            plan.power_ups.push(milestone);
        }
    }

    // Obstacles: fixed cadence
    next.obstacle_timer += 1;
    if next.obstacle_timer >= tuning.obstacle_interval {
        plan.obstacle = true;
        next.obstacle_timer = 0;
    }

    // Skulls: score gap since the last one, and the spawn edge must be clear
    if ctx.score >= next.last_skull_score + tuning.skull_score_gap && !ctx.skull_in_margin {
        plan.skull = true;
    }

    (next, plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(score: u64, play_ticks: u64) -> SpawnContext {
        SpawnContext {
            score,
            play_ticks,
            live_cattle: 0,
            skull_in_margin: false,
        }
    }

    fn fresh() -> (SpawnerState, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        (SpawnerState::new(&tuning, &mut rng), tuning, rng)
    }

    #[test]
    fn test_spawn_rate() {
        let tuning = Tuning::default();
        assert_eq!(cattle_spawn_rate(1.0, &tuning), 60);
        assert_eq!(cattle_spawn_rate(1.5, &tuning), 40);
        assert_eq!(cattle_spawn_rate(2.0, &tuning), 30);
        assert_eq!(cattle_spawn_rate(2.5, &tuning), 30, "floored");
    }

    #[test]
    fn test_first_cattle_after_sixty_ticks() {
        let (mut state, tuning, mut rng) = fresh();
        for t in 1..60 {
            let (next, plan) = plan_spawns(&state, &ctx(0, t), &tuning, &mut rng);
            assert!(plan.cattle.is_none(), "tick {t}");
            state = next;
        }
        let (next, plan) = plan_spawns(&state, &ctx(0, 60), &tuning, &mut rng);
        assert_eq!(plan.cattle, Some(CattleClass::Slow));
        assert_eq!(next.cattle_timer, 0);
        assert!((next.difficulty - 1.01).abs() < 1e-6);
    }

    #[test]
    fn test_cattle_cap_holds_timer() {
        let (mut state, tuning, mut rng) = fresh();
        state.cattle_timer = 100;
        let full = SpawnContext {
            live_cattle: tuning.max_cattle,
            ..ctx(0, 100)
        };
        let (next, plan) = plan_spawns(&state, &full, &tuning, &mut rng);
        assert!(plan.cattle.is_none());
        assert_eq!(next.cattle_timer, 101);
        assert_eq!(next.difficulty, state.difficulty);
    }

    #[test]
    fn test_difficulty_capped() {
        let (mut state, tuning, mut rng) = fresh();
        state.difficulty = 2.495;
        state.cattle_timer = 1000;
        let (next, _) = plan_spawns(&state, &ctx(0, 1), &tuning, &mut rng);
        assert_eq!(next.difficulty, 2.5);

        let mut state = next;
        state.cattle_timer = 1000;
        let (next, _) = plan_spawns(&state, &ctx(0, 2), &tuning, &mut rng);
        assert_eq!(next.difficulty, 2.5);
    }

    #[test]
    fn test_fast_chance_ramp() {
        let tuning = Tuning::default();
        assert_eq!(fast_chance(0, &tuning), 0.0);
        assert_eq!(fast_chance(900, &tuning), 0.0);
        assert!((fast_chance(1350, &tuning) - 0.2).abs() < 1e-6);
        assert!((fast_chance(1800, &tuning) - 0.4).abs() < 1e-6);
        assert!((fast_chance(10_000, &tuning) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_fastest_chance_ramp() {
        let tuning = Tuning::default();
        assert!((fastest_chance(0, &tuning) - 0.1).abs() < 1e-6);
        assert!((fastest_chance(2700, &tuning) - 0.2).abs() < 1e-6);
        assert!((fastest_chance(100_000, &tuning) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_class_table() {
        let tuning = Tuning::default();
        // Early game: always slow
        assert_eq!(pick_cattle_class(0, 10, 0.0, &tuning), CattleClass::Slow);
        // Late low-score game: 40% fast
        assert_eq!(pick_cattle_class(100, 5000, 0.39, &tuning), CattleClass::Fast);
        assert_eq!(pick_cattle_class(100, 5000, 0.41, &tuning), CattleClass::Slow);
        // Unlocked: 10% fastest, next 40% fast, rest slow
        assert_eq!(pick_cattle_class(400, 10, 0.05, &tuning), CattleClass::Fastest);
        assert_eq!(pick_cattle_class(400, 10, 0.45, &tuning), CattleClass::Fast);
        assert_eq!(pick_cattle_class(400, 10, 0.55, &tuning), CattleClass::Slow);
    }

    #[test]
    fn test_milestones_fire_once() {
        let (mut state, tuning, mut rng) = fresh();
        let (next, plan) = plan_spawns(&state, &ctx(360, 1), &tuning, &mut rng);
        assert_eq!(plan.power_ups, vec![350]);
        state = next;
        for t in 2..100 {
            let (next, plan) = plan_spawns(&state, &ctx(360, t), &tuning, &mut rng);
            assert!(plan.power_ups.is_empty());
            state = next;
        }
    }

    #[test]
    fn test_score_jump_crosses_several_milestones() {
        let (state, tuning, mut rng) = fresh();
        let (next, plan) = plan_spawns(&state, &ctx(800, 1), &tuning, &mut rng);
        assert_eq!(plan.power_ups, vec![350, 500, 750]);
        assert_eq!(next.triggered_milestones.len(), 3);
    }

    #[test]
    fn test_obstacle_cadence() {
        let (mut state, tuning, mut rng) = fresh();
        let mut fired = Vec::new();
        for t in 1..=360 {
            let (next, plan) = plan_spawns(&state, &ctx(0, t), &tuning, &mut rng);
            if plan.obstacle {
                fired.push(t);
            }
            state = next;
        }
        assert_eq!(fired, vec![180, 360]);
    }

    #[test]
    fn test_skull_gap_and_margin() {
        let (mut state, tuning, mut rng) = fresh();
        let (_, plan) = plan_spawns(&state, &ctx(249, 1), &tuning, &mut rng);
        assert!(!plan.skull);

        let (_, plan) = plan_spawns(&state, &ctx(250, 1), &tuning, &mut rng);
        assert!(plan.skull);

        let blocked = SpawnContext {
            skull_in_margin: true,
            ..ctx(250, 1)
        };
        let (_, plan) = plan_spawns(&state, &blocked, &tuning, &mut rng);
        assert!(!plan.skull);

        state.record_skull(260);
        let (_, plan) = plan_spawns(&state, &ctx(500, 1), &tuning, &mut rng);
        assert!(!plan.skull);
        let (_, plan) = plan_spawns(&state, &ctx(510, 1), &tuning, &mut rng);
        assert!(plan.skull);
    }

    #[test]
    fn test_ambient_cue_interval() {
        let (mut state, tuning, mut rng) = fresh();
        let interval = state.ambient_interval;
        assert!((120..=240).contains(&interval));

        // Suppressed or empty field: timer frozen
        for _ in 0..500 {
            assert!(!state.tick_ambient(false, false, &tuning, &mut rng));
            assert!(!state.tick_ambient(true, true, &tuning, &mut rng));
        }
        assert_eq!(state.ambient_timer, 0);

        let fired = (1..=interval)
            .filter(|_| state.tick_ambient(true, false, &tuning, &mut rng))
            .count();
        assert_eq!(fired, 1);
        assert_eq!(state.ambient_timer, 0);
    }

    #[test]
    fn test_reset() {
        let (mut state, tuning, _) = fresh();
        state.difficulty = 2.0;
        state.cattle_timer = 12;
        state.triggered_milestones.insert(350);
        state.last_skull_score = 250;
        state.reset(&tuning);
        assert_eq!(state.difficulty, 1.0);
        assert_eq!(state.cattle_timer, 0);
        assert!(state.triggered_milestones.is_empty());
        assert_eq!(state.last_skull_score, 0);
    }
}
