//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a host can
//! rebalance without recompiling. Defaults reproduce the shipped game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Inclusive-exclusive speed range sampled uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Per-class cattle stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CattleStats {
    pub speed: SpeedRange,
    pub reward: u64,
}

/// Axis-aligned button area in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonArea {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,
    pub top_limit: i32,
    pub bottom_limit: i32,
    pub lane_spacing: i32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub tap_threshold: f32,

    // === Rope ===
    pub rope_step: f32,
    pub rope_max: f32,
    pub rope_max_drop: f32,
    pub rope_anchor_dy: f32,

    // === Cattle spawning ===
    pub max_cattle: usize,
    pub spawn_rate_base: f32,
    pub spawn_rate_floor: u32,
    pub difficulty_start: f32,
    pub difficulty_step: f32,
    pub difficulty_cap: f32,
    /// Score at which the "fastest" class unlocks
    pub fastest_unlock_score: u64,
    /// Play ticks before "fast" cattle start appearing
    pub fast_ramp_start: u64,
    /// Ticks over which the fast chance ramps to its cap
    pub fast_ramp_ticks: u64,
    pub fast_chance_cap: f32,
    pub fastest_ramp_start: u64,
    pub fastest_ramp_ticks: u64,
    pub fastest_chance_base: f32,
    pub fastest_chance_cap: f32,
    /// Probability mass given to "fast" above "fastest" once unlocked
    pub fast_band_after_unlock: f32,
    pub slow: CattleStats,
    pub fast: CattleStats,
    pub fastest: CattleStats,
    pub rebound_factor: f32,

    // === Power-ups ===
    pub power_up_milestones: Vec<u64>,
    pub power_up_speed: f32,
    pub power_up_width: f32,
    pub power_up_height: f32,

    // === Hazards ===
    pub obstacle_interval: u32,
    pub obstacle_speed: f32,
    pub obstacle_size: f32,
    pub skull_score_gap: u64,
    pub skull_spawn_margin: f32,
    pub skull_speed: f32,
    pub skull_size: f32,

    // === Cattle body ===
    pub cattle_width: f32,
    pub cattle_height: f32,

    // === Run ===
    pub starting_lives: i32,
    pub starting_score: u64,
    /// Ambient herd cue interval range (ticks, inclusive)
    pub ambient_cue_min: u32,
    pub ambient_cue_max: u32,
    pub start_button: ButtonArea,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            top_limit: TOP_LIMIT,
            bottom_limit: BOTTOM_LIMIT,
            lane_spacing: LANE_SPACING,

            player_x: PLAYER_X,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            tap_threshold: TAP_THRESHOLD,

            rope_step: ROPE_STEP,
            rope_max: ROPE_MAX,
            rope_max_drop: ROPE_MAX_DROP,
            rope_anchor_dy: ROPE_ANCHOR_DY,

            max_cattle: MAX_CATTLE,
            spawn_rate_base: SPAWN_RATE_BASE,
            spawn_rate_floor: SPAWN_RATE_FLOOR,
            difficulty_start: DIFFICULTY_START,
            difficulty_step: DIFFICULTY_STEP,
            difficulty_cap: DIFFICULTY_CAP,
            fastest_unlock_score: 400,
            fast_ramp_start: 900,
            fast_ramp_ticks: 900,
            fast_chance_cap: 0.4,
            fastest_ramp_start: 1800,
            fastest_ramp_ticks: 1800,
            fastest_chance_base: 0.1,
            fastest_chance_cap: 0.3,
            fast_band_after_unlock: 0.4,
            slow: CattleStats {
                speed: SpeedRange::new(2.5, 3.5),
                reward: 5,
            },
            fast: CattleStats {
                speed: SpeedRange::new(3.5, 4.5),
                reward: 10,
            },
            fastest: CattleStats {
                speed: SpeedRange::new(4.5, 5.5),
                reward: 15,
            },
            rebound_factor: REBOUND_FACTOR,

            power_up_milestones: vec![350, 500, 750, 1000],
            power_up_speed: 2.0,
            power_up_width: 100.0,
            power_up_height: 60.0,

            obstacle_interval: OBSTACLE_INTERVAL,
            obstacle_speed: 2.0,
            obstacle_size: 25.0,
            skull_score_gap: SKULL_SCORE_GAP,
            skull_spawn_margin: SKULL_SPAWN_MARGIN,
            skull_speed: 2.0,
            skull_size: 50.0,

            cattle_width: 100.0,
            cattle_height: 60.0,

            starting_lives: STARTING_LIVES,
            starting_score: 0,
            ambient_cue_min: 120,
            ambient_cue_max: 240,
            start_button: ButtonArea {
                x: FIELD_WIDTH / 2.0 - 100.0,
                y: FIELD_HEIGHT / 2.0 + 100.0,
                w: 200.0,
                h: 60.0,
            },
        }
    }
}

impl Tuning {
    /// Lane y-coordinates, top to bottom
    pub fn lanes(&self) -> Vec<i32> {
        if self.lane_spacing <= 0 {
            return Vec::new();
        }
        let count = (self.bottom_limit - self.top_limit).max(0) / self.lane_spacing;
        (0..count)
            .map(|i| self.top_limit + i * self.lane_spacing)
            .collect()
    }

    /// Lowest y the player's top edge may reach
    pub fn player_max_y(&self) -> f32 {
        self.bottom_limit as f32 - self.player_height
    }

    /// Parse a tuning table from JSON, missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
