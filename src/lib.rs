//! Stampede - A lane-based cattle roping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, lasso, collisions, game state)
//! - `highscores`: High score persistence capability and stores
//! - `settings`: Host settings loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{
    FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, PersistError, load_high_score,
    save_high_score,
};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Vertical band the player and lanes live in
    pub const TOP_LIMIT: i32 = 100;
    pub const BOTTOM_LIMIT: i32 = 500;
    pub const LANE_SPACING: i32 = 50;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_SIZE: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 10.0;

    /// Rope defaults
    pub const ROPE_STEP: f32 = 15.0;
    pub const ROPE_MAX: f32 = 180.0;
    /// Vertical sag of the rope tip at full extension
    pub const ROPE_MAX_DROP: f32 = 30.0;
    /// Anchor offset below the top of the player box
    pub const ROPE_ANCHOR_DY: f32 = 10.0;

    /// Pointer movement (either axis) that turns a tap into a drag
    pub const TAP_THRESHOLD: f32 = 10.0;

    /// Cattle spawning
    pub const MAX_CATTLE: usize = 8;
    pub const SPAWN_RATE_BASE: f32 = 60.0;
    pub const SPAWN_RATE_FLOOR: u32 = 30;
    pub const DIFFICULTY_START: f32 = 1.0;
    pub const DIFFICULTY_STEP: f32 = 0.01;
    pub const DIFFICULTY_CAP: f32 = 2.5;

    /// Hazards
    pub const OBSTACLE_INTERVAL: u32 = 180;
    pub const SKULL_SCORE_GAP: u64 = 250;
    pub const SKULL_SPAWN_MARGIN: f32 = 100.0;

    /// Speed multiplier for cattle bouncing off the player
    pub const REBOUND_FACTOR: f32 = 5.0;

    pub const STARTING_LIVES: i32 = 3;
}
