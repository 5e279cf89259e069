//! Game state and core simulation types
//!
//! All state the tick touches lives here, owned by one [`GameState`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::lanes::{Lane, LaneAllocator};
use super::lasso::RopeSegment;
use super::player::Player;
use super::spawner::SpawnerState;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Start,
    /// Active gameplay
    Play,
    /// Run ended, waiting for restart
    GameOver,
}

/// Discrete cues for the audio layer (and anything else listening)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The rope was thrown
    RopeFired,
    /// A cattle was roped
    CaptureScored { reward: u64 },
    /// The player lost a life
    HazardHit,
    /// A power-up was roped
    PowerUpCollected,
    /// Periodic herd noise while cattle are on the field
    AmbientHazard,
    /// A power-up appeared; ambient hazard cues should stop
    SilenceHazards,
    PhaseChanged(GamePhase),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Can drop to zero or below, which ends the run
    pub lives: i32,
    /// Best score seen by this process, never decreases
    pub high_score: u64,
    /// Play ticks elapsed this run
    pub play_ticks: u64,
    /// True while at least one power-up is on the field
    pub power_up_active: bool,
    pub player: Player,
    pub lanes: LaneAllocator,
    pub spawner: SpawnerState,
    pub cattle: Vec<Entity>,
    pub power_ups: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub skulls: Vec<Entity>,
    /// Cues emitted during the last tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game on the title screen
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = SpawnerState::new(&tuning, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            score: tuning.starting_score,
            lives: tuning.starting_lives,
            high_score,
            play_ticks: 0,
            power_up_active: false,
            player: Player::new(&tuning),
            lanes: LaneAllocator::new(tuning.lanes()),
            spawner,
            cattle: Vec::new(),
            power_ups: Vec::new(),
            obstacles: Vec::new(),
            skulls: Vec::new(),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start -> Play
    pub fn begin(&mut self) {
        self.score = self.tuning.starting_score;
        self.set_phase(GamePhase::Play);
    }

    /// GameOver -> Play: everything but the high score goes back to run start
    pub fn restart(&mut self) {
        self.player = Player::new(&self.tuning);
        self.cattle.clear();
        self.power_ups.clear();
        self.obstacles.clear();
        self.skulls.clear();
        self.lanes.clear();
        self.score = self.tuning.starting_score;
        self.lives = self.tuning.starting_lives;
        self.play_ticks = 0;
        self.spawner.reset(&self.tuning);
        self.power_up_active = false;
        self.set_phase(GamePhase::Play);
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?} (score {}, lives {})", self.phase, phase, self.score, self.lives);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Add points and keep the high score in step
    pub fn award(&mut self, points: u64) {
        self.score += points;
        self.high_score = self.high_score.max(self.score);
    }

    /// Iterate every live entity
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.cattle
            .iter()
            .chain(&self.power_ups)
            .chain(&self.obstacles)
            .chain(&self.skulls)
    }

    pub fn entity_count(&self) -> usize {
        self.cattle.len() + self.power_ups.len() + self.obstacles.len() + self.skulls.len()
    }

    /// Lanes held by live entities (for invariant checks)
    pub fn held_lanes(&self) -> Vec<Lane> {
        self.entities().map(|e| e.lane).collect()
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            player: PlayerView {
                x: self.player.x,
                y: self.player.y,
                frame: self.player.anim.frame,
                rope: self.player.rope_segment(&self.tuning),
            },
            entities: self.entities().map(EntityView::from).collect(),
        }
    }
}

/// Player pose for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub frame: u8,
    pub rope: Option<RopeSegment>,
}

/// Entity pose for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub frame: u8,
}

impl From<&Entity> for EntityView {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            x: e.x,
            y: e.lane as f32,
            width: e.width,
            height: e.height,
            frame: e.anim.frame,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub lives: i32,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
}
