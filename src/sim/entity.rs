//! Lane-riding entities
//!
//! Everything the player meets drifts right-to-left along a lane. The shared
//! body lives in [`Entity`]; what differs per variant lives in [`EntityKind`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::lanes::{Lane, LaneAllocator};
use crate::tuning::{CattleStats, Tuning};

/// Cattle speed classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CattleClass {
    Slow,
    Fast,
    Fastest,
}

impl CattleClass {
    pub fn stats(self, tuning: &Tuning) -> CattleStats {
        match self {
            CattleClass::Slow => tuning.slow,
            CattleClass::Fast => tuning.fast,
            CattleClass::Fastest => tuning.fastest,
        }
    }
}

/// Per-variant data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Cattle {
        class: CattleClass,
        reward: u64,
        /// Speed sampled at spawn; restored after a rebound
        base_speed: f32,
        /// Set after bumping into the player; the animal retreats off-screen
        hit_cowboy: bool,
    },
    Obstacle,
    PowerUp,
    Skull,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Cattle { .. } => "cattle",
            EntityKind::Obstacle => "obstacle",
            EntityKind::PowerUp => "power-up",
            EntityKind::Skull => "skull",
        }
    }
}

/// Looping sprite frame counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub frame: u8,
    pub timer: u32,
}

impl Animation {
    /// Advance one tick; flips to the next frame every `period` ticks
    pub fn step(&mut self, period: u32, frames: u8) {
        self.timer += 1;
        if self.timer >= period {
            self.timer = 0;
            self.frame = (self.frame + 1) % frames.max(1);
        }
    }
}

/// A live entity. It owns its lane until [`Entity::on_remove`] hands it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub lane: Lane,
    pub width: f32,
    pub height: f32,
    /// Leftward speed in pixels per tick
    pub speed: f32,
    pub anim: Animation,
}

impl Entity {
    /// Spawn a cattle of `class` at the right edge of the field
    pub fn cattle<R: Rng + ?Sized>(
        id: u32,
        class: CattleClass,
        lane: Lane,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let stats = class.stats(tuning);
        let speed = if stats.speed.max > stats.speed.min {
            rng.random_range(stats.speed.min..stats.speed.max)
        } else {
            stats.speed.min
        };
        Self {
            id,
            kind: EntityKind::Cattle {
                class,
                reward: stats.reward,
                base_speed: speed,
                hit_cowboy: false,
            },
            x: tuning.field_width,
            lane,
            width: tuning.cattle_width,
            height: tuning.cattle_height,
            speed,
            anim: Animation::default(),
        }
    }

    pub fn power_up(id: u32, lane: Lane, tuning: &Tuning) -> Self {
        Self::drifter(
            id,
            EntityKind::PowerUp,
            lane,
            tuning.field_width,
            (tuning.power_up_width, tuning.power_up_height),
            tuning.power_up_speed,
        )
    }

    pub fn obstacle(id: u32, lane: Lane, tuning: &Tuning) -> Self {
        Self::drifter(
            id,
            EntityKind::Obstacle,
            lane,
            tuning.field_width,
            (tuning.obstacle_size, tuning.obstacle_size),
            tuning.obstacle_speed,
        )
    }

    pub fn skull(id: u32, lane: Lane, tuning: &Tuning) -> Self {
        Self::drifter(
            id,
            EntityKind::Skull,
            lane,
            tuning.field_width,
            (tuning.skull_size, tuning.skull_size),
            tuning.skull_speed,
        )
    }

    fn drifter(id: u32, kind: EntityKind, lane: Lane, x: f32, size: (f32, f32), speed: f32) -> Self {
        Self {
            id,
            kind,
            x,
            lane,
            width: size.0,
            height: size.1,
            speed,
            anim: Animation::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.lane as f32, self.width, self.height)
    }

    /// Is this a cattle currently retreating after a bump?
    pub fn is_rebounding(&self) -> bool {
        matches!(self.kind, EntityKind::Cattle { hit_cowboy: true, .. })
    }

    /// Start a rebound. Returns false if this is not a cattle or it is already rebounding.
    pub fn start_rebound(&mut self) -> bool {
        match &mut self.kind {
            EntityKind::Cattle { hit_cowboy, .. } if !*hit_cowboy => {
                *hit_cowboy = true;
                true
            }
            _ => false,
        }
    }

    /// Move one tick and animate
    pub fn advance(&mut self, tuning: &Tuning) {
        match &mut self.kind {
            EntityKind::Cattle {
                base_speed,
                hit_cowboy,
                ..
            } => {
                if *hit_cowboy {
                    self.x += self.speed * tuning.rebound_factor;
                    if self.x >= tuning.field_width {
                        self.speed = *base_speed;
                        *hit_cowboy = false;
                    }
                } else {
                    self.x -= self.speed;
                }
                if self.speed > 0.0 {
                    let period = if self.speed < 3.0 { 10 } else { 7 };
                    self.anim.step(period, 2);
                }
            }
            EntityKind::Obstacle => {
                self.x -= self.speed;
                self.anim.step(10, 3);
            }
            EntityKind::PowerUp | EntityKind::Skull => {
                self.x -= self.speed;
            }
        }
    }

    /// Has the entity drifted fully past the left edge?
    pub fn is_off_left(&self) -> bool {
        self.x < -self.width
    }

    /// Release the entity's lane. Consumes the entity so it cannot outlive its lane.
    pub fn on_remove(self, lanes: &mut LaneAllocator) {
        lanes.release(self.lane);
    }
}
