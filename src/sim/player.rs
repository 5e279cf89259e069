//! The cowboy: vertical movement, pointer gestures and the rope cycle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::Animation;
use super::lasso::RopeSegment;
use crate::tuning::Tuning;

/// Length a freshly thrown rope starts at, before the first extension step
const ROPE_THROW_LENGTH: f32 = 1.0;

/// Rope state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RopeState {
    /// Coiled, length 0
    Idle,
    /// Flying out; length grows by a fixed step each tick up to the max
    Extending { length: f32 },
}

impl RopeState {
    pub fn length(&self) -> f32 {
        match self {
            RopeState::Idle => 0.0,
            RopeState::Extending { length } => *length,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RopeState::Idle)
    }
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub start: Vec2,
    pub dragging: bool,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rope: RopeState,
    pub anim: Animation,
    pub touch: Option<Touch>,
}

impl Player {
    /// Fresh player centered in the lane band
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_x,
            y: ((tuning.top_limit + tuning.bottom_limit) / 2) as f32,
            width: tuning.player_width,
            height: tuning.player_height,
            rope: RopeState::Idle,
            anim: Animation::default(),
            touch: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Where the rope leaves the player
    pub fn rope_anchor(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + tuning.rope_anchor_dy)
    }

    /// Current rope segment, `None` while the rope is coiled
    pub fn rope_segment(&self, tuning: &Tuning) -> Option<RopeSegment> {
        let length = self.rope.length();
        (length > 0.0).then(|| {
            RopeSegment::new(
                self.rope_anchor(tuning),
                length,
                tuning.rope_max,
                tuning.rope_max_drop,
            )
        })
    }

    /// Throw the rope. Only works while it is coiled; returns whether it was thrown.
    pub fn fire(&mut self) -> bool {
        if !self.rope.is_idle() {
            return false;
        }
        self.rope = RopeState::Extending {
            length: ROPE_THROW_LENGTH,
        };
        true
    }

    fn clamp_y(&mut self, tuning: &Tuning) {
        self.y = self
            .y
            .clamp(tuning.top_limit as f32, tuning.player_max_y().max(tuning.top_limit as f32));
    }

    /// Discrete up/down step (`dir` is -1 for up, +1 for down)
    pub fn step_vertical(&mut self, dir: f32, tuning: &Tuning) {
        self.y += dir.signum() * tuning.player_speed;
        self.clamp_y(tuning);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.touch = Some(Touch {
            start: pos,
            dragging: false,
        });
    }

    /// Drag the player vertically once the pointer has moved past the tap threshold
    pub fn pointer_move(&mut self, pos: Vec2, tuning: &Tuning) {
        let Some(touch) = self.touch.as_mut() else {
            return;
        };
        let delta = (pos - touch.start).abs();
        if delta.x > tuning.tap_threshold || delta.y > tuning.tap_threshold {
            touch.dragging = true;
        }
        if touch.dragging {
            self.y = pos.y - self.height / 2.0;
            self.clamp_y(tuning);
        }
    }

    /// End a gesture; a tap throws the rope. Returns whether the rope was thrown.
    pub fn pointer_up(&mut self, pos: Vec2, tuning: &Tuning) -> bool {
        let Some(touch) = self.touch.take() else {
            return false;
        };
        let delta = (pos - touch.start).abs();
        let is_tap =
            !touch.dragging && delta.x <= tuning.tap_threshold && delta.y <= tuning.tap_threshold;
        is_tap && self.fire()
    }

    /// Advance the rope one tick: grow by a step, and coil back once fully out
    pub fn advance_rope(&mut self, tuning: &Tuning) {
        if let RopeState::Extending { length } = self.rope {
            self.rope = if length < tuning.rope_max {
                RopeState::Extending {
                    length: (length + tuning.rope_step).min(tuning.rope_max),
                }
            } else {
                RopeState::Idle
            };
        }
    }

    pub fn animate(&mut self) {
        self.anim.step(10, 2);
    }
}
