//! Idle/demo mode - a simple bot that plays the game
//!
//! Produces the same [`TickInput`] a human would: dodge hazards in the
//! player's rows, line the rope up with the most urgent target, throw when
//! it is in reach.

use std::cmp::Ordering;

use super::entity::Entity;
use super::state::{GamePhase, GameState};
use super::tick::{InputEvent, Key, TickInput};

/// How far ahead of the player a hazard starts to matter
const DODGE_DISTANCE: f32 = 120.0;

fn nearest<'a>(candidates: impl Iterator<Item = &'a Entity>) -> Option<&'a Entity> {
    candidates.min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

/// Pick this tick's input for `state`
pub fn autopilot(state: &GameState) -> TickInput {
    match state.phase {
        GamePhase::Start => return TickInput::key(Key::Confirm),
        GamePhase::GameOver => return TickInput::default(),
        GamePhase::Play => {}
    }

    let tuning = &state.tuning;
    let player = &state.player;
    let front = player.x + player.width;
    let in_rows = |e: &Entity| {
        let top = e.lane as f32;
        top < player.y + player.height && top + e.height > player.y
    };

    // Hazards closing in on the player's rows come first
    let threat = nearest(
        state
            .obstacles
            .iter()
            .chain(&state.skulls)
            .filter(|h| h.x + h.width > player.x && h.x < front + DODGE_DISTANCE)
            .filter(|h| in_rows(*h)),
    );
    if let Some(hazard) = threat {
        let hazard_mid = hazard.lane as f32 + hazard.height / 2.0;
        let player_mid = player.y + player.height / 2.0;
        let at_top = player.y <= tuning.top_limit as f32;
        let at_bottom = player.y >= tuning.player_max_y();
        let key = if (hazard_mid >= player_mid && !at_top) || at_bottom {
            Key::Up
        } else {
            Key::Down
        };
        return TickInput::key(key);
    }

    // Power-ups are worth a life, then the cattle closest to escaping
    let ahead = |e: &&Entity| e.x + e.width > front;
    let target = nearest(state.power_ups.iter().filter(ahead)).or_else(|| {
        nearest(
            state
                .cattle
                .iter()
                .filter(|c| !c.is_rebounding())
                .filter(ahead),
        )
    });

    let mut input = TickInput::default();
    if let Some(target) = target {
        // Aim the middle of the rope's sag at the middle of the target
        let rope_mid = player.y + tuning.rope_anchor_dy + tuning.rope_max_drop / 2.0;
        let dy = target.lane as f32 + target.height / 2.0 - rope_mid;
        if dy < -tuning.player_speed {
            input.push(InputEvent::Key(Key::Up));
        } else if dy > tuning.player_speed {
            input.push(InputEvent::Key(Key::Down));
        }

        let lined_up = dy.abs() < target.height / 2.0;
        let in_reach = target.x <= front + tuning.rope_max;
        if lined_up && in_reach && player.rope.is_idle() {
            input.push(InputEvent::Key(Key::Fire));
        }
    }
    input
}
