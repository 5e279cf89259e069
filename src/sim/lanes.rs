//! Lane occupancy
//!
//! Every live entity rides exactly one lane, and no two live entities share
//! one. The allocator is the only place that knows which lanes are taken.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;

/// A lane is identified by the y-coordinate of its top edge
pub type Lane = i32;

/// Tracks which lanes are claimed by live entities
#[derive(Debug, Clone)]
pub struct LaneAllocator {
    lanes: Vec<Lane>,
    occupied: BTreeSet<Lane>,
}

impl LaneAllocator {
    pub fn new(lanes: Vec<Lane>) -> Self {
        Self {
            lanes,
            occupied: BTreeSet::new(),
        }
    }

    /// Claim a free lane chosen uniformly at random, or `None` when all are taken
    pub fn acquire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Lane> {
        let free: Vec<Lane> = self
            .lanes
            .iter()
            .copied()
            .filter(|lane| !self.occupied.contains(lane))
            .collect();
        let lane = *free.choose(rng)?;
        self.occupied.insert(lane);
        Some(lane)
    }

    /// Claim a specific lane. Fails if it is unknown or already taken.
    pub fn claim(&mut self, lane: Lane) -> bool {
        self.lanes.contains(&lane) && self.occupied.insert(lane)
    }

    /// Return a lane to the pool. Unknown or unclaimed lanes are ignored.
    pub fn release(&mut self, lane: Lane) {
        self.occupied.remove(&lane);
    }

    pub fn is_occupied(&self, lane: Lane) -> bool {
        self.occupied.contains(&lane)
    }

    /// Currently claimed lanes, in ascending order
    pub fn occupied(&self) -> impl Iterator<Item = Lane> + '_ {
        self.occupied.iter().copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    pub fn free_count(&self) -> usize {
        self.lanes.len() - self.occupied.len()
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Drop every claim (used on restart)
    pub fn clear(&mut self) {
        self.occupied.clear();
    }
}
