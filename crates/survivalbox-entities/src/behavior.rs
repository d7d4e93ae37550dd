//! NPC action selection.
//!
//! Sheep and wolves only act every `move_every` world steps. On an acting
//! tick a wandering animal rolls a weighted move; a wolf that has spotted
//! a sheep pursues it with [`select_hunt_move`] instead.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use survivalbox_types::{GridCell, GridPosition, NpcAction, Orientation};

/// Probability thresholds of the wander roll: turn left, turn right, forward.
/// Anything above the last threshold stays.
pub const WANDER_THRESHOLDS: [f64; 3] = [0.1, 0.2, 0.9];

/// Moves a trapped hunting wolf may try after bouncing off water.
pub const RECOVERY_MOVES: [NpcAction; 3] =
    [NpcAction::Forward, NpcAction::TurnLeft, NpcAction::TurnRight];

/// Movement cadence of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
    /// Ticks between moves when slowed down.
    pub slow: u64,
    /// Ticks between moves when sped up.
    pub fast: u64,
    /// Current ticks between moves.
    pub move_every: u64,
}

impl Pace {
    /// Create a pace starting at `initial`.
    pub const fn new(slow: u64, fast: u64, initial: u64) -> Self {
        Self {
            slow,
            fast,
            move_every: initial,
        }
    }

    /// Switch to the slow cadence.
    pub const fn slow_down(&mut self) {
        self.move_every = self.slow;
    }

    /// Switch to the fast cadence.
    pub const fn speed_up(&mut self) {
        self.move_every = self.fast;
    }

    /// Whether the current cadence is the slow one.
    pub const fn is_slow(&self) -> bool {
        self.move_every == self.slow
    }

    /// Whether the animal may act at this world step.
    pub const fn acts_on(&self, world_steps: u64) -> bool {
        self.move_every != 0 && world_steps % self.move_every == 0
    }
}

/// Map a uniform roll in `[0, 1)` to a wander move.
pub fn wander_move(roll: f64) -> NpcAction {
    let [turn_left, turn_right, forward] = WANDER_THRESHOLDS;
    if roll < turn_left {
        NpcAction::TurnLeft
    } else if roll < turn_right {
        NpcAction::TurnRight
    } else if roll < forward {
        NpcAction::Forward
    } else {
        NpcAction::Stay
    }
}

/// Roll a wander move.
pub fn select_wander_move<R: Rng + ?Sized>(rng: &mut R) -> NpcAction {
    wander_move(rng.random::<f64>())
}

/// Pick one of [`RECOVERY_MOVES`] uniformly.
pub fn select_recovery_move<R: Rng + ?Sized>(rng: &mut R) -> NpcAction {
    RECOVERY_MOVES
        .choose(rng)
        .copied()
        .unwrap_or(NpcAction::Forward)
}

/// Greedy pursuit: reduce the larger axis of the hunter-victim distance.
///
/// Ties go to the `x` axis. The move is expressed relative to the hunter's
/// facing, so a hunter already facing the victim steps forward, one facing
/// away turns around, and one facing sideways turns towards it.
pub fn select_hunt_move(hunter: GridPosition, victim: GridCell) -> NpcAction {
    let diff_x = hunter.x.saturating_sub(victim.x);
    let diff_y = hunter.y.saturating_sub(victim.y);
    let facing = hunter.orientation;

    if diff_x.unsigned_abs() >= diff_y.unsigned_abs() {
        if diff_x > 0 {
            // Victim is to the left.
            match facing {
                Orientation::Up => NpcAction::TurnLeft,
                Orientation::Down => NpcAction::TurnRight,
                Orientation::Right => NpcAction::TurnFull,
                Orientation::Left => NpcAction::Forward,
            }
        } else {
            match facing {
                Orientation::Up => NpcAction::TurnRight,
                Orientation::Down => NpcAction::TurnLeft,
                Orientation::Right => NpcAction::Forward,
                Orientation::Left => NpcAction::TurnFull,
            }
        }
    } else if diff_y > 0 {
        // Victim is above.
        match facing {
            Orientation::Up => NpcAction::Forward,
            Orientation::Down => NpcAction::TurnFull,
            Orientation::Right => NpcAction::TurnLeft,
            Orientation::Left => NpcAction::TurnRight,
        }
    } else {
        match facing {
            Orientation::Up => NpcAction::TurnFull,
            Orientation::Down => NpcAction::Forward,
            Orientation::Right => NpcAction::TurnRight,
            Orientation::Left => NpcAction::TurnLeft,
        }
    }
}
