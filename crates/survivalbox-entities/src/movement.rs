//! Orientation-indexed movement tables.
//!
//! Every table maps an orientation index (`Up`, `Right`, `Down`, `Left`)
//! to a delta `[dx, dy, quarter_turns]`. Animal turns shift the anchor so
//! that a two-cell body swings around its front cell: the old head cell
//! becomes the tail of the turned body.

use survivalbox_types::{AgentAction, NpcAction, Orientation};

/// A movement table, indexed by [`Orientation::index`].
pub type MoveTable = [[i32; 3]; 4];

/// Step in the facing direction.
pub const MOVE_FORWARD: MoveTable = [[0, -1, 0], [1, 0, 0], [0, 1, 0], [-1, 0, 0]];
/// Step against the facing direction.
pub const MOVE_BACKWARD: MoveTable = [[0, 1, 0], [-1, 0, 0], [0, -1, 0], [1, 0, 0]];
/// Step to the left of the facing direction.
pub const STRAFE_LEFT: MoveTable = [[-1, 0, 0], [0, -1, 0], [1, 0, 0], [0, 1, 0]];
/// Step to the right of the facing direction.
pub const STRAFE_RIGHT: MoveTable = [[1, 0, 0], [0, 1, 0], [-1, 0, 0], [0, -1, 0]];
/// Stay put.
pub const NOOP: MoveTable = [[0, 0, 0]; 4];

/// Survivor quarter turn counter-clockwise, in place.
pub const AGENT_TURN_LEFT: MoveTable = [[0, 0, -1]; 4];
/// Survivor quarter turn clockwise, in place.
pub const AGENT_TURN_RIGHT: MoveTable = [[0, 0, 1]; 4];

/// Animal quarter turn counter-clockwise.
pub const ANIMAL_TURN_LEFT: MoveTable = [[-1, 0, -1], [1, -1, -1], [0, 1, -1], [0, 0, -1]];
/// Animal quarter turn clockwise.
pub const ANIMAL_TURN_RIGHT: MoveTable = [[0, 0, 1], [1, 0, 1], [-1, 1, 1], [0, -1, 1]];
/// Animal half turn, in place.
pub const ANIMAL_TURN_FULL: MoveTable = [[0, 0, 2]; 4];

fn lookup(table: &MoveTable, orientation: Orientation) -> [i32; 3] {
    usize::try_from(orientation.index())
        .ok()
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or([0, 0, 0])
}

/// Delta of a survivor action for the given facing.
pub fn agent_delta(action: AgentAction, orientation: Orientation) -> [i32; 3] {
    let table = match action {
        AgentAction::MoveForward => &MOVE_FORWARD,
        AgentAction::MoveBackward => &MOVE_BACKWARD,
        AgentAction::StrafeLeft => &STRAFE_LEFT,
        AgentAction::StrafeRight => &STRAFE_RIGHT,
        AgentAction::TurnLeft => &AGENT_TURN_LEFT,
        AgentAction::TurnRight => &AGENT_TURN_RIGHT,
        AgentAction::NoOp => &NOOP,
    };
    lookup(table, orientation)
}

/// Delta of an NPC action for the given facing.
pub fn npc_delta(action: NpcAction, orientation: Orientation) -> [i32; 3] {
    let table = match action {
        NpcAction::Forward => &MOVE_FORWARD,
        NpcAction::TurnLeft => &ANIMAL_TURN_LEFT,
        NpcAction::TurnRight => &ANIMAL_TURN_RIGHT,
        NpcAction::TurnFull => &ANIMAL_TURN_FULL,
        NpcAction::Stay => &NOOP,
    };
    lookup(table, orientation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivalbox_types::{GridCell, GridPosition};

    #[test]
    fn forward_follows_facing() {
        assert_eq!(agent_delta(AgentAction::MoveForward, Orientation::Up), [0, -1, 0]);
        assert_eq!(agent_delta(AgentAction::MoveForward, Orientation::Right), [1, 0, 0]);
        assert_eq!(agent_delta(AgentAction::MoveForward, Orientation::Down), [0, 1, 0]);
        assert_eq!(agent_delta(AgentAction::MoveForward, Orientation::Left), [-1, 0, 0]);
    }

    #[test]
    fn opposite_moves_cancel() {
        for orientation in Orientation::ALL {
            let f = agent_delta(AgentAction::MoveForward, orientation);
            let b = agent_delta(AgentAction::MoveBackward, orientation);
            let l = agent_delta(AgentAction::StrafeLeft, orientation);
            let r = agent_delta(AgentAction::StrafeRight, orientation);
            assert_eq!([f[0] + b[0], f[1] + b[1]], [0, 0]);
            assert_eq!([l[0] + r[0], l[1] + r[1]], [0, 0]);
        }
    }

    #[test]
    fn strafe_left_is_forward_of_left_turn() {
        for orientation in Orientation::ALL {
            let strafe = agent_delta(AgentAction::StrafeLeft, orientation);
            let forward = agent_delta(AgentAction::MoveForward, orientation.rotated(-1));
            assert_eq!(strafe, forward);
        }
    }

    #[test]
    fn animal_turns_swing_around_the_head() {
        // Head is the cell a 1x2 body faces out of; tail is the other one.
        fn head_and_tail(pos: GridPosition) -> (GridCell, GridCell) {
            let (x, y) = (pos.x, pos.y);
            match pos.orientation {
                Orientation::Up => (GridCell::new(x, y), GridCell::new(x, y + 1)),
                Orientation::Down => (GridCell::new(x, y + 1), GridCell::new(x, y)),
                Orientation::Left => (GridCell::new(x, y), GridCell::new(x + 1, y)),
                Orientation::Right => (GridCell::new(x + 1, y), GridCell::new(x, y)),
            }
        }
        for orientation in Orientation::ALL {
            let pos = GridPosition::new(5, 5, orientation);
            for action in [NpcAction::TurnLeft, NpcAction::TurnRight] {
                let turned = pos.offset(npc_delta(action, orientation));
                assert_eq!(head_and_tail(turned).1, head_and_tail(pos).0, "{orientation:?} {action:?}");
            }
        }
    }

    #[test]
    fn full_turn_keeps_footprint() {
        for orientation in Orientation::ALL {
            let pos = GridPosition::new(3, 3, orientation);
            let turned = pos.offset(npc_delta(NpcAction::TurnFull, orientation));
            assert_eq!(turned.orientation, orientation.rotated(2));
            assert_eq!(turned.footprint(1, 2), pos.footprint(1, 2));
        }
    }
}
