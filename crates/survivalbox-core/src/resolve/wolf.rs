//! Wolf tick resolution.
//!
//! A wolf hunts the sheep it can see and wanders otherwise. Running into a
//! sheep catches it; running into a survivor bites. A hunting wolf that
//! bounces off water gets one recovery move so it does not stall at the
//! shore.

use survivalbox_entities::rules::WOLF_DAMAGE;
use survivalbox_entities::{
    Entity, Role, npc_delta, select_hunt_move, select_recovery_move, select_wander_move,
};
use survivalbox_types::{EntityKind, GridCell, NpcAction, TileType, WolfStats};
use survivalbox_world::WorldError;
use tracing::debug;

use super::TickContext;

/// Resolve one wolf for one tick.
pub fn resolve(actor: &mut Entity, ctx: &mut TickContext<'_>) -> Result<(), WorldError> {
    // 1. Look for prey
    let view = actor.view_grid();
    let target = ctx
        .others
        .iter()
        .rev()
        .filter(|e| e.kind() == EntityKind::Sheep)
        .find(|e| e.body.cells().iter().any(|&c| view.contains_cell(c)))
        .map(|e| e.body.anchor());

    // 2. Advance the clock and pick a move
    let position = actor.body.position();
    let Role::Wolf(wolf) = &mut actor.role else {
        return Ok(());
    };
    wolf.world_steps += 1;
    wolf.steps_alive += 1;
    if wolf.pace.is_slow() {
        wolf.stats.steps_slow += 1;
    } else {
        wolf.stats.steps_fast += 1;
    }
    let mut hunting = false;
    let action = if wolf.pace.acts_on(wolf.world_steps) {
        wolf.stats.steps_total += 1;
        if let Some(target) = target {
            wolf.stats.steps_hunting += 1;
            hunting = true;
            select_hunt_move(position, target)
        } else {
            select_wander_move(&mut *ctx.rng)
        }
    } else {
        NpcAction::Stay
    };

    // 3. Move and collide
    apply_move(actor, action, hunting, ctx)?;

    ctx.dirty.extend(actor.body.vacated_cells());
    Ok(())
}

/// Apply `action` and resolve what the new footprint touches.
///
/// With `recover_from_water` set, one random recovery move is drawn and
/// tried after bouncing off water.
pub fn apply_move(
    actor: &mut Entity,
    action: NpcAction,
    recover_from_water: bool,
    ctx: &mut TickContext<'_>,
) -> Result<(), WorldError> {
    actor
        .body
        .move_by(npc_delta(action, actor.body.orientation()));

    let cells = actor.body.cells().to_vec();
    for cell in cells {
        let tile_type = ctx.tiles.tile_type(cell);
        if tile_type.is_border() {
            actor.body.set_back();
            count(actor, |s| s.collisions += 1);
            return Ok(());
        }
        if tile_type == TileType::Water {
            actor.body.set_back();
            actor
                .body
                .move_by(npc_delta(NpcAction::TurnFull, actor.body.orientation()));
            count(actor, |s| s.collisions += 1);
            if recover_from_water {
                let recovery = select_recovery_move(&mut *ctx.rng);
                recover(actor, recovery, ctx)?;
            }
            return Ok(());
        }
        if touch(actor, cell, ctx)? {
            return Ok(());
        }
    }
    Ok(())
}

fn recover(
    actor: &mut Entity,
    recovery: NpcAction,
    ctx: &mut TickContext<'_>,
) -> Result<(), WorldError> {
    actor
        .body
        .move_by(npc_delta(recovery, actor.body.orientation()));
    let cells = actor.body.cells().to_vec();
    let stuck = cells.iter().any(|&c| {
        let tile_type = ctx.tiles.tile_type(c);
        tile_type.is_border() || tile_type == TileType::Water
    });
    if stuck {
        actor.body.set_back();
        count(actor, |s| s.collisions += 1);
        return Ok(());
    }
    for cell in cells {
        if touch(actor, cell, ctx)? {
            break;
        }
    }
    Ok(())
}

/// React to whatever occupies `cell`. Returns whether the move was undone.
fn touch(actor: &mut Entity, cell: GridCell, ctx: &mut TickContext<'_>) -> Result<bool, WorldError> {
    let Some(index) = ctx.occupant(cell) else {
        return Ok(false);
    };
    let Some(kind) = ctx.others.get(index).map(Entity::kind) else {
        return Ok(false);
    };
    match kind {
        EntityKind::Wolf | EntityKind::Fireplace => {
            actor.body.set_back();
            count(actor, |s| s.collisions += 1);
            Ok(true)
        }
        EntityKind::Sheep => {
            ctx.respawn(index, actor)?;
            count(actor, |s| s.caught_sheep += 1);
            if let Some(sheep) = ctx.others.get_mut(index).and_then(Entity::as_sheep_mut) {
                sheep.stats.caught_by_wolf += 1;
            }
            debug!(x = cell.x, y = cell.y, "sheep caught");
            Ok(false)
        }
        EntityKind::Survivor => {
            if let Some(survivor) = ctx
                .others
                .get_mut(index)
                .and_then(Entity::living_survivor_mut)
            {
                survivor.energy -= WOLF_DAMAGE;
                survivor.stats.specialisation.hits_from_wolf += 1;
                debug!(agent = %survivor.agent, energy = survivor.energy, "survivor bitten");
            }
            actor.body.set_back();
            count(actor, |s| s.attacked_survivor += 1);
            Ok(true)
        }
    }
}

fn count(actor: &mut Entity, bump: impl FnOnce(&mut WolfStats)) {
    if let Role::Wolf(wolf) = &mut actor.role {
        bump(&mut wolf.stats);
    }
}
