//! Sheep tick resolution.
//!
//! Sheep wander at a pace set by the fireplaces, bounce off water, graze,
//! and pay out to the one survivor that keeps them in sight.

use survivalbox_entities::rules::ENERGY_TRICKLE;
use survivalbox_entities::{Entity, Role, npc_delta, select_wander_move};
use survivalbox_types::{NpcAction, SheepStats, TileType};

use super::TickContext;

/// Resolve one sheep for one tick.
pub fn resolve(actor: &mut Entity, ctx: &mut TickContext<'_>) {
    // 1. Advance the clock and pick a move
    let Role::Sheep(sheep) = &mut actor.role else {
        return;
    };
    sheep.world_steps += 1;
    if sheep.pace.is_slow() {
        sheep.stats.steps_slow += 1;
    } else {
        sheep.stats.steps_fast += 1;
    }
    let action = if sheep.pace.acts_on(sheep.world_steps) {
        sheep.stats.steps_total += 1;
        select_wander_move(&mut *ctx.rng)
    } else {
        NpcAction::Stay
    };

    // 2. Move and collide
    apply_move(actor, action, ctx);

    // 3. Graze
    let cells = actor.body.cells().to_vec();
    for cell in cells {
        if ctx.tiles.bite(cell) {
            count(actor, |s| s.collected_food += 1);
        }
    }

    // 4. Find a shepherd
    shepherd(actor, ctx);

    ctx.dirty.extend(actor.body.vacated_cells());
}

/// Apply `action` and roll it back if the new footprint hits anything.
///
/// Water also turns the sheep around so its next move leads away.
pub fn apply_move(actor: &mut Entity, action: NpcAction, ctx: &mut TickContext<'_>) {
    actor
        .body
        .move_by(npc_delta(action, actor.body.orientation()));

    let cells = actor.body.cells().to_vec();
    for cell in cells {
        let tile_type = ctx.tiles.tile_type(cell);
        if tile_type.is_border() {
            actor.body.set_back();
            count(actor, |s| s.collisions += 1);
            return;
        }
        if tile_type == TileType::Water {
            actor.body.set_back();
            actor
                .body
                .move_by(npc_delta(NpcAction::TurnFull, actor.body.orientation()));
            count(actor, |s| s.collisions += 1);
            return;
        }
        let Some(index) = ctx.occupant(cell) else {
            continue;
        };
        actor.body.set_back();
        count(actor, |s| s.collisions += 1);
        if let Some(survivor) = ctx
            .others
            .get_mut(index)
            .and_then(Entity::living_survivor_mut)
        {
            survivor.stats.specialisation.blocked_sheep += 1;
        }
        return;
    }
}

/// Let the first survivor in view claim the sheep.
///
/// A claim sticks until the shepherd loses sight of the sheep; nobody else
/// can take over while it holds.
fn shepherd(actor: &mut Entity, ctx: &mut TickContext<'_>) {
    let view = actor.view_grid();
    let Role::Sheep(sheep) = &mut actor.role else {
        return;
    };
    let previous = sheep.shepherd;
    let mut claim = previous;
    let mut claimed = false;
    for other in ctx.others.iter_mut() {
        let anchor = other.body.anchor();
        let Some(survivor) = other.living_survivor_mut() else {
            continue;
        };
        if !view.contains_cell(anchor) {
            continue;
        }
        if claim.is_some_and(|agent| agent != survivor.agent) {
            continue;
        }
        claim = Some(survivor.agent);
        claimed = true;
        survivor.add_score(ctx.rewards.sheep);
        survivor.stats.specialisation.steps_as_shepherd += 1;
        survivor.stats.rewards.reward_from_sheep += ctx.rewards.sheep;
    }

    if claimed {
        if previous != claim {
            sheep.stats.shepherd_switches += 1;
        }
        sheep.shepherd = claim;
        sheep.stats.steps_with_shepherd += 1;
        ctx.share_energy(actor, ENERGY_TRICKLE);
    } else {
        sheep.shepherd = None;
        sheep.stats.steps_without_shepherd += 1;
    }
}

fn count(actor: &mut Entity, bump: impl FnOnce(&mut SheepStats)) {
    if let Role::Sheep(sheep) = &mut actor.role {
        bump(&mut sheep.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardsConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use survivalbox_entities::ViewPort;
    use survivalbox_types::{AgentId, EntityId, GridCell, GridPosition, Orientation};
    use survivalbox_world::{RawMap, TileMap};

    fn map() -> TileMap {
        let mut raw = RawMap::filled(16, 16, TileType::Grass);
        let cells: Vec<GridCell> = raw.iter().map(|(c, _)| c).collect();
        for cell in cells {
            if raw.is_edge(cell) {
                raw.set(cell, TileType::Border);
            } else if cell.y == 3 {
                raw.set(cell, TileType::Water);
            }
        }
        TileMap::from_raw(&raw)
    }

    fn sheep(x: i32, y: i32) -> Entity {
        Entity::sheep(EntityId::new(9), GridPosition::new(x, y, Orientation::Up))
    }

    fn survivor(agent: u32, x: i32, y: i32) -> Entity {
        Entity::survivor(
            EntityId::new(agent),
            AgentId::new(agent),
            GridPosition::new(x, y, Orientation::Up),
            100.0,
            ViewPort::new(5, 5, 10, 2),
        )
    }

    fn with_ctx(tiles: &mut TileMap, others: &mut [Entity], f: impl FnOnce(&mut TickContext<'_>)) {
        let rewards = RewardsConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut dirty = Vec::new();
        let mut ctx = TickContext {
            tiles,
            others,
            rewards: &rewards,
            rng: &mut rng,
            dirty: &mut dirty,
        };
        f(&mut ctx);
    }

    fn stats(entity: &mut Entity) -> Option<SheepStats> {
        entity.as_sheep_mut().map(|s| s.stats.clone())
    }

    #[test]
    fn water_turns_sheep_around() {
        let mut tiles = map();
        let mut actor = sheep(6, 4);
        with_ctx(&mut tiles, &mut [], |ctx| {
            apply_move(&mut actor, NpcAction::Forward, ctx);
        });
        assert_eq!(actor.body.anchor(), GridCell::new(6, 4));
        assert_eq!(actor.body.orientation(), Orientation::Down);
        assert_eq!(stats(&mut actor).map(|s| s.collisions), Some(1));
    }

    #[test]
    fn survivor_blocks_sheep() {
        let mut tiles = map();
        let mut actor = sheep(6, 8);
        let mut others = vec![survivor(0, 6, 7)];
        with_ctx(&mut tiles, &mut others, |ctx| {
            apply_move(&mut actor, NpcAction::Forward, ctx);
        });
        assert_eq!(actor.body.anchor(), GridCell::new(6, 8));
        let blocked = others
            .first()
            .and_then(Entity::as_survivor)
            .map(|s| s.stats.specialisation.blocked_sheep);
        assert_eq!(blocked, Some(1));
    }

    #[test]
    fn first_survivor_in_view_claims_the_sheep() {
        let mut tiles = map();
        let mut actor = sheep(8, 8);
        let mut others = vec![survivor(0, 9, 9), survivor(1, 7, 9)];
        with_ctx(&mut tiles, &mut others, |ctx| resolve(&mut actor, ctx));

        assert_eq!(
            actor.as_sheep_mut().and_then(|s| s.shepherd),
            Some(AgentId::new(0))
        );
        let scores: Vec<f64> = others
            .iter()
            .filter_map(Entity::as_survivor)
            .map(|s| s.score)
            .collect();
        assert_eq!(scores, vec![RewardsConfig::default().sheep, 0.0]);
        let Some(stats) = stats(&mut actor) else { return };
        assert_eq!(stats.steps_with_shepherd, 1);
        assert_eq!(stats.shepherd_switches, 1);
        assert_eq!(stats.steps_slow, 1);
        assert_eq!(stats.collected_food, 2);
    }

    #[test]
    fn claim_is_released_when_out_of_sight() {
        let mut tiles = map();
        let mut actor = sheep(8, 8);
        let mut others = vec![survivor(0, 14, 14)];
        if let Some(s) = actor.as_sheep_mut() {
            s.shepherd = Some(AgentId::new(0));
        }
        with_ctx(&mut tiles, &mut others, |ctx| resolve(&mut actor, ctx));

        assert_eq!(actor.as_sheep_mut().and_then(|s| s.shepherd), None);
        assert_eq!(stats(&mut actor).map(|s| s.steps_without_shepherd), Some(1));
    }
}
