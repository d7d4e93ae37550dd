//! Survivor tick resolution.
//!
//! A survivor pays its living cost, moves, and then reacts to whatever its
//! new footprint touches. Catching a wolf is the only collision that keeps
//! the move; everything solid rolls it back.

use survivalbox_entities::rules::{
    COST_MULT_LAND, COST_MULT_WATER, COST_PERMANENT, ENERGY_TRICKLE, WOLF_ENERGY_PER_STEP,
};
use survivalbox_entities::{Entity, Role, agent_delta};
use survivalbox_types::{AgentAction, TileType};
use survivalbox_world::WorldError;
use tracing::{debug, info};

use super::TickContext;

/// Resolve one survivor for one tick.
///
/// Dead survivors are skipped.
pub fn resolve(
    actor: &mut Entity,
    action: AgentAction,
    ctx: &mut TickContext<'_>,
) -> Result<(), WorldError> {
    // 1. Pay the living cost
    let Some(survivor) = actor.living_survivor_mut() else {
        return Ok(());
    };
    survivor.energy -= COST_PERMANENT * survivor.cost_multiplier;
    if survivor.energy <= 0.0 {
        survivor.alive = false;
        survivor.add_score(ctx.rewards.loss);
        info!(
            agent = %survivor.agent,
            steps_alive = survivor.stats.basics.steps_alive,
            score = survivor.score,
            "survivor died"
        );
        ctx.dirty.extend_from_slice(actor.body.previous_cells());
        ctx.dirty.extend_from_slice(actor.body.cells());
        return Ok(());
    }
    survivor.stats.basics.steps_alive += 1;
    survivor.add_score(ctx.rewards.tick);

    // 2. Move
    let delta = agent_delta(action, actor.body.orientation());
    actor.body.move_by(delta);

    // 3. Collide with the border and other entities
    let cells = actor.body.cells().to_vec();
    for cell in cells {
        if ctx.tiles.tile_type(cell).is_border() {
            actor.body.set_back();
            count_collision(actor);
            break;
        }
        let Some(index) = ctx.occupant(cell) else {
            continue;
        };
        let wolf_age = match ctx.others.get(index).map(|e| &e.role) {
            Some(Role::Wolf(wolf)) => Some(wolf.steps_alive),
            _ => None,
        };
        let Some(wolf_age) = wolf_age else {
            actor.body.set_back();
            count_collision(actor);
            break;
        };
        catch_wolf(actor, index, wolf_age, ctx)?;
    }

    // 4. Terrain cost for the next tick
    let on_water = actor
        .body
        .cells()
        .iter()
        .any(|&c| ctx.tiles.tile_type(c) == TileType::Water);
    if let Some(survivor) = actor.as_survivor_mut() {
        if on_water {
            survivor.cost_multiplier = COST_MULT_WATER;
            survivor.stats.basics.steps_water += 1;
        } else {
            survivor.cost_multiplier = COST_MULT_LAND;
            survivor.stats.basics.steps_land += 1;
        }
    }

    // 5. Eat
    let cells = actor.body.cells().to_vec();
    for cell in cells {
        if !ctx.tiles.bite(cell) {
            continue;
        }
        if let Some(survivor) = actor.as_survivor_mut() {
            survivor.add_score(ctx.rewards.grass);
            survivor.stats.specialisation.collected_food += 1;
            survivor.stats.rewards.reward_from_food += ctx.rewards.grass;
        }
        ctx.share_energy(actor, ENERGY_TRICKLE);
    }

    ctx.dirty.extend(actor.body.vacated_cells());
    Ok(())
}

fn count_collision(actor: &mut Entity) {
    if let Some(survivor) = actor.as_survivor_mut() {
        survivor.stats.basics.collisions += 1;
    }
}

/// Score a wolf catch, share its lifetime as energy and respawn it.
fn catch_wolf(
    actor: &mut Entity,
    index: usize,
    wolf_age: u64,
    ctx: &mut TickContext<'_>,
) -> Result<(), WorldError> {
    let share = wolf_age as f64 * WOLF_ENERGY_PER_STEP;
    let receivers = ctx.share_energy(actor, share);
    if let Some(survivor) = actor.as_survivor_mut() {
        survivor.add_score(ctx.rewards.wolf);
        let stats = &mut survivor.stats;
        stats.specialisation.caught_wolf += 1;
        stats.specialisation.energy_from_wolf += share * f64::from(receivers);
        stats.rewards.reward_from_wolf += ctx.rewards.wolf;
        debug!(agent = %survivor.agent, wolf_age, share, "wolf caught");
    }
    ctx.respawn(index, actor)?;
    if let Some(Role::Wolf(wolf)) = ctx.others.get_mut(index).map(|e| &mut e.role) {
        wolf.stats.caught_by_survivor += 1;
    }
    Ok(())
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

    fn map(interior: TileType) -> TileMap {
        let mut raw = RawMap::filled(12, 12, interior);
        let cells: Vec<GridCell> = raw.iter().map(|(c, _)| c).collect();
        for cell in cells {
            if raw.is_edge(cell) {
                raw.set(cell, TileType::Border);
            }
        }
        TileMap::from_raw(&raw)
    }

    fn survivor(x: i32, y: i32, orientation: Orientation, life: f64) -> Entity {
        Entity::survivor(
            EntityId::new(0),
            AgentId::new(0),
            GridPosition::new(x, y, orientation),
            life,
            ViewPort::new(5, 5, 10, 2),
        )
    }

    fn run(
        actor: &mut Entity,
        action: AgentAction,
        tiles: &mut TileMap,
        others: &mut [Entity],
    ) -> Vec<GridCell> {
        let rewards = RewardsConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut dirty = Vec::new();
        let mut ctx = TickContext {
            tiles,
            others,
            rewards: &rewards,
            rng: &mut rng,
            dirty: &mut dirty,
        };
        assert!(resolve(actor, action, &mut ctx).is_ok());
        dirty
    }

    #[test]
    fn forward_move_eats_grass_and_frees_old_cell() {
        let mut tiles = map(TileType::Grass);
        let mut actor = survivor(5, 5, Orientation::Up, 100.0);
        let dirty = run(&mut actor, AgentAction::MoveForward, &mut tiles, &mut []);

        assert_eq!(actor.body.anchor(), GridCell::new(5, 4));
        assert_eq!(dirty, vec![GridCell::new(5, 5)]);
        assert_eq!(tiles.tile_type(GridCell::new(5, 4)), TileType::Mud);
        let Some(s) = actor.as_survivor() else { return };
        assert_eq!(s.stats.specialisation.collected_food, 1);
        assert!((s.energy - (100.0 - COST_PERMANENT + ENERGY_TRICKLE)).abs() < 1e-9);
    }

    #[test]
    fn border_rolls_back() {
        let mut tiles = map(TileType::Dirt);
        let mut actor = survivor(1, 1, Orientation::Up, 100.0);
        run(&mut actor, AgentAction::MoveForward, &mut tiles, &mut []);

        assert_eq!(actor.body.anchor(), GridCell::new(1, 1));
        let Some(s) = actor.as_survivor() else { return };
        assert_eq!(s.stats.basics.collisions, 1);
    }

    #[test]
    fn water_triples_next_cost() {
        let mut tiles = map(TileType::Water);
        let mut actor = survivor(5, 5, Orientation::Up, 100.0);
        run(&mut actor, AgentAction::NoOp, &mut tiles, &mut []);
        run(&mut actor, AgentAction::NoOp, &mut tiles, &mut []);

        let Some(s) = actor.as_survivor() else { return };
        assert_eq!(s.stats.basics.steps_water, 2);
        assert!((s.energy - (100.0 - 1.0 - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn sheep_blocks_move() {
        let mut tiles = map(TileType::Dirt);
        let mut actor = survivor(5, 5, Orientation::Right, 100.0);
        let mut others = vec![Entity::sheep(
            EntityId::new(1),
            GridPosition::new(6, 4, Orientation::Up),
        )];
        run(&mut actor, AgentAction::MoveForward, &mut tiles, &mut others);

        assert_eq!(actor.body.anchor(), GridCell::new(5, 5));
    }

    #[test]
    fn catching_a_wolf_scores_and_respawns_it() {
        let mut tiles = map(TileType::Dirt);
        let mut actor = survivor(5, 5, Orientation::Right, 100.0);
        let mut wolf = Entity::wolf(EntityId::new(1), GridPosition::new(6, 5, Orientation::Up));
        if let Some(w) = wolf.as_wolf_mut() {
            w.steps_alive = 8;
        }
        let mut others = vec![wolf];
        run(&mut actor, AgentAction::MoveForward, &mut tiles, &mut others);

        assert_eq!(actor.body.anchor(), GridCell::new(6, 5));
        let Some(s) = actor.as_survivor() else { return };
        assert_eq!(s.stats.specialisation.caught_wolf, 1);
        assert!((s.stats.specialisation.energy_from_wolf - 2.0).abs() < 1e-9);
        assert!((s.energy - (100.0 - 1.0 + 2.0)).abs() < 1e-9);

        let Some(wolf) = others.first_mut() else { return };
        assert!(!wolf.body.covers(GridCell::new(6, 5)));
        let Some(w) = wolf.as_wolf_mut() else { return };
        assert_eq!(w.steps_alive, 0);
        assert_eq!(w.stats.caught_by_survivor, 1);
    }

    #[test]
    fn running_out_of_energy_kills() {
        let mut tiles = map(TileType::Dirt);
        let mut actor = survivor(5, 5, Orientation::Up, 1.0);
        run(&mut actor, AgentAction::MoveForward, &mut tiles, &mut []);

        assert!(!actor.is_alive());
        assert_eq!(actor.body.anchor(), GridCell::new(5, 5));
        let Some(s) = actor.as_survivor() else { return };
        assert!((s.score - RewardsConfig::default().loss).abs() < 1e-9);
    }
}
