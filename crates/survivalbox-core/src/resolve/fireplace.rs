//! Fireplace tick resolution.
//!
//! A fire burns for as long as a guard stands within its small view. Every
//! fireplace sets the pace of every animal on the map when it resolves: lit
//! slows wolves and speeds sheep up, unlit does the opposite. With several
//! fires the last one resolved in a tick decides.

use survivalbox_entities::rules::ENERGY_TRICKLE;
use survivalbox_entities::{Entity, Role};

use super::TickContext;

/// Resolve one fireplace for one tick.
pub fn resolve(actor: &mut Entity, ctx: &mut TickContext<'_>) {
    let view = actor.view_grid();
    let Role::Fireplace(fire) = &mut actor.role else {
        return;
    };

    // 1. Find the guard
    let was_lit = fire.lit;
    let mut guard = fire.guard;
    let mut lit = false;
    for other in ctx.others.iter_mut() {
        let anchor = other.body.anchor();
        let Some(survivor) = other.living_survivor_mut() else {
            continue;
        };
        if !view.contains_cell(anchor) || guard.is_some_and(|agent| agent != survivor.agent) {
            continue;
        }
        guard = Some(survivor.agent);
        lit = true;
        survivor.add_score(ctx.rewards.fire);
        survivor.stats.specialisation.steps_as_fireguard += 1;
        survivor.stats.rewards.reward_from_fire += ctx.rewards.fire;
    }

    // 2. Record the state
    fire.lit = lit;
    fire.guard = if lit { guard } else { None };
    if lit {
        fire.stats.steps_fire_on += 1;
    } else {
        fire.stats.steps_fire_off += 1;
    }
    if lit != was_lit {
        fire.stats.fire_switches += 1;
    }

    // 3. Warm the team and set the animals' pace
    if lit {
        ctx.share_energy(actor, ENERGY_TRICKLE);
    }
    for other in ctx.others.iter_mut() {
        match &mut other.role {
            Role::Wolf(wolf) if lit => wolf.pace.slow_down(),
            Role::Wolf(wolf) => wolf.pace.speed_up(),
            Role::Sheep(sheep) if lit => sheep.pace.speed_up(),
            Role::Sheep(sheep) => sheep.pace.slow_down(),
            Role::Survivor(_) | Role::Fireplace(_) => {}
        }
    }
}
