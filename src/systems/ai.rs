use std::collections::VecDeque;

use glam::Vec3;

use crate::components::{AiControl, Forces, Mass, Obstacle, PathCache, PlayerControl, Position, Shape};
use crate::engine::pathfind::{find_path, ObstacleGrid};
use crate::engine::registry::{Entity, Registry};

pub const AI_MOVE_FORCE: &str = "AI_MOVE";

const BASE_FORCE: f32 = 300.0;
/// Closer than this, the enemy charges the player directly.
const ATTACK_DISTANCE: f32 = 50.0;
/// Force multiplier for the charge.
const ATTACK_POWER: f32 = 5.0;
/// Minimum age (seconds) before a cached path is recomputed.
const RECALC_INTERVAL: f32 = 0.3;
/// Waypoints closer than this are considered reached.
const NEXT_WAYPOINT_DISTANCE: f32 = 10.0;

/// Drives every AI-controlled entity toward the player: direct charge in
/// attack range, path following otherwise. At most one entity per tick may
/// recompute its path; `now` is accumulated simulation time.
pub fn ai_system(reg: &mut Registry, grid: &mut ObstacleGrid, now: f32) {
    let player_vec = reg
        .first_id::<PlayerControl>()
        .and_then(|id| reg.get::<Position>(id))
        .map(|p| p.vec);

    let mut recalc_spent = false;

    for id in reg.ids::<AiControl>() {
        let Some(enemy_vec) = reg.get::<Position>(id).map(|p| p.vec) else {
            continue;
        };
        let Some(mass) = reg.get::<Mass>(id).map(|m| m.0) else {
            continue;
        };

        // grounded enemies only, and only while a player exists
        let Some(player_vec) = player_vec else {
            apply_steering(reg, id, Vec3::ZERO, Vec3::ZERO);
            continue;
        };
        if enemy_vec.z.abs() > 1.0 {
            apply_steering(reg, id, Vec3::ZERO, Vec3::ZERO);
            continue;
        }

        // close enough: charge straight at the player, no pathfinding
        if enemy_vec.distance(player_vec) < ATTACK_DISTANCE && player_vec.z.abs() < 1.0 {
            let dir = (player_vec - enemy_vec).normalize_or_zero();
            apply_steering(reg, id, dir * (BASE_FORCE * mass * ATTACK_POWER), dir);
            continue;
        }

        let stale = reg
            .get::<AiControl>(id)
            .is_none_or(|ai| ai.path.as_ref().is_none_or(|p| p.created_at + RECALC_INTERVAL < now));
        if !recalc_spent && stale {
            recalc_spent = true;
            rebuild_obstacles(reg, id, grid);
            let cache = recalc_path(reg, id, enemy_vec, player_vec, grid, now);
            if let Some(ai) = reg.get_mut::<AiControl>(id) {
                ai.path = Some(cache);
            }
        }

        // steer at the next waypoint if a path exists, else at the player
        let mut target = player_vec;
        if let Some(ai) = reg.get_mut::<AiControl>(id) {
            if let Some(path) = ai.path.as_mut() {
                if let Some(&waypoint) = path.waypoints.front() {
                    target = waypoint;
                    if enemy_vec.distance(waypoint) < NEXT_WAYPOINT_DISTANCE {
                        path.waypoints.pop_front();
                    }
                }
            }
        }

        let dir = (target - enemy_vec).normalize_or_zero();
        apply_steering(reg, id, dir * (BASE_FORCE * mass), dir);
    }
}

fn apply_steering(reg: &mut Registry, id: Entity, force: Vec3, dir: Vec3) {
    if let Some(forces) = reg.get_mut::<Forces>(id) {
        forces.set(AI_MOVE_FORCE, force);
    }
    if dir != Vec3::ZERO {
        if let Some(pos) = reg.get_mut::<Position>(id) {
            pos.rotating_to = Some(dir);
        }
    }
}

/// Rasterizes every pathfinding blocker except the querying entity itself:
/// obstacle-marked terrain and scenery, plus the other AI entities.
fn rebuild_obstacles(reg: &Registry, self_id: Entity, grid: &mut ObstacleGrid) {
    grid.clear();

    let mut blockers = reg.ids::<Obstacle>();
    blockers.extend(reg.ids::<AiControl>());

    for other in blockers {
        if other == self_id {
            continue;
        }
        let Some(center) = reg.get::<Position>(other).map(|p| p.vec) else {
            continue;
        };
        let Some(radius) = reg.get::<Shape>(other).map(|s| s.radius()) else {
            continue;
        };
        grid.block_circle(center, radius);
    }
}

/// Runs A* toward the player. On failure the previous waypoints are reused
/// if any remain; last resort is a single waypoint straight at the player.
fn recalc_path(
    reg: &mut Registry,
    id: Entity,
    enemy_vec: Vec3,
    player_vec: Vec3,
    grid: &ObstacleGrid,
    now: f32,
) -> PathCache {
    let waypoints = find_path(enemy_vec, player_vec, grid);
    if !waypoints.is_empty() {
        return PathCache {
            created_at: now,
            waypoints: waypoints.into(),
        };
    }

    let previous = reg
        .get_mut::<AiControl>(id)
        .and_then(|ai| ai.path.take())
        .filter(|path| !path.waypoints.is_empty());
    if let Some(path) = previous {
        return PathCache {
            created_at: now,
            waypoints: path.waypoints,
        };
    }

    PathCache {
        created_at: now,
        waypoints: VecDeque::from([Vec3::new(player_vec.x, player_vec.y, 0.0)]),
    }
}
