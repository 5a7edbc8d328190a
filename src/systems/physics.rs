use glam::Vec3;

use crate::components::{Forces, Friction, Mass, Position, Velocity};
use crate::engine::registry::Registry;

const WORLD_FRICTION: f32 = 3.0;
/// Entities sinking below this depth are removed from the simulation.
const DESPAWN_DEPTH: f32 = -14.0;

/// Applies damping `v' = v - v * (value * dt)` on the ground axes. A
/// component whose damped value would flip sign is clamped to zero so
/// discrete friction never makes the entity oscillate.
fn apply_friction(v: &mut Vec3, value: f32, dt: f32) {
    let damped = *v - *v * (value * dt);
    v.x = if damped.x * v.x > 0.0 { damped.x } else { 0.0 };
    v.y = if damped.y * v.y > 0.0 { damped.y } else { 0.0 };
}

/// Integrates named forces into velocity and velocity into position, with
/// world + entity friction and the per-entity floor clamp.
///
/// Iterates over an id snapshot so despawning an out-of-bounds entity
/// mid-pass cannot invalidate the iteration.
pub fn physics_system(reg: &mut Registry, dt: f32) {
    for id in reg.ids::<Velocity>() {
        let Some(pos) = reg.get::<Position>(id) else {
            continue;
        };
        if pos.vec.z < DESPAWN_DEPTH {
            log::debug!("{id:?} fell out of the world, removing");
            reg.remove(id);
            continue;
        }
        let near_ground = pos.vec.z < 1.0;

        // v += (F / m) * dt, accumulated over every named force
        if let (Some(mass), Some(forces)) = (reg.get::<Mass>(id), reg.get::<Forces>(id)) {
            let m = mass.0;
            let dv: Vec3 = forces.iter().map(|(_, f)| f / m * dt).sum();
            if let Some(vel) = reg.get_mut::<Velocity>(id) {
                vel.0 += dv;
            }
        }

        let friction = reg.get::<Friction>(id).copied();
        if let Some(vel) = reg.get_mut::<Velocity>(id) {
            apply_friction(&mut vel.0, WORLD_FRICTION, dt);
            if near_ground {
                if let Some(Friction(value)) = friction {
                    apply_friction(&mut vel.0, value, dt);
                }
            }
        }

        let Some(step) = reg.get::<Velocity>(id).map(|v| v.0 * dt) else {
            continue;
        };
        let mut hit_floor = false;
        if let Some(pos) = reg.get_mut::<Position>(id) {
            pos.vec += step;
            if pos.vec.z < pos.min_z {
                pos.vec.z = pos.min_z;
                hit_floor = true;
            }
        }
        if hit_floor {
            if let Some(vel) = reg.get_mut::<Velocity>(id) {
                vel.0.z = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::Entity;

    fn spawn_body(reg: &mut Registry, at: Vec3, mass: f32) -> Entity {
        let id = reg.create_id();
        reg.add(id, Position::new(at))
            .add(id, Velocity(Vec3::ZERO))
            .add(id, Mass(mass))
            .add(id, Forces::new());
        id
    }

    #[test]
    fn zero_force_keeps_entity_stationary() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::new(100.0, 100.0, 0.0), 10.0);
        reg.get_mut::<Forces>(id).unwrap().set("push", Vec3::ZERO);

        physics_system(&mut reg, 0.016);
        physics_system(&mut reg, 0.25);

        assert_eq!(reg.get::<Position>(id).unwrap().vec, Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(reg.get::<Velocity>(id).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn force_integrates_into_velocity_and_position() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::ZERO, 10.0);
        reg.get_mut::<Position>(id).unwrap().min_z = -1000.0;
        reg.get_mut::<Forces>(id).unwrap().set("down", Vec3::new(0.0, 0.0, -500.0));

        physics_system(&mut reg, 0.1);

        let vel = reg.get::<Velocity>(id).unwrap().0;
        assert!((vel.z - -5.0).abs() < 1e-4);
        let pos = reg.get::<Position>(id).unwrap().vec;
        assert!((pos.z - -0.5).abs() < 1e-4);
    }

    #[test]
    fn friction_clamps_at_zero_instead_of_reversing() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::ZERO, 10.0);
        reg.get_mut::<Velocity>(id).unwrap().0 = Vec3::new(40.0, -25.0, 0.0);

        // world friction 3 with dt 1 overshoots: damped value flips sign
        physics_system(&mut reg, 1.0);

        let vel = reg.get::<Velocity>(id).unwrap().0;
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn entity_friction_applies_only_near_ground() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::new(0.0, 0.0, 5.0), 10.0);
        reg.add(id, Friction(1000.0));
        reg.get_mut::<Velocity>(id).unwrap().0 = Vec3::new(10.0, 0.0, 0.0);

        physics_system(&mut reg, 0.01);

        // only world friction applied while airborne
        let vel = reg.get::<Velocity>(id).unwrap().0;
        assert!((vel.x - 10.0 * (1.0 - 3.0 * 0.01)).abs() < 1e-4);
    }

    #[test]
    fn floor_clamp_zeroes_vertical_velocity() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::new(0.0, 0.0, 0.5), 10.0);
        reg.get_mut::<Velocity>(id).unwrap().0 = Vec3::new(0.0, 0.0, -100.0);

        physics_system(&mut reg, 0.1);

        let pos = reg.get::<Position>(id).unwrap();
        assert_eq!(pos.vec.z, pos.min_z);
        assert_eq!(reg.get::<Velocity>(id).unwrap().0.z, 0.0);
    }

    #[test]
    fn entity_below_despawn_depth_is_purged() {
        let mut reg = Registry::new();
        let id = spawn_body(&mut reg, Vec3::new(0.0, 0.0, -20.0), 10.0);

        physics_system(&mut reg, 0.016);

        assert!(reg.get::<Position>(id).is_none());
        assert!(reg.get::<Velocity>(id).is_none());
        assert!(reg.get::<Mass>(id).is_none());
        assert!(reg.get::<Forces>(id).is_none());
    }
}
