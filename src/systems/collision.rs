use glam::Vec3;

use crate::components::{Collider, Mass, Movable, Position, Velocity};
use crate::engine::registry::{Entity, Registry};

/// Empirical bounce scale applied on top of the impulse.
const RESTITUTION: f32 = 1.5;

/// Detects overlapping collider circles and resolves them: positional
/// separation along the center line (overlap split 50/50 regardless of
/// mass) and an impulse-based velocity response on the ground axes.
///
/// Every unordered pair is visited exactly once per tick. Entities in
/// different height bands (rounded z) never collide, and only `Movable`
/// sides get their velocity adjusted.
pub fn collision_system(reg: &mut Registry) {
    let entries: Vec<(Entity, f32)> = reg
        .all::<Collider>()
        .map(|(id, collider)| (id, collider.radius))
        .collect();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (id1, r1) = entries[i];
            let (id2, r2) = entries[j];
            resolve_pair(reg, id1, r1, id2, r2);
        }
    }
}

fn resolve_pair(reg: &mut Registry, id1: Entity, r1: f32, id2: Entity, r2: f32) {
    // positions are re-read per pair: earlier resolutions may have moved us
    let (Some(p1), Some(p2)) = (
        reg.get::<Position>(id1).map(|p| p.vec),
        reg.get::<Position>(id2).map(|p| p.vec),
    ) else {
        return;
    };

    let distance = p1.distance(p2);
    if distance >= r1 + r2 {
        return;
    }
    if p1.z.round() != p2.z.round() {
        return;
    }

    let (Some(m1), Some(m2)) = (
        reg.get::<Mass>(id1).map(|m| m.0),
        reg.get::<Mass>(id2).map(|m| m.0),
    ) else {
        return;
    };

    let delta = p2 - p1;
    let normal = if distance > 1e-6 { delta / distance } else { Vec3::X };

    let overlap = r1 + r2 - distance;
    if let Some(pos) = reg.get_mut::<Position>(id1) {
        pos.vec -= normal * (overlap * 0.5);
    }
    if let Some(pos) = reg.get_mut::<Position>(id2) {
        pos.vec += normal * (overlap * 0.5);
    }

    let v1 = reg.get::<Velocity>(id1).map(|v| v.0).unwrap_or(Vec3::ZERO);
    let v2 = reg.get::<Velocity>(id2).map(|v| v.0).unwrap_or(Vec3::ZERO);

    // impulse scalar from relative velocity along the collision normal
    let p = 2.0 * (v1.x * normal.x + v1.y * normal.y - v2.x * normal.x - v2.y * normal.y)
        / (m1 + m2);

    if reg.has::<Movable>(id1) {
        if let Some(vel) = reg.get_mut::<Velocity>(id1) {
            vel.0.x -= p * m2 * normal.x * RESTITUTION;
            vel.0.y -= p * m2 * normal.y * RESTITUTION;
        }
    }
    if reg.has::<Movable>(id2) {
        if let Some(vel) = reg.get_mut::<Velocity>(id2) {
            vel.0.x += p * m1 * normal.x * RESTITUTION;
            vel.0.y += p * m1 * normal.y * RESTITUTION;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_circle(reg: &mut Registry, at: Vec3, radius: f32, mass: f32, movable: bool) -> Entity {
        let id = reg.create_id();
        reg.add(id, Position::new(at))
            .add(id, Velocity(Vec3::ZERO))
            .add(id, Collider { radius })
            .add(id, Mass(mass));
        if movable {
            reg.add(id, Movable);
        }
        id
    }

    #[test]
    fn overlapping_circles_are_fully_separated() {
        let mut reg = Registry::new();
        let a = spawn_circle(&mut reg, Vec3::new(100.0, 100.0, 0.0), 15.0, 10.0, true);
        let b = spawn_circle(&mut reg, Vec3::new(110.0, 100.0, 0.0), 15.0, 10.0, true);

        collision_system(&mut reg);

        let pa = reg.get::<Position>(a).unwrap().vec;
        let pb = reg.get::<Position>(b).unwrap().vec;
        assert!(pa.distance(pb) >= 30.0 - 1e-3);
    }

    #[test]
    fn separation_splits_overlap_evenly() {
        let mut reg = Registry::new();
        // masses differ wildly; the positional split stays 50/50
        let a = spawn_circle(&mut reg, Vec3::new(100.0, 100.0, 0.0), 10.0, 1.0, true);
        let b = spawn_circle(&mut reg, Vec3::new(112.0, 100.0, 0.0), 10.0, 1000.0, true);

        collision_system(&mut reg);

        let pa = reg.get::<Position>(a).unwrap().vec;
        let pb = reg.get::<Position>(b).unwrap().vec;
        assert!((pa.x - 96.0).abs() < 1e-3);
        assert!((pb.x - 116.0).abs() < 1e-3);
    }

    #[test]
    fn immovable_collider_keeps_its_velocity() {
        let mut reg = Registry::new();
        let mover = spawn_circle(&mut reg, Vec3::new(100.0, 100.0, 0.0), 15.0, 10.0, true);
        let rock = spawn_circle(&mut reg, Vec3::new(120.0, 100.0, 0.0), 15.0, 1000.0, false);
        reg.get_mut::<Velocity>(mover).unwrap().0 = Vec3::new(50.0, 0.0, 0.0);

        collision_system(&mut reg);

        assert_eq!(reg.get::<Velocity>(rock).unwrap().0, Vec3::ZERO);
        // mover bounces back along x
        assert!(reg.get::<Velocity>(mover).unwrap().0.x < 50.0);
    }

    #[test]
    fn different_height_bands_never_collide() {
        let mut reg = Registry::new();
        let a = spawn_circle(&mut reg, Vec3::new(100.0, 100.0, 0.0), 15.0, 10.0, true);
        let b = spawn_circle(&mut reg, Vec3::new(110.0, 100.0, 5.0), 15.0, 10.0, true);

        collision_system(&mut reg);

        assert_eq!(reg.get::<Position>(a).unwrap().vec, Vec3::new(100.0, 100.0, 0.0));
        assert_eq!(reg.get::<Position>(b).unwrap().vec, Vec3::new(110.0, 100.0, 5.0));
    }

    #[test]
    fn head_on_collision_exchanges_velocity() {
        let mut reg = Registry::new();
        let a = spawn_circle(&mut reg, Vec3::new(100.0, 100.0, 0.0), 15.0, 10.0, true);
        let b = spawn_circle(&mut reg, Vec3::new(125.0, 100.0, 0.0), 15.0, 10.0, true);
        reg.get_mut::<Velocity>(a).unwrap().0 = Vec3::new(60.0, 0.0, 0.0);
        reg.get_mut::<Velocity>(b).unwrap().0 = Vec3::new(-60.0, 0.0, 0.0);

        collision_system(&mut reg);

        // approaching bodies reverse along the contact normal
        assert!(reg.get::<Velocity>(a).unwrap().0.x < 0.0);
        assert!(reg.get::<Velocity>(b).unwrap().0.x > 0.0);
    }
}
