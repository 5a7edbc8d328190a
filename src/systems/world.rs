use glam::Vec3;

use crate::components::{BoardCell, Forces, Friction, Movable, Position, Shape};
use crate::engine::registry::Registry;

/// Couples terrain cells to the movable entities standing on them.
///
/// An entity is "on" a cell when it sits within the cell's shape radius of
/// the cell center. The cell then hands the entity its floor level, its
/// friction (copied by value, never shared) and each of its named forces
/// (overwriting same-named entries). Naive cells x movables scan; fine at
/// board scale.
pub fn world_system(reg: &mut Registry) {
    let movable_ids = reg.ids::<Movable>();

    for cell_id in reg.ids::<BoardCell>() {
        let Some(cell_pos) = reg.get::<Position>(cell_id) else {
            continue;
        };
        let cell_center = cell_pos.vec;
        let cell_min_z = cell_pos.min_z;
        let Some(radius) = reg.get::<Shape>(cell_id).map(|s| s.radius()) else {
            continue;
        };
        let cell_friction = reg.get::<Friction>(cell_id).copied();
        let cell_forces: Vec<(&'static str, Vec3)> = reg
            .get::<Forces>(cell_id)
            .map(|forces| forces.iter().collect())
            .unwrap_or_default();

        for &obj_id in &movable_ids {
            let on_cell = reg
                .get::<Position>(obj_id)
                .is_some_and(|p| p.vec.distance(cell_center) < radius);
            if !on_cell {
                continue;
            }

            if let Some(pos) = reg.get_mut::<Position>(obj_id) {
                pos.min_z = cell_min_z;
            }
            if let Some(friction) = cell_friction {
                reg.add(obj_id, friction);
            }
            if let Some(forces) = reg.get_mut::<Forces>(obj_id) {
                for &(name, vec) in &cell_forces {
                    forces.set(name, vec);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::Entity;
    use sdl2::pixels::Color;

    fn spawn_water_cell(reg: &mut Registry, at: Vec3) -> Entity {
        let id = reg.create_id();
        let mut forces = Forces::new();
        forces.set("sink", Vec3::new(0.0, 0.0, -1000.0));
        reg.add(id, Position::with_min_z(at, -1000.0))
            .add(id, Shape::Circle { radius: 20.0, color: Color::CYAN })
            .add(id, BoardCell)
            .add(id, Friction(1000.0))
            .add(id, forces);
        id
    }

    fn spawn_walker(reg: &mut Registry, at: Vec3) -> Entity {
        let id = reg.create_id();
        reg.add(id, Position::new(at))
            .add(id, Movable)
            .add(id, Friction(0.0))
            .add(id, Forces::new());
        id
    }

    #[test]
    fn cell_transfers_friction_forces_and_floor() {
        let mut reg = Registry::new();
        let center = Vec3::new(60.0, 60.0, 0.0);
        spawn_water_cell(&mut reg, center);
        let walker = spawn_walker(&mut reg, center);

        world_system(&mut reg);

        assert_eq!(reg.get::<Friction>(walker).unwrap().0, 1000.0);
        assert_eq!(
            reg.get::<Forces>(walker).unwrap().get("sink"),
            Some(Vec3::new(0.0, 0.0, -1000.0))
        );
        assert_eq!(reg.get::<Position>(walker).unwrap().min_z, -1000.0);
    }

    #[test]
    fn entity_outside_cell_radius_is_untouched() {
        let mut reg = Registry::new();
        spawn_water_cell(&mut reg, Vec3::new(60.0, 60.0, 0.0));
        let walker = spawn_walker(&mut reg, Vec3::new(120.0, 60.0, 0.0));

        world_system(&mut reg);

        assert_eq!(reg.get::<Friction>(walker).unwrap().0, 0.0);
        assert!(reg.get::<Forces>(walker).unwrap().get("sink").is_none());
        assert_eq!(reg.get::<Position>(walker).unwrap().min_z, 0.0);
    }

    #[test]
    fn transferred_friction_is_a_value_copy() {
        let mut reg = Registry::new();
        let center = Vec3::new(60.0, 60.0, 0.0);
        let cell = spawn_water_cell(&mut reg, center);
        let walker = spawn_walker(&mut reg, center);

        world_system(&mut reg);
        reg.get_mut::<Friction>(walker).unwrap().0 = 7.0;

        assert_eq!(reg.get::<Friction>(cell).unwrap().0, 1000.0);
    }
}
