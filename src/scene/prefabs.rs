use glam::Vec3;
use sdl2::pixels::Color;

use crate::components::{
    AiControl, BoardCell, Collider, Forces, Friction, Mass, Movable, Obstacle, PlayerControl,
    Position, Shape, Velocity, WorldObject,
};
use crate::engine::registry::{Entity, Registry};

/// Force name for the downward pull terrain cells exert on entities.
pub const BOARD_DROWN_FORCE: &str = "BOARD_DROWN";

const CREATURE_RADIUS: f32 = 15.0;
const CREATURE_MASS: f32 = 10.0;
const CELL_RADIUS: f32 = 20.0;
const BUSH_RADIUS: f32 = 30.0;
const BUSH_MASS: f32 = 1000.0;

/// Grass pulls entities back down to ground level after a jump.
const GRASS_DROWN: Vec3 = Vec3::new(0.0, 0.0, -500.0);
/// Water pulls harder and lets entities sink far below the surface.
const WATER_DROWN: Vec3 = Vec3::new(0.0, 0.0, -1000.0);
const WATER_FLOOR: f32 = -1000.0;
const WATER_FRICTION: f32 = 1000.0;

pub fn spawn_player(reg: &mut Registry, at: Vec3) -> Entity {
    let id = reg.create_id();
    reg.add(id, Position::new(at))
        .add(id, Shape::Circle { radius: CREATURE_RADIUS, color: Color::RGB(0x2e, 0x8b, 0x2e) })
        .add(id, Velocity(Vec3::ZERO))
        .add(id, PlayerControl)
        .add(id, Collider { radius: CREATURE_RADIUS })
        .add(id, Mass(CREATURE_MASS))
        .add(id, Forces::new())
        .add(id, Movable)
        .add(id, Friction(0.0));
    id
}

pub fn spawn_enemy(reg: &mut Registry, at: Vec3) -> Entity {
    let id = reg.create_id();
    reg.add(id, Position::new(at))
        .add(id, Shape::Circle { radius: CREATURE_RADIUS, color: Color::RGB(0xc8, 0x28, 0x28) })
        .add(id, Velocity(Vec3::ZERO))
        .add(id, AiControl::default())
        .add(id, Collider { radius: CREATURE_RADIUS })
        .add(id, Mass(CREATURE_MASS))
        .add(id, Forces::new())
        .add(id, Movable)
        .add(id, Friction(0.0));
    id
}

/// Immovable scenery: collides and blocks pathfinding, never moves itself.
pub fn spawn_bush(reg: &mut Registry, at: Vec3) -> Entity {
    let id = reg.create_id();
    reg.add(id, Position::new(at))
        .add(id, Shape::Circle { radius: BUSH_RADIUS, color: Color::RGB(0x1e, 0x32, 0x14) })
        .add(id, Velocity(Vec3::ZERO))
        .add(id, Collider { radius: BUSH_RADIUS })
        .add(id, Mass(BUSH_MASS))
        .add(id, Obstacle)
        .add(id, WorldObject);
    id
}

/// Walkable ground tile. `checker` alternates the two grass tints.
pub fn spawn_grass_cell(reg: &mut Registry, at: Vec3, checker: bool) -> Entity {
    let color = if checker {
        Color::RGB(0xf0, 0xf0, 0xf0)
    } else {
        Color::RGB(0xd0, 0xd0, 0xd0)
    };
    let mut forces = Forces::new();
    forces.set(BOARD_DROWN_FORCE, GRASS_DROWN);

    let id = reg.create_id();
    reg.add(id, Position::new(at))
        .add(id, Shape::Circle { radius: CELL_RADIUS, color })
        .add(id, BoardCell)
        .add(id, Friction(0.0))
        .add(id, forces);
    id
}

/// Water tile: heavy friction, a strong downward pull, a floor far below
/// the surface, and it blocks AI pathfinding.
pub fn spawn_water_cell(reg: &mut Registry, at: Vec3) -> Entity {
    let mut forces = Forces::new();
    forces.set(BOARD_DROWN_FORCE, WATER_DROWN);

    let id = reg.create_id();
    reg.add(id, Position::with_min_z(at, WATER_FLOOR))
        .add(id, Shape::Circle { radius: CELL_RADIUS, color: Color::RGB(0x00, 0xaf, 0xff) })
        .add(id, BoardCell)
        .add(id, Friction(WATER_FRICTION))
        .add(id, forces)
        .add(id, Obstacle);
    id
}
