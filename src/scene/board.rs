use glam::Vec3;

use crate::engine::pathfind::ObstacleGrid;
use crate::engine::registry::Registry;
use crate::scene::prefabs::{
    spawn_bush, spawn_enemy, spawn_grass_cell, spawn_player, spawn_water_cell,
};

pub const BOARD_SIZE: usize = 15;
pub const BOARD_CELL_SIZE: f32 = 40.0;
/// Pathfinding grid resolution; finer than the board so routes can cut
/// between obstacles.
pub const OBSTACLE_CELL_SIZE: f32 = 10.0;

const T_EMPTY: u8 = 0;
const T_WATER: u8 = 1;
const T_ENEMY: u8 = 2;
const T_PLAYER: u8 = 3;
const T_BUSH: u8 = 4;

#[rustfmt::skip]
const LAYOUT: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 4, 0, 0, 3, 0, 0, 0, 0, 4, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Obstacle grid sized to cover the whole board.
pub fn obstacle_grid() -> ObstacleGrid {
    let size = (BOARD_SIZE as f32 * (BOARD_CELL_SIZE / OBSTACLE_CELL_SIZE)) as i32;
    ObstacleGrid::new(size, OBSTACLE_CELL_SIZE)
}

/// Entities sit in the middle of their cell (everything is a circle).
fn cell_center(x: usize, y: usize) -> Vec3 {
    Vec3::new(
        x as f32 * BOARD_CELL_SIZE + BOARD_CELL_SIZE / 2.0,
        y as f32 * BOARD_CELL_SIZE + BOARD_CELL_SIZE / 2.0,
        0.0,
    )
}

/// Populates the registry from the fixed layout. Creature and scenery
/// spawn cells also get a grass tile underneath.
pub fn load_board(reg: &mut Registry) {
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let at = cell_center(x, y);
            let checker = (x + y % 2) % 2 == 1;
            match LAYOUT[y][x] {
                T_WATER => {
                    spawn_water_cell(reg, at);
                }
                T_ENEMY => {
                    spawn_grass_cell(reg, at, checker);
                    spawn_enemy(reg, at);
                }
                T_PLAYER => {
                    spawn_grass_cell(reg, at, checker);
                    spawn_player(reg, at);
                }
                T_BUSH => {
                    spawn_grass_cell(reg, at, checker);
                    spawn_bush(reg, at);
                }
                _ => {
                    debug_assert_eq!(LAYOUT[y][x], T_EMPTY);
                    spawn_grass_cell(reg, at, checker);
                }
            }
        }
    }
}
