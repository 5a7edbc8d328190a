use std::f32::consts::{PI, TAU};

use glam::Vec3;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use crate::components::{AiControl, BoardCell, PlayerControl, Position, Shape, WorldObject};
use crate::engine::math::rotate_z;
use crate::engine::pathfind::ObstacleGrid;
use crate::engine::registry::Registry;

/// Pixel offset of the board inside the window.
const BOARD_MARGIN: i32 = 50;
/// Maximum facing turn rate, one full revolution per second.
const TURN_RATE: f32 = TAU;
const FACING_LINE_LENGTH: f32 = 30.0;

pub struct RenderConfig {
    pub draw_path: bool,
    pub draw_obstacles: bool,
}

/// Turns each entity's facing toward its pending target, clamped to the
/// turn rate. Close enough to the target, facing snaps and the target is
/// cleared.
pub fn facing_system(reg: &mut Registry, dt: f32) {
    for id in reg.ids::<Position>() {
        let Some(pos) = reg.get_mut::<Position>(id) else {
            continue;
        };
        let Some(target) = pos.rotating_to else {
            continue;
        };

        let mut theta =
            f32::atan2(pos.direction.x, pos.direction.y) - f32::atan2(target.x, target.y);
        // take the short way around
        if theta.abs() > PI {
            theta -= theta.signum() * TAU;
        }

        let max_step = dt * TURN_RATE;
        if theta.abs() <= max_step {
            pos.direction = target;
            pos.rotating_to = None;
        } else {
            pos.direction = rotate_z(pos.direction, max_step * theta.signum()).normalize_or_zero();
        }
    }
}

/// Draws the whole scene: board cells, optional debug overlays, scenery,
/// enemies, player. Creatures are filled circles sized by height (z), with
/// a drop shadow while airborne and a facing line.
pub fn render_system(
    canvas: &mut Canvas<Window>,
    reg: &Registry,
    grid: &ObstacleGrid,
    config: &RenderConfig,
) {
    canvas.set_draw_color(Color::WHITE);
    canvas.clear();

    canvas.set_draw_color(Color::BLACK);
    let _ = canvas.draw_rect(Rect::new(BOARD_MARGIN, BOARD_MARGIN, 600, 600));

    draw_board_cells(canvas, reg);
    if config.draw_path {
        draw_paths(canvas, reg);
    }
    if config.draw_obstacles {
        draw_obstacle_grid(canvas, grid);
    }
    draw_circles::<WorldObject>(canvas, reg);
    draw_circles::<AiControl>(canvas, reg);
    draw_circles::<PlayerControl>(canvas, reg);
}

fn to_screen(v: Vec3) -> Point {
    Point::new(v.x as i32 + BOARD_MARGIN, v.y as i32 + BOARD_MARGIN)
}

fn draw_board_cells(canvas: &mut Canvas<Window>, reg: &Registry) {
    for (id, _) in reg.all::<BoardCell>() {
        let (Some(pos), Some(shape)) = (reg.get::<Position>(id), reg.get::<Shape>(id)) else {
            continue;
        };
        let Shape::Circle { radius, color } = *shape;
        let center = to_screen(pos.vec);
        let side = (radius * 2.0) as u32;
        canvas.set_draw_color(color);
        let _ = canvas.fill_rect(Rect::new(
            center.x - radius as i32,
            center.y - radius as i32,
            side,
            side,
        ));
    }
}

/// Draws entities of one marker bucket as circles. Size grows with height;
/// entities sunk deeper than their own radius disappear.
fn draw_circles<T: 'static>(canvas: &mut Canvas<Window>, reg: &Registry) {
    for (id, _) in reg.all::<T>() {
        let (Some(pos), Some(shape)) = (reg.get::<Position>(id), reg.get::<Shape>(id)) else {
            continue;
        };
        let Shape::Circle { radius, color } = *shape;
        let z = pos.vec.z;
        if radius + z < 0.0 {
            continue;
        }

        if z > 0.0 && radius - z > 0.0 {
            let shadow = to_screen(pos.vec + Vec3::new(z * 5.0, z * 5.0, 0.0));
            fill_circle(canvas, shadow, (radius - z) as i32, Color::RGB(160, 160, 160));
        }

        let center = to_screen(pos.vec);
        fill_circle(canvas, center, (radius + z) as i32, color);

        canvas.set_draw_color(Color::BLACK);
        let tip = to_screen(pos.vec + pos.direction * FACING_LINE_LENGTH);
        let _ = canvas.draw_line(center, tip);
    }
}

fn fill_circle(canvas: &mut Canvas<Window>, center: Point, radius: i32, color: Color) {
    canvas.set_draw_color(color);
    for dy in -radius..=radius {
        let half = ((radius * radius - dy * dy) as f32).sqrt() as i32;
        let _ = canvas.draw_line(
            Point::new(center.x - half, center.y + dy),
            Point::new(center.x + half, center.y + dy),
        );
    }
}

/// Debug overlay: every cached AI route as a polyline with waypoint dots.
fn draw_paths(canvas: &mut Canvas<Window>, reg: &Registry) {
    canvas.set_draw_color(Color::RGB(160, 160, 160));
    for (_, ai) in reg.all::<AiControl>() {
        let Some(path) = ai.path.as_ref() else {
            continue;
        };
        let points: Vec<Point> = path.waypoints.iter().map(|&wp| to_screen(wp)).collect();
        for pair in points.windows(2) {
            let _ = canvas.draw_line(pair[0], pair[1]);
        }
        for point in &points {
            let _ = canvas.fill_rect(Rect::new(point.x - 2, point.y - 2, 5, 5));
        }
    }
}

/// Debug overlay: blocked obstacle-grid cells in translucent red.
fn draw_obstacle_grid(canvas: &mut Canvas<Window>, grid: &ObstacleGrid) {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(255, 0, 0, 128));
    let side = grid.cell_size() as u32;
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            if !grid.is_blocked((x, y)) {
                continue;
            }
            let _ = canvas.fill_rect(Rect::new(
                x * grid.cell_size() as i32 + BOARD_MARGIN,
                y * grid.cell_size() as i32 + BOARD_MARGIN,
                side,
                side,
            ));
        }
    }
    canvas.set_blend_mode(BlendMode::None);
}
