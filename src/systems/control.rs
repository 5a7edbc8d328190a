use glam::Vec3;
use sdl2::keyboard::Scancode;

use crate::components::{Forces, PlayerControl, Position};
use crate::engine::input::InputState;
use crate::engine::registry::Registry;

pub const PLAYER_MOVE_FORCE: &str = "PLAYER_MOVE";
pub const PLAYER_JUMP_FORCE: &str = "PLAYER_JUMP";

const MOVE_FORCE: f32 = 10_000.0;
const JUMP_FORCE: f32 = 20_000.0;
/// Diagonal input is scaled down so diagonal speed matches axis speed.
const DIAGONAL_DAMP: f32 = 1.4;

/// Maps held arrow keys to a steering force and the space key to a one-shot
/// jump impulse. Horizontal control is suppressed entirely while airborne.
pub fn control_system(reg: &mut Registry, input: &mut InputState) {
    for id in reg.ids::<PlayerControl>() {
        let Some(z) = reg.get::<Position>(id).map(|p| p.vec.z) else {
            continue;
        };

        if z.abs() > 0.0 {
            if let Some(forces) = reg.get_mut::<Forces>(id) {
                forces.set(PLAYER_MOVE_FORCE, Vec3::ZERO);
                forces.set(PLAYER_JUMP_FORCE, Vec3::ZERO);
            }
            continue;
        }

        let jump = input.consume(Scancode::Space);

        let mut fx = 0.0;
        let mut fy = 0.0;
        if input.is_key_held(Scancode::Up) {
            fy = -MOVE_FORCE;
        }
        if input.is_key_held(Scancode::Down) {
            fy = MOVE_FORCE;
        }
        if input.is_key_held(Scancode::Left) {
            fx = -MOVE_FORCE;
        }
        if input.is_key_held(Scancode::Right) {
            fx = MOVE_FORCE;
        }
        if fx != 0.0 && fy != 0.0 {
            fx /= DIAGONAL_DAMP;
            fy /= DIAGONAL_DAMP;
        }

        if let Some(forces) = reg.get_mut::<Forces>(id) {
            if jump {
                forces.set(PLAYER_JUMP_FORCE, Vec3::new(0.0, 0.0, JUMP_FORCE));
            }
            forces.set(PLAYER_MOVE_FORCE, Vec3::new(fx, fy, 0.0));
        }

        if fx != 0.0 || fy != 0.0 {
            if let Some(pos) = reg.get_mut::<Position>(id) {
                pos.rotating_to = Some(Vec3::new(fx, fy, 0.0).normalize());
            }
        }
    }
}
