mod ai;
mod collision;
mod control;
mod physics;
mod render;
mod world;

pub use ai::ai_system;
pub use collision::collision_system;
pub use control::control_system;
pub use physics::physics_system;
pub use render::{facing_system, render_system, RenderConfig};
pub use world::world_system;
