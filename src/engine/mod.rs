pub mod input;
pub mod math;
pub mod pathfind;
pub mod registry;
pub mod time;
pub mod window;
