pub mod board;
pub mod prefabs;
