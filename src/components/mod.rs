use std::collections::{BTreeMap, VecDeque};

use glam::Vec3;
use sdl2::pixels::Color;

/// Spatial state: world position, facing, pending facing target, floor level.
///
/// x/y is the ground plane, z is height (negative = sinking). `min_z` is the
/// lowest z the entity may reach; terrain rewrites it every world-system pass.
pub struct Position {
    pub vec: Vec3,
    /// Current facing, unit length. Starts looking "up" the board.
    pub direction: Vec3,
    /// Facing target the entity is turning toward, cleared once reached.
    pub rotating_to: Option<Vec3>,
    pub min_z: f32,
}

impl Position {
    pub fn new(vec: Vec3) -> Self {
        Self::with_min_z(vec, 0.0)
    }

    pub fn with_min_z(vec: Vec3, min_z: f32) -> Self {
        Self {
            vec,
            direction: Vec3::new(0.0, -1.0, 0.0),
            rotating_to: None,
            min_z,
        }
    }
}

/// Linear velocity in pixels per second.
pub struct Velocity(pub Vec3);

/// Entity mass, always positive.
pub struct Mass(pub f32);

/// Damping coefficient applied by physics while the entity is near ground.
/// Copy on purpose: the world system transfers cell friction onto entities
/// by value, so mutating one side never aliases the other.
#[derive(Clone, Copy)]
pub struct Friction(pub f32);

/// Named force contributions consumed by physics each tick.
///
/// Setting a name overwrites the previous vector for that name; forces are
/// never accumulated per source. Name-ordered map keeps integration order
/// deterministic.
#[derive(Default)]
pub struct Forces {
    forces: BTreeMap<&'static str, Vec3>,
}

impl Forces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, vec: Vec3) {
        self.forces.insert(name, vec);
    }

    #[allow(dead_code)]
    pub fn get(&self, name: &str) -> Option<Vec3> {
        self.forces.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Vec3)> + '_ {
        self.forces.iter().map(|(name, vec)| (*name, *vec))
    }
}

/// Circular collision footprint. Radius matches the entity's `Shape` radius;
/// both describe the same physical circle.
pub struct Collider {
    pub radius: f32,
}

/// Visual footprint. Only circles exist today, but the tagged variant keeps
/// the render/physics contract stable if rectangles arrive later.
pub enum Shape {
    Circle { radius: f32, color: Color },
}

impl Shape {
    pub fn radius(&self) -> f32 {
        match self {
            Self::Circle { radius, .. } => *radius,
        }
    }
}

/// Marker: physics and collision response may mutate this entity.
pub struct Movable;

/// Marker: blocks AI pathfinding.
pub struct Obstacle;

/// Marker: driven by keyboard input.
pub struct PlayerControl;

/// Marker: terrain tile that transfers friction/forces onto entities over it.
pub struct BoardCell;

/// Marker: static scenery drawn between the board and the creatures.
pub struct WorldObject;

/// AI-driven entity plus its cached route toward the player.
#[derive(Default)]
pub struct AiControl {
    pub path: Option<PathCache>,
}

/// A computed route: waypoints still ahead, and when it was computed
/// (simulation seconds, used to rate-limit recalculation).
pub struct PathCache {
    pub created_at: f32,
    pub waypoints: VecDeque<Vec3>,
}
