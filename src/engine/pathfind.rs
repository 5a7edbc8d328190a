use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;

/// Grid coordinate on the obstacle grid.
pub type Cell = (i32, i32);

/// Coarse occupancy grid used by AI pathfinding.
///
/// Fixed dimensions for the lifetime of the game; rebuilt (clear + rasterize)
/// before every path query. Out-of-bounds cells count as blocked.
pub struct ObstacleGrid {
    size: i32,
    cell_size: f32,
    cells: Vec<u8>,
}

impl ObstacleGrid {
    pub fn new(size: i32, cell_size: f32) -> Self {
        Self {
            size,
            cell_size,
            cells: vec![0; (size * size) as usize],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.0 < self.size && cell.1 >= 0 && cell.1 < self.size
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        if !self.in_bounds(cell) {
            return true;
        }
        self.cells[(cell.1 * self.size + cell.0) as usize] != 0
    }

    pub fn block(&mut self, cell: Cell) {
        if self.in_bounds(cell) {
            self.cells[(cell.1 * self.size + cell.0) as usize] = 1;
        }
    }

    /// Rasterizes a circular footprint, expanded by a safety margin so paths
    /// keep clear of the obstacle's edge.
    pub fn block_circle(&mut self, center: Vec3, radius: f32) {
        let left = ((center.x - radius) / self.cell_size - 2.0).floor() as i32;
        let top = ((center.y - radius) / self.cell_size - 2.0).floor() as i32;
        let right = ((center.x + radius) / self.cell_size + 1.0).ceil() as i32;
        let bottom = ((center.y + radius) / self.cell_size + 1.0).ceil() as i32;

        for cy in top..=bottom {
            for cx in left..=right {
                self.block((cx, cy));
            }
        }
    }

    pub fn world_to_cell(&self, v: Vec3) -> Cell {
        (
            (v.x / self.cell_size).floor() as i32,
            (v.y / self.cell_size).floor() as i32,
        )
    }

    /// World position of a cell's center.
    pub fn cell_center(&self, cell: Cell) -> Vec3 {
        Vec3::new(
            cell.0 as f32 * self.cell_size + self.cell_size / 2.0,
            cell.1 as f32 * self.cell_size + self.cell_size / 2.0,
            0.0,
        )
    }
}

struct NodeRec {
    g: u32,
    h: u32,
    parent: Option<Cell>,
}

/// Octile distance between grid cells: 10 per straight step, 14 per
/// diagonal step.
fn octile(a: Cell, b: Cell) -> u32 {
    let dx = (a.0 - b.0).unsigned_abs();
    let dy = (a.1 - b.1).unsigned_abs();
    if dx > dy {
        14 * dy + 10 * (dx - dy)
    } else {
        14 * dx + 10 * (dy - dx)
    }
}

/// Lowest f = g + h wins; equal f prefers the lower heuristic. Remaining
/// ties fall to cell-key order, keeping repeated queries identical.
fn best_open_node(open: &BTreeSet<Cell>, nodes: &BTreeMap<Cell, NodeRec>) -> Option<Cell> {
    let mut best: Option<(Cell, u32, u32)> = None;
    for &cell in open {
        let rec = &nodes[&cell];
        let f = rec.g + rec.h;
        let better = match best {
            None => true,
            Some((_, bf, bh)) => f < bf || (f == bf && rec.h < bh),
        };
        if better {
            best = Some((cell, f, rec.h));
        }
    }
    best.map(|(cell, _, _)| cell)
}

fn neighbours(grid: &ObstacleGrid, cell: Cell) -> Vec<Cell> {
    let mut out = Vec::with_capacity(8);
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let next = (cell.0 + dx, cell.1 + dy);
            if grid.in_bounds(next) {
                out.push(next);
            }
        }
    }
    out
}

/// Collapses runs of same-direction waypoints, keeping only the points where
/// the path changes direction. Input is goal-first; the goal itself is
/// always kept.
fn simplify(cells: &[Cell]) -> Vec<Cell> {
    let mut old_dir = (0, 0);
    let mut simplified = Vec::new();
    for i in 1..cells.len() {
        let new_dir = (cells[i - 1].0 - cells[i].0, cells[i - 1].1 - cells[i].1);
        if new_dir != old_dir {
            simplified.push(cells[i - 1]);
        }
        old_dir = new_dir;
    }
    simplified
}

fn retrace(
    nodes: &BTreeMap<Cell, NodeRec>,
    start: Cell,
    goal: Cell,
    grid: &ObstacleGrid,
) -> Vec<Vec3> {
    let mut cells = Vec::new();
    let mut current = goal;
    while current != start {
        cells.push(current);
        match nodes[&current].parent {
            Some(parent) => current = parent,
            None => break,
        }
    }

    simplify(&cells)
        .iter()
        .rev()
        .map(|&cell| grid.cell_center(cell))
        .collect()
}

/// A* over the 8-connected obstacle grid.
///
/// Returns waypoints in world coordinates from (but excluding) the start
/// cell to the goal cell, simplified to direction changes. Empty when the
/// goal cell is blocked, an endpoint is off the grid, or no route exists.
pub fn find_path(from: Vec3, to: Vec3, grid: &ObstacleGrid) -> Vec<Vec3> {
    let start = grid.world_to_cell(from);
    let goal = grid.world_to_cell(to);

    if !grid.in_bounds(start) || grid.is_blocked(goal) {
        return Vec::new();
    }

    let mut nodes: BTreeMap<Cell, NodeRec> = BTreeMap::new();
    let mut open: BTreeSet<Cell> = BTreeSet::new();
    let mut closed: BTreeSet<Cell> = BTreeSet::new();

    nodes.insert(
        start,
        NodeRec {
            g: 0,
            h: octile(start, goal),
            parent: None,
        },
    );
    open.insert(start);

    loop {
        let Some(current) = best_open_node(&open, &nodes) else {
            // open set exhausted, goal unreachable
            return Vec::new();
        };
        open.remove(&current);
        closed.insert(current);

        if current == goal {
            return retrace(&nodes, start, goal, grid);
        }

        for neighbour in neighbours(grid, current) {
            if grid.is_blocked(neighbour) || closed.contains(&neighbour) {
                continue;
            }

            let tentative = nodes[&current].g + octile(current, neighbour);
            let improves = nodes.get(&neighbour).is_none_or(|rec| tentative < rec.g);
            if improves {
                nodes.insert(
                    neighbour,
                    NodeRec {
                        g: tentative,
                        h: octile(neighbour, goal),
                        parent: Some(current),
                    },
                );
                open.insert(neighbour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_10() -> ObstacleGrid {
        ObstacleGrid::new(10, 10.0)
    }

    #[test]
    fn octile_distances() {
        assert_eq!(octile((0, 0), (3, 3)), 42);
        assert_eq!(octile((0, 0), (5, 2)), 14 * 2 + 10 * 3);
        assert_eq!(octile((5, 2), (0, 0)), 58);
    }

    #[test]
    fn straight_line_simplifies_to_goal_only() {
        let grid = grid_10();
        let path = find_path(Vec3::new(5.0, 5.0, 0.0), Vec3::new(35.0, 35.0, 0.0), &grid);
        assert_eq!(path, vec![Vec3::new(35.0, 35.0, 0.0)]);
    }

    #[test]
    fn detour_keeps_direction_changes() {
        let mut grid = grid_10();
        // vertical wall with a gap at the bottom
        for y in 0..9 {
            grid.block((4, y));
        }
        let path = find_path(Vec3::new(5.0, 5.0, 0.0), Vec3::new(85.0, 5.0, 0.0), &grid);
        assert!(path.len() > 1);
        // route ends at the goal cell center
        assert_eq!(path.last(), Some(&Vec3::new(85.0, 5.0, 0.0)));
    }

    #[test]
    fn full_wall_is_unreachable() {
        let mut grid = grid_10();
        for y in 0..10 {
            grid.block((4, y));
        }
        let path = find_path(Vec3::new(5.0, 5.0, 0.0), Vec3::new(85.0, 5.0, 0.0), &grid);
        assert!(path.is_empty());
    }

    #[test]
    fn blocked_goal_yields_empty_path() {
        let mut grid = grid_10();
        grid.block((8, 8));
        let path = find_path(Vec3::new(5.0, 5.0, 0.0), Vec3::new(85.0, 85.0, 0.0), &grid);
        assert!(path.is_empty());
    }

    #[test]
    fn endpoints_off_grid_yield_empty_path() {
        let grid = grid_10();
        assert!(find_path(Vec3::new(-20.0, 5.0, 0.0), Vec3::new(85.0, 85.0, 0.0), &grid).is_empty());
        assert!(find_path(Vec3::new(5.0, 5.0, 0.0), Vec3::new(500.0, 5.0, 0.0), &grid).is_empty());
    }

    #[test]
    fn repeated_queries_are_identical() {
        let mut grid = grid_10();
        grid.block_circle(Vec3::new(45.0, 45.0, 0.0), 5.0);
        let from = Vec3::new(5.0, 5.0, 0.0);
        let to = Vec3::new(95.0, 95.0, 0.0);
        let a = find_path(from, to, &grid);
        let b = find_path(from, to, &grid);
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn block_circle_covers_footprint_with_margin() {
        let mut grid = grid_10();
        grid.block_circle(Vec3::new(55.0, 55.0, 0.0), 10.0);
        assert!(grid.is_blocked((5, 5)));
        assert!(grid.is_blocked((4, 4)));
        // far corner stays free
        assert!(!grid.is_blocked((0, 0)));
    }
}
