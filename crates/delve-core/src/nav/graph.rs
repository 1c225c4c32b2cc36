//! Navigation graph over carved cells
//!
//! Keys are navigable map cells; values are their orthogonal navigable
//! neighbours. Both directions of an edge are always inserted together. The
//! graph only grows: rooms are registered once the partition tree exists and
//! corridor chunks are registered as soon as they are committed, so later
//! routing decisions see earlier connections.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use alloc::collections::VecDeque;
use hashbrown::{HashMap, HashSet};

use crate::dungeon::Area;
use crate::world::NavError;

/// Map cell id, `y * width + x`
pub type CellId = usize;

/// Orthogonal neighbour offsets: north, east, south, west
pub const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Adjacency between navigable cells of one map
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    width: i32,
    height: i32,
    edges: HashMap<CellId, Vec<CellId>>,
}

impl NavGraph {
    /// Create an empty graph for a `width × height` map
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            edges: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cell id of a map position, `None` outside the map
    pub fn id_of(&self, x: i32, y: i32) -> Option<CellId> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some(y as CellId * self.width as CellId + x as CellId)
        } else {
            None
        }
    }

    /// Map position of a cell id
    pub fn position(&self, id: CellId) -> (i32, i32) {
        let width = self.width.max(1) as CellId;
        ((id % width) as i32, (id / width) as i32)
    }

    /// Check if a cell id is registered (legally enterable)
    pub fn contains(&self, id: CellId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Check if a map position is registered (legally enterable)
    pub fn has_location(&self, x: i32, y: i32) -> bool {
        self.id_of(x, y).is_some_and(|id| self.contains(id))
    }

    /// Number of registered cells
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Registered cells, in no particular order
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.edges.keys().copied()
    }

    /// Neighbours of a registered cell; empty for unknown cells
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Register a cell with no edges; existing cells are left alone
    pub fn insert(&mut self, id: CellId) {
        self.edges.entry(id).or_default();
    }

    /// Connect two cells in both directions, registering either if needed
    pub fn connect(&mut self, a: CellId, b: CellId) {
        if a == b {
            return;
        }
        let from_a = self.edges.entry(a).or_default();
        if !from_a.contains(&b) {
            from_a.push(b);
        }
        let from_b = self.edges.entry(b).or_default();
        if !from_b.contains(&a) {
            from_b.push(a);
        }
    }

    /// Register every floor cell of an area placed at (`origin_x`, `origin_y`)
    ///
    /// Each floor cell is linked to orthogonal neighbours that are already
    /// registered or that are floor in the same area. Cells falling outside
    /// the map are ignored.
    pub fn add_area(&mut self, origin_x: i32, origin_y: i32, area: &Area) {
        for (lx, ly, cell) in area.iter() {
            if !cell.is_floor() {
                continue;
            }
            let Some(id) = self.id_of(origin_x + lx, origin_y + ly) else {
                continue;
            };
            self.insert(id);

            for (dx, dy) in ORTHOGONAL {
                let Some(next) = self.id_of(origin_x + lx + dx, origin_y + ly + dy) else {
                    continue;
                };
                if self.contains(next) || area.get(lx + dx, ly + dy).is_floor() {
                    self.connect(id, next);
                }
            }
        }
    }

    /// Error unless the cell is registered
    pub fn require(&self, id: CellId) -> Result<(), NavError> {
        if self.contains(id) {
            Ok(())
        } else {
            let (x, y) = self.position(id);
            Err(NavError::LocationNotFound { x, y })
        }
    }

    /// Breadth-first reachability between two registered cells
    pub fn bfs_reachable(&self, from: CellId, to: CellId) -> Result<bool, NavError> {
        self.require(from)?;
        self.require(to)?;
        if from == to {
            return Ok(true);
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if next == to {
                    return Ok(true);
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Ok(false)
    }

    /// Breadth-first shortest path, both ends included
    ///
    /// Returns `Ok(None)` when the cells are not connected.
    pub fn bfs_path(&self, from: CellId, to: CellId) -> Result<Option<Vec<CellId>>, NavError> {
        self.require(from)?;
        self.require(to)?;

        let mut came_from: HashMap<CellId, CellId> = HashMap::new();
        let mut queue = VecDeque::new();
        came_from.insert(from, from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![to];
                let mut step = to;
                while step != from {
                    step = came_from[&step];
                    path.push(step);
                }
                path.reverse();
                return Ok(Some(path));
            }
            for &next in self.neighbors(current) {
                if !came_from.contains_key(&next) {
                    came_from.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }

    /// Every cell connected to `start`, including itself
    pub fn component(&self, start: CellId) -> Result<HashSet<CellId>, NavError> {
        self.require(start)?;

        let mut seen = HashSet::new();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(current) = stack.pop() {
            for &next in self.neighbors(current) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::AreaCell;

    fn corridor_area(len: i32) -> Area {
        let mut area = Area::new(len, 1);
        for x in 0..len {
            area.set(x, 0, AreaCell::Floor);
        }
        area
    }

    #[test]
    fn test_ids_roundtrip() {
        let nav = NavGraph::new(10, 8);
        let id = nav.id_of(3, 5).unwrap();
        assert_eq!(id, 53);
        assert_eq!(nav.position(id), (3, 5));
        assert!(nav.id_of(10, 0).is_none());
        assert!(nav.id_of(0, -1).is_none());
    }

    #[test]
    fn test_add_area_registers_floor_only() {
        let mut nav = NavGraph::new(20, 20);
        nav.add_area(2, 2, &Area::walled_box(5, 5));

        assert_eq!(nav.len(), 9);
        assert!(nav.has_location(3, 3));
        assert!(nav.has_location(5, 5));
        assert!(!nav.has_location(2, 2));
        assert!(!nav.has_location(6, 4));
        // 3x3 grid has 12 internal edges
        assert_eq!(nav.edge_count(), 12);
    }

    #[test]
    fn test_add_area_links_to_existing_cells() {
        let mut nav = NavGraph::new(20, 5);
        nav.add_area(0, 0, &corridor_area(3));
        nav.add_area(3, 0, &corridor_area(3));

        let a = nav.id_of(0, 0).unwrap();
        let b = nav.id_of(5, 0).unwrap();
        assert_eq!(nav.bfs_reachable(a, b), Ok(true));
    }

    #[test]
    fn test_edges_are_symmetric() {
        let mut nav = NavGraph::new(30, 30);
        nav.add_area(1, 1, &Area::walled_box(8, 6));
        nav.add_area(8, 3, &corridor_area(10));
        for id in nav.cells() {
            for &n in nav.neighbors(id) {
                assert!(nav.neighbors(n).contains(&id));
            }
        }
    }

    #[test]
    fn test_bfs_disconnected() {
        let mut nav = NavGraph::new(20, 5);
        nav.add_area(0, 0, &corridor_area(3));
        nav.add_area(5, 0, &corridor_area(3));

        let a = nav.id_of(0, 0).unwrap();
        let b = nav.id_of(7, 0).unwrap();
        assert_eq!(nav.bfs_reachable(a, b), Ok(false));
        assert_eq!(nav.bfs_path(a, b), Ok(None));
    }

    #[test]
    fn test_bfs_unknown_location() {
        let mut nav = NavGraph::new(20, 5);
        nav.add_area(0, 0, &corridor_area(3));

        let a = nav.id_of(0, 0).unwrap();
        let missing = nav.id_of(10, 2).unwrap();
        assert_eq!(
            nav.bfs_reachable(a, missing),
            Err(NavError::LocationNotFound { x: 10, y: 2 })
        );
        assert!(nav.bfs_path(missing, a).is_err());
        assert!(nav.component(missing).is_err());
    }

    #[test]
    fn test_bfs_path_is_shortest() {
        let mut nav = NavGraph::new(20, 20);
        nav.add_area(0, 0, &Area::walled_box(7, 7));

        let a = nav.id_of(1, 1).unwrap();
        let b = nav.id_of(5, 5).unwrap();
        let path = nav.bfs_path(a, b).unwrap().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&b));
        for pair in path.windows(2) {
            assert!(nav.neighbors(pair[0]).contains(&pair[1]));
        }
    }

    #[test]
    fn test_component() {
        let mut nav = NavGraph::new(20, 5);
        nav.add_area(0, 0, &corridor_area(3));
        nav.add_area(5, 0, &corridor_area(4));

        let left = nav.component(nav.id_of(1, 0).unwrap()).unwrap();
        assert_eq!(left.len(), 3);
        let right = nav.component(nav.id_of(8, 0).unwrap()).unwrap();
        assert_eq!(right.len(), 4);
    }
}
