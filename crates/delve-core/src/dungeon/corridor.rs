//! Corridor routing between sibling subtrees
//!
//! For an internal node the router links the rightmost room of its first
//! child to the leftmost room of its second child. The route is a monotone
//! walk from a random interior cell of one room to a random interior cell of
//! the other, broken into chunks: a chunk starts where the walk leaves
//! navigable space and ends where it re-enters it. Each chunk is checked
//! against the navigation graph before being kept, so a corridor never adds
//! a link between regions that are already connected.
//!
//! Walls are only cut straight through, in the middle of a wall run, so a
//! room keeps its border except at recorded doors and corridors never run
//! along another wall. When the random walk boxes itself in, a breadth-first
//! search over the same step rules supplies the path instead.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use alloc::collections::VecDeque;
use log::{debug, trace, warn};

use crate::nav::{CellId, NavGraph, ORTHOGONAL};
use crate::rng::GameRng;
use crate::world::GenerationOptions;

use super::area::{Area, AreaCell};
use super::bsp::{NodeId, Occupancy, PartitionTree};
use super::rect::Rect;

/// Carved corridor cells owned by one internal node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Floor where the walk passed, walls around it
    pub area: Area,
    /// Offsets of floor cells cut through a room wall
    pub doors: Vec<(i32, i32)>,
}

impl Corridor {
    /// Bounding box in map space
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Area cell at a map position
    pub fn cell_at(&self, x: i32, y: i32) -> AreaCell {
        self.area.get(x - self.x, y - self.y)
    }

    /// Check if a map position is one of this corridor's doors
    pub fn is_door(&self, x: i32, y: i32) -> bool {
        self.doors.contains(&(x - self.x, y - self.y))
    }

    /// Door cells in map space
    pub fn door_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.doors.iter().map(|&(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn floor_count(&self) -> usize {
        self.area.floor_count()
    }
}

/// Direction the walk is currently closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Vertical,
    Horizontal,
}

impl Heading {
    /// Unit step along this heading, `sign` picking the direction
    fn offset(self, sign: i32) -> (i32, i32) {
        match self {
            Heading::Vertical => (0, sign),
            Heading::Horizontal => (sign, 0),
        }
    }

    fn other(self) -> Self {
        match self {
            Heading::Vertical => Heading::Horizontal,
            Heading::Horizontal => Heading::Vertical,
        }
    }
}

/// Cells carved between two navigable endpoints
#[derive(Debug)]
struct Chunk {
    /// Last navigable cell before the chunk
    start: (i32, i32),
    cells: Vec<(i32, i32)>,
    doors: Vec<(i32, i32)>,
}

impl Chunk {
    fn new(start: (i32, i32)) -> Self {
        Self {
            start,
            cells: Vec::new(),
            doors: Vec::new(),
        }
    }

    /// Floor-only area covering the chunk, with its map origin
    fn area(&self) -> (i32, i32, Area) {
        let (min_x, min_y, max_x, max_y) = extent(&self.cells);
        let mut area = Area::new(max_x - min_x + 1, max_y - min_y + 1);
        for &(x, y) in &self.cells {
            area.set(x - min_x, y - min_y, AreaCell::Floor);
        }
        (min_x, min_y, area)
    }
}

/// Corridor cells accumulated from committed chunks
#[derive(Debug, Default)]
struct CorridorBuilder {
    floors: Vec<(i32, i32)>,
    doors: Vec<(i32, i32)>,
}

impl CorridorBuilder {
    fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    fn absorb(&mut self, chunk: Chunk) {
        self.floors.extend(chunk.cells);
        self.doors.extend(chunk.doors);
    }

    /// Wrap the floor in walls and clip to the map
    fn finish(self, map_width: i32, map_height: i32) -> Option<Corridor> {
        if self.is_empty() {
            return None;
        }

        let (min_x, min_y, max_x, max_y) = extent(&self.floors);
        let x = (min_x - 1).max(0);
        let y = (min_y - 1).max(0);
        let width = (max_x + 1).min(map_width - 1) - x + 1;
        let height = (max_y + 1).min(map_height - 1) - y + 1;

        let mut area = Area::new(width, height);
        for &(fx, fy) in &self.floors {
            area.set(fx - x, fy - y, AreaCell::Floor);
        }
        for &(fx, fy) in &self.floors {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (lx, ly) = (fx - x + dx, fy - y + dy);
                    if area.in_bounds(lx, ly) && area.get(lx, ly) == AreaCell::Untouched {
                        area.set(lx, ly, AreaCell::Wall);
                    }
                }
            }
        }

        let doors = self.doors.iter().map(|&(dx, dy)| (dx - x, dy - y)).collect();
        Some(Corridor {
            x,
            y,
            width,
            height,
            area,
            doors,
        })
    }
}

/// Inclusive bounding box of a non-empty cell list
fn extent(cells: &[(i32, i32)]) -> (i32, i32, i32, i32) {
    cells.iter().fold(
        (i32::MAX, i32::MAX, i32::MIN, i32::MIN),
        |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    )
}

/// Route a corridor for an internal node
///
/// Committed chunks are registered in `nav` as they are found. Returns
/// `None` when the node is a leaf, the two subtrees were already connected,
/// or every chunk turned out redundant.
pub fn route_corridor(
    tree: &PartitionTree,
    id: NodeId,
    nav: &mut NavGraph,
    options: &GenerationOptions,
    rng: &mut GameRng,
) -> Option<Corridor> {
    let [first, second] = tree.node(id).children()?;
    let from_room = tree.node(tree.rightmost_leaf(first)).room()?;
    let to_room = tree.node(tree.leftmost_leaf(second)).room()?;

    let start = from_room.random_interior(rng);
    let goal = to_room.random_interior(rng);

    let start_id = nav.id_of(start.0, start.1)?;
    let goal_id = nav.id_of(goal.0, goal.1)?;
    match nav.bfs_reachable(start_id, goal_id) {
        Ok(true) => {
            debug!("node {}: subtrees already connected", id.0);
            return None;
        }
        Ok(false) => {}
        Err(err) => {
            debug!("node {}: {err}", id.0);
            return None;
        }
    }

    let (map_width, map_height) = (nav.width(), nav.height());
    let mut router = Router {
        tree,
        nav,
        builder: CorridorBuilder::default(),
    };
    router.route(start, goal, options.corridor_abort_percent, rng);

    let corridor = router.builder.finish(map_width, map_height);
    match &corridor {
        Some(c) => debug!(
            "node {}: corridor {:?} with {} floor and {} doors",
            id.0,
            c.bounds(),
            c.floor_count(),
            c.doors.len()
        ),
        None => debug!("node {}: every chunk was redundant", id.0),
    }
    corridor
}

struct Router<'a> {
    tree: &'a PartitionTree,
    nav: &'a mut NavGraph,
    builder: CorridorBuilder,
}

/// Search slot for a cell not entered as a wall
const OPEN: usize = 4;

impl Router<'_> {
    fn route(
        &mut self,
        start: (i32, i32),
        goal: (i32, i32),
        abort_percent: u32,
        rng: &mut GameRng,
    ) {
        let path = match self.plan_walk(start, goal, abort_percent, rng) {
            Some(path) => path,
            None => {
                debug!("walk {start:?} -> {goal:?} boxed in, searching");
                match self.plan_search(start, goal) {
                    Some(path) => path,
                    None => {
                        warn!("no wall-safe route {start:?} -> {goal:?}");
                        return;
                    }
                }
            }
        };
        self.carve(&path);
    }

    fn blocking(&self, (x, y): (i32, i32)) -> bool {
        self.tree.occupancy(x, y) == Occupancy::Blocking
    }

    /// Whether the route may cut through the wall at `cell` moving by `dir`
    ///
    /// Only the middle of a wall run qualifies: the cells on both sides
    /// across `dir` must be walls as well, so room corners and the cells
    /// beside an existing opening stay closed.
    fn crossable(&self, cell: (i32, i32), dir: (i32, i32)) -> bool {
        let beyond = (cell.0 + dir.0, cell.1 + dir.1);
        self.nav.id_of(beyond.0, beyond.1).is_some()
            && self.blocking((cell.0 + dir.1, cell.1 + dir.0))
            && self.blocking((cell.0 - dir.1, cell.1 - dir.0))
    }

    /// Check one step; a walk standing in a wall must leave it the way it came in
    fn can_step(&self, pos: (i32, i32), dir: (i32, i32), locked: Option<(i32, i32)>) -> bool {
        if locked.is_some_and(|entered| entered != dir) {
            return false;
        }
        let next = (pos.0 + dir.0, pos.1 + dir.1);
        if self.nav.id_of(next.0, next.1).is_none() {
            return false;
        }
        !self.blocking(next) || self.crossable(next, dir)
    }

    /// Monotone random walk, `None` once no legal step remains
    fn plan_walk(
        &self,
        start: (i32, i32),
        goal: (i32, i32),
        abort_percent: u32,
        rng: &mut GameRng,
    ) -> Option<Vec<(i32, i32)>> {
        let gap = |pos: (i32, i32), heading: Heading| match heading {
            Heading::Vertical => goal.1 - pos.1,
            Heading::Horizontal => goal.0 - pos.0,
        };

        let mut path = vec![start];
        let mut pos = start;
        let mut heading = if start.1 != goal.1 {
            Heading::Vertical
        } else {
            Heading::Horizontal
        };
        let mut locked = None;

        while pos != goal {
            if gap(pos, heading) == 0 {
                heading = heading.other();
            }

            let mut chosen = None;
            for candidate in [heading, heading.other()] {
                let remaining = gap(pos, candidate);
                if remaining == 0 {
                    continue;
                }
                let dir = candidate.offset(remaining.signum());
                if !self.can_step(pos, dir, locked) {
                    continue;
                }
                let next = (pos.0 + dir.0, pos.1 + dir.1);
                // A wall needs room past it along the same heading
                if self.blocking(next) && gap(next, candidate) == 0 {
                    continue;
                }
                chosen = Some((candidate, dir, next));
                break;
            }

            let (taken, dir, next) = chosen?;
            heading = taken;
            locked = self.blocking(next).then_some(dir);
            pos = next;
            path.push(pos);

            // End the run early and try the other axis
            if rng.percent(abort_percent) && gap(pos, heading.other()) != 0 {
                heading = heading.other();
            }
        }

        Some(path)
    }

    /// Shortest legal route by breadth-first search over (cell, entry) states
    fn plan_search(&self, start: (i32, i32), goal: (i32, i32)) -> Option<Vec<(i32, i32)>> {
        let width = self.nav.width().max(0) as usize;
        let cells = width * self.nav.height().max(0) as usize;
        let slot = |(x, y): (i32, i32), entry: usize| (y as usize * width + x as usize) * 5 + entry;
        let cell_of = |state: usize| {
            let id = state / 5;
            ((id % width) as i32, (id / width) as i32)
        };

        self.nav.id_of(start.0, start.1)?;
        self.nav.id_of(goal.0, goal.1)?;

        let mut came_from: Vec<Option<usize>> = vec![None; cells * 5];
        let mut queue = VecDeque::new();
        let first = slot(start, OPEN);
        came_from[first] = Some(first);
        queue.push_back((start, OPEN));

        while let Some((pos, entry)) = queue.pop_front() {
            let here = slot(pos, entry);
            if pos == goal {
                let mut path = vec![pos];
                let mut state = here;
                while state != first {
                    state = came_from[state]?;
                    path.push(cell_of(state));
                }
                path.reverse();
                return Some(path);
            }

            let locked = (entry != OPEN).then(|| ORTHOGONAL[entry]);
            for (k, &dir) in ORTHOGONAL.iter().enumerate() {
                if !self.can_step(pos, dir, locked) {
                    continue;
                }
                let next = (pos.0 + dir.0, pos.1 + dir.1);
                let next_entry = if self.blocking(next) { k } else { OPEN };
                let state = slot(next, next_entry);
                if came_from[state].is_none() {
                    came_from[state] = Some(here);
                    queue.push_back((next, next_entry));
                }
            }
        }

        None
    }

    /// Split a planned path into chunks and commit the useful ones
    fn carve(&mut self, path: &[(i32, i32)]) {
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            return;
        };
        let mut in_room = self.tree.is_room_floor(first.0, first.1);
        let mut chunk: Option<Chunk> = None;

        for step in path.windows(2) {
            let (pos, next) = (step[0], step[1]);
            let navigable = self.tree.occupancy(next.0, next.1) == Occupancy::Navigable;
            let next_in_room = self.tree.is_room_floor(next.0, next.1);

            if !navigable && chunk.is_none() {
                trace!("chunk opens after {pos:?}");
                chunk = Some(Chunk::new(pos));
            }
            if let Some(open) = chunk.as_mut() {
                if !navigable {
                    open.cells.push(next);
                }
                // Crossing a room boundary: the non-room side is the door
                if next_in_room != in_room {
                    let door = if next_in_room { pos } else { next };
                    if open.cells.contains(&door) {
                        open.doors.push(door);
                    }
                }
            }
            if navigable {
                if let Some(done) = chunk.take() {
                    self.commit(done, next);
                }
            }

            in_room = next_in_room;
        }

        if let Some(done) = chunk.take() {
            self.commit(done, last);
        }
    }

    /// A registered cell at or orthogonally next to `pos`
    fn resolve(&self, pos: (i32, i32)) -> Option<CellId> {
        core::iter::once((0, 0))
            .chain(ORTHOGONAL)
            .filter_map(|(dx, dy)| self.nav.id_of(pos.0 + dx, pos.1 + dy))
            .find(|&id| self.nav.contains(id))
    }

    fn commit(&mut self, chunk: Chunk, end: (i32, i32)) {
        let (Some(a), Some(b)) = (self.resolve(chunk.start), self.resolve(end)) else {
            debug!("dropping chunk {:?} -> {end:?}: no navigable endpoint", chunk.start);
            return;
        };
        if self.nav.bfs_reachable(a, b).unwrap_or(true) {
            debug!("dropping chunk {:?} -> {end:?}: already connected", chunk.start);
            return;
        }

        let (ox, oy, area) = chunk.area();
        self.nav.add_area(ox, oy, &area);
        trace!("committed {} cells from {:?}", chunk.cells.len(), chunk.start);
        self.builder.absorb(chunk);
    }
}
