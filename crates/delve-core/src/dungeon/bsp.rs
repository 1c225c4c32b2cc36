//! Binary space partition tree
//!
//! The map rectangle is split top-down until no cut leaves both children
//! larger than `min_leaf_size`; every leaf then receives a room. Nodes live
//! in an arena and refer to each other by [`NodeId`], so the parent link is
//! a plain index and dropping the tree needs no recursive teardown.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use log::trace;

use crate::rng::GameRng;
use crate::world::GenerationOptions;

use super::area::AreaCell;
use super::corridor::Corridor;
use super::rect::{Rect, SplitAxis};
use super::room::{Room, carve_room};

/// Index of a node in its [`PartitionTree`]; ids are handed out sequentially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of a collision query against every room and corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Floor of some room or corridor
    Navigable,
    /// Wall of some room or corridor, and floor of none
    Blocking,
    /// Outside every footprint
    Empty,
}

/// A node of the partition tree
#[derive(Debug, Clone)]
pub struct PartitionNode {
    pub id: NodeId,
    pub rect: Rect,
    /// Lookup only; children are owned through the arena
    pub parent: Option<NodeId>,
    children: Option<[NodeId; 2]>,
    room: Option<Room>,
    corridor: Option<Corridor>,
}

impl PartitionNode {
    fn new(id: NodeId, rect: Rect, parent: Option<NodeId>) -> Self {
        Self {
            id,
            rect,
            parent,
            children: None,
            room: None,
            corridor: None,
        }
    }

    /// Both children, or `None` for a leaf
    pub fn children(&self) -> Option<[NodeId; 2]> {
        self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    pub fn corridor(&self) -> Option<&Corridor> {
        self.corridor.as_ref()
    }
}

/// Arena-backed partition tree; node 0 is the root
#[derive(Debug, Clone)]
pub struct PartitionTree {
    nodes: Vec<PartitionNode>,
}

impl PartitionTree {
    /// Partition `bounds` and carve a room in every leaf
    ///
    /// Nodes are expanded depth-first, first child before second, so the
    /// random stream is consumed in tree order.
    pub fn build(bounds: Rect, options: &GenerationOptions, rng: &mut GameRng) -> Self {
        debug_assert!(bounds.is_valid(), "cannot partition {bounds:?}");

        let mut tree = Self {
            nodes: vec![PartitionNode::new(NodeId(0), bounds, None)],
        };
        let mut stack = vec![NodeId(0)];

        while let Some(id) = stack.pop() {
            let rect = tree.node(id).rect;
            match try_split(rect, options, rng) {
                Some((first, second)) => {
                    let a = tree.push(first, id);
                    let b = tree.push(second, id);
                    tree.nodes[id.index()].children = Some([a, b]);
                    stack.push(b);
                    stack.push(a);
                }
                None => {
                    let room = carve_room(rect, options, rng);
                    tree.nodes[id.index()].room = Some(room);
                }
            }
        }

        tree
    }

    fn push(&mut self, rect: Rect, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(PartitionNode::new(id, rect, Some(parent)));
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node by id; ids always come from this tree
    pub fn node(&self, id: NodeId) -> &PartitionNode {
        &self.nodes[id.index()]
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &PartitionNode> {
        self.nodes.iter()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// Parents before children, first child before second
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some([a, b]) = self.node(id).children {
                stack.push(b);
                stack.push(a);
            }
        }
        order
    }

    /// Children before parents, first child before second
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            match self.node(id).children {
                Some([a, b]) if !expanded => {
                    stack.push((id, true));
                    stack.push((b, false));
                    stack.push((a, false));
                }
                _ => order.push(id),
            }
        }
        order
    }

    /// Leaves from first to last child order
    pub fn leaves(&self) -> Vec<NodeId> {
        self.pre_order()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .collect()
    }

    /// Leaf reached by always taking the first child
    pub fn leftmost_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some([first, _]) = self.node(current).children {
            current = first;
        }
        current
    }

    /// Leaf reached by always taking the second child
    pub fn rightmost_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some([_, second]) = self.node(current).children {
            current = second;
        }
        current
    }

    /// Rooms of every leaf, in leaf order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.leaves()
            .into_iter()
            .filter_map(move |id| self.node(id).room())
    }

    /// Corridors in routing (post) order
    pub fn corridors(&self) -> impl Iterator<Item = &Corridor> + '_ {
        self.post_order()
            .into_iter()
            .filter_map(move |id| self.node(id).corridor())
    }

    /// Attach the corridor routed for an internal node
    pub fn attach_corridor(&mut self, id: NodeId, corridor: Corridor) {
        let node = &mut self.nodes[id.index()];
        debug_assert!(!node.is_leaf(), "corridors belong to internal nodes");
        debug_assert!(node.corridor.is_none(), "corridor already attached");
        node.corridor = Some(corridor);
    }

    /// What occupies a map cell across every room and corridor
    pub fn occupancy(&self, x: i32, y: i32) -> Occupancy {
        let mut blocking = false;
        for node in &self.nodes {
            let cells = [
                node.room.as_ref().map(|r| r.cell_at(x, y)),
                node.corridor.as_ref().map(|c| c.cell_at(x, y)),
            ];
            for cell in cells.into_iter().flatten() {
                match cell {
                    AreaCell::Floor => return Occupancy::Navigable,
                    AreaCell::Wall => blocking = true,
                    AreaCell::Untouched => {}
                }
            }
        }
        if blocking {
            Occupancy::Blocking
        } else {
            Occupancy::Empty
        }
    }

    /// Check if a map cell is floor of some room
    pub fn is_room_floor(&self, x: i32, y: i32) -> bool {
        self.nodes
            .iter()
            .filter_map(|n| n.room.as_ref())
            .any(|r| r.cell_at(x, y).is_floor())
    }

    /// Two leaves under one root, split at `offset`
    #[cfg(test)]
    pub(crate) fn with_rooms(bounds: Rect, axis: SplitAxis, offset: i32, rooms: [Room; 2]) -> Self {
        let (first, second) = bounds.split_at(axis, offset).expect("valid split");
        let mut tree = Self {
            nodes: vec![PartitionNode::new(NodeId(0), bounds, None)],
        };
        let a = tree.push(first, NodeId(0));
        let b = tree.push(second, NodeId(0));
        tree.nodes[0].children = Some([a, b]);
        let [room_a, room_b] = rooms;
        tree.nodes[a.index()].room = Some(room_a);
        tree.nodes[b.index()].room = Some(room_b);
        tree
    }
}

/// Try the preferred axis, then the other one
fn try_split(rect: Rect, options: &GenerationOptions, rng: &mut GameRng) -> Option<(Rect, Rect)> {
    let first = if rng.percent(options.horizontal_split_percent) {
        SplitAxis::Horizontal
    } else {
        SplitAxis::Vertical
    };

    for axis in [first, first.other()] {
        let span = rect.span(axis);
        // Middle half of the span only
        let offset = rng.range_inclusive(span / 4, span * 3 / 4);
        if offset > options.min_leaf_size && span - offset > options.min_leaf_size {
            trace!("split {rect:?} {axis} at {offset}");
            return rect.split_at(axis, offset);
        }
    }

    trace!("leaf {rect:?}");
    None
}
