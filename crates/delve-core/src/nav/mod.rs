//! Navigation
//!
//! The adjacency graph over navigable cells, reachability queries and
//! Dijkstra-style propagation.

mod dijkstra;
mod graph;

pub use dijkstra::{CostOverrides, DijkstraMap, Propagation};
pub use graph::{CellId, NavGraph, ORTHOGONAL};
