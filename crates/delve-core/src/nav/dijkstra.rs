//! Dijkstra maps over the navigation graph
//!
//! A forward map holds the cheapest cost from any source. A reverse map
//! starts every source at a budget and spends it down along the cheapest
//! route, so values are highest at the sources and cells beyond the budget
//! are never reached. Lighting uses the reverse form.

use alloc::collections::BinaryHeap;
use core::cmp::Reverse;
use hashbrown::HashMap;

use super::graph::{CellId, NavGraph};
use crate::world::NavError;

/// Per-cell cost of stepping *into* a cell; cells not listed cost 1
pub type CostOverrides = HashMap<CellId, u32>;

/// Direction of propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Accumulate cost outward from the sources, unbounded
    Forward,
    /// Spend `budget` outward from the sources until it runs out
    Reverse { budget: u32 },
}

/// Result of a Dijkstra propagation
#[derive(Debug, Clone)]
pub struct DijkstraMap {
    mode: Propagation,
    values: HashMap<CellId, u32>,
}

impl DijkstraMap {
    /// Propagate from `sources` across `nav`
    ///
    /// Every source must be registered in the graph.
    pub fn build(
        nav: &NavGraph,
        sources: &[CellId],
        costs: &CostOverrides,
        mode: Propagation,
    ) -> Result<Self, NavError> {
        for &source in sources {
            nav.require(source)?;
        }

        let values = match mode {
            Propagation::Forward => forward(nav, sources, costs),
            Propagation::Reverse { budget } => reverse(nav, sources, costs, budget),
        };
        Ok(Self { mode, values })
    }

    pub fn mode(&self) -> Propagation {
        self.mode
    }

    /// Value at a cell, `None` when it was never reached
    pub fn get(&self, id: CellId) -> Option<u32> {
        self.values.get(&id).copied()
    }

    /// Number of reached cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reached cells and their values, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (CellId, u32)> + '_ {
        self.values.iter().map(|(&id, &v)| (id, v))
    }
}

fn step_cost(costs: &CostOverrides, id: CellId) -> u32 {
    costs.get(&id).copied().unwrap_or(1)
}

fn forward(nav: &NavGraph, sources: &[CellId], costs: &CostOverrides) -> HashMap<CellId, u32> {
    let mut values: HashMap<CellId, u32> = HashMap::new();
    let mut open = BinaryHeap::new();

    for &source in sources {
        values.insert(source, 0);
        open.push(Reverse((0u32, source)));
    }

    while let Some(Reverse((dist, current))) = open.pop() {
        if values.get(&current).is_some_and(|&best| dist > best) {
            continue;
        }
        for &next in nav.neighbors(current) {
            let tentative = dist.saturating_add(step_cost(costs, next));
            if values.get(&next).is_none_or(|&best| tentative < best) {
                values.insert(next, tentative);
                open.push(Reverse((tentative, next)));
            }
        }
    }

    values
}

fn reverse(
    nav: &NavGraph,
    sources: &[CellId],
    costs: &CostOverrides,
    budget: u32,
) -> HashMap<CellId, u32> {
    let mut values: HashMap<CellId, u32> = HashMap::new();
    let mut open = BinaryHeap::new();

    for &source in sources {
        values.insert(source, budget);
        open.push((budget, source));
    }

    while let Some((remaining, current)) = open.pop() {
        if values.get(&current).is_some_and(|&best| remaining < best) {
            continue;
        }
        for &next in nav.neighbors(current) {
            let Some(left) = remaining.checked_sub(step_cost(costs, next)) else {
                continue;
            };
            if values.get(&next).is_none_or(|&best| left > best) {
                values.insert(next, left);
                open.push((left, next));
            }
        }
    }

    values
}
