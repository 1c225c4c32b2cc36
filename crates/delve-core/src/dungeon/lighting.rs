//! Light propagation
//!
//! Every room light spends a fixed budget outward over the navigation
//! graph. Doors cost more to pass, so light spills only a short way into
//! corridors.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use log::debug;

use crate::nav::{CostOverrides, DijkstraMap, NavGraph, Propagation};
use crate::world::{GenerationOptions, NavError};

use super::cell::CellType;
use super::grid::MapGrid;

/// Fill the grid's light levels from `lights`, returning the number of lit cells
pub fn apply_lighting(
    grid: &mut MapGrid,
    nav: &NavGraph,
    lights: &[(i32, i32)],
    options: &GenerationOptions,
) -> Result<usize, NavError> {
    let sources = lights
        .iter()
        .map(|&(x, y)| nav.id_of(x, y).ok_or(NavError::LocationNotFound { x, y }))
        .collect::<Result<Vec<_>, _>>()?;

    let mut costs = CostOverrides::new();
    for id in nav.cells() {
        let (x, y) = nav.position(id);
        if grid.get(x, y) == Some(CellType::Door) {
            costs.insert(id, options.door_light_cost);
        }
    }

    let map = DijkstraMap::build(
        nav,
        &sources,
        &costs,
        Propagation::Reverse {
            budget: options.light_radius,
        },
    )?;

    grid.clear_light();
    for (id, level) in map.iter() {
        let (x, y) = nav.position(id);
        grid.set_light(x, y, level);
    }

    debug!("{} lights lit {} cells", sources.len(), map.len());
    Ok(map.len())
}
