//! delve-core: BSP dungeon generation, navigation and visibility
//!
//! A level is built by partitioning the map, carving a room in every leaf
//! and routing corridors between sibling subtrees without ever adding a
//! redundant connection. The navigation graph built along the way answers
//! movement and reachability queries and drives the lighting pass; octant
//! shadowcasting decides what an observer can see.
//!
//! Supports `no_std` environments by disabling the default `std` feature.
//! Entropy seeding and options-file loading are gated behind
//! `cfg(feature = "std")`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Re-exports of alloc types needed when building without std.
/// In std mode, these are provided by the std prelude.
#[cfg(not(feature = "std"))]
pub(crate) mod compat {
    pub use alloc::boxed::Box;
    pub use alloc::format;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec;
    pub use alloc::vec::Vec;
}

pub mod dungeon;
pub mod nav;
pub mod render;
pub mod session;
pub mod vision;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use dungeon::{Dungeon, MapGrid, generate_dungeon_with};
#[cfg(feature = "std")]
pub use dungeon::generate_dungeon;
pub use rng::GameRng;
pub use session::{Direction, MoveOutcome, Session};
pub use world::{GenerationError, GenerationOptions, NavError, OptionsError};
