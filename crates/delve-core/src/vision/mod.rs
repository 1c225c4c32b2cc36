//! Visibility
//!
//! Octant shadowcasting from an observer cell. Each octant is scanned row by
//! row away from the observer while a [`ShadowLine`] collects the angular
//! ranges hidden behind opaque cells seen so far.

mod fov;
mod shadow;

pub use fov::compute_visible;
pub use shadow::{Shadow, ShadowLine};
