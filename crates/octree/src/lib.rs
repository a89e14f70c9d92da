//! Octree construction over triangle soups and box-based collision queries.
//!
//! A model's triangles are reduced to a bounding [`Aabb`], partitioned into an
//! [`Octree`], and paired with that box in a [`Body`]. Two bodies form a
//! [`Scene`], which answers whether the moving body, displaced by an offset,
//! overlaps the stationary one.

mod aabb;
mod collision;
mod config;
mod octree;

pub use aabb::*;
pub use collision::*;
pub use config::*;
pub use octree::*;
