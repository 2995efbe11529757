//! Narrow-phase collision between the player box and obstacle polygons
//!
//! # Module Organization
//!
//! - [`primitives`] - Boxes, convex polygons and interval projections
//! - [`sat`] - Separating-axis test producing a minimum translation vector
//!
//! # Key Types
//!
//! - [`Aabb`] - Axis-aligned player box (never rotates)
//! - [`ConvexPolygon`] - Hull of an obstacle in world space
//! - [`Contact`] - Push-out axis and depth for one overlapping pair

pub mod primitives;
pub mod sat;

pub use primitives::{Aabb, ConvexPolygon, Projection};
pub use sat::{resolve, Contact};
