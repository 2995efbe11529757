//! Platformer physics: integration, collision and surface response
//!
//! The per-player pipeline is [`integrator::integrate`], then
//! [`collision_system::resolve_body`], which applies [`surface`] responses as
//! contacts are found, then [`integrator::clamp_to_bounds`].

pub mod body;
pub mod collision;
pub mod collision_system;
pub mod integrator;
pub mod surface;

pub use body::Body;
pub use collision::{Aabb, Contact, ConvexPolygon};
pub use collision_system::{resolve_body, ContactFlags, Resolution, ResolvedContact};
pub use surface::{ContactKind, SurfaceEffect};
