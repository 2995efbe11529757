//! Obstacle definitions and their resolved collision geometry

use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::foundation::math::Vec2;
use crate::physics::collision::ConvexPolygon;

/// Authored obstacle geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Rectangle with top-left corner `(x, y)`, rotated about its center
    Rect {
        /// Left edge before rotation
        x: f64,
        /// Top edge before rotation
        y: f64,
        /// Width
        w: f64,
        /// Height
        h: f64,
        /// Clockwise rotation in degrees (y points down)
        #[serde(default)]
        rotation_deg: f64,
    },
    /// Pre-sampled curve; collides as the convex hull of its points
    Polyline {
        /// Sample points in world coordinates
        points: Vec<Vec2>,
    },
}

impl Shape {
    /// Collision polygon for this shape, `None` when degenerate
    pub fn to_polygon(&self) -> Option<ConvexPolygon> {
        match self {
            Shape::Rect {
                x,
                y,
                w,
                h,
                rotation_deg,
            } => {
                if !(x.is_finite() && y.is_finite()) {
                    return None;
                }
                ConvexPolygon::from_rect(*x, *y, *w, *h, *rotation_deg)
            }
            Shape::Polyline { points } => ConvexPolygon::from_points(points),
        }
    }

    /// Short name used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rect { .. } => "rect",
            Shape::Polyline { .. } => "polyline",
        }
    }
}

/// One entry of a world file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDef {
    /// Explicit id; the position in the list is used when absent
    #[serde(default)]
    pub id: Option<u32>,
    /// Geometry
    pub shape: Shape,
    /// Surface material
    #[serde(default)]
    pub material: Material,
}

impl ObstacleDef {
    /// Rectangle obstacle
    pub fn rect(x: f64, y: f64, w: f64, h: f64, rotation_deg: f64, material: Material) -> Self {
        Self {
            id: None,
            shape: Shape::Rect {
                x,
                y,
                w,
                h,
                rotation_deg,
            },
            material,
        }
    }

    /// Polyline obstacle
    pub fn polyline(points: Vec<Vec2>, material: Material) -> Self {
        Self {
            id: None,
            shape: Shape::Polyline { points },
            material,
        }
    }
}

/// Validated obstacle; immutable after world load
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    id: u32,
    shape: Shape,
    material: Material,
    polygon: ConvexPolygon,
}

impl Obstacle {
    /// Resolve a definition, `None` when its geometry is malformed
    pub fn from_def(def: &ObstacleDef, fallback_id: u32) -> Option<Self> {
        let polygon = def.shape.to_polygon()?;
        Some(Self {
            id: def.id.unwrap_or(fallback_id),
            shape: def.shape.clone(),
            material: def.material,
            polygon,
        })
    }

    /// Obstacle id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Surface material
    pub fn material(&self) -> Material {
        self.material
    }

    /// Collision polygon
    pub fn polygon(&self) -> &ConvexPolygon {
        &self.polygon
    }

    /// Serializable view
    pub fn snapshot(&self) -> ObstacleSnapshot {
        ObstacleSnapshot {
            id: self.id,
            material: self.material,
            shape: self.shape.clone(),
            polygon: self.polygon.points().to_vec(),
        }
    }
}

/// Obstacle as sent to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    /// Obstacle id
    pub id: u32,
    /// Surface material
    pub material: Material,
    /// Authored shape
    pub shape: Shape,
    /// Resolved hull vertices
    pub polygon: Vec<Vec2>,
}
