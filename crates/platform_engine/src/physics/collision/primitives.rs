//! Primitive collision shapes
//!
//! Provides the axis-aligned player box, convex obstacle polygons and the
//! interval projections the separating-axis test is built on.

use crate::foundation::math::{constants::EPSILON, utils, Vec2};

/// Closed scalar interval produced by projecting a shape onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Smallest projected value
    pub min: f64,
    /// Largest projected value
    pub max: f64,
}

impl Projection {
    /// Project a set of points onto `axis`
    pub fn of_points(points: &[Vec2], axis: &Vec2) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            let d = point.dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        Self { min, max }
    }

    /// Length of the shared part of both intervals; `<= 0` means disjoint
    pub fn overlap(&self, other: &Projection) -> f64 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}

/// Axis-aligned bounding box
///
/// The player's collision box is always one of these, whatever direction it
/// moves in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from a top-left position and a size
    pub fn from_position_size(position: Vec2, width: f64, height: f64) -> Self {
        Self {
            min: position,
            max: position + Vec2::new(width, height),
        }
    }

    /// Smallest box containing every point
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut min = Vec2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for point in points {
            min = min.inf(point);
            max = max.sup(point);
        }
        Self { min, max }
    }

    /// Center point of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Corners in clockwise screen order starting at the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    /// Whether the interiors of both boxes intersect (touching is not overlap)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Project the corners onto `axis`
    pub fn project(&self, axis: &Vec2) -> Projection {
        Projection::of_points(&self.corners(), axis)
    }
}

/// Convex polygon used as the collision shape of every obstacle
///
/// Vertices are the convex hull of the input points: duplicates and
/// collinear points are removed, so a polygon always has at least three
/// vertices and non-zero area.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    points: Vec<Vec2>,
    normals: Vec<Vec2>,
    centroid: Vec2,
    bounds: Aabb,
}

impl ConvexPolygon {
    /// Build a polygon from arbitrary points
    ///
    /// Returns `None` when fewer than three effective vertices remain or a
    /// coordinate is not finite.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        if points.iter().any(|p| !utils::is_finite(*p)) {
            return None;
        }

        let hull = convex_hull(points);
        if hull.len() < 3 {
            return None;
        }

        let normals = hull
            .iter()
            .zip(hull.iter().cycle().skip(1))
            .filter_map(|(a, b)| {
                let edge = b - a;
                let length = edge.norm();
                (length > EPSILON).then(|| utils::perp(edge) / length)
            })
            .collect();

        let centroid = area_centroid(&hull)?;
        let bounds = Aabb::from_points(&hull);

        Some(Self {
            points: hull,
            normals,
            centroid,
            bounds,
        })
    }

    /// Build a rectangle with top-left corner `(x, y)`, rotated about its center
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64, rotation_deg: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0) || !rotation_deg.is_finite() {
            return None;
        }

        let center = Vec2::new(x + width * 0.5, y + height * 0.5);
        let (half_w, half_h) = (width * 0.5, height * 0.5);
        let radians = utils::deg_to_rad(rotation_deg);

        let corners = [
            Vec2::new(-half_w, -half_h),
            Vec2::new(half_w, -half_h),
            Vec2::new(half_w, half_h),
            Vec2::new(-half_w, half_h),
        ]
        .map(|local| center + utils::rotate(local, radians));

        Self::from_points(&corners)
    }

    /// Hull vertices
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Unit outward normal of every edge, in vertex order
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Area centroid
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Project the vertices onto `axis`
    pub fn project(&self, axis: &Vec2) -> Projection {
        Projection::of_points(&self.points, axis)
    }
}

/// Andrew's monotone chain; returns the hull in counter-clockwise order
/// (mathematical orientation) without collinear points.
fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup_by(|a, b| (*a - *b).norm() <= EPSILON);

    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len() + 1);
    push_chain(&mut hull, sorted.iter());
    push_chain(&mut hull, sorted.iter().rev());
    hull
}

/// Append one monotone chain, then drop its last point (it starts the next
/// chain).
fn push_chain<'a>(hull: &mut Vec<Vec2>, points: impl Iterator<Item = &'a Vec2>) {
    let start = hull.len();
    for &point in points {
        while hull.len() >= start + 2 {
            let a = hull[hull.len() - 2];
            let b = hull[hull.len() - 1];
            if utils::cross(b - a, point - a) > EPSILON {
                break;
            }
            hull.pop();
        }
        hull.push(point);
    }
    hull.pop();
}

fn area_centroid(points: &[Vec2]) -> Option<Vec2> {
    let mut twice_area = 0.0;
    let mut acc = Vec2::zeros();
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        let cross = utils::cross(*a, *b);
        twice_area += cross;
        acc += (a + b) * cross;
    }
    if twice_area.abs() <= EPSILON {
        return None;
    }
    Some(acc / (3.0 * twice_area))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_projection_overlap() {
        let a = Projection { min: 0.0, max: 10.0 };
        let b = Projection { min: 7.0, max: 12.0 };
        let c = Projection { min: 10.0, max: 12.0 };
        assert_relative_eq!(a.overlap(&b), 3.0);
        assert_relative_eq!(a.overlap(&c), 0.0);
    }

    #[test]
    fn test_aabb_overlap_excludes_touching() {
        let a = Aabb::from_position_size(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let touching = Aabb::from_position_size(Vec2::new(10.0, 0.0), 10.0, 10.0);
        let inside = Aabb::from_position_size(Vec2::new(5.0, 5.0), 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert_eq!(a.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_rect_polygon_matches_box() {
        let poly = ConvexPolygon::from_rect(0.0, 1200.0, 5000.0, 40.0, 0.0).unwrap();
        assert_eq!(poly.points().len(), 4);
        assert_relative_eq!(poly.centroid(), Vec2::new(2500.0, 1220.0), epsilon = 1e-9);
        assert_relative_eq!(poly.bounds().min, Vec2::new(0.0, 1200.0), epsilon = 1e-9);
        assert_relative_eq!(poly.bounds().max, Vec2::new(5000.0, 1240.0), epsilon = 1e-9);
    }

    #[test]
    fn test_normals_point_outward() {
        let poly = ConvexPolygon::from_rect(100.0, 100.0, 50.0, 20.0, 30.0).unwrap();
        let centroid = poly.centroid();
        for (i, normal) in poly.normals().iter().enumerate() {
            assert_abs_diff_eq!(normal.norm(), 1.0, epsilon = 1e-12);
            let edge_mid = (poly.points()[i] + poly.points()[(i + 1) % 4]) * 0.5;
            assert!((edge_mid - centroid).dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_hull_drops_interior_and_collinear_points() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let poly = ConvexPolygon::from_points(&points).unwrap();
        assert_eq!(poly.points().len(), 4);
        assert_relative_eq!(poly.centroid(), Vec2::new(5.0, 5.0), epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_rejected() {
        assert!(ConvexPolygon::from_points(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]).is_none());
        let collinear = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        assert!(ConvexPolygon::from_points(&collinear).is_none());
        let non_finite = [Vec2::new(0.0, 0.0), Vec2::new(f64::NAN, 1.0), Vec2::new(2.0, 0.0)];
        assert!(ConvexPolygon::from_points(&non_finite).is_none());
        assert!(ConvexPolygon::from_rect(0.0, 0.0, 0.0, 10.0, 0.0).is_none());
        assert!(ConvexPolygon::from_rect(0.0, 0.0, 10.0, -1.0, 0.0).is_none());
    }
}
