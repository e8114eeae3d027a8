/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is stored as an outward-pointing normal and one point on the
/// plane. A point P is outside a plane when `dot(normal, P - point) > 0`;
/// a point is inside the frustum when it is not outside any plane.
///
/// Planes are built from the 8 world-space corners of the view volume by
/// `Camera`, which owns the cache and its dirty flag.

use glam::DVec3;
use super::bounding_box::BoundingBox;

/// Result of a 3-way frustum/box classification.
///
/// - `NotCullable` → box entirely inside, draw without further tests
/// - `PartiallyCullable` → box straddles at least one plane
/// - `TotallyCullable` → box entirely outside one plane, skip it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cullable {
    /// Box is entirely inside the frustum
    NotCullable,
    /// Box crosses the frustum boundary
    PartiallyCullable,
    /// Box is entirely outside the frustum
    TotallyCullable,
}

/// Frustum plane indices, in test order
pub const PLANE_NEAR: usize = 0;
pub const PLANE_FAR: usize = 1;
pub const PLANE_LEFT: usize = 2;
pub const PLANE_RIGHT: usize = 3;
pub const PLANE_TOP: usize = 4;
pub const PLANE_BOTTOM: usize = 5;

/// One frustum face: outward normal and a point on the face.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrustumPlane {
    pub normal: DVec3,
    pub point: DVec3,
}

impl FrustumPlane {
    pub fn new(normal: DVec3, point: DVec3) -> Self {
        Self { normal, point }
    }

    /// Positive on the outer side. Not normalized: only the sign is meaningful.
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        self.normal.dot(p - self.point)
    }

    pub fn is_outside(&self, p: DVec3) -> bool {
        self.signed_distance(p) > 0.0
    }
}

/// Six frustum planes: near, far, left, right, top, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frustum {
    pub planes: [FrustumPlane; 6],
}

impl Frustum {
    /// Build the planes from the view-volume corners.
    ///
    /// `corners[0..4]` is the near rectangle and `corners[4..8]` the far one,
    /// both wound as seen from the eye:
    /// ```text
    /// 1------0        5------4
    /// |      |  near  |      |  far
    /// 2------3        6------7
    /// ```
    /// `dir` is the normalized viewing direction.
    pub fn from_corners(corners: &[DVec3; 8], dir: DVec3) -> Self {
        let c = corners;
        let left = (c[5] - c[1]).cross(c[2] - c[1]);
        let right = (c[7] - c[3]).cross(c[0] - c[3]);
        let top = (c[4] - c[0]).cross(c[1] - c[0]);
        let bottom = (c[6] - c[2]).cross(c[3] - c[2]);

        let mut planes = [FrustumPlane::default(); 6];
        planes[PLANE_NEAR] = FrustumPlane::new(-dir, c[0]);
        planes[PLANE_FAR] = FrustumPlane::new(dir, c[4]);
        planes[PLANE_LEFT] = FrustumPlane::new(left, c[1]);
        planes[PLANE_RIGHT] = FrustumPlane::new(right, c[0]);
        planes[PLANE_TOP] = FrustumPlane::new(top, c[0]);
        planes[PLANE_BOTTOM] = FrustumPlane::new(bottom, c[2]);

        Self { planes }
    }

    /// Classify a box by testing its 8 corners against every plane.
    ///
    /// Conservative: a box that clips a frustum edge from outside can be
    /// reported as `PartiallyCullable` even though nothing is visible.
    pub fn classify(&self, bbox: &BoundingBox) -> Cullable {
        let corners = bbox.corners();
        let mut planes_fully_inside = 0;

        for plane in &self.planes {
            let outside = corners.iter().filter(|&&c| plane.is_outside(c)).count();
            if outside == corners.len() {
                return Cullable::TotallyCullable;
            }
            if outside == 0 {
                planes_fully_inside += 1;
            }
        }

        if planes_fully_inside == self.planes.len() {
            Cullable::NotCullable
        } else {
            Cullable::PartiallyCullable
        }
    }

    pub fn contains_point(&self, p: DVec3) -> bool {
        self.planes.iter().all(|plane| !plane.is_outside(p))
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
