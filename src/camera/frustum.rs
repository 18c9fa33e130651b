//! View frustum for visibility checks
//!
//! Extracts frustum planes from the view-projection matrix and tests points
//! and bounding volumes against them.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::BoundingVolume;

/// A plane `normal · p + distance = 0` with a unit normal.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin.
    pub distance: f32,
}

impl Plane {
    /// Normalize a raw `(a, b, c, d)` plane row.
    fn from_row(row: Vec4) -> Self {
        let len = row.truncate().length();
        if len > 0.0 {
            Self {
                normal: row.truncate() / len,
                distance: row.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from point to plane (positive = inside).
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// View frustum consisting of 6 inward-facing planes.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of `vp` (Gribb/Hartmann, [0,1] depth range).
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);
        Self {
            planes: [
                Plane::from_row(r3 + r0),
                Plane::from_row(r3 - r0),
                Plane::from_row(r3 + r1),
                Plane::from_row(r3 - r1),
                Plane::from_row(r2),
                Plane::from_row(r3 - r2),
            ],
        }
    }

    /// Test if a point is inside the frustum, allowing `slack` of error.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3, slack: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= -slack)
    }

    /// Test if all eight corners of `volume` are inside the frustum.
    #[must_use]
    pub fn contains_volume(&self, volume: &BoundingVolume, slack: f32) -> bool {
        if volume.is_empty() {
            return false;
        }
        (0..8).all(|i| {
            let corner = Vec3::new(
                if i & 1 == 0 { volume.min.x } else { volume.max.x },
                if i & 2 == 0 { volume.min.y } else { volume.max.y },
                if i & 4 == 0 { volume.min.z } else { volume.max.z },
            );
            self.contains_point(corner, slack)
        })
    }
}
