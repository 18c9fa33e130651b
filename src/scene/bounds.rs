use glam::{Mat4, Vec3};

/// Tolerance used when deciding whether a volume has any extent.
pub const BOUNDS_EPSILON: f32 = 1e-6;

/// Axis-aligned box enclosing an object's transformed geometry.
///
/// Always computed on demand from the current transforms; a volume taken
/// before a translate/scale no longer describes the object afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingVolume {
    /// The volume containing nothing. Any point extends it.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Volume spanning two corners (order-independent).
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest volume containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, Self::extended)
    }

    /// `true` when the volume encloses no geometry at all.
    ///
    /// Non-finite corners or an inverted axis (beyond [`BOUNDS_EPSILON`])
    /// both count as empty. A single point is *not* empty, only degenerate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if !self.min.is_finite() || !self.max.is_finite() {
            return true;
        }
        (self.max - self.min).cmplt(Vec3::splat(-BOUNDS_EPSILON)).any()
    }

    /// `true` when the volume is empty or has no extent on any axis.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.is_empty() || self.max_dimension() <= BOUNDS_EPSILON
    }

    /// Grow to include `point`.
    #[must_use]
    pub fn extended(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Smallest volume containing both volumes. Empty operands are ignored.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => other,
            (_, true) => self,
            _ => Self {
                min: self.min.min(other.min),
                max: self.max.max(other.max),
            },
        }
    }

    /// Edge lengths. Zero for an empty volume.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Midpoint. Origin for an empty volume.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Largest edge length.
    #[must_use]
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    /// Bounds of this box after an affine transform (all eight corners).
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        let (lo, hi) = (self.min, self.max);
        Self::from_points((0..8).map(|i| {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            matrix.transform_point3(corner)
        }))
    }
}
