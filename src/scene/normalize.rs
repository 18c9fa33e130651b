//! Rescale, recenter and floor a loaded object to canonical bounds.

use glam::Vec3;

use super::bounds::BOUNDS_EPSILON;
use super::object::SceneObject;

/// Outcome of [`normalize_object`], for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Uniform factor that was multiplied into the object's scale.
    pub scale: f32,
    /// Translation that was added to the object's position.
    pub shift: Vec3,
}

/// Scale `object` uniformly so its largest bounding dimension equals
/// `target_size`, center it on X/Z at the origin and, with `floor`, lift or
/// drop it so its lowest point sits at Y = 0.
///
/// Scaling happens first; the bounds are then recomputed so centering and
/// flooring use the post-scale geometry. Returns `None` (and leaves the
/// object untouched) when it has no geometry. Point-like geometry keeps a
/// scale factor of 1.
pub fn normalize_object(
    object: &mut SceneObject,
    target_size: f32,
    floor: bool,
) -> Option<Normalization> {
    let bounds = object.world_bounds();
    if bounds.is_empty() {
        return None;
    }

    let max_dim = bounds.max_dimension();
    let scale = if max_dim > BOUNDS_EPSILON {
        target_size / max_dim
    } else {
        1.0
    };
    object.transform.scale *= scale;

    let scaled = object.world_bounds();
    let center = scaled.center();
    let mut shift = Vec3::new(-center.x, 0.0, -center.z);
    if floor {
        shift.y = -scaled.min.y;
    }
    object.transform.translation += shift;

    Some(Normalization { scale, shift })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::object::Mesh;

    fn boxed(min: Vec3, max: Vec3) -> SceneObject {
        SceneObject::with_mesh("box", Mesh::new(vec![min, max]))
    }

    #[test]
    fn largest_dimension_matches_target() {
        for (size, target) in [(4.0, 1.0), (0.25, 2.0), (10.0, 10.0)] {
            let mut obj = boxed(Vec3::ZERO, Vec3::new(size, size * 0.5, 1e-3));
            let _ = normalize_object(&mut obj, target, false);
            let dim = obj.world_bounds().max_dimension();
            assert!(
                (dim - target).abs() < 1e-4,
                "size {size}: expected {target}, got {dim}"
            );
        }
    }

    #[test]
    fn empty_object_is_untouched() {
        let mut obj = SceneObject::group("empty");
        obj.transform.translation = Vec3::new(1.0, 2.0, 3.0);
        let before = obj.transform;
        assert!(normalize_object(&mut obj, 1.0, true).is_none());
        assert_eq!(obj.transform, before);
    }

    #[test]
    fn floor_puts_lowest_point_at_zero() {
        for y in [-7.0, 0.0, 12.5] {
            let mut obj =
                boxed(Vec3::new(3.0, y, -2.0), Vec3::new(5.0, y + 8.0, 0.0));
            let _ = normalize_object(&mut obj, 2.0, true);
            let b = obj.world_bounds();
            assert!(b.min.y.abs() < 1e-5, "min y {} for start {y}", b.min.y);
        }
    }

    #[test]
    fn centers_on_horizontal_plane() {
        let mut obj = boxed(Vec3::new(10.0, 5.0, 10.0), Vec3::new(12.0, 6.0, 14.0));
        let _ = normalize_object(&mut obj, 1.0, false);
        let c = obj.world_bounds().center();
        assert!(c.x.abs() < 1e-5);
        assert!(c.z.abs() < 1e-5);
        // without floor the vertical position is only affected by scaling
        assert!(c.y > 0.0);
    }

    #[test]
    fn point_geometry_keeps_unit_scale() {
        let mut obj = boxed(Vec3::new(2.0, 3.0, 4.0), Vec3::new(2.0, 3.0, 4.0));
        let result = normalize_object(&mut obj, 5.0, true).unwrap();
        assert_eq!(result.scale, 1.0);
        assert_eq!(obj.transform.scale, Vec3::ONE);
        let b = obj.world_bounds();
        assert!(b.min.y.abs() < 1e-6);
        assert!(b.center().x.abs() < 1e-6);
    }
}
