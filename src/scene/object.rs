//! Scene-object tree with local transforms and raw vertex positions.

use glam::{Mat4, Quat, Vec3};

use super::bounds::BoundingVolume;

/// Local translation/rotation/scale of a [`SceneObject`], composed as
/// `T * R * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform with only a translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

/// Renderable geometry: positions in the owning object's local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
}

impl Mesh {
    /// Wrap a list of positions.
    #[must_use]
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }
}

/// A node in the scene graph. Loaded models arrive as a tree of these, and
/// the scene keeps all models under one group object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneObject {
    /// Display / lookup name.
    pub name: String,
    /// Local transform, exclusively owned by this object.
    pub transform: Transform,
    /// Optional geometry attached to this node.
    pub mesh: Option<Mesh>,
    /// Child nodes, transformed by this node.
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    /// An empty group with no geometry.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A leaf node carrying `mesh`.
    #[must_use]
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            ..Self::default()
        }
    }

    /// Append a child node.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// World-space bounds of this object and all descendants, with this
    /// object's own transform applied as if it sat at the scene root.
    #[must_use]
    pub fn world_bounds(&self) -> BoundingVolume {
        self.bounds_under(Mat4::IDENTITY)
    }

    /// Bounds with `parent` applied on top of this object's transform.
    #[must_use]
    pub fn bounds_under(&self, parent: Mat4) -> BoundingVolume {
        let world = parent * self.transform.matrix();
        let own = self.mesh.as_ref().map_or(BoundingVolume::EMPTY, |mesh| {
            BoundingVolume::from_points(
                mesh.positions.iter().map(|p| world.transform_point3(*p)),
            )
        });
        self.children
            .iter()
            .fold(own, |acc, child| acc.union(child.bounds_under(world)))
    }

    /// Total number of vertices in the subtree.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.as_ref().map_or(0, |m| m.positions.len())
            + self.children.iter().map(Self::vertex_count).sum::<usize>()
    }

    /// Find a direct child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }
}
