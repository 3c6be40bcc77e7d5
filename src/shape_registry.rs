//! Collision shapes of the robot links and their world poses.

use std::collections::HashMap;
use nalgebra::Isometry3;
use parry3d::shape::{SharedShape, TriMesh};
use tracing::{debug, info, warn};
use crate::distance_error::DistanceError;
use crate::kinematic_traits::{KinematicModel, Pose};
use crate::link_geometry::{LinkCollision, LinkGeometry};
use crate::mesh_loader::MeshLoader;

/// Index of the link inside the registry. Assigned once when the registry is built,
/// so that per-cycle loops do not need to look up link names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);

/// Collision shape of one link.
pub struct LinkShape {
    /// Name of the link this shape belongs to
    pub name: String,
    /// Shape in its own (geometry) frame
    pub shape: SharedShape,
    /// Fixed transform from the link frame into the shape frame
    pub link_t_shape: Pose,
    /// World transform of the shape, as computed by the last pose update
    pub world_t_shape: Pose,
}

impl LinkShape {
    /// World transform in the precision parry3d works with.
    pub fn world_pose_f32(&self) -> Isometry3<f32> {
        self.world_t_shape.cast::<f32>()
    }
}

/// Arena of link collision shapes with name lookup.
#[derive(Default)]
pub struct ShapeRegistry {
    shapes: Vec<LinkShape>,
    ids: HashMap<String, LinkId>,
}

impl ShapeRegistry {
    /// Build collision shapes for all links of the model that declare supported collision
    /// geometry. Links without geometry, with unsupported geometry, or with meshes that
    /// cannot be loaded are skipped and will never take part in distance queries.
    pub fn build(model: &dyn KinematicModel, mesh_loader: &dyn MeshLoader) -> Self {
        let mut registry = ShapeRegistry::default();

        for link in model.links() {
            let Some(collision) = &link.collision else {
                debug!("Collision not defined for link {}", link.name);
                continue;
            };
            if registry.ids.contains_key(&link.name) {
                warn!("Link {} is described twice, only the first description is used", link.name);
                continue;
            }
            match create_shape(&link.name, collision, mesh_loader) {
                Ok(Some(shape)) => {
                    info!("Adding {} for {}", collision.geometry.kind(), link.name);
                    registry.insert(&link.name, shape, collision.origin);
                }
                Ok(None) => {
                    warn!("Collision type {} unknown for link {}", collision.geometry.kind(), link.name);
                }
                Err(err) => {
                    warn!("Skipping link {}: {}", link.name, err);
                }
            }
        }
        registry
    }

    fn insert(&mut self, name: &str, shape: SharedShape, link_t_shape: Pose) -> LinkId {
        let id = LinkId(self.shapes.len());
        self.shapes.push(LinkShape {
            name: name.to_string(),
            shape,
            link_t_shape,
            world_t_shape: link_t_shape,
        });
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Recompute world transforms of all shapes from the current link poses:
    /// world_T_shape = world_T_link * link_T_shape. Must be called after the model
    /// has been updated with the latest joint configuration.
    pub fn update_poses(&mut self, model: &dyn KinematicModel) {
        for link_shape in self.shapes.iter_mut() {
            match model.link_pose(&link_shape.name) {
                Some(world_t_link) => {
                    link_shape.world_t_shape = world_t_link * link_shape.link_t_shape;
                }
                None => {
                    debug!("Model has no pose for {}, keeping the previous one", link_shape.name);
                }
            }
        }
    }

    pub fn id(&self, name: &str) -> Option<LinkId> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Shape by id. Ids are only handed out by this registry so they are always valid.
    pub fn get(&self, id: LinkId) -> &LinkShape {
        &self.shapes[id.0]
    }

    pub fn by_name(&self, name: &str) -> Option<&LinkShape> {
        self.id(name).map(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Names of the links that have collision shapes, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }
}

/// Create parry3d shape for the collision geometry. Returns Ok(None) for geometry types
/// we do not support.
fn create_shape(
    link: &str,
    collision: &LinkCollision,
    mesh_loader: &dyn MeshLoader,
) -> Result<Option<SharedShape>, DistanceError> {
    let shape = match &collision.geometry {
        LinkGeometry::Sphere { radius } => SharedShape::ball(*radius as f32),
        LinkGeometry::Box { size } => {
            let half = size.cast::<f32>() / 2.0;
            SharedShape::cuboid(half.x, half.y, half.z)
        }
        LinkGeometry::Cylinder { radius, length } => {
            SharedShape::capsule_z((*length / 2.0) as f32, *radius as f32)
        }
        LinkGeometry::Mesh { resource, scale } => {
            let mesh = mesh_loader.load(resource, scale)?;
            let trimesh = TriMesh::new(mesh.vertices, mesh.triangles)
                .map_err(|e| DistanceError::MeshBuildError {
                    link: link.to_string(),
                    reason: format!("{:?}", e),
                })?;
            SharedShape::new(trimesh)
        }
        LinkGeometry::Unsupported(_) => return Ok(None),
    };
    Ok(Some(shape))
}
