//! Collision geometry descriptors of robot links

use nalgebra::Vector3;
use crate::kinematic_traits::Pose;

/// Collision geometry as declared by the robot description. Dimensions are in meters.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkGeometry {
    Sphere {
        radius: f64,
    },
    /// Box with full edge lengths along x, y and z.
    Box {
        size: Vector3<f64>,
    },
    /// Cylinder along the local z axis. For distance queries it is represented as capsule
    /// with the same radius and length.
    Cylinder {
        radius: f64,
        length: f64,
    },
    /// Mesh stored in the external resource, with scale factor for every axis.
    Mesh {
        resource: String,
        scale: Vector3<f64>,
    },
    /// Anything else the description may contain. Such links are skipped.
    Unsupported(String),
}

impl LinkGeometry {
    /// Short name used in log messages
    pub fn kind(&self) -> &str {
        match self {
            LinkGeometry::Sphere { .. } => "sphere",
            LinkGeometry::Box { .. } => "box",
            LinkGeometry::Cylinder { .. } => "capsule",
            LinkGeometry::Mesh { .. } => "mesh",
            LinkGeometry::Unsupported(kind) => kind,
        }
    }
}

/// Collision element of the link: geometry and the fixed transform from the link frame
/// into the geometry frame (link_T_shape).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCollision {
    pub geometry: LinkGeometry,
    pub origin: Pose,
}

/// Static description of one link
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDescription {
    pub name: String,
    pub collision: Option<LinkCollision>,
}

impl LinkDescription {
    /// Link without collision geometry. It is known to the model but never checked.
    pub fn without_collision(name: &str) -> Self {
        LinkDescription {
            name: name.to_string(),
            collision: None,
        }
    }

    /// Link with collision geometry placed at the given offset.
    pub fn with_collision(name: &str, geometry: LinkGeometry, origin: Pose) -> Self {
        LinkDescription {
            name: name.to_string(),
            collision: Some(LinkCollision { geometry, origin }),
        }
    }
}
