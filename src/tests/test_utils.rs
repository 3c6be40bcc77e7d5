//! Robot models and mocks shared by the tests.

use nalgebra::{Point3, Vector3};
use crate::distance_error::DistanceError;
use crate::kinematic_traits::{LinksPair, Pose};
use crate::link_geometry::{LinkDescription, LinkGeometry};
use crate::mesh_loader::{scale_vertices, MeshData, MeshLoader};
use crate::static_model::StaticKinematicModel;

pub const HAND_RADIUS: f64 = 0.1;

pub fn pair(a: &str, b: &str) -> LinksPair {
    (a.to_string(), b.to_string())
}

pub fn sphere(name: &str, radius: f64) -> LinkDescription {
    LinkDescription::with_collision(name, LinkGeometry::Sphere { radius }, Pose::identity())
}

/// Two hands with spheres of 0.1 m, 0.5 m apart along x: 0.3 m between the surfaces.
pub fn two_hands() -> StaticKinematicModel {
    let mut model = StaticKinematicModel::new(vec![
        sphere("LSoftHandLink", HAND_RADIUS),
        sphere("RSoftHandLink", HAND_RADIUS),
    ]);
    model.set_link_pose("RSoftHandLink", Pose::translation(0.5, 0.0, 0.0));
    model
}

/// Humanoid-like upper body. Spheres are spread along x, 1 m apart, so that all
/// distances differ. Waist has no collision geometry.
pub fn upper_body() -> StaticKinematicModel {
    let mut model = StaticKinematicModel::new(vec![
        LinkDescription::without_collision("Waist"),
        sphere("DWYTorso", 0.2),
        sphere("LSoftHandLink", HAND_RADIUS),
        sphere("RSoftHandLink", HAND_RADIUS),
        sphere("LElb", 0.05),
        sphere("RElb", 0.05),
    ])
    .with_disabled_pairs(vec![pair("DWYTorso", "LElb")]);

    model.set_link_pose("DWYTorso", Pose::translation(0.0, 0.0, 0.0));
    model.set_link_pose("LElb", Pose::translation(1.0, 0.0, 0.0));
    model.set_link_pose("RElb", Pose::translation(2.5, 0.0, 0.0));
    model.set_link_pose("LSoftHandLink", Pose::translation(4.5, 0.0, 0.0));
    model.set_link_pose("RSoftHandLink", Pose::translation(7.0, 0.0, 0.0));
    model
}

/// Unit cube mesh ([-0.5, 0.5] on every axis) for any resource, scaled as requested.
pub struct CubeMeshLoader;

impl MeshLoader for CubeMeshLoader {
    fn load(&self, _resource: &str, scale: &Vector3<f64>) -> Result<MeshData, DistanceError> {
        let mut vertices = Vec::with_capacity(8);
        for x in [-0.5f32, 0.5] {
            for y in [-0.5f32, 0.5] {
                for z in [-0.5f32, 0.5] {
                    vertices.push(Point3::new(x, y, z));
                }
            }
        }
        scale_vertices(&mut vertices, scale);
        // Vertex index is 4*x + 2*y + z with coordinates as 0/1
        let triangles = vec![
            [0, 1, 3], [0, 3, 2], // x = -0.5
            [4, 6, 7], [4, 7, 5], // x = 0.5
            [0, 4, 5], [0, 5, 1], // y = -0.5
            [2, 3, 7], [2, 7, 6], // y = 0.5
            [0, 2, 6], [0, 6, 4], // z = -0.5
            [1, 5, 7], [1, 7, 3], // z = 0.5
        ];
        Ok(MeshData { vertices, triangles })
    }
}
