//! Mesh resources for collision shapes

use nalgebra::{Point3, Vector3};
use crate::distance_error::DistanceError;

/// Vertices and triangles of the mesh, in the geometry frame, already scaled.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Point3<f32>>,
    pub triangles: Vec<[u32; 3]>,
}

/// Loads mesh resources referenced from the robot description.
pub trait MeshLoader {
    /// Load the referenced mesh and apply the scale factor (separate for every axis)
    /// to all vertices.
    fn load(&self, resource: &str, scale: &Vector3<f64>) -> Result<MeshData, DistanceError>;
}

/// Loader for robots that only use primitive shapes. Every mesh request fails, so
/// links with meshes are skipped.
pub struct NoMeshLoader;

impl MeshLoader for NoMeshLoader {
    fn load(&self, resource: &str, _scale: &Vector3<f64>) -> Result<MeshData, DistanceError> {
        Err(DistanceError::MeshLoadError {
            resource: resource.to_string(),
            reason: "mesh loading is not configured".to_string(),
        })
    }
}

/// Bake scale into vertex coordinates.
pub fn scale_vertices(vertices: &mut [Point3<f32>], scale: &Vector3<f64>) {
    let scale = scale.cast::<f32>();
    for v in vertices.iter_mut() {
        v.x *= scale.x;
        v.y *= scale.y;
        v.z *= scale.z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_per_axis() {
        let mut vertices = vec![Point3::new(1.0, 1.0, 1.0), Point3::new(-2.0, 0.5, 0.0)];
        scale_vertices(&mut vertices, &Vector3::new(2.0, 3.0, 0.5));
        assert_eq!(vertices[0], Point3::new(2.0, 3.0, 0.5));
        assert_eq!(vertices[1], Point3::new(-4.0, 1.5, 0.0));
    }

    #[test]
    fn test_no_mesh_loader_refuses() {
        let result = NoMeshLoader.load("package://robot/hand.stl", &Vector3::new(1.0, 1.0, 1.0));
        match result {
            Err(DistanceError::MeshLoadError { resource, .. }) => {
                assert_eq!(resource, "package://robot/hand.stl")
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
