//! Loading collision meshes from STL, PLY and other files through rs_read_trimesh.

use std::collections::HashMap;
use std::path::PathBuf;
use nalgebra::Vector3;
use rs_read_trimesh::load_trimesh;
use crate::distance_error::DistanceError;
use crate::mesh_loader::{scale_vertices, MeshData, MeshLoader};

const FILE_PREFIX: &str = "file://";
const PACKAGE_PREFIX: &str = "package://";

/// Mesh loader reading files from the local filesystem. Resources can be plain paths,
/// `file://` URLs or `package://name/relative/path` references. The latter are resolved
/// against the package roots given at construction.
#[derive(Debug, Clone, Default)]
pub struct FileMeshLoader {
    package_roots: HashMap<String, PathBuf>,
}

impl FileMeshLoader {
    pub fn new(package_roots: HashMap<String, PathBuf>) -> Self {
        FileMeshLoader { package_roots }
    }

    /// Turn resource reference into the file path.
    pub fn resolve(&self, resource: &str) -> Result<PathBuf, DistanceError> {
        if let Some(path) = resource.strip_prefix(FILE_PREFIX) {
            return Ok(PathBuf::from(path));
        }
        if let Some(reference) = resource.strip_prefix(PACKAGE_PREFIX) {
            let (package, relative) = reference.split_once('/')
                .ok_or_else(|| DistanceError::MeshLoadError {
                    resource: resource.to_string(),
                    reason: "package reference without a path".to_string(),
                })?;
            let root = self.package_roots.get(package)
                .ok_or_else(|| DistanceError::MeshLoadError {
                    resource: resource.to_string(),
                    reason: format!("unknown package '{}'", package),
                })?;
            return Ok(root.join(relative));
        }
        Ok(PathBuf::from(resource))
    }
}

impl MeshLoader for FileMeshLoader {
    fn load(&self, resource: &str, scale: &Vector3<f64>) -> Result<MeshData, DistanceError> {
        let path = self.resolve(resource)?;
        let path_str = path.to_str().ok_or_else(|| DistanceError::MeshLoadError {
            resource: resource.to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })?;

        // Scale is not uniform in general so it is baked afterwards.
        let mesh = load_trimesh(path_str, 1.0)
            .map_err(|e| DistanceError::MeshLoadError {
                resource: resource.to_string(),
                reason: format!("{}", e),
            })?;

        let mut vertices = mesh.vertices().to_vec();
        scale_vertices(&mut vertices, scale);

        Ok(MeshData {
            vertices,
            triangles: mesh.indices().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> FileMeshLoader {
        let mut roots = HashMap::new();
        roots.insert("bigman".to_string(), PathBuf::from("/opt/robots/bigman"));
        FileMeshLoader::new(roots)
    }

    #[test]
    fn test_resolve_package() {
        let path = loader().resolve("package://bigman/meshes/hand.stl").expect("resolvable");
        assert_eq!(path, PathBuf::from("/opt/robots/bigman/meshes/hand.stl"));
    }

    #[test]
    fn test_resolve_file_and_plain() {
        let loader = loader();
        assert_eq!(loader.resolve("file:///tmp/a.stl").unwrap(), PathBuf::from("/tmp/a.stl"));
        assert_eq!(loader.resolve("meshes/b.ply").unwrap(), PathBuf::from("meshes/b.ply"));
    }

    #[test]
    fn test_unknown_package() {
        assert!(loader().resolve("package://walkman/meshes/hand.stl").is_err());
        assert!(loader().resolve("package://bigman").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = loader().load("/definitely/not/here.stl", &Vector3::new(1.0, 1.0, 1.0));
        assert!(matches!(result, Err(DistanceError::MeshLoadError { .. })));
    }
}
