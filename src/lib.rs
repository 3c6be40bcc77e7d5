//! Minimum distances between the links of a robot, for self-collision avoidance in
//! whole-body control loops.
//!
//! Every link of the robot may carry collision geometry (sphere, box, cylinder or mesh).
//! The shapes are built once from the kinematic model. On each control cycle the host
//! updates the model with the current joint configuration and asks for the distances of
//! all link pairs that must be checked. Results are sorted, closest first, and carry the
//! closest points as frames in the coordinates of the owning link, ready for building
//! avoidance constraints.
//!
//! # Features
//!
//! - Spheres, boxes, cylinders (as capsules) and triangle meshes with per-axis scale.
//! - Allowed collision matrix built from a whitelist or a blacklist of pairs. Pairs the
//!   robot description disables (SRDF `disable_collisions`) are never checked.
//! - Penetration depth is reported as negative distance for intersecting primitive shapes.
//!   Overlapping meshes report a distance close to zero.
//! - Optional parallel evaluation of pairs with rayon.
//! - Configuration from YAML, mesh loading from STL/PLY/OBJ files (feature `allow_filesystem`).
//! - Control session for a joint chain that hides control mode and unit handling of the
//!   hardware driver.
//!
//! Geometry queries are done with [parry3d](https://parry.rs), so the distance part requires
//! the `collisions` feature (enabled by default).
//!
//! ## Example
//!
//! ```
//! use rs_link_distances::collisions::LinkDistances;
//! use rs_link_distances::kinematic_traits::Pose;
//! use rs_link_distances::link_geometry::{LinkDescription, LinkGeometry};
//! use rs_link_distances::mesh_loader::NoMeshLoader;
//! use rs_link_distances::static_model::StaticKinematicModel;
//!
//! let mut model = StaticKinematicModel::new(vec![
//!     LinkDescription::with_collision("LSoftHand", LinkGeometry::Sphere { radius: 0.1 }, Pose::identity()),
//!     LinkDescription::with_collision("RSoftHand", LinkGeometry::Sphere { radius: 0.1 }, Pose::identity()),
//! ]);
//! model.set_link_pose("RSoftHand", Pose::translation(0.5, 0.0, 0.0));
//!
//! let mut distances = LinkDistances::new(&model, &NoMeshLoader);
//! let results = distances.link_distances(&model, f64::INFINITY).unwrap();
//! assert!((results[0].distance() - 0.3).abs() < 1e-5);
//! ```

pub mod kinematic_traits;

pub mod link_geometry;

pub mod distance_error;

pub mod mesh_loader;

pub mod static_model;

pub mod config;

pub mod link_pair_distance;

pub mod chain_traits;

pub mod chain_session;

#[path = "utils/utils.rs"]
pub mod utils;

#[cfg(feature = "collisions")]
pub mod shape_registry;

#[cfg(feature = "collisions")]
pub mod allowed_collisions;

#[cfg(feature = "collisions")]
pub mod collisions;

#[cfg(feature = "allow_filesystem")]
pub mod config_from_file;

#[cfg(feature = "allow_filesystem")]
#[path = "utils/read_trimesh.rs"]
pub mod read_trimesh;

#[cfg(feature = "allow_filesystem")]
#[path = "utils/model_files.rs"]
pub mod model_files;

#[cfg(test)]
mod tests;
