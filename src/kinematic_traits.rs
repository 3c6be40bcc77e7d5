//! Interfaces of the kinematic model this crate consumes.

use nalgebra::Isometry3;
use crate::link_geometry::LinkDescription;

/// Pose is used for the placement of links and shapes. It contains both Cartesian position
/// and rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Pair of link names, as used by collision white and black lists. The order inside the
/// pair does not matter for filtering.
pub type LinksPair = (String, String);

/// Kinematic model of the robot, as seen by the distance queries. The model owns the joint
/// configuration; it must be updated by the caller before each query cycle, as the distance
/// computation only reads link poses back.
///
/// Parsing of the robot description (URDF, SRDF) and forward kinematics are done by the
/// implementor.
pub trait KinematicModel {
    /// Static description of all links, including the optional collision geometry and
    /// its offset from the link frame.
    fn links(&self) -> &[LinkDescription];

    /// Current world pose of the named link, computed from the latest joint configuration.
    /// Returns None if the model does not know such a link.
    fn link_pose(&self, link: &str) -> Option<Pose>;

    /// Names of all links, including those without collision geometry. Used to seed
    /// the allowed collision matrix.
    fn link_names(&self) -> Vec<String> {
        self.links().iter().map(|link| link.name.clone()).collect()
    }

    /// Pairs that never need to be checked (adjacent links and the like, usually from
    /// SRDF `disable_collisions`). These pairs are always allowed, regardless of white
    /// or black lists.
    fn disabled_collision_pairs(&self) -> Vec<LinksPair> {
        Vec::new()
    }
}
