//! Result of the distance query between two links.

use std::cmp::Ordering;
use crate::kinematic_traits::Pose;

/// Minimum distance between the collision shapes of two links, together with the closest
/// points. The closest points are given as frames in the coordinates of the owning link
/// (link_T_closestPoint), so they can be mapped back to the world with the link pose.
///
/// The link with the lexicographically smaller name is always first, and the transforms
/// follow the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPairDistance {
    link_names: (String, String),
    link_t_closest_point: (Pose, Pose),
    distance: f64,
}

impl LinkPairDistance {
    /// Construct the result, swapping links (and their closest point transforms) if
    /// needed so that the smaller link name comes first. Distance is negative for
    /// intersecting shapes (penetration depth). Negative zero is stored as zero.
    pub fn new(
        link1: &str,
        link2: &str,
        link1_t_closest_point1: Pose,
        link2_t_closest_point2: Pose,
        distance: f64,
    ) -> Self {
        // -0.0 + 0.0 is 0.0
        let distance = distance + 0.0;
        if link1 <= link2 {
            LinkPairDistance {
                link_names: (link1.to_string(), link2.to_string()),
                link_t_closest_point: (link1_t_closest_point1, link2_t_closest_point2),
                distance,
            }
        } else {
            LinkPairDistance {
                link_names: (link2.to_string(), link1.to_string()),
                link_t_closest_point: (link2_t_closest_point2, link1_t_closest_point1),
                distance,
            }
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn link_names(&self) -> (&str, &str) {
        (&self.link_names.0, &self.link_names.1)
    }

    /// Closest points, each in the frame of its link, in the same order as link names.
    pub fn transforms(&self) -> &(Pose, Pose) {
        &self.link_t_closest_point
    }

    /// Closest points mapped to the world, given the current link poses in the order of
    /// `link_names`.
    pub fn world_points(&self, world_t_first: &Pose, world_t_second: &Pose) -> (Pose, Pose) {
        (
            world_t_first * self.link_t_closest_point.0,
            world_t_second * self.link_t_closest_point.1,
        )
    }
}

impl Eq for LinkPairDistance {}

impl PartialOrd for LinkPairDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Closer pairs first. Equal distances are ordered by the first link name, then by the
/// second one.
impl Ord for LinkPairDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
            .then_with(|| self.link_names.0.cmp(&other.link_names.0))
            .then_with(|| self.link_names.1.cmp(&other.link_names.1))
    }
}
