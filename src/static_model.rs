//! Kinematic model with link poses set directly by the host.

use std::collections::HashMap;
use crate::kinematic_traits::{KinematicModel, LinksPair, Pose};
use crate::link_geometry::LinkDescription;

/// In-memory kinematic model. The host computes link poses by its own means (dynamics
/// engine, forward kinematics, recorded data) and pushes them with `set_link_pose`
/// before each distance query. Links whose pose was never set are at the origin.
#[derive(Debug, Clone, Default)]
pub struct StaticKinematicModel {
    links: Vec<LinkDescription>,
    poses: HashMap<String, Pose>,
    disabled_pairs: Vec<LinksPair>,
}

impl StaticKinematicModel {
    pub fn new(links: Vec<LinkDescription>) -> Self {
        let poses = links.iter()
            .map(|link| (link.name.clone(), Pose::identity()))
            .collect();
        StaticKinematicModel {
            links,
            poses,
            disabled_pairs: Vec::new(),
        }
    }

    /// Pairs that are always allowed to collide (never checked), like SRDF
    /// `disable_collisions` entries.
    pub fn with_disabled_pairs(mut self, pairs: Vec<LinksPair>) -> Self {
        self.disabled_pairs = pairs;
        self
    }

    /// Set world pose of the link. Returns false if the model has no such link.
    pub fn set_link_pose(&mut self, link: &str, pose: Pose) -> bool {
        match self.poses.get_mut(link) {
            Some(slot) => {
                *slot = pose;
                true
            }
            None => false,
        }
    }
}

impl KinematicModel for StaticKinematicModel {
    fn links(&self) -> &[LinkDescription] {
        &self.links
    }

    fn link_pose(&self, link: &str) -> Option<Pose> {
        self.poses.get(link).copied()
    }

    fn disabled_collision_pairs(&self) -> Vec<LinksPair> {
        self.disabled_pairs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_link_pose_is_rejected() {
        let mut model = StaticKinematicModel::new(vec![LinkDescription::without_collision("torso")]);
        assert!(model.set_link_pose("torso", Pose::translation(0.0, 0.0, 1.0)));
        assert!(!model.set_link_pose("head", Pose::identity()));
        assert_eq!(model.link_pose("torso"), Some(Pose::translation(0.0, 0.0, 1.0)));
        assert_eq!(model.link_pose("head"), None);
        assert_eq!(model.link_names(), vec!["torso".to_string()]);
    }
}
