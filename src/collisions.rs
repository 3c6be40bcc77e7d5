//! Implements minimum distance queries between robot links

use nalgebra::{Isometry3, Point3};
use parry3d::query::{self, ClosestPoints};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::debug;
use crate::allowed_collisions::AllowedCollisionMatrix;
use crate::config::{DistanceQueryConfig, PairFilter};
use crate::distance_error::DistanceError;
use crate::kinematic_traits::{KinematicModel, LinksPair, Pose};
use crate::link_pair_distance::LinkPairDistance;
use crate::mesh_loader::MeshLoader;
use crate::shape_registry::{LinkId, LinkShape, ShapeRegistry};

/// Computes distances between collision shapes of robot links.
///
/// The shapes are built once from the kinematic model. Every query then moves the shapes
/// to the current link poses and evaluates all pairs the allowed collision matrix marks
/// as "must check". The instance is not meant to be shared between threads while querying,
/// as queries update shape poses in place (hence `&mut self`).
pub struct LinkDistances {
    registry: ShapeRegistry,

    /// All link names the allowed collision matrix is built over
    link_names: Vec<String>,

    /// Pairs the model declares as never needing a check (from SRDF)
    disabled_pairs: Vec<LinksPair>,

    matrix: AllowedCollisionMatrix,

    /// Must-check pairs of the matrix, resolved to registry ids
    pairs: Vec<(LinkId, LinkId)>,

    /// Evaluate pairs in parallel with rayon
    parallel: bool,
}

impl LinkDistances {
    /// Build collision shapes for all links of the model that have supported collision
    /// geometry. Initially all pairs of these links are checked, except the pairs
    /// the model reports as disabled.
    pub fn new(model: &dyn KinematicModel, mesh_loader: &dyn MeshLoader) -> Self {
        let registry = ShapeRegistry::build(model, mesh_loader);

        let mut link_names = model.link_names();
        for name in registry.names() {
            if !link_names.iter().any(|n| n == name) {
                link_names.push(name.to_string());
            }
        }
        let disabled_pairs = model.disabled_collision_pairs();

        let matrix = AllowedCollisionMatrix::from_blacklist(
            link_names.iter().cloned(), |name| registry.contains(name), &[], &disabled_pairs);

        let mut distances = LinkDistances {
            registry,
            link_names,
            disabled_pairs,
            matrix,
            pairs: Vec::new(),
            parallel: false,
        };
        distances.resolve_pairs();
        distances
    }

    /// Build with the given configuration applied.
    pub fn with_config(
        model: &dyn KinematicModel,
        mesh_loader: &dyn MeshLoader,
        config: &DistanceQueryConfig,
    ) -> Self {
        let mut distances = Self::new(model, mesh_loader);
        distances.apply_config(config);
        distances
    }

    /// Check only the given pairs. Pairs where any link has no collision shape are ignored.
    /// Replaces any previous white or black list.
    pub fn set_collision_whitelist(&mut self, whitelist: &[LinksPair]) {
        let registry = &self.registry;
        self.matrix = AllowedCollisionMatrix::from_whitelist(
            self.link_names.iter().cloned(), |name| registry.contains(name),
            whitelist, &self.disabled_pairs);
        self.resolve_pairs();
    }

    /// Check all pairs of links with collision shapes, except the given pairs.
    /// Replaces any previous white or black list.
    pub fn set_collision_blacklist(&mut self, blacklist: &[LinksPair]) {
        let registry = &self.registry;
        self.matrix = AllowedCollisionMatrix::from_blacklist(
            self.link_names.iter().cloned(), |name| registry.contains(name),
            blacklist, &self.disabled_pairs);
        self.resolve_pairs();
    }

    /// Apply pair filter and evaluation mode from the configuration. The detection
    /// threshold is passed to the query by the caller.
    pub fn apply_config(&mut self, config: &DistanceQueryConfig) {
        match &config.filter {
            PairFilter::Whitelist(pairs) => self.set_collision_whitelist(pairs),
            PairFilter::Blacklist(pairs) => self.set_collision_blacklist(pairs),
            PairFilter::All => self.set_collision_blacklist(&[]),
        }
        self.parallel = config.parallel;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    fn resolve_pairs(&mut self) {
        let registry = &self.registry;
        self.pairs = self.matrix.must_check_pairs()
            .into_iter()
            .filter_map(|(a, b)| Some((registry.id(a)?, registry.id(b)?)))
            .collect();
        debug!("{} link pairs to check", self.pairs.len());
    }

    pub fn allowed_collisions(&self) -> &AllowedCollisionMatrix {
        &self.matrix
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Pairs checked by the next query, smaller link name first.
    pub fn checked_pairs(&self) -> Vec<(&str, &str)> {
        self.pairs.iter()
            .map(|&(a, b)| (self.registry.get(a).name.as_str(), self.registry.get(b).name.as_str()))
            .collect()
    }
}

// Queries
impl LinkDistances {
    /// Distances of all checked pairs closer than `detection_threshold`, closest first.
    /// Use `f64::INFINITY` to get all checked pairs.
    ///
    /// The model must already be updated with the current joint configuration; shape
    /// poses are taken from it at the start of the query.
    pub fn link_distances(
        &mut self,
        model: &dyn KinematicModel,
        detection_threshold: f64,
    ) -> Result<Vec<LinkPairDistance>, DistanceError> {
        self.registry.update_poses(model);

        let evaluated: Result<Vec<LinkPairDistance>, DistanceError> = if self.parallel {
            self.pairs.par_iter()
                .map(|&(a, b)| self.pair_distance(a, b))
                .collect()
        } else {
            self.pairs.iter()
                .map(|&(a, b)| self.pair_distance(a, b))
                .collect()
        };

        let mut results: Vec<LinkPairDistance> = evaluated?
            .into_iter()
            .filter(|result| result.distance() < detection_threshold)
            .collect();
        results.sort();
        debug!("{} of {} pairs closer than {}", results.len(), self.pairs.len(), detection_threshold);
        Ok(results)
    }

    /// Only the `count` closest pairs of `link_distances`.
    pub fn closest_link_distances(
        &mut self,
        model: &dyn KinematicModel,
        detection_threshold: f64,
        count: usize,
    ) -> Result<Vec<LinkPairDistance>, DistanceError> {
        let mut results = self.link_distances(model, detection_threshold)?;
        results.truncate(count);
        Ok(results)
    }

    /// Distance between two registered links at their current shape poses, with closest
    /// points expressed in the link frames.
    fn pair_distance(&self, a: LinkId, b: LinkId) -> Result<LinkPairDistance, DistanceError> {
        let shape_a = self.registry.get(a);
        let shape_b = self.registry.get(b);
        let pose_a = shape_a.world_pose_f32();
        let pose_b = shape_b.world_pose_f32();

        let unsupported = |e: query::Unsupported| DistanceError::NarrowPhaseError {
            first: shape_a.name.clone(),
            second: shape_b.name.clone(),
            reason: format!("{:?}", e),
        };

        let closest = query::closest_points(
            &pose_a, &*shape_a.shape, &pose_b, &*shape_b.shape, f32::MAX)
            .map_err(unsupported)?;

        let (distance, world_pa, world_pb) = match closest {
            ClosestPoints::WithinMargin(pa, pb) => ((pa - pb).norm() as f64, pa, pb),
            ClosestPoints::Intersecting => {
                Self::penetration(shape_a, &pose_a, shape_b, &pose_b).map_err(unsupported)?
            }
            ClosestPoints::Disjoint => {
                return Err(DistanceError::NarrowPhaseError {
                    first: shape_a.name.clone(),
                    second: shape_b.name.clone(),
                    reason: "no closest points reported".to_string(),
                });
            }
        };

        Ok(LinkPairDistance::new(
            &shape_a.name,
            &shape_b.name,
            link_t_point(shape_a, &world_pa),
            link_t_point(shape_b, &world_pb),
            distance,
        ))
    }

    /// Penetration depth (as negative distance) and contact points of intersecting shapes.
    /// The depth is only meaningful for solid shapes (primitives). Triangle meshes are
    /// surfaces, so overlapping meshes report the depth between the crossing triangles,
    /// which is close to zero.
    fn penetration(
        shape_a: &LinkShape,
        pose_a: &Isometry3<f32>,
        shape_b: &LinkShape,
        pose_b: &Isometry3<f32>,
    ) -> Result<(f64, Point3<f32>, Point3<f32>), query::Unsupported> {
        match query::contact(pose_a, &*shape_a.shape, pose_b, &*shape_b.shape, 0.0)? {
            Some(contact) => Ok((contact.dist as f64, contact.point1, contact.point2)),
            None => {
                // Intersecting without a contact: zero distance, midpoint between shape origins.
                let mid = Point3::from(
                    (pose_a.translation.vector + pose_b.translation.vector) / 2.0);
                Ok((0.0, mid, mid))
            }
        }
    }
}

/// Express the world witness point as the frame in link coordinates:
/// link_T_point = link_T_shape * shape_T_world * world_T_point.
fn link_t_point(shape: &LinkShape, world_point: &Point3<f32>) -> Pose {
    let world_t_point = Pose::translation(
        world_point.x as f64, world_point.y as f64, world_point.z as f64);
    shape.link_t_shape * shape.world_t_shape.inverse() * world_t_point
}
