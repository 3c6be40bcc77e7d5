use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::Vector3;
use tracing::info;

use rs_link_distances::collisions::LinkDistances;
use rs_link_distances::config::DistanceQueryConfig;
use rs_link_distances::kinematic_traits::Pose;
use rs_link_distances::link_geometry::{LinkDescription, LinkGeometry};
use rs_link_distances::read_trimesh::FileMeshLoader;
use rs_link_distances::static_model::StaticKinematicModel;
use rs_link_distances::utils::dump_distances;

/// Computes link distances of a small two-arm robot sweeping its right hand towards the left.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the `distance_query` section
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only report pairs closer than this (meters), overrides the configuration
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of closest pairs to report
    #[arg(long, default_value_t = 5)]
    closest: usize,

    /// Number of simulated control cycles
    #[arg(long, default_value_t = 5)]
    cycles: usize,
}

fn robot() -> StaticKinematicModel {
    let capsule = |length: f64| LinkGeometry::Cylinder { radius: 0.05, length };
    let half_down = Pose::translation(0.0, 0.0, -0.15);
    StaticKinematicModel::new(vec![
        LinkDescription::without_collision("Waist"),
        LinkDescription::with_collision(
            "DWYTorso", LinkGeometry::Box { size: Vector3::new(0.3, 0.4, 0.5) },
            Pose::translation(0.0, 0.0, 0.25)),
        LinkDescription::with_collision("LElb", capsule(0.3), half_down),
        LinkDescription::with_collision("RElb", capsule(0.3), half_down),
        LinkDescription::with_collision("LSoftHandLink", LinkGeometry::Sphere { radius: 0.1 }, Pose::identity()),
        LinkDescription::with_collision("RSoftHandLink", LinkGeometry::Sphere { radius: 0.1 }, Pose::identity()),
    ])
    .with_disabled_pairs(vec![
        ("DWYTorso".into(), "LElb".into()),
        ("DWYTorso".into(), "RElb".into()),
    ])
}

/// Poses of a very simple forward kinematics: the right hand moves towards the left one
/// as `phase` goes from 0 to 1.
fn place_links(model: &mut StaticKinematicModel, phase: f64) {
    model.set_link_pose("DWYTorso", Pose::identity());
    model.set_link_pose("LElb", Pose::translation(0.0, 0.3, 0.4));
    model.set_link_pose("RElb", Pose::translation(0.0, -0.3, 0.4));
    model.set_link_pose("LSoftHandLink", Pose::translation(0.3, 0.25, 0.2));
    model.set_link_pose("RSoftHandLink", Pose::translation(0.3, -0.25 + 0.45 * phase, 0.2));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DistanceQueryConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?,
        None => DistanceQueryConfig::default(),
    };
    let threshold = args.threshold.unwrap_or(config.detection_threshold);

    let mut model = robot();
    let mesh_loader = FileMeshLoader::new(config.package_roots.clone());
    let mut distances = LinkDistances::with_config(&model, &mesh_loader, &config);
    info!("Checking {} link pairs", distances.checked_pairs().len());

    for cycle in 0..args.cycles {
        let phase = cycle as f64 / (args.cycles.max(2) - 1) as f64;
        place_links(&mut model, phase);
        let results = distances
            .closest_link_distances(&model, threshold, args.closest)
            .context("Distance query failed")?;
        info!("Cycle {}", cycle);
        dump_distances(&results);
    }
    Ok(())
}
