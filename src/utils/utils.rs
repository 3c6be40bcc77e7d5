//! Helper functions

use crate::link_pair_distance::LinkPairDistance;
use tracing::info;

/// Convert joint values in degrees (as the hardware reports them) to radians
pub fn degrees_to_radians(angles: &[f64]) -> Vec<f64> {
    angles.iter().map(|a| a.to_radians()).collect()
}

/// Convert joint values in radians to degrees (as the hardware expects them)
pub fn radians_to_degrees(angles: &[f64]) -> Vec<f64> {
    angles.iter().map(|a| a.to_degrees()).collect()
}

/// Log the link pair distances, closest first, with the witness points in link frames.
pub fn dump_distances(distances: &[LinkPairDistance]) {
    if distances.is_empty() {
        info!("No link pairs within the detection threshold");
    }
    for d in distances {
        let (first, second) = d.link_names();
        let (first_t, second_t) = d.transforms();
        let pa = first_t.translation.vector;
        let pb = second_t.translation.vector;
        info!(
            "{:>20} - {:<20} {:8.4} m  [{:.3}, {:.3}, {:.3}] [{:.3}, {:.3}, {:.3}]",
            first, second, d.distance(), pa.x, pa.y, pa.z, pb.x, pb.y, pb.z
        );
    }
}
