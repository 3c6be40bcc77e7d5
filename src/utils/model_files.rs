//! Selection of the robot description used for collision geometry

use std::path::{Path, PathBuf};
use tracing::info;

/// Robots often ship a second description where link collision geometry is replaced by
/// capsules, named `<stem>_capsules.urdf` and placed next to the original. Capsules are
/// much cheaper for distance queries than meshes, so this description is preferred if it
/// exists. Otherwise the original path is returned.
pub fn collision_model_path<P: AsRef<Path>>(urdf: P) -> PathBuf {
    let urdf = urdf.as_ref();
    if let Some(stem) = urdf.file_stem().and_then(|s| s.to_str()) {
        let capsules = urdf.with_file_name(format!("{}_capsules.urdf", stem));
        if capsules.exists() {
            info!("Using capsule model {}", capsules.display());
            return capsules;
        }
    }
    urdf.to_path_buf()
}
