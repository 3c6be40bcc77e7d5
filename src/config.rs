//! Configuration of the distance queries

use std::collections::HashMap;
use std::path::PathBuf;
use crate::kinematic_traits::LinksPair;

/// How the pairs to check are selected.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PairFilter {
    /// Only these pairs are checked
    Whitelist(Vec<LinksPair>),
    /// All pairs with shapes are checked except these
    Blacklist(Vec<LinksPair>),
    /// All pairs with shapes are checked
    #[default]
    All,
}

/// Settings for `LinkDistances`. Defaults check all pairs, do not filter by distance and
/// evaluate sequentially.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceQueryConfig {
    /// Only pairs closer than this are reported
    pub detection_threshold: f64,
    pub filter: PairFilter,
    /// Evaluate pairs with rayon
    pub parallel: bool,
    /// Roots for resolving package:// mesh references
    pub package_roots: HashMap<String, PathBuf>,
}

impl Default for DistanceQueryConfig {
    fn default() -> Self {
        DistanceQueryConfig {
            detection_threshold: f64::INFINITY,
            filter: PairFilter::All,
            parallel: false,
            package_roots: HashMap::new(),
        }
    }
}
