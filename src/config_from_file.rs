//! Supports reading the distance query configuration from YAML file (optional)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yaml_rust2::{Yaml, YamlLoader};
use crate::config::{DistanceQueryConfig, PairFilter};
use crate::distance_error::DistanceError;
use crate::kinematic_traits::LinksPair;

const SECTION: &str = "distance_query";

impl DistanceQueryConfig {
    /// Read the configuration from YAML file. YAML file like this is supported:
    /// ```yaml
    /// distance_query:
    ///   detection_threshold: 0.5
    ///   parallel: false
    ///   whitelist:
    ///     - [LSoftHandLink, RSoftHandLink]
    ///     - [LSoftHandLink, DWYTorso]
    ///   package_roots:
    ///     bigman: /opt/robots/bigman
    /// ```
    /// All fields are optional. Use `blacklist` instead of `whitelist` to check all pairs
    /// except the listed ones; giving both is an error. `.inf` is accepted as threshold.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, DistanceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Same as `from_yaml_file` but parses the string.
    pub fn from_yaml(contents: &str) -> Result<Self, DistanceError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| DistanceError::ParseError(format!("{}", e)))?;
        let doc = docs.first()
            .ok_or_else(|| DistanceError::ParseError("Empty YAML document".to_string()))?;
        let section = &doc[SECTION];
        if section.is_badvalue() {
            return Err(DistanceError::ParseError(format!("Section '{}' not found", SECTION)));
        }

        let mut config = DistanceQueryConfig::default();

        if let Some(threshold) = read_f64(&section["detection_threshold"], "detection_threshold")? {
            if threshold.is_nan() {
                return Err(DistanceError::ConfigurationError(
                    "detection_threshold must be a number".to_string()));
            }
            config.detection_threshold = threshold;
        }

        match &section["parallel"] {
            Yaml::Boolean(parallel) => config.parallel = *parallel,
            Yaml::BadValue | Yaml::Null => {}
            other => {
                return Err(DistanceError::ParseError(format!(
                    "parallel must be true or false (got {:?})", other)));
            }
        }

        let whitelist = read_pairs(&section["whitelist"], "whitelist")?;
        let blacklist = read_pairs(&section["blacklist"], "blacklist")?;
        config.filter = match (whitelist, blacklist) {
            (Some(_), Some(_)) => {
                return Err(DistanceError::ConfigurationError(
                    "whitelist and blacklist cannot be both given".to_string()));
            }
            (Some(pairs), None) => PairFilter::Whitelist(pairs),
            (None, Some(pairs)) => PairFilter::Blacklist(pairs),
            (None, None) => PairFilter::All,
        };

        config.package_roots = read_package_roots(&section["package_roots"])?;
        Ok(config)
    }
}

fn read_f64(value: &Yaml, field: &str) -> Result<Option<f64>, DistanceError> {
    match value {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(i) => Ok(Some(*i as f64)),
        Yaml::Real(_) => value.as_f64()
            .map(Some)
            .ok_or_else(|| DistanceError::ParseError(format!("{} is not a number", field))),
        other => Err(DistanceError::ParseError(format!(
            "{} must be a number (got {:?})", field, other))),
    }
}

/// List of pairs, each pair being a list of exactly two link names.
fn read_pairs(value: &Yaml, field: &str) -> Result<Option<Vec<LinksPair>>, DistanceError> {
    let items = match value {
        Yaml::BadValue | Yaml::Null => return Ok(None),
        Yaml::Array(items) => items,
        other => {
            return Err(DistanceError::ParseError(format!(
                "{} must be a list of link pairs (got {:?})", field, other)));
        }
    };

    let mut pairs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let names: Vec<&str> = item.as_vec()
            .map(|v| v.iter().filter_map(|n| n.as_str()).collect())
            .unwrap_or_default();
        if names.len() != 2 || item.as_vec().map_or(true, |v| v.len() != 2) {
            return Err(DistanceError::ParseError(format!(
                "{}[{}] must be a pair of link names", field, i)));
        }
        pairs.push((names[0].to_string(), names[1].to_string()));
    }
    Ok(Some(pairs))
}

fn read_package_roots(value: &Yaml) -> Result<HashMap<String, PathBuf>, DistanceError> {
    let mut roots = HashMap::new();
    match value {
        Yaml::BadValue | Yaml::Null => {}
        Yaml::Hash(entries) => {
            for (package, root) in entries {
                match (package.as_str(), root.as_str()) {
                    (Some(package), Some(root)) => {
                        roots.insert(package.to_string(), PathBuf::from(root));
                    }
                    _ => {
                        return Err(DistanceError::ParseError(
                            "package_roots must map package names to paths".to_string()));
                    }
                }
            }
        }
        other => {
            return Err(DistanceError::ParseError(format!(
                "package_roots must be a mapping (got {:?})", other)));
        }
    }
    Ok(roots)
}
