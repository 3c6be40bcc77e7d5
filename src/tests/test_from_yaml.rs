#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use crate::config::{DistanceQueryConfig, PairFilter};
    use crate::distance_error::DistanceError;
    use crate::tests::test_utils::pair;

    const READ_ERROR: &str = "Failed to parse configuration";

    #[test]
    fn test_full_config() {
        let yaml = r#"
distance_query:
  detection_threshold: 0.5
  parallel: true
  whitelist:
    - [LSoftHandLink, RSoftHandLink]
    - [LSoftHandLink, DWYTorso]
  package_roots:
    bigman: /opt/robots/bigman
"#;
        let config = DistanceQueryConfig::from_yaml(yaml).expect(READ_ERROR);
        assert_eq!(config.detection_threshold, 0.5);
        assert!(config.parallel);
        assert_eq!(config.filter, PairFilter::Whitelist(vec![
            pair("LSoftHandLink", "RSoftHandLink"),
            pair("LSoftHandLink", "DWYTorso"),
        ]));
        assert_eq!(config.package_roots.get("bigman"), Some(&PathBuf::from("/opt/robots/bigman")));
    }

    #[test]
    fn test_defaults() {
        let config = DistanceQueryConfig::from_yaml("distance_query: {}").expect(READ_ERROR);
        assert_eq!(config, DistanceQueryConfig::default());
        assert!(config.detection_threshold.is_infinite());
        assert_eq!(config.filter, PairFilter::All);
        assert!(!config.parallel);
    }

    #[test]
    fn test_blacklist_and_infinite_threshold() {
        let yaml = r#"
distance_query:
  detection_threshold: .inf
  blacklist:
    - [LElb, RElb]
"#;
        let config = DistanceQueryConfig::from_yaml(yaml).expect(READ_ERROR);
        assert_eq!(config.detection_threshold, f64::INFINITY);
        assert_eq!(config.filter, PairFilter::Blacklist(vec![pair("LElb", "RElb")]));
    }

    #[test]
    fn test_integer_threshold() {
        let config = DistanceQueryConfig::from_yaml("distance_query:\n  detection_threshold: 1\n")
            .expect(READ_ERROR);
        assert_eq!(config.detection_threshold, 1.0);
    }

    #[test]
    fn test_both_lists_rejected() {
        let yaml = r#"
distance_query:
  whitelist: [[a, b]]
  blacklist: [[c, d]]
"#;
        match DistanceQueryConfig::from_yaml(yaml) {
            Err(DistanceError::ConfigurationError(_)) => {}
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_input() {
        let bad_pair = "distance_query:\n  whitelist:\n    - [a, b, c]\n";
        assert!(matches!(DistanceQueryConfig::from_yaml(bad_pair), Err(DistanceError::ParseError(_))));

        let no_section = "something_else:\n  parallel: true\n";
        assert!(matches!(DistanceQueryConfig::from_yaml(no_section), Err(DistanceError::ParseError(_))));

        let bad_threshold = "distance_query:\n  detection_threshold: close\n";
        assert!(matches!(DistanceQueryConfig::from_yaml(bad_threshold), Err(DistanceError::ParseError(_))));

        let bad_parallel = "distance_query:\n  parallel: 3\n";
        assert!(matches!(DistanceQueryConfig::from_yaml(bad_parallel), Err(DistanceError::ParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        match DistanceQueryConfig::from_yaml_file("/nonexistent/distance_query.yaml") {
            Err(DistanceError::IoError(_)) => {}
            other => panic!("Expected I/O error, got {:?}", other),
        }
    }
}
