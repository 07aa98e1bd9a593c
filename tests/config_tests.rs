use std::fs;

use readable_color::config::{self, Configuration};
use readable_color::{Color, Error, MatchStrategy, Region};
use tempfile::tempdir;

#[test]
fn empty_config_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert!(cfg.region.is_none());
    assert!(cfg.preferred_color.is_none());
    assert_eq!(cfg.strategy, MatchStrategy::Linear);
    assert!(!cfg.verbose);
    assert!((cfg.thresholds.brightness_difference - 125.0).abs() < f64::EPSILON);
    assert!((cfg.thresholds.color_difference - 300.0).abs() < f64::EPSILON);
    assert!((cfg.thresholds.light_background - 125.0).abs() < f64::EPSILON);
    cfg.validate().unwrap();
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r##"
region: [10, 20, 30, 40]
preferred-color: "#336699"
strategy: linear
verbose: true
thresholds:
  color-difference: 250
"##;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.region, Some(Region::new(10, 20, 30, 40)));
    assert_eq!(
        cfg.preferred_color.map(|c| c.to_rgba8()),
        Some([0x33, 0x66, 0x99, 0xFF])
    );
    assert!(cfg.verbose);
    assert!((cfg.thresholds.color_difference - 250.0).abs() < f64::EPSILON);
    assert!((cfg.thresholds.brightness_difference - 125.0).abs() < f64::EPSILON);
    assert_eq!(cfg.matcher().thresholds(), &cfg.thresholds);
}

#[test]
fn rejects_unknown_strategy() {
    let res: Result<Configuration, _> = serde_yaml::from_str("strategy: perceptual");
    assert!(res.is_err());
}

#[test]
fn rejects_bad_color() {
    let res: Result<Configuration, _> = serde_yaml::from_str("preferred-color: \"#12\"");
    assert!(res.is_err());
}

#[test]
fn validate_rejects_negative_threshold() {
    let yaml = r#"
thresholds:
  brightness-difference: -1
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("brightness-difference"));
}

#[test]
fn loads_from_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "preferred-color: \"#fff\"\n").unwrap();
    let cfg = config::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.preferred_color, Some(Color::WHITE));
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("absent.yaml");
    let err = config::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{err}");
}

#[test]
fn malformed_file_is_a_config_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "strategy: [linear\n").unwrap();
    let err = config::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err}");
}
