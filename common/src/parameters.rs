use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// A helper struct. Deserialized from a run's toml file and handed to the
/// `wavetrain` crate, which validates the packet arrays on construction.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct TomlParameters {
    /// Initial center position of each packet
    pub positions: Vec<f64>,
    /// Initial momentum of each packet
    pub momenta: Vec<f64>,
    /// Initial standard deviation of each packet
    pub widths: Vec<f64>,
    /// Mass of each packet
    pub masses: Vec<f64>,

    /// Freeze packet spreading (classical drift only)
    #[serde(default = "bool::default")]
    pub nospread: bool,

    /// Temporal domain of the evaluation grid
    pub time_limits: [f64; 2],
    /// Spatial domain of the evaluation grid
    pub position_limits: [f64; 2],
    /// Number of grid points along each of the two axes
    pub num_points: usize,

    /// Detector position for the fixed-position density series
    #[serde(default)]
    pub detector_position: f64,

    /// Name of the run (used for output file names)
    pub sim_name: String,
}

/// This function reads toml files
pub fn read_toml(path: &str) -> Result<TomlParameters, CommonError> {
    // Read toml config file
    let toml_contents: &str =
        &std::fs::read_to_string(path).map_err(|_| CommonError::TomlReadError {
            path: path.to_string(),
        })?;

    // Return parsed toml from str
    toml::from_str(toml_contents).map_err(|e| CommonError::TomlParseError {
        msg: format!("{e:?}"),
    })
}

#[test]
fn test_parse_full_toml() {
    let sample = r#"
        positions = [-4.0, 0.0, 4.0]
        momenta = [1.0, 0.0, -1.0]
        widths = [0.5, 1.0, 0.5]
        masses = [1.0, 1.0, 1.0]
        nospread = true
        time_limits = [0.0, 10.0]
        position_limits = [-12.0, 12.0]
        num_points = 256
        detector_position = 2.5
        sim_name = "three-packet-train"
    "#;

    let params: TomlParameters = toml::from_str(sample).unwrap();
    assert_eq!(params.positions, vec![-4.0, 0.0, 4.0]);
    assert_eq!(params.momenta, vec![1.0, 0.0, -1.0]);
    assert_eq!(params.widths, vec![0.5, 1.0, 0.5]);
    assert_eq!(params.masses, vec![1.0, 1.0, 1.0]);
    assert!(params.nospread);
    assert_eq!(params.time_limits, [0.0, 10.0]);
    assert_eq!(params.position_limits, [-12.0, 12.0]);
    assert_eq!(params.num_points, 256);
    assert_eq!(params.detector_position, 2.5);
    assert_eq!(params.sim_name, "three-packet-train");
}

#[test]
fn test_parse_toml_defaults() {
    // nospread and detector_position are optional
    let sample = r#"
        positions = [0.0]
        momenta = [0.0]
        widths = [1.0]
        masses = [1.0]
        time_limits = [0.0, 1.0]
        position_limits = [-5.0, 5.0]
        num_points = 64
        sim_name = "single-packet"
    "#;

    let params: TomlParameters = toml::from_str(sample).unwrap();
    assert!(!params.nospread);
    assert_eq!(params.detector_position, 0.0);
}

#[test]
fn test_missing_field_is_a_parse_error() {
    // no masses array
    let sample = r#"
        positions = [0.0]
        momenta = [0.0]
        widths = [1.0]
        time_limits = [0.0, 1.0]
        position_limits = [-5.0, 5.0]
        num_points = 64
        sim_name = "incomplete"
    "#;

    assert!(toml::from_str::<TomlParameters>(sample).is_err());
}
