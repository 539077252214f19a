//! Loading [`Params`] from YAML.
//!
//! ```yaml
//! speed: 0.5
//! amplitude: 10.0
//! startup_delay: 1.0
//! collision_delay: 3.0
//! count: 500
//! donut_shrink: 0.99
//! particle_grow: 1.01
//! ```
//!
//! Missing keys take their defaults. Values outside the knob bounds are
//! clamped, with a warning.

use log::warn;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::ConfigError;
use crate::params::{Knob, Params};

pub fn load(path: &Path) -> Result<Params, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let params: Params =
        serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(clamp_and_warn(params))
}

/// Clamp `params` into bounds, logging every field that moved.
pub fn clamp_and_warn(params: Params) -> Params {
    let clamped = params.clamped();
    for knob in Knob::ALL {
        if knob.get(&params) != knob.get(&clamped) {
            warn!(
                "{} = {} out of range, clamped to {}",
                knob.label(),
                knob.get(&params),
                knob.display(&clamped)
            );
        }
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_config(dir: &tempfile::TempDir, yaml: &str) -> PathBuf {
        let path = dir.path().join("scene.yaml");
        let mut file = File::create(&path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        path
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config").join("default.yaml");
        assert_eq!(load(&path).unwrap(), Params::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_key_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "sped: 1.0\n");
        assert!(matches!(load(&path).unwrap_err(), ConfigError::Yaml { .. }));
    }

    #[test]
    fn malformed_yaml_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "speed: [1.0\n");
        assert!(matches!(load(&path).unwrap_err(), ConfigError::Yaml { .. }));
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "speed: 50.0\ncount: 0\ndonut_shrink: 2.0\n");

        let params = load(&path).unwrap();

        assert_eq!(params.speed, 5.0);
        assert_eq!(params.count, 1);
        assert_eq!(params.donut_shrink, 0.999);
        assert_eq!(params.amplitude, Params::default().amplitude);
    }

    #[test]
    fn nan_speed_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "speed: .nan\namplitude: .inf\n");

        let params = load(&path).unwrap();

        assert_eq!(params.speed, Params::default().speed);
        assert_eq!(params.amplitude, Params::default().amplitude);
    }
}
