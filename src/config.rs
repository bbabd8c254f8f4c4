//! Export configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::util::{Error, Result, DEFAULT_FRAME_RATE, DEFAULT_SPEED};

/// Settings shared by all export commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Frames per second for keyframe times.
    pub frame_rate: f64,
    /// Curve speed when an object has no `speed` attribute.
    pub default_speed: f64,
    /// Split quads in per-object raw files. Face groups and the selection
    /// file are always triangulated.
    pub triangulate: bool,
    /// Evaluate modifier stacks before extracting geometry.
    pub apply_modifiers: bool,
    /// Where output files go; the working directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            default_speed: DEFAULT_SPEED,
            triangulate: false,
            apply_modifiers: true,
            output_dir: None,
        }
    }
}

impl ExportConfig {
    /// Per-user config file location
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("tsc-export");
            p.push("config.json");
            p
        })
    }

    /// Load the per-user config, falling back to defaults when it is missing
    /// or unreadable.
    pub fn load() -> Self {
        Self::user_path()
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|s| serde_json::from_str::<Self>(&s).ok())
            .filter(|c| c.validate().is_ok())
            .unwrap_or_default()
    }

    /// Load an explicitly requested config file. Any problem is an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.frame_rate > 0.0 && self.frame_rate.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !(self.default_speed > 0.0 && self.default_speed.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "default_speed must be positive, got {}",
                self.default_speed
            )));
        }
        Ok(())
    }

    /// Resolve an output file name against `output_dir`.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = ExportConfig::default();
        assert_eq!(c.frame_rate, 25.0);
        assert_eq!(c.default_speed, 1.0);
        assert!(!c.triangulate);
        assert!(c.apply_modifiers);
        assert!(c.validate().is_ok());
        assert_eq!(c.output_path("a.tsc"), PathBuf::from("a.tsc"));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"frame_rate": 30, "output_dir": "/tmp/out"}}"#).unwrap();
        let c = ExportConfig::from_file(file.path()).unwrap();
        assert_eq!(c.frame_rate, 30.0);
        assert_eq!(c.default_speed, 1.0);
        assert_eq!(c.output_path("x.raw"), PathBuf::from("/tmp/out/x.raw"));
    }

    #[test]
    fn test_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_speed": -1}}"#).unwrap();
        assert!(matches!(
            ExportConfig::from_file(file.path()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
