use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::Result;
use crate::sampling::CylinderBounds;

/// Builder settings, loadable from RON or JSON.
///
/// Bounds are not checked on load; an invalid range is reported when the
/// builder runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub bounds: CylinderBounds,
    pub width: i32,
    pub height: i32,
    pub parallel: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { bounds: CylinderBounds::default(), width: 256, height: 256, parallel: false }
    }
}

impl BuilderConfig {
    pub fn from_ron_str(s: &str) -> Result<Self> { Ok(ron::from_str(s)?) }

    pub fn from_json_str(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }

    /// `.json` files are read as JSON, anything else as RON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading builder config");
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_ron_str(&content),
        }
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = BuilderConfig::from_ron_str("(width: 64)").unwrap();
        assert_eq!(cfg.width, 64);
        assert_eq!(cfg.height, 256);
        assert_eq!(cfg.bounds, CylinderBounds::default());
        assert!(!cfg.parallel);
    }

    #[test]
    fn ron_round_trip() {
        let cfg = BuilderConfig {
            bounds: CylinderBounds { lower_angle: 0.0, upper_angle: 90.0, lower_height: -1.0, upper_height: 1.0 },
            width: 32,
            height: 16,
            parallel: true,
        };
        let text = cfg.to_ron_string().unwrap();
        assert_eq!(BuilderConfig::from_ron_str(&text).unwrap(), cfg);
    }

    #[test]
    fn json_config() {
        let cfg = BuilderConfig::from_json_str(r#"{"width": 8, "height": 4, "bounds": {"lower_angle": 10.0, "upper_angle": 20.0, "lower_height": 0.0, "upper_height": 2.0}}"#).unwrap();
        assert_eq!((cfg.width, cfg.height), (8, 4));
        assert_eq!(cfg.bounds.upper_angle, 20.0);
    }

    #[test]
    fn invalid_bounds_load_unchecked() {
        let cfg = BuilderConfig::from_ron_str("(bounds: (lower_angle: 5.0, upper_angle: 1.0, lower_height: 0.0, upper_height: 1.0))").unwrap();
        assert!(matches!(cfg.bounds.validate(), Err(Error::InvalidBounds { .. })));
    }

    #[test]
    fn bad_ron_is_config_error() {
        assert!(matches!(BuilderConfig::from_ron_str("(width: \"wide\")"), Err(Error::Config(_))));
    }
}
