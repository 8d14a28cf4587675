//! Calibration file loading.
//!
//! Middle-position offsets are per-deployment measurements, so they come
//! from a file rather than code:
//!
//! ```toml
//! # offsets in degrees, canonical joint order:
//! # index, middle, ring, thumb — proximal before distal
//! right = [3.0, 0.0, -8.0, -13.0, 2.0, -5.0, -12.0, -5.0]
//! left  = [3.0, -3.0, -1.0, -10.0, 5.0, 2.0, -7.0, 3.0]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use hand_pose::CalibrationProfile;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bad calibration file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
struct CalFile {
    right: [f32; 8],
    left: [f32; 8],
}

/// Parse calibration TOML text.
pub fn parse_calibration(text: &str) -> Result<CalibrationProfile, ConfigError> {
    let file: CalFile = toml::from_str(text)?;
    Ok(CalibrationProfile::new(file.right, file.left))
}

/// Load a calibration profile from a TOML file.
pub fn load_calibration(path: &Path) -> Result<CalibrationProfile, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_calibration(&text)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
