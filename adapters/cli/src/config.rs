use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use wayfield_core::Tuning;

/// Errors that can occur while loading a tuning file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read from disk.
    #[error("could not read tuning file {}", path.display())]
    Read {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file contents were not valid tuning TOML.
    #[error("could not parse tuning toml")]
    Parse(#[from] toml::de::Error),
    /// A numeric field held a value the systems cannot work with.
    #[error("tuning field `{field}` must be non-negative, found {value}")]
    Negative {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Value found in the file.
        value: f64,
    },
}

/// Reads and validates the tuning file at `path`.
pub(crate) fn load_tuning(path: &Path) -> Result<Tuning, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tuning(&contents)
}

/// Parses tuning TOML, filling absent fields with defaults.
pub(crate) fn parse_tuning(contents: &str) -> Result<Tuning, ConfigError> {
    let tuning: Tuning = toml::from_str(contents)?;

    let checks = [
        ("generation.coverage_ratio", tuning.generation.coverage_ratio),
        ("generation.line_thickness", tuning.generation.line_thickness),
        ("validation.tolerance", tuning.validation.tolerance),
        ("validation.character_radius", tuning.validation.character_radius),
        ("default_speed", tuning.default_speed),
    ];
    for (field, value) in checks {
        if value.is_nan() || value < 0.0 {
            return Err(ConfigError::Negative { field, value });
        }
    }

    Ok(tuning)
}
