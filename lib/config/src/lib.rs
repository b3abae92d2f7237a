use allfreqs_clock::{Band, ClockSolver, RatioEnumerator, VcoWindow};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use std::{
    fs::{File, create_dir_all},
    io::{Read, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

pub use output::OutputStyle;

pub mod output;

pub static STORAGE_DIRECTORY: LazyLock<PathBuf> =
    LazyLock::new(|| dirs::data_dir().unwrap_or_default().join("allfreqs"));

/// Config location
pub static SETTINGS_LOCATION: LazyLock<PathBuf> =
    LazyLock::new(|| STORAGE_DIRECTORY.join("config.ron"));

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Could not write settings: {0}")]
    RonSerialize(#[from] ron::Error),
    #[error("Settings file {} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    /// The file parsed, but describes a clock that cannot exist
    Clock(#[from] allfreqs_clock::Error),
}

#[serde_inline_default]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Clock parameters and output preferences
pub struct Settings {
    #[serde_inline_default(Settings::DEFAULT_BASE_FREQUENCY)]
    /// Reference clock every frequency is derived from
    pub base_frequency: f64,
    #[serde(default)]
    /// Bounds `base_frequency * M`
    pub vco_window: VcoWindow,
    #[serde(default)]
    /// Enumerated frequencies outside this band are dropped
    pub band: Band,
    #[serde_inline_default(RatioEnumerator::DEFAULT_DIVISOR_SPAN)]
    /// Divisors run up to this many times the multiplier when enumerating
    pub divisor_span: u32,
    #[serde_inline_default(ClockSolver::DEFAULT_DIVISOR_SPAN)]
    /// Divisors run up to this many times the multiplier when solving
    pub solver_divisor_span: u32,
    #[serde(default)]
    pub output_style: OutputStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_frequency: Self::DEFAULT_BASE_FREQUENCY,
            vco_window: VcoWindow::default(),
            band: Band::default(),
            divisor_span: RatioEnumerator::DEFAULT_DIVISOR_SPAN,
            solver_divisor_span: ClockSolver::DEFAULT_DIVISOR_SPAN,
            output_style: OutputStyle::default(),
        }
    }
}

impl Settings {
    pub const DEFAULT_BASE_FREQUENCY: f64 = 100.0;

    pub fn save(&self, writer: impl Write) -> Result<(), Error> {
        ron::Options::default().to_io_writer_pretty(
            writer,
            self,
            PrettyConfig::new().struct_names(false),
        )?;

        Ok(())
    }

    pub fn load(reader: impl Read) -> Result<Self, Error> {
        Ok(ron::de::from_reader(reader)?)
    }

    /// Loads `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading settings from {}", path.display());
        Self::load(File::open(path)?)
    }

    /// Writes to `path`, creating its directory, and refuses to replace an existing file unless `overwrite`
    pub fn save_to_path(&self, path: impl AsRef<Path>, overwrite: bool) -> Result<(), Error> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let file = if overwrite {
            File::create(path)?
        } else {
            File::create_new(path).map_err(|error| match error.kind() {
                std::io::ErrorKind::AlreadyExists => Error::AlreadyExists(path.to_path_buf()),
                _ => Error::Io(error),
            })?
        };

        tracing::info!("Writing settings to {}", path.display());
        self.save(file)
    }

    pub fn enumerator(&self) -> Result<RatioEnumerator, Error> {
        Ok(RatioEnumerator::new(self.base_frequency)?
            .with_window(self.vco_window)?
            .with_band(self.band)?
            .with_divisor_span(self.divisor_span)?)
    }

    pub fn solver(&self) -> Result<ClockSolver, Error> {
        Ok(ClockSolver::new(self.base_frequency)?
            .with_window(self.vco_window)?
            .with_divisor_span(self.solver_divisor_span)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::PathBuf};

    #[test]
    fn round_trip() {
        let settings = Settings {
            base_frequency: 50.0,
            output_style: OutputStyle::Lines,
            ..Default::default()
        };

        let mut buffer = Vec::new();
        settings.save(&mut buffer).unwrap();

        assert_eq!(Settings::load(buffer.as_slice()).unwrap(), settings);
    }

    #[test]
    fn missing_fields_default() {
        let settings = Settings::load("(base_frequency: 25.0)".as_bytes()).unwrap();

        assert_eq!(settings.base_frequency, 25.0);
        assert_eq!(settings.band, Band::default());
        assert_eq!(settings.divisor_span, 30);
        assert_eq!(settings.solver_divisor_span, 20);
        assert_eq!(settings.output_style, OutputStyle::Pretty);

        assert_eq!(Settings::load("()".as_bytes()).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file() {
        assert!(matches!(
            Settings::load("(base_frequency: \"fast\")".as_bytes()),
            Err(Error::Ron(_))
        ));
    }

    #[test]
    fn builds_validated_clocks() {
        let enumerator = Settings::default().enumerator().unwrap();
        assert_eq!(enumerator.multiplier_range(), 4..10);
        assert_eq!(enumerator.divisor_span(), 30);

        let solver = Settings::default().solver().unwrap();
        assert_eq!(solver.multiplier_range(), 5..10);

        let settings = Settings {
            base_frequency: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.enumerator(),
            Err(Error::Clock(allfreqs_clock::Error::InvalidBaseFrequency(_)))
        ));

        let settings = Settings {
            band: Band {
                min: 300.0,
                max: 10.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            settings.enumerator(),
            Err(Error::Clock(allfreqs_clock::Error::InvalidBand { .. }))
        ));
    }

    #[test]
    fn absent_file_is_default() {
        let path = PathBuf::from("/nonexistent/allfreqs/config.ron");
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());
    }

    #[test]
    fn saved_file_is_not_replaced() {
        let directory = std::env::temp_dir().join(format!("allfreqs-save-{}", std::process::id()));
        let path = directory.join("nested").join("config.ron");
        let settings = Settings {
            base_frequency: 25.0,
            ..Default::default()
        };

        settings.save_to_path(&path, false).unwrap();
        assert!(matches!(
            Settings::default().save_to_path(&path, false),
            Err(Error::AlreadyExists(_))
        ));
        assert_eq!(Settings::load_or_default(&path).unwrap(), settings);

        Settings::default().save_to_path(&path, true).unwrap();
        assert_eq!(Settings::load_or_default(&path).unwrap(), Settings::default());

        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn present_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("allfreqs-settings-{}.ron", std::process::id()));
        fs::write(&path, "(base_frequency: 50.0, output_style: Ron)").unwrap();

        let settings = Settings::load_or_default(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.base_frequency, 50.0);
        assert_eq!(settings.output_style, OutputStyle::Ron);
        assert_eq!(settings.enumerator().unwrap().multiplier_range(), 8..20);
    }
}
