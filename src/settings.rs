use crate::prelude::*;
use std::io::ErrorKind;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("couldn't read {}: {source}", .path.display())]
	Io { path: PathBuf, source: std::io::Error },

	#[error("couldn't parse {}: {source}", .path.display())]
	Parse { path: PathBuf, source: serde_json::Error },

	#[error("invalid settings in {}: {source}", .path.display())]
	Invalid { path: PathBuf, source: ValidationError }
}

/// Loads the detector settings from `path`, or from `settings.json` in the working directory.
///
/// If no path was given and `settings.json` doesn't exist, the defaults are used.
pub fn load(path: Option<&Path>) -> Result<DetectorConfig, SettingsError> {
	let (path, explicit) = match path {
		Some(path) => (path, true),
		None => (Path::new(DEFAULT_SETTINGS_PATH), false)
	};

	let f = match File::open(path) {
		Ok(f) => f,
		Err(err) if !explicit && err.kind() == ErrorKind::NotFound => {
			log::debug!("{} not found, using default settings", path.display());
			return Ok(DetectorConfig::default());
		},
		Err(source) => return Err(SettingsError::Io { path: path.to_owned(), source })
	};

	let config: DetectorConfig = serde_json::from_reader(std::io::BufReader::new(f)).map_err(|source| SettingsError::Parse { path: path.to_owned(), source })?;
	config.validate().map_err(|source| SettingsError::Invalid { path: path.to_owned(), source })?;

	log::info!("Loaded settings from {}", path.display());

	Ok(config)
}
