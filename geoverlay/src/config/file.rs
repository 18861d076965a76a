//! INI config file loading.
//!
//! Missing sections and keys fall back to defaults; unknown keys are
//! ignored. Only malformed values are errors.

use std::path::Path;
use std::str::FromStr;

use ini::{Ini, Properties};
use thiserror::Error;

use super::settings::{ConfigFile, OverlaySettings, ViewSettings};

/// Errors that can occur while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or is not valid INI.
    #[error("failed to load config file: {0}")]
    Load(#[from] ini::Error),

    /// A key holds a value that does not parse.
    #[error("invalid value '{value}' for {section}.{key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads configuration from an INI file at the given path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ConfigFile, ConfigError> {
    let ini = Ini::load_from_file(path)?;
    parse_ini(&ini)
}

fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigError> {
    let mut config = ConfigFile::default();

    if let Some(section) = ini.section(Some("basemap")) {
        if let Some(url) = section.get("url") {
            config.basemap.url = url.to_string();
        }
    }

    if let Some(section) = ini.section(Some("overlay")) {
        parse_overlay(section, &mut config.overlay)?;
    }

    if let Some(section) = ini.section(Some("view")) {
        parse_view(section, &mut config.view)?;
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(level) = section.get("level") {
            config.logging.level = level.to_string();
        }
    }

    Ok(config)
}

fn parse_overlay(section: &Properties, overlay: &mut OverlaySettings) -> Result<(), ConfigError> {
    if let Some(name) = section.get("name") {
        overlay.name = name.to_string();
    }
    if let Some(mode) = section.get("mode") {
        overlay.mode = parse_value("overlay", "mode", mode)?;
    }
    if let Some(url) = section.get("vector_url") {
        overlay.vector_url = url.to_string();
    }
    if let Some(url) = section.get("archive_url") {
        overlay.archive_url = url.to_string();
    }
    if let Some(url) = section.get("tile_url") {
        overlay.tile_url = url.to_string();
    }
    if let Some(size) = section.get("tile_size") {
        overlay.tile_size = parse_value("overlay", "tile_size", size)?;
    }
    if let Some(activation) = section.get("activation") {
        overlay.activation = parse_value("overlay", "activation", activation)?;
    }
    Ok(())
}

fn parse_view(section: &Properties, view: &mut ViewSettings) -> Result<(), ConfigError> {
    if let Some(lon) = section.get("center_lon") {
        view.center_lon = parse_value("view", "center_lon", lon)?;
    }
    if let Some(lat) = section.get("center_lat") {
        view.center_lat = parse_value("view", "center_lat", lat)?;
    }
    if let Some(zoom) = section.get("zoom") {
        view.zoom = parse_value("view", "zoom", zoom)?;
    }
    Ok(())
}

fn parse_value<T>(
    section: &'static str,
    key: &'static str,
    value: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        section,
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ActivationMode, OverlayMode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults_for_empty_file() {
        let file = write_config("");
        let config = load_from_file(file.path()).unwrap();

        assert_eq!(config.basemap.url, "https://tile.openstreetmap.org/{z}/{x}/{y}.png");
        assert_eq!(config.overlay.name, "Overlay");
        assert_eq!(config.overlay.mode, OverlayMode::Vector);
        assert_eq!(config.overlay.activation, ActivationMode::Manual);
        assert_eq!(config.view.zoom, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_config_parses() {
        let file = write_config(
            r#"
[basemap]
url = https://tiles.example.test/{z}/{x}/{y}.png

[overlay]
name = NDVI
mode = raster-archive
archive_url = http://backend.test/ndvi?bbox={bbox}
tile_size = 512
activation = auto

[view]
center_lon = -0.1276
center_lat = 51.5074
zoom = 12

[logging]
level = debug
"#,
        );

        let config = load_from_file(file.path()).unwrap();
        assert_eq!(config.basemap.url, "https://tiles.example.test/{z}/{x}/{y}.png");
        assert_eq!(config.overlay.name, "NDVI");
        assert_eq!(config.overlay.mode, OverlayMode::RasterArchive);
        assert_eq!(config.overlay.archive_url, "http://backend.test/ndvi?bbox={bbox}");
        assert_eq!(config.overlay.tile_size, 512);
        assert_eq!(config.overlay.activation, ActivationMode::Auto);
        assert_eq!(config.view.center_lon, -0.1276);
        assert_eq!(config.view.center_lat, 51.5074);
        assert_eq!(config.view.zoom, 12);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_mode_is_an_error() {
        let file = write_config("[overlay]\nmode = holographic\n");
        let err = load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { section: "overlay", key: "mode", .. }
        ));
    }

    #[test]
    fn test_invalid_zoom_is_an_error() {
        let file = write_config("[view]\nzoom = very-close\n");
        let err = load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "zoom", .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_from_file("/nonexistent/geoverlay.ini").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let file = write_config("[overlay]\nname = NDVI\nshininess = 11\n");
        let config = load_from_file(file.path()).unwrap();
        assert_eq!(config.overlay.name, "NDVI");
    }
}
