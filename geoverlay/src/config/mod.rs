//! Static startup configuration.
//!
//! Recognized options: base-map tile URL template, overlay endpoints and
//! tile URL template, initial center and zoom, toggle activation mode.
//! All of this is startup configuration loaded from an INI file; nothing is
//! renegotiated at runtime.

mod file;
mod settings;

pub use file::{load_from_file, ConfigError};
pub use settings::{
    ActivationMode, BasemapSettings, ConfigFile, LoggingSettings, OverlayMode, OverlaySettings,
    ViewSettings,
};
