//! # relay-settings
//!
//! Configuration for the chat relay, loaded from three layers
//! (in priority order):
//!
//! 1. **Compiled defaults** — [`RelaySettings::default()`]
//! 2. **Settings file** — `$RELAY_SETTINGS_PATH` or `~/.relay/settings.json`,
//!    deep-merged over defaults
//! 3. **Environment variables** — `RELAY_*` overrides (highest priority)
//!
//! Settings are read once at process start and passed into the server as
//! an immutable value. There is no global singleton and no hot-reload:
//! the handler receives its configuration explicitly, which keeps it
//! testable with injected fakes.
//!
//! # Usage
//!
//! ```no_run
//! use relay_settings::load_settings;
//!
//! let settings = load_settings().expect("settings");
//! println!("listening on {}:{}", settings.server.host, settings.server.port);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
