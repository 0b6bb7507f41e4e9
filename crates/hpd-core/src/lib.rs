//! hpd-core: config parsing and the rotation loop, free of OS I/O.

pub mod config;
pub mod protocol;
pub mod reload;
pub mod rotation;

pub use config::{ConfigError, ConfigStore, Configuration, Limits};
pub use reload::ReloadSignal;
pub use rotation::{RotationController, Sleeper, ThreadSleeper, WallpaperSetter};
