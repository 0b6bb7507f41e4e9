//! hpd-infra: OS adapters (wallpaper backends, SIGHUP, control socket, detach).

pub mod daemon;
pub mod env_detect;
pub mod ipc;
pub mod paths;
pub mod signals;
pub mod wallpaper;
