//! OS signal wiring.

use anyhow::Context;
use signal_hook::consts::SIGHUP;

use hpd_core::ReloadSignal;

/// SIGHUP sets the reload flag; the handler does nothing else.
pub fn register_reload(signal: &ReloadSignal) -> anyhow::Result<()> {
    signal_hook::flag::register(SIGHUP, signal.flag()).context("register SIGHUP handler")?;
    Ok(())
}
