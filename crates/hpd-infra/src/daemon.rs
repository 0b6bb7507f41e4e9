//! Detaching from the controlling terminal.
//!
//! The daemon re-executes itself in its own process group with `--foreground`
//! appended, so a supervisor (systemd, a compositor's exec-once) can skip this
//! step entirely by passing the flag itself.

use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use anyhow::Context;

pub const FOREGROUND_FLAG: &str = "--foreground";

/// Spawns the detached copy and returns its pid. The caller should exit.
pub fn detach<I, S>(args: I) -> anyhow::Result<u32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let exe = std::env::current_exe().context("current_exe")?;

    let mut cmd = Command::new(exe);
    cmd.args(args)
        .arg(FOREGROUND_FLAG)
        .stdin(Stdio::null())
        .process_group(0);

    match open_log() {
        Ok(log) => {
            let err = log.try_clone().context("clone log handle")?;
            cmd.stdout(log).stderr(err);
        }
        Err(err) => {
            tracing::warn!("no log file, daemon output discarded: {err:#}");
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
    }

    let child = cmd.spawn().context("spawn daemon")?;
    Ok(child.id())
}

fn open_log() -> anyhow::Result<File> {
    let path = crate::paths::log_file_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))
}
