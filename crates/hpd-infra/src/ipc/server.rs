//! Control socket server.
//!
//! Runs on its own thread. The only thing it can do to the daemon is set the
//! reload flag.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::thread::{self, JoinHandle};

use anyhow::Context;
use tracing::{debug, warn};

use hpd_core::ReloadSignal;
use hpd_core::protocol::{Request, Response};

pub fn spawn(signal: ReloadSignal) -> anyhow::Result<JoinHandle<()>> {
    spawn_at(&super::socket_path()?, signal)
}

/// Binds synchronously so a bad socket path fails startup, then serves in the
/// background.
pub fn spawn_at(sock: &Path, signal: ReloadSignal) -> anyhow::Result<JoinHandle<()>> {
    let listener = bind(sock)?;
    let sock = sock.to_path_buf();

    thread::Builder::new()
        .name("hpd-ipc".into())
        .spawn(move || serve(&listener, &sock, &signal))
        .context("spawn ipc thread")
}

fn bind(sock: &Path) -> anyhow::Result<UnixListener> {
    // A stale socket from a previous run would make bind fail.
    if sock.exists() {
        std::fs::remove_file(sock).with_context(|| format!("remove existing socket {sock:?}"))?;
    }

    let listener = UnixListener::bind(sock).with_context(|| format!("bind socket {sock:?}"))?;

    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(err) = std::fs::set_permissions(sock, std::fs::Permissions::from_mode(0o600)) {
            warn!("could not restrict socket permissions: {err}");
        }
    }

    debug!(socket = %sock.display(), "control socket listening");
    Ok(listener)
}

fn serve(listener: &UnixListener, sock: &Path, signal: &ReloadSignal) {
    for stream in listener.incoming() {
        let result = stream
            .context("accept")
            .and_then(|stream| handle_client(stream, signal));
        if let Err(err) = result {
            warn!(socket = %sock.display(), "control client error: {err:#}");
        }
    }
}

fn handle_client(stream: UnixStream, signal: &ReloadSignal) -> anyhow::Result<()> {
    let mut w = stream.try_clone().context("clone stream")?;
    let r = BufReader::new(stream);

    for line in r.lines() {
        let line = line.context("read line")?;
        let resp = match Request::parse_line(&line) {
            Ok(Request::Ping) => Response::OkMsg("running".into()),
            Ok(Request::Reload) => {
                signal.trigger();
                debug!("reload requested over control socket");
                Response::OkMsg("reload queued".into())
            }
            Err(_) => Response::Err("unknown_command".into()),
        };

        w.write_all(resp.to_line().as_bytes()).context("write response")?;
        w.flush().context("flush")?;
    }

    Ok(())
}
