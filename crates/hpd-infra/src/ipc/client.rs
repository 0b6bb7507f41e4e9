//! Control socket client.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

use anyhow::{Context, anyhow};

use hpd_core::protocol::{Request, Response};

pub fn send_at(sock: &Path, req: Request) -> anyhow::Result<Response> {
    let mut stream = UnixStream::connect(sock)
        .with_context(|| format!("connect {sock:?} (is the daemon running?)"))?;

    stream.write_all(req.to_line().as_bytes()).context("write")?;
    stream.flush().context("flush")?;

    let mut reader = BufReader::new(stream);
    let mut resp_line = String::new();
    reader.read_line(&mut resp_line).context("read response")?;
    Response::parse_line(&resp_line)
}

fn send(req: Request) -> anyhow::Result<String> {
    match send_at(&super::socket_path()?, req)? {
        Response::Ok => Ok("OK".to_string()),
        Response::OkMsg(msg) => Ok(format!("OK {msg}")),
        Response::Err(msg) => Err(anyhow!("{msg}")),
    }
}

/// Returns the daemon's status line.
pub fn status() -> anyhow::Result<String> {
    send(Request::Ping)
}

pub fn reload() -> anyhow::Result<String> {
    send(Request::Reload)
}
