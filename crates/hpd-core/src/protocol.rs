//! Control socket protocol: one request line, one response line.

use anyhow::{Context, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Ping,
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ok,
    OkMsg(String),
    Err(String),
}

impl Request {
    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        match line.trim_end_matches(['\r', '\n']).trim() {
            "PING" => Ok(Self::Ping),
            "RELOAD" => Ok(Self::Reload),
            _ => Err(anyhow!("unknown_command")),
        }
    }

    pub fn to_line(self) -> &'static str {
        match self {
            Self::Ping => "PING\n",
            Self::Reload => "RELOAD\n",
        }
    }
}

impl Response {
    pub fn to_line(&self) -> String {
        match self {
            Self::Ok => "OK\n".to_string(),
            Self::OkMsg(msg) => format!("OK {msg}\n"),
            Self::Err(msg) => format!("ERR {msg}\n"),
        }
    }

    pub fn parse_line(line: &str) -> anyhow::Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line == "OK" {
            return Ok(Self::Ok);
        }
        if let Some(rest) = line.strip_prefix("OK ") {
            return Ok(Self::OkMsg(rest.to_string()));
        }
        if let Some(rest) = line.strip_prefix("ERR ") {
            return Ok(Self::Err(rest.to_string()));
        }

        Err(anyhow!("invalid_response")).with_context(|| format!("line: {line:?}"))
    }
}
