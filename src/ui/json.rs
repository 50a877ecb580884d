//! NDJSON output for `--json`
//!
//! Every command writes one JSON object per line to stdout. Results carry an
//! `event` field naming what they describe and a `command` field naming the
//! subcommand that produced them.

use std::io::{self, Write};

use serde::Serialize;

/// Write a single NDJSON line.
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event).map_err(io::Error::from)?;
    out.write_all(b"\n")
}

pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)?;
    out.flush()
}

/// Wrap a serializable payload as `{"event", "command", "data"}`.
pub fn result_event<T: Serialize>(
    event: &str,
    command: &str,
    data: &T,
) -> io::Result<serde_json::Value> {
    let data = serde_json::to_value(data).map_err(io::Error::from)?;
    Ok(serde_json::json!({
        "event": event,
        "command": command,
        "data": data,
    }))
}

pub fn emit_result<T: Serialize>(event: &str, command: &str, data: &T) -> io::Result<()> {
    emit(result_event(event, command, data)?)
}
