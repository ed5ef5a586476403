// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal STOMP 1.2 frame codec.
//!
//! Wire shape:
//! ```text
//! COMMAND
//! header:value
//!
//! body^@
//! ```
//! A frame ends with a NUL octet; a bare LF between frames is a heart-beat.
//! Only the commands the marketplace broker actually exchanges are modeled.

use fixo_core::FixoError;

/// STOMP commands used by the client and broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Connect,
    Connected,
    Subscribe,
    Unsubscribe,
    Send,
    Message,
    Receipt,
    Error,
    Disconnect,
}

impl Command {
    fn as_str(self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Send => "SEND",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
            Command::Disconnect => "DISCONNECT",
        }
    }

    fn parse(s: &str) -> Result<Self, FixoError> {
        Ok(match s {
            "CONNECT" => Command::Connect,
            "CONNECTED" => Command::Connected,
            "SUBSCRIBE" => Command::Subscribe,
            "UNSUBSCRIBE" => Command::Unsubscribe,
            "SEND" => Command::Send,
            "MESSAGE" => Command::Message,
            "RECEIPT" => Command::Receipt,
            "ERROR" => Command::Error,
            "DISCONNECT" => Command::Disconnect,
            other => {
                return Err(FixoError::transport(format!(
                    "unknown STOMP command: {other}"
                )));
            }
        })
    }
}

/// A single STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Frame {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// First value of the named header, if present.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// CONNECT frame. Heart-beats are disabled; liveness comes from the
    /// WebSocket layer.
    pub fn connect(host: &str) -> Self {
        Frame::new(Command::Connect)
            .header("accept-version", "1.2")
            .header("host", host)
            .header("heart-beat", "0,0")
    }

    pub fn subscribe(id: &str, destination: &str) -> Self {
        Frame::new(Command::Subscribe)
            .header("id", id)
            .header("destination", destination)
            .header("ack", "auto")
    }

    pub fn unsubscribe(id: &str) -> Self {
        Frame::new(Command::Unsubscribe).header("id", id)
    }

    pub fn send(destination: &str, body: impl Into<String>) -> Self {
        let body = body.into();
        Frame::new(Command::Send)
            .header("destination", destination)
            .header("content-type", "application/json")
            .header("content-length", body.len().to_string())
            .body(body)
    }

    pub fn disconnect() -> Self {
        Frame::new(Command::Disconnect)
    }

    /// Serializes the frame to wire text, NUL-terminated.
    pub fn to_wire(&self) -> String {
        let mut out = String::new();
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            out.push_str(&escape_header(name));
            out.push(':');
            out.push_str(&escape_header(value));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parses one frame from wire text.
    ///
    /// Returns `Ok(None)` for a heart-beat (bare LF or empty input).
    pub fn parse(raw: &str) -> Result<Option<Frame>, FixoError> {
        let trimmed = raw.trim_start_matches(['\n', '\r']);
        if trimmed.is_empty() {
            return Ok(None);
        }

        // STOMP permits CRLF line endings.
        let (head, body) = match trimmed.split_once("\r\n\r\n") {
            Some(parts) => parts,
            None => trimmed
                .split_once("\n\n")
                .ok_or_else(|| FixoError::transport("STOMP frame missing header terminator"))?,
        };

        let mut lines = head.lines();
        let command_line = lines
            .next()
            .ok_or_else(|| FixoError::transport("empty STOMP frame"))?;
        let command = Command::parse(command_line.trim_end_matches('\r'))?;

        let mut headers = Vec::new();
        for line in lines {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| FixoError::transport(format!("malformed STOMP header: {line}")))?;
            headers.push((unescape_header(name)?, unescape_header(value)?));
        }

        let body = body.trim_end_matches('\0').to_string();
        Ok(Some(Frame {
            command,
            headers,
            body,
        }))
    }
}

/// STOMP 1.2 header escaping: backslash, LF, CR, and colon.
fn escape_header(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_header(s: &str) -> Result<String, FixoError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            other => {
                return Err(FixoError::transport(format!(
                    "invalid STOMP header escape: \\{}",
                    other.map(String::from).unwrap_or_default()
                )));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_frame_serializes() {
        let wire = Frame::subscribe("sub-1", "/topic/new-job/svc-7").to_wire();
        assert_eq!(
            wire,
            "SUBSCRIBE\nid:sub-1\ndestination:/topic/new-job/svc-7\nack:auto\n\n\0"
        );
    }

    #[test]
    fn send_frame_carries_body_and_length() {
        let wire = Frame::send("/app/chat/room-1", r#"{"content":"hi"}"#).to_wire();
        assert!(wire.starts_with("SEND\n"));
        assert!(wire.contains("destination:/app/chat/room-1\n"));
        assert!(wire.contains("content-length:16\n"));
        assert!(wire.ends_with("{\"content\":\"hi\"}\0"));
    }

    #[test]
    fn message_frame_parses() {
        let raw = "MESSAGE\ndestination:/topic/confirmPrice/JR-1\nmessage-id:7\nsubscription:sub-1\n\n{\"price\":450000}\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.command, Command::Message);
        assert_eq!(
            frame.get_header("destination"),
            Some("/topic/confirmPrice/JR-1")
        );
        assert_eq!(frame.body, r#"{"price":450000}"#);
    }

    #[test]
    fn connected_frame_with_crlf_parses() {
        let raw = "CONNECTED\r\nversion:1.2\r\n\r\n\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.command, Command::Connected);
        assert_eq!(frame.get_header("version"), Some("1.2"));
    }

    #[test]
    fn heartbeat_parses_to_none() {
        assert!(Frame::parse("\n").unwrap().is_none());
        assert!(Frame::parse("").unwrap().is_none());
    }

    #[test]
    fn round_trip_preserves_frame() {
        let frame = Frame::send("/app/x", r#"{"a":1}"#);
        let parsed = Frame::parse(&frame.to_wire()).unwrap().unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn header_escaping_round_trips() {
        let frame = Frame::new(Command::Send).header("weird", "a:b\\c\nd");
        let parsed = Frame::parse(&frame.to_wire()).unwrap().unwrap();
        assert_eq!(parsed.get_header("weird"), Some("a:b\\c\nd"));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Frame::parse("NACKNACK\n\nx\0").is_err());
    }

    #[test]
    fn missing_header_terminator_is_rejected() {
        assert!(Frame::parse("MESSAGE\ndestination:/t\0").is_err());
    }
}
