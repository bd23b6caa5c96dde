//! STOMP 1.2 frames.
//!
//! ```text
//! COMMAND\n
//! name:value\n      (zero or more, values escaped)
//! \n
//! body\0
//! ```
//!
//! Header escaping (`\\`, `\n`, `\r`, `\c`) applies to every command except
//! `CONNECT` and `CONNECTED`. A frame that is nothing but end-of-line bytes is
//! a heart-beat.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Connect,
    Connected,
    Send,
    Subscribe,
    Unsubscribe,
    Disconnect,
    Message,
    Receipt,
    Error,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Send => "SEND",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Disconnect => "DISCONNECT",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
        }
    }

    fn escapes_headers(&self) -> bool {
        !matches!(self, Command::Connect | Command::Connected)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CONNECT" | "STOMP" => Command::Connect,
            "CONNECTED" => Command::Connected,
            "SEND" => Command::Send,
            "SUBSCRIBE" => Command::Subscribe,
            "UNSUBSCRIBE" => Command::Unsubscribe,
            "DISCONNECT" => Command::Disconnect,
            "MESSAGE" => Command::Message,
            "RECEIPT" => Command::Receipt,
            "ERROR" => Command::Error,
            other => return Err(Error::frame(format!("unknown command `{}`", other))),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    /// In wire order. Repeated names are allowed; the first one wins.
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

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::with_capacity(64 + self.body.len());
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        if !self.body.is_empty() && self.header("content-length").is_none() {
            out.push_str(&format!("content-length:{}\n", self.body.len()));
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse one frame. `Ok(None)` is a heart-beat.
    pub fn parse(input: &str) -> Result<Option<Frame>, Error> {
        let input = input.trim_start_matches(|c| c == '\r' || c == '\n');
        if input.is_empty() || input == "\0" {
            return Ok(None);
        }

        let (head, rest) = input
            .split_once("\n\n")
            .or_else(|| input.split_once("\r\n\r\n"))
            .ok_or_else(|| Error::frame("missing blank line after headers"))?;

        let mut lines = head.lines().map(|l| l.trim_end_matches('\r'));
        let command: Command = lines
            .next()
            .ok_or_else(|| Error::frame("missing command"))?
            .parse()?;
        let escaped = command.escapes_headers();

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::frame(format!("header without colon: `{}`", line)))?;
            if escaped {
                headers.push((unescape_header(name)?, unescape_header(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        let mut frame = Frame {
            command,
            headers,
            body: String::new(),
        };

        frame.body = match frame.header("content-length") {
            Some(length) => {
                let length: usize = length
                    .parse()
                    .map_err(|_| Error::frame(format!("bad content-length `{}`", length)))?;
                rest.get(..length)
                    .ok_or_else(|| Error::frame("body shorter than content-length"))?
                    .to_string()
            }
            None => {
                let end = rest
                    .find('\0')
                    .ok_or_else(|| Error::frame("missing NUL terminator"))?;
                rest[..end].to_string()
            }
        };

        Ok(Some(frame))
    }
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            other => out.push(other),
        }
    }
    out
}

fn unescape_header(escaped: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
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
            Some(other) => {
                return Err(Error::frame(format!("undefined escape `\\{}`", other)));
            }
            None => return Err(Error::frame("dangling backslash in header")),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_send_with_content_length() {
        let frame = Frame::new(Command::Send)
            .with_header("destination", "/app/ping")
            .with_body("{}");
        assert_eq!(
            frame.encode(),
            "SEND\ndestination:/app/ping\ncontent-length:2\n\n{}\0"
        );
    }

    #[test]
    fn parses_message_frame() {
        let raw = "MESSAGE\nsubscription:sub-0\nmessage-id:7\ndestination:/topic/last-read-list.update\n\n{\"id\":1}\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.command, Command::Message);
        assert_eq!(frame.header("subscription"), Some("sub-0"));
        assert_eq!(frame.body, "{\"id\":1}");
    }

    #[test]
    fn header_values_are_escaped_and_unescaped() {
        let frame = Frame::new(Command::Send)
            .with_header("reply-to", "/topic/reply:a\\b\nc")
            .with_body("x");
        let encoded = frame.encode();
        assert!(encoded.contains("reply-to:/topic/reply\\ca\\\\b\\nc\n"));

        let parsed = Frame::parse(&encoded).unwrap().unwrap();
        assert_eq!(parsed.header("reply-to"), Some("/topic/reply:a\\b\nc"));
    }

    #[test]
    fn connect_frames_are_not_escaped() {
        let raw = "CONNECTED\nversion:1.2\nserver:test\\x\n\n\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.header("server"), Some("test\\x"));
    }

    #[test]
    fn undefined_escape_is_rejected() {
        let raw = "MESSAGE\nsubscription:a\\tb\n\n\0";
        assert!(Frame::parse(raw).is_err());
    }

    #[test]
    fn first_repeated_header_wins() {
        let raw = "MESSAGE\nfoo:first\nfoo:second\n\n\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.header("foo"), Some("first"));
    }

    #[test]
    fn heartbeat_parses_to_none() {
        assert_eq!(Frame::parse("\n").unwrap(), None);
        assert_eq!(Frame::parse("\r\n").unwrap(), None);
    }

    #[test]
    fn content_length_allows_nul_in_body() {
        let raw = "MESSAGE\ncontent-length:3\n\na\0b\0";
        let frame = Frame::parse(raw).unwrap().unwrap();
        assert_eq!(frame.body, "a\0b");
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = Frame::parse("BOGUS\n\n\0").unwrap_err();
        assert!(err.to_string().contains("BOGUS"));
    }

    #[test]
    fn missing_terminator_is_rejected() {
        assert!(Frame::parse("MESSAGE\nfoo:bar\n\nbody").is_err());
    }
}
