//! Live channel frame codec.
//!
//! The backend pushes tree-change notifications over Socket.IO v4 on a
//! WebSocket. Each text frame is an Engine.IO packet; message packets wrap
//! a Socket.IO packet:
//!
//! | Frame            | Meaning                         |
//! |------------------|---------------------------------|
//! | `0{...}`         | Engine.IO open (handshake)      |
//! | `1`              | Engine.IO close                 |
//! | `2` / `3`        | ping / pong                     |
//! | `40{...}`        | namespace connected             |
//! | `41`             | namespace disconnected          |
//! | `42["name",...]` | event                           |
//! | `44{...}`        | connect error                   |

use serde_json::Value;

use crate::config::live::REFRESH_EVENT;

/// Packet the client sends to join the default namespace.
pub const CONNECT_PACKET: &str = "40";

/// Answer to an Engine.IO ping.
pub const PONG_PACKET: &str = "3";

/// Notifications relevant to the tree store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveEvent {
    /// The channel is (re)connected
    Connected,
    /// The tree changed on the backend (`file:refresh`)
    FileRefresh,
    /// The connection failed (`connect_error` or socket failure)
    ConnectError(String),
    /// The server closed the session
    Disconnected,
}

/// A decoded text frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Open,
    Close,
    Ping,
    Pong,
    Connected,
    Disconnected,
    Event { name: String, args: Vec<Value> },
    ConnectError(String),
    /// Anything else (upgrade, noop, acks, binary, malformed)
    Unknown,
}

impl Frame {
    /// Reply the client must send for this frame, if any.
    pub fn reply(&self) -> Option<&'static str> {
        match self {
            Frame::Open => Some(CONNECT_PACKET),
            Frame::Ping => Some(PONG_PACKET),
            _ => None,
        }
    }

    /// Map the frame to a tree store notification.
    pub fn into_live_event(self) -> Option<LiveEvent> {
        match self {
            Frame::Connected => Some(LiveEvent::Connected),
            Frame::Event { name, .. } if name == REFRESH_EVENT => Some(LiveEvent::FileRefresh),
            Frame::ConnectError(message) => Some(LiveEvent::ConnectError(message)),
            Frame::Disconnected | Frame::Close => Some(LiveEvent::Disconnected),
            _ => None,
        }
    }
}

/// Decode one text frame.
pub fn decode_frame(text: &str) -> Frame {
    let mut chars = text.chars();
    match chars.next() {
        Some('0') => Frame::Open,
        Some('1') => Frame::Close,
        Some('2') => Frame::Ping,
        Some('3') => Frame::Pong,
        Some('4') => decode_socket_packet(chars.as_str()),
        _ => Frame::Unknown,
    }
}

fn decode_socket_packet(packet: &str) -> Frame {
    let mut chars = packet.chars();
    let kind = chars.next();
    let body = strip_namespace(chars.as_str());

    match kind {
        Some('0') => Frame::Connected,
        Some('1') => Frame::Disconnected,
        Some('2') => decode_event(body),
        Some('4') => Frame::ConnectError(connect_error_message(body)),
        _ => Frame::Unknown,
    }
}

/// Skip a `/namespace,` prefix; the default namespace is implicit.
fn strip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        match body.split_once(',') {
            Some((_, rest)) => rest,
            None => "",
        }
    } else {
        body
    }
}

fn decode_event(body: &str) -> Frame {
    // Optional ack id precedes the payload
    let payload = body.trim_start_matches(|c: char| c.is_ascii_digit());
    let Ok(Value::Array(mut items)) = serde_json::from_str::<Value>(payload) else {
        return Frame::Unknown;
    };
    if items.is_empty() {
        return Frame::Unknown;
    }
    match items.remove(0) {
        Value::String(name) => Frame::Event { name, args: items },
        _ => Frame::Unknown,
    }
}

fn connect_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("connect_error")
            .to_string(),
        Ok(Value::String(message)) => message,
        _ => "connect_error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_packets() {
        assert_eq!(
            decode_frame(r#"0{"sid":"abc","pingInterval":25000}"#),
            Frame::Open
        );
        assert_eq!(decode_frame("2"), Frame::Ping);
        assert_eq!(decode_frame("3"), Frame::Pong);
        assert_eq!(decode_frame("1"), Frame::Close);
        assert_eq!(decode_frame(""), Frame::Unknown);
        assert_eq!(decode_frame("6"), Frame::Unknown);
    }

    #[test]
    fn test_replies() {
        assert_eq!(decode_frame("0{}").reply(), Some(CONNECT_PACKET));
        assert_eq!(decode_frame("2").reply(), Some(PONG_PACKET));
        assert_eq!(decode_frame("40").reply(), None);
    }

    #[test]
    fn test_refresh_event() {
        let frame = decode_frame(r#"42["file:refresh"]"#);
        assert_eq!(
            frame,
            Frame::Event {
                name: "file:refresh".to_string(),
                args: vec![],
            }
        );
        assert_eq!(frame.into_live_event(), Some(LiveEvent::FileRefresh));
    }

    #[test]
    fn test_event_with_namespace_and_ack_id() {
        let frame = decode_frame(r#"42/project,17["file:refresh",{"path":"a"}]"#);
        assert!(matches!(
            &frame,
            Frame::Event { name, args } if name == "file:refresh" && args.len() == 1
        ));
    }

    #[test]
    fn test_other_events_are_ignored() {
        assert_eq!(decode_frame(r#"42["terminal:data","ls"]"#).into_live_event(), None);
        assert_eq!(decode_frame("42not json").into_live_event(), None);
        assert_eq!(decode_frame("42[]").into_live_event(), None);
    }

    #[test]
    fn test_connection_frames() {
        assert_eq!(
            decode_frame(r#"40{"sid":"x"}"#).into_live_event(),
            Some(LiveEvent::Connected)
        );
        assert_eq!(decode_frame("41").into_live_event(), Some(LiveEvent::Disconnected));
        assert_eq!(
            decode_frame(r#"44{"message":"Not authorized"}"#).into_live_event(),
            Some(LiveEvent::ConnectError("Not authorized".to_string()))
        );
        assert_eq!(
            decode_frame("44").into_live_event(),
            Some(LiveEvent::ConnectError("connect_error".to_string()))
        );
    }
}
