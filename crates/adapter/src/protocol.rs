//! Protocol module - JSON message types for the remote-control adapter
//!
//! Line-delimited JSON. Every request carries a `type` tag and a `seq`
//! number that the response echoes back.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Field, GameInfo, Preview, UserAction};

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Latch an action for the next step.
    Input {
        seq: u64,
        #[serde(
            serialize_with = "serialize_action",
            deserialize_with = "deserialize_action"
        )]
        action: UserAction,
        #[serde(default)]
        hold: bool,
    },
    /// Advance one transition and return the snapshot.
    Step { seq: u64 },
    /// Edge-triggered terminate read.
    Terminate { seq: u64 },
}

impl Request {
    pub fn seq(&self) -> u64 {
        match *self {
            Request::Input { seq, .. } | Request::Step { seq } | Request::Terminate { seq } => seq,
        }
    }
}

fn serialize_action<S: Serializer>(action: &UserAction, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(action.as_str())
}

fn deserialize_action<'de, D: Deserializer<'de>>(d: D) -> Result<UserAction, D::Error> {
    let name = String::deserialize(d)?;
    UserAction::from_str(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown action: {name}")))
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMessage {
    pub seq: u64,
    pub field: Field,
    pub next: Preview,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed_ms: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl SnapshotMessage {
    pub fn new(seq: u64, info: &GameInfo) -> Self {
        Self {
            seq,
            field: info.field,
            next: info.next,
            score: info.score,
            high_score: info.high_score,
            level: info.level,
            speed_ms: info.speed_ms,
            paused: info.paused,
            game_over: info.game_over,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ack {
        seq: u64,
    },
    Snapshot(SnapshotMessage),
    Terminate {
        seq: u64,
        value: bool,
    },
    Error {
        seq: Option<u64>,
        code: ErrorCode,
        message: String,
    },
}

impl Response {
    pub fn invalid(seq: Option<u64>, message: impl Into<String>) -> Self {
        Response::Error {
            seq,
            code: ErrorCode::InvalidMessage,
            message: message.into(),
        }
    }
}

/// Parse one request line.
///
/// On failure the returned error response carries the request's `seq`
/// when the line is valid JSON with a numeric `seq` field.
pub fn parse_request(line: &str) -> Result<Request, Response> {
    serde_json::from_str::<Request>(line).map_err(|e| {
        let seq = serde_json::from_str::<serde_json::Value>(line)
            .ok()
            .and_then(|v| v.get("seq").and_then(|s| s.as_u64()));
        Response::invalid(seq, e.to_string())
    })
}

/// Serialize `response` followed by a newline into `buf`.
pub fn encode_line(response: &Response, buf: &mut Vec<u8>) -> serde_json::Result<()> {
    buf.clear();
    serde_json::to_writer(&mut *buf, response)?;
    buf.push(b'\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CELL_FILLED;

    #[test]
    fn test_parse_input() {
        let req = parse_request(r#"{"type":"input","seq":3,"action":"LEFT","hold":false}"#);
        assert_eq!(
            req,
            Ok(Request::Input {
                seq: 3,
                action: UserAction::Left,
                hold: false
            })
        );
    }

    #[test]
    fn test_hold_defaults_to_false() {
        let req = parse_request(r#"{"type":"input","seq":1,"action":"action"}"#).unwrap();
        assert_eq!(
            req,
            Request::Input {
                seq: 1,
                action: UserAction::Action,
                hold: false
            }
        );
    }

    #[test]
    fn test_parse_step_and_terminate() {
        assert_eq!(
            parse_request(r#"{"type":"step","seq":9}"#),
            Ok(Request::Step { seq: 9 })
        );
        assert_eq!(
            parse_request(r#"{"type":"terminate","seq":10}"#).map(|r| r.seq()),
            Ok(10)
        );
    }

    #[test]
    fn test_unknown_action_keeps_seq() {
        let err = parse_request(r#"{"type":"input","seq":4,"action":"jump"}"#).unwrap_err();
        match err {
            Response::Error { seq, code, message } => {
                assert_eq!(seq, Some(4));
                assert_eq!(code, ErrorCode::InvalidMessage);
                assert!(message.contains("jump"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_has_null_seq() {
        let err = parse_request("not json").unwrap_err();
        let mut buf = Vec::new();
        encode_line(&err, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["type"], "error");
        assert!(v["seq"].is_null());
        assert_eq!(v["code"], "invalid_message");
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let mut info = GameInfo::default();
        info.field[19][0] = CELL_FILLED;
        info.score = 42;
        let mut buf = Vec::new();
        encode_line(&Response::Snapshot(SnapshotMessage::new(7, &info)), &mut buf).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["type"], "snapshot");
        assert_eq!(v["seq"], 7);
        assert_eq!(v["field"].as_array().unwrap().len(), 20);
        assert_eq!(v["field"][19][0], 1);
        assert_eq!(v["next"].as_array().unwrap().len(), 4);
        assert_eq!(v["score"], 42);
        assert_eq!(v["speed_ms"], 32);
        assert_eq!(v["game_over"], false);
    }

    #[test]
    fn test_ack_and_terminate_shape() {
        let mut buf = Vec::new();
        encode_line(&Response::Ack { seq: 1 }, &mut buf).unwrap();
        assert_eq!(buf, b"{\"type\":\"ack\",\"seq\":1}\n");

        encode_line(&Response::Terminate { seq: 2, value: true }, &mut buf).unwrap();
        assert_eq!(buf, b"{\"type\":\"terminate\",\"seq\":2,\"value\":true}\n");
    }
}
