//! Adapter module - remote control via TCP socket with JSON protocol
//!
//! Exposes one engine to external clients (bots, test harnesses) over a
//! line-delimited JSON protocol. Every request gets exactly one response
//! line.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **input**: latch `action` (case-insensitive) with an optional `hold`
//! - **step**: advance one transition and return the snapshot
//! - **terminate**: edge-triggered terminate read
//!
//! ## Server → Client
//!
//! - **ack**: input accepted
//! - **snapshot**: field, preview, counters and flags
//! - **terminate**: `value` of the terminate read
//! - **error**: `invalid_message`, with the request's `seq` when known
//!
//! # Environment Variables
//!
//! - `BRICK_GAME_HOST`: Bind address (default: "127.0.0.1")
//! - `BRICK_GAME_PORT`: Port number (default: 7878, 0 = ephemeral)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"input","seq":1,"action":"left","hold":false}
//! Server -> Client: {"type":"ack","seq":1}
//! Client -> Server: {"type":"step","seq":2}
//! Server -> Client: {"type":"snapshot","seq":2,"field":[[0,0,...]],"next":[[...]],"score":0,...}
//! Client -> Server: {"type":"terminate","seq":3}
//! Server -> Client: {"type":"terminate","seq":3,"value":false}
//! ```

pub mod protocol;
pub mod server;

pub use brick_game_core as core;
pub use brick_game_types as types;

pub use protocol::{parse_request, ErrorCode, Request, Response, SnapshotMessage};
pub use server::{dispatch, handle_line, run_server, shared_engine, ServerConfig, SharedEngine};
