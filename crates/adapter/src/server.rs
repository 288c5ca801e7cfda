//! TCP server for the remote-control adapter
//!
//! Handles incoming connections and serves one engine to all of them.
//! Uses tokio for async networking; the engine itself sits behind a
//! `std::sync::Mutex` that is held for a single call only.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use log::{debug, info, trace, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::core::Engine;
use crate::protocol::{encode_line, parse_request, Request, Response, SnapshotMessage};

pub const ENV_HOST: &str = "BRICK_GAME_HOST";
pub const ENV_PORT: &str = "BRICK_GAME_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;

/// One engine shared by every connection.
pub type SharedEngine = Arc<Mutex<Box<dyn Engine>>>;

pub fn shared_engine(engine: impl Engine + 'static) -> SharedEngine {
    let engine: Box<dyn Engine> = Box::new(engine);
    Arc::new(Mutex::new(engine))
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// 0 picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; blank or unparsable values fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let host = value(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match value(ENV_PORT) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("ignoring invalid {ENV_PORT}={raw}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self { host, port }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid adapter address {}:{}", self.host, self.port))
    }
}

fn lock(engine: &SharedEngine) -> MutexGuard<'_, Box<dyn Engine>> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one request against the engine.
pub fn dispatch(engine: &SharedEngine, request: Request) -> Response {
    trace!("dispatch seq={}", request.seq());
    match request {
        Request::Input { seq, action, hold } => {
            lock(engine).submit_input(action, hold);
            Response::Ack { seq }
        }
        Request::Step { seq } => {
            let info = lock(engine).advance_and_snapshot();
            Response::Snapshot(SnapshotMessage::new(seq, &info))
        }
        Request::Terminate { seq } => {
            let value = lock(engine).take_terminate_once();
            Response::Terminate { seq, value }
        }
    }
}

/// Parse and dispatch one raw line.
pub fn handle_line(engine: &SharedEngine, line: &str) -> Response {
    match parse_request(line) {
        Ok(request) => dispatch(engine, request),
        Err(response) => {
            debug!("rejected request: {line}");
            response
        }
    }
}

/// Start the TCP server
///
/// `ready_tx` receives the bound address once the listener is up.
pub async fn run_server(
    config: ServerConfig,
    engine: SharedEngine,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let bound = listener.local_addr()?;
    info!("adapter listening on {bound}");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;

    // Accept incoming connections
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        info!("client {client_id} connected from {addr}");

        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, engine).await {
                warn!("client {client_id} error: {e}");
            }
            info!("client {client_id} disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(socket: TcpStream, engine: SharedEngine) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    let mut line = String::new();
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = handle_line(&engine, trimmed);
        if let Err(e) = encode_line(&response, &mut buf) {
            warn!("failed to encode response: {e}");
            continue;
        }
        writer.write_all(&buf).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GameInfo, GameKind, UserAction};

    /// Counts calls; game over once terminated.
    #[derive(Default)]
    struct Probe {
        steps: u32,
        over: bool,
        reported: bool,
    }

    impl Engine for Probe {
        fn kind(&self) -> GameKind {
            GameKind::Snake
        }

        fn submit_input(&mut self, action: UserAction, _held: bool) {
            if action == UserAction::Terminate {
                self.over = true;
            }
        }

        fn step(&mut self) {
            self.steps += 1;
        }

        fn snapshot_into(&self, out: &mut GameInfo) {
            out.clear();
            out.score = self.steps;
            out.game_over = self.over;
        }

        fn is_game_over(&self) -> bool {
            self.over
        }

        fn take_terminate_once(&mut self) -> bool {
            let first = self.over && !self.reported;
            self.reported |= self.over;
            first
        }
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 7878);

        let config = ServerConfig::from_lookup(|key| match key {
            ENV_HOST => Some("0.0.0.0".into()),
            ENV_PORT => Some(" 0 ".into()),
            _ => None,
        });
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 0);
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = ServerConfig::from_lookup(|key| (key == ENV_PORT).then(|| "70000".into()));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_bad_host_is_an_error_not_a_panic() {
        let config = ServerConfig {
            host: "not a host".into(),
            port: 1,
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_lines_drive_the_engine() {
        let engine = shared_engine(Probe::default());

        let ack = handle_line(&engine, r#"{"type":"input","seq":1,"action":"down","hold":true}"#);
        assert_eq!(ack, Response::Ack { seq: 1 });

        match handle_line(&engine, r#"{"type":"step","seq":2}"#) {
            Response::Snapshot(snap) => {
                assert_eq!(snap.seq, 2);
                assert_eq!(snap.score, 1);
            }
            other => panic!("expected snapshot, got {other:?}"),
        }

        handle_line(&engine, r#"{"type":"input","seq":3,"action":"terminate"}"#);
        assert_eq!(
            handle_line(&engine, r#"{"type":"terminate","seq":4}"#),
            Response::Terminate { seq: 4, value: true }
        );
        assert_eq!(
            handle_line(&engine, r#"{"type":"terminate","seq":5}"#),
            Response::Terminate { seq: 5, value: false }
        );
    }

    #[test]
    fn test_malformed_line_is_an_error_response() {
        let engine = shared_engine(Probe::default());
        assert!(matches!(
            handle_line(&engine, r#"{"type":"warp","seq":6}"#),
            Response::Error { seq: Some(6), .. }
        ));
    }
}
