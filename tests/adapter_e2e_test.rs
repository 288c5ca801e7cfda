use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use brick_game::adapter::{run_server, shared_engine, ServerConfig};
use brick_game::core::MemoryStore;
use brick_game::snake::SnakeGame;
use brick_game::tetris::TetrisGame;

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn request(&mut self, line: &str) -> serde_json::Value {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();

        let reply = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("no reply in time")
            .unwrap()
            .expect("connection closed");
        serde_json::from_str(&reply).unwrap()
    }
}

async fn start(engine: brick_game::adapter::SharedEngine) -> Client {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config, engine, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, writer) = stream.into_split();
    Client {
        lines: BufReader::new(read_half).lines(),
        writer,
    }
}

fn filled(snapshot: &serde_json::Value) -> usize {
    snapshot["field"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .filter(|c| c.as_u64() != Some(0))
        .count()
}

#[tokio::test]
async fn adapter_step_input_and_terminate() {
    let engine = shared_engine(TetrisGame::with_store(7, MemoryStore::new()));
    let mut client = start(engine).await;

    let snap = client.request(r#"{"type":"step","seq":1}"#).await;
    assert_eq!(snap["type"], "snapshot");
    assert_eq!(snap["seq"], 1);
    assert_eq!(filled(&snap), 0);

    let snap = client.request(r#"{"type":"step","seq":2}"#).await;
    assert_eq!(filled(&snap), 4);
    assert_eq!(snap["level"], 1);
    assert_eq!(snap["speed_ms"], 32);

    let ack = client
        .request(r#"{"type":"input","seq":3,"action":"Action","hold":true}"#)
        .await;
    assert_eq!(ack, serde_json::json!({"type": "ack", "seq": 3}));

    let value = client.request(r#"{"type":"terminate","seq":4}"#).await;
    assert_eq!(value["value"], false);

    client
        .request(r#"{"type":"input","seq":5,"action":"terminate"}"#)
        .await;
    let snap = client.request(r#"{"type":"step","seq":6}"#).await;
    assert_eq!(snap["game_over"], true);

    let first = client.request(r#"{"type":"terminate","seq":7}"#).await;
    let second = client.request(r#"{"type":"terminate","seq":8}"#).await;
    assert_eq!(first["value"], true);
    assert_eq!(second["value"], false);
}

#[tokio::test]
async fn adapter_rejects_bad_lines_and_keeps_serving() {
    let engine = shared_engine(SnakeGame::with_store(MemoryStore::new()));
    let mut client = start(engine).await;

    let err = client.request("{not json").await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "invalid_message");
    assert!(err["seq"].is_null());

    let err = client
        .request(r#"{"type":"input","seq":2,"action":"fly"}"#)
        .await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["seq"], 2);

    let snap = client.request(r#"{"type":"step","seq":3}"#).await;
    assert_eq!(snap["type"], "snapshot");
    assert_eq!(snap["next"], serde_json::json!([[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]));
    assert_eq!(filled(&snap), 5);
}
