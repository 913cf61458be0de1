use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use tetris_sim::adapter::protocol::{create_next, create_start};
use tetris_sim::adapter::server::{run_server, ServerConfig};

async fn send(writer: &mut OwnedWriteHalf, line: &str) {
    writer.write_all(line.as_bytes()).await.unwrap();
    writer.write_all(b"\n").await.unwrap();
    writer.flush().await.unwrap();
}

async fn recv(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> serde_json::Value {
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .expect("expected response line");
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn adapter_start_next_get_and_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        // Missing file: the built-in example list is served.
        sequences_path: dir.path().join("input.txt"),
        max_sequence_len: 64,
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // start
    let start = serde_json::to_string(&create_start(1, "Q0,Q2,Q4,Q6,Q8")).unwrap();
    send(&mut write_half, &start).await;
    let started = recv(&mut lines).await;
    assert_eq!(started["type"], "started");
    assert_eq!(started["seq"], 1);
    assert_eq!(started["state"]["current_step"], 0);
    assert_eq!(started["state"]["total_steps"], 5);
    assert_eq!(started["state"]["status"], "playing");
    let game_id = started["game_id"].as_str().unwrap().to_string();

    // next, four squares side by side
    for seq in 2..6 {
        let next = serde_json::to_string(&create_next(seq, &game_id)).unwrap();
        send(&mut write_half, &next).await;
        let state = recv(&mut lines).await;
        assert_eq!(state["type"], "state");
        assert_eq!(state["seq"], seq);
        assert_eq!(state["state"]["current_height"], 2);
    }

    // the fifth square completes rows 0 and 1
    let next = serde_json::to_string(&create_next(6, &game_id)).unwrap();
    send(&mut write_half, &next).await;
    let state = recv(&mut lines).await;
    assert_eq!(state["state"]["status"], "completed");
    assert_eq!(state["state"]["current_height"], 0);
    assert_eq!(state["state"]["grid"].as_array().unwrap().len(), 0);
    let last = &state["state"]["moves_history"][4];
    assert_eq!(last["piece_type"], "Q");
    assert_eq!(last["column"], 8);
    assert_eq!(last["rows_cleared"], serde_json::json!([0, 1]));

    // get is a pure read
    let get = format!(r#"{{"type":"get","seq":7,"game_id":"{game_id}"}}"#);
    send(&mut write_half, &get).await;
    let again = recv(&mut lines).await;
    assert_eq!(again["seq"], 7);
    assert_eq!(again["state"], state["state"]);

    // sequences
    send(&mut write_half, r#"{"type":"sequences","seq":8}"#).await;
    let list = recv(&mut lines).await;
    assert_eq!(list["type"], "sequences");
    let heights: Vec<u64> = list["sequences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["expected_height"].as_u64().unwrap())
        .collect();
    assert_eq!(heights, vec![2, 4, 1, 0]);

    // errors keep the connection open
    send(&mut write_half, "not json").await;
    let err = recv(&mut lines).await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "invalid_message");

    send(&mut write_half, r#"{"type":"next","seq":9,"game_id":"game_404"}"#).await;
    let err = recv(&mut lines).await;
    assert_eq!(err["seq"], 9);
    assert_eq!(err["code"], "not_found");

    let long = "Q0,".repeat(40);
    let start = serde_json::to_string(&create_start(10, &long)).unwrap();
    send(&mut write_half, &start).await;
    let err = recv(&mut lines).await;
    assert_eq!(err["seq"], 10);
    assert_eq!(err["code"], "invalid_sequence");

    let start = serde_json::to_string(&create_start(11, "I8")).unwrap();
    send(&mut write_half, &start).await;
    let started = recv(&mut lines).await;
    let bad_id = started["game_id"].as_str().unwrap().to_string();
    assert_ne!(bad_id, game_id);

    let next = serde_json::to_string(&create_next(12, &bad_id)).unwrap();
    send(&mut write_half, &next).await;
    let err = recv(&mut lines).await;
    assert_eq!(err["seq"], 12);
    assert_eq!(err["code"], "move_failed");
    assert_eq!(err["reason"], "out_of_bounds");

    server_handle.abort();
}

#[tokio::test]
async fn adapter_games_shared_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        sequences_path: dir.path().join("missing.txt"),
        ..ServerConfig::default()
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .unwrap()
        .unwrap();

    let (r1, mut w1) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut lines1 = BufReader::new(r1).lines();
    send(&mut w1, &serde_json::to_string(&create_start(1, "Q0,Q1")).unwrap()).await;
    let started = recv(&mut lines1).await;
    let game_id = started["game_id"].as_str().unwrap().to_string();

    let (r2, mut w2) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut lines2 = BufReader::new(r2).lines();
    for seq in 1..3 {
        send(&mut w2, &serde_json::to_string(&create_next(seq, &game_id)).unwrap()).await;
        recv(&mut lines2).await;
    }

    let get = format!(r#"{{"type":"get","seq":2,"game_id":"{game_id}"}}"#);
    send(&mut w1, &get).await;
    let state = recv(&mut lines1).await;
    assert_eq!(state["state"]["current_height"], 4);
    assert_eq!(state["state"]["status"], "completed");

    server_handle.abort();
}

#[tokio::test]
async fn adapter_oversized_line_is_rejected_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        sequences_path: dir.path().join("missing.txt"),
        max_sequence_len: 16,
    };

    let (ready_tx, ready_rx) = oneshot::channel();
    let server_handle = tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .unwrap()
        .unwrap();

    let (read_half, mut write_half) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Several times the line limit (16 + envelope allowance).
    let huge = "Q0,".repeat(3000);
    let start = serde_json::to_string(&create_start(3, &huge)).unwrap();
    send(&mut write_half, &start).await;
    let err = recv(&mut lines).await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["seq"], 3);
    assert_eq!(err["code"], "invalid_message");

    // The rest of the long line was discarded; the connection still works.
    send(&mut write_half, r#"{"type":"sequences","seq":4}"#).await;
    let list = recv(&mut lines).await;
    assert_eq!(list["type"], "sequences");
    assert_eq!(list["seq"], 4);

    server_handle.abort();
}
