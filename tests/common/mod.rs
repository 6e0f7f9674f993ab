//! Shared utilities for integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use eth_gateway::config::GatewayConfig;
use eth_gateway::{EthereumClient, HttpServer, SharedService, Shutdown};

pub const SENDER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SENDER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Answer to one JSON-RPC call: `Ok(result)` or `Err(error message)`.
pub type RpcReply = Result<Value, String>;

/// A programmable JSON-RPC node speaking just enough HTTP/1.1.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockNode {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);

        let recorded = calls.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let handler = handler.clone();
                        let recorded = recorded.clone();
                        tokio::spawn(async move {
                            serve_one(socket, handler, recorded).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self { addr, calls }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Methods called so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Params of the first call to `method`.
    pub fn params_of(&self, method: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
    }
}

async fn serve_one<F>(mut socket: TcpStream, handler: Arc<F>, calls: Arc<Mutex<Vec<(String, Value)>>>)
where
    F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
{
    let Some(body) = read_body(&mut socket).await else {
        return;
    };
    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return,
    };

    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request.get("params").cloned().unwrap_or(Value::Null);
    calls.lock().unwrap().push((method.clone(), params.clone()));

    let reply = match handler(&method, &params) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": request["id"], "result": result }),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": request["id"],
            "error": { "code": -32000, "message": message }
        }),
    };
    let payload = reply.to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        payload.len(),
        payload
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
}

async fn read_body(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Some(String::from_utf8_lossy(&buf[header_end..header_end + content_length]).into_owned())
}

/// Start the gateway against `rpc_url` on an ephemeral port.
pub async fn start_gateway(rpc_url: &str) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.node.rpc_url = rpc_url.to_string();
    config.node.rpc_timeout_secs = 5;

    let client = EthereumClient::new(config.node.clone()).unwrap();
    let service: SharedService = Arc::new(client);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, service);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn zero_hash() -> String {
    format!("0x{}", "00".repeat(32))
}

/// A legacy transaction as a node returns it. `block` is `None` while pending.
pub fn legacy_tx(hash: &str, nonce: u64, block: Option<u64>) -> Value {
    json!({
        "type": "0x0",
        "hash": hash,
        "nonce": format!("0x{:x}", nonce),
        "blockHash": block.map(|_| format!("0x{}", "11".repeat(32))),
        "blockNumber": block.map(|n| format!("0x{:x}", n)),
        "transactionIndex": block.map(|_| "0x0"),
        "from": SENDER.to_lowercase(),
        "to": RECIPIENT.to_lowercase(),
        "value": "0xde0b6b3a7640000",
        "gasPrice": "0x3b9aca00",
        "gas": "0x5208",
        "input": "0x",
        "v": "0x1b",
        "r": "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8",
        "s": "0x5a3f8a2c1f6e5b5c1a3d9b0c8e7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e0f"
    })
}

/// A block header plus full transaction objects.
pub fn block(number: u64, transactions: Vec<Value>) -> Value {
    let empty_root = "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421";
    json!({
        "hash": format!("0x{}", "11".repeat(32)),
        "parentHash": zero_hash(),
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": "0x0000000000000000000000000000000000000000",
        "stateRoot": zero_hash(),
        "transactionsRoot": empty_root,
        "receiptsRoot": empty_root,
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "difficulty": "0x2",
        "number": format!("0x{:x}", number),
        "gasLimit": "0x6691b7",
        "gasUsed": "0x0",
        "timestamp": "0x65f0a1b0",
        "extraData": "0x",
        "mixHash": zero_hash(),
        "nonce": "0x0000000000000000",
        "totalDifficulty": "0xc8",
        "size": "0x3e8",
        "uncles": [],
        "transactions": transactions
    })
}
