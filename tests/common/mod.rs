//! Shared utilities for integration tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use oracle_feeder::node::{CommandRunner, NodeClient, NodeError, NodeResult};
use oracle_feeder::scheduler::BlockWatcher;

/// One recorded `setoracledata` call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Submission {
    pub oracle: String,
    pub timestamp: u64,
    pub prices: Value,
}

/// Recorded `appointoracle` call.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Appointment {
    pub id: String,
    pub address: String,
    pub feeds: Value,
    pub weightage: String,
}

#[derive(Default)]
struct FakeState {
    heights: VecDeque<u64>,
    counter: usize,
    appointments: Vec<Appointment>,
    submissions: Vec<Submission>,
    calls: Vec<Vec<String>>,
}

/// In-memory stand-in for the node CLI.
///
/// `getblockcount` answers from a queue of heights and fails once the queue
/// is empty, which is how tests stop the otherwise endless event loop.
#[derive(Default)]
pub struct FakeNode {
    state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl FakeNode {
    pub fn with_heights(heights: &[u64]) -> Arc<Self> {
        let node = Self::default();
        node.state.lock().unwrap().heights = heights.iter().copied().collect();
        Arc::new(node)
    }

    pub fn client(self: &Arc<Self>) -> NodeClient {
        NodeClient::new(self.clone(), Vec::new())
    }

    pub fn watcher(self: &Arc<Self>) -> BlockWatcher {
        BlockWatcher::new(self.client(), Duration::from_millis(1))
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.state.lock().unwrap().submissions.clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state.lock().unwrap().appointments.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .map(|c| c[0].clone())
            .collect()
    }

    fn failed(message: &str) -> NodeError {
        NodeError::ProcessFailed {
            code: Some(1),
            stderr: message.to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeNode {
    async fn output(&self, args: &[String]) -> NodeResult<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.to_vec());
        state.counter += 1;
        let n = state.counter;

        match args[0].as_str() {
            "getblockcount" => match state.heights.pop_front() {
                Some(height) => Ok(format!("{height}\n")),
                None => Err(Self::failed("chain halted")),
            },
            "getnewaddress" => Ok(format!("tf1qaddress{n}\n")),
            "appointoracle" => {
                let id = format!("{n:064x}");
                state.appointments.push(Appointment {
                    id: id.clone(),
                    address: args[1].clone(),
                    feeds: serde_json::from_str(&args[2]).unwrap(),
                    weightage: args[3].clone(),
                });
                Ok(format!("{id}\n"))
            }
            "listoracles" => {
                let ids: Vec<&str> = state.appointments.iter().map(|a| a.id.as_str()).collect();
                Ok(json!(ids).to_string())
            }
            "getoracledata" => {
                let latest = state
                    .submissions
                    .iter()
                    .rev()
                    .find(|s| s.oracle == args[1])
                    .map(|s| s.prices.clone())
                    .unwrap_or(Value::Null);
                Ok(json!({ "oracleid": args[1], "tokenPrices": latest }).to_string())
            }
            "setoracledata" => {
                state.submissions.push(Submission {
                    oracle: args[1].clone(),
                    timestamp: args[2].parse().unwrap(),
                    prices: serde_json::from_str(&args[3]).unwrap(),
                });
                Ok(format!("tx{n}\n"))
            }
            other => Err(Self::failed(&format!("unknown command {other}"))),
        }
    }
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// The handler receives the request line (e.g. `GET /quote?symbol=X HTTP/1.1`)
/// and returns a status code and body.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }
                        let request = String::from_utf8_lossy(&buf);
                        let request_line = request.lines().next().unwrap_or_default().to_string();

                        let (status, body) = f(request_line).await;
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
