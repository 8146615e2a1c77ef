//! Test support: a scripted mock of the trading service and a recording
//! notifier.

use fast_core::{TradeOutcome, TradeSignal};
use fast_notify::Notifier;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

/// Per-connection behavior of the scripted service.
#[derive(Debug, Clone, Default)]
pub struct ServiceScript {
    /// Reject the authorize handshake with this message.
    pub reject_auth: Option<String>,
    /// Reject proposals for these durations with the mapped message.
    pub reject_proposal_for: HashMap<u32, String>,
    /// Delay proposal replies for these durations (milliseconds).
    pub delay_proposal_ms: HashMap<u32, u64>,
    /// Reply to proposals with a success shape that carries no id.
    pub malformed_proposal: bool,
    /// Never answer the proposal request (forces a client timeout).
    pub stall_proposal: bool,
    /// Reject every buy with this message.
    pub reject_buy: Option<String>,
}

/// A scripted WebSocket trading service for integration tests.
///
/// Accepts any number of connections, walks each through the
/// authorize/proposal/buy exchange according to the script, and records
/// every request it receives.
pub struct ScriptedService {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    requests: Arc<Mutex<Vec<Value>>>,
    connections: Arc<Mutex<u32>>,
}

impl ScriptedService {
    /// Start the service on an available port.
    pub async fn start(script: ServiceScript) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let connections: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let requests_clone = requests.clone();
        let connections_clone = connections.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        let script = script.clone();
                        let requests = requests_clone.clone();
                        let connections = connections_clone.clone();
                        tokio::spawn(handle_connection(stream, script, requests, connections));
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            requests,
            connections,
        }
    }

    /// The service's WebSocket URL.
    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Number of connections accepted so far.
    pub async fn connection_count(&self) -> u32 {
        *self.connections.lock().await
    }

    /// Count received requests carrying the given top-level key.
    pub async fn requests_with_key(&self, key: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|v| v.get(key).is_some())
            .count()
    }

    /// Shut the service down.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn handle_connection(
    stream: TcpStream,
    script: ServiceScript,
    requests: Arc<Mutex<Vec<Value>>>,
    connections: Arc<Mutex<u32>>,
) {
    let connection_no = {
        let mut count = connections.lock().await;
        *count += 1;
        *count
    };

    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {e}");
            return;
        }
    };
    let (mut write, mut read) = ws_stream.split();

    // The proposal id this connection issued, if any.
    let mut issued_id: Option<String> = None;

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                let request: Value = match serde_json::from_str(&text) {
                    Ok(v) => v,
                    Err(_) => continue,
                };
                requests.lock().await.push(request.clone());

                let reply = if request.get("authorize").is_some() {
                    match &script.reject_auth {
                        Some(message) => {
                            json!({"error": {"message": message, "code": "AuthorizationRequired"}})
                        }
                        None => json!({"authorize": {"loginid": "CR-TEST"}}),
                    }
                } else if request.get("proposal").is_some() {
                    let duration = request["duration"].as_u64().unwrap_or(0) as u32;
                    if script.stall_proposal {
                        continue;
                    }
                    if let Some(delay) = script.delay_proposal_ms.get(&duration) {
                        tokio::time::sleep(std::time::Duration::from_millis(*delay)).await;
                    }
                    if let Some(message) = script.reject_proposal_for.get(&duration) {
                        json!({"error": {"message": message, "code": "ContractBuyValidationError"}})
                    } else if script.malformed_proposal {
                        json!({"proposal": {"ask_price": 9.5}})
                    } else {
                        let id = format!("prop-{connection_no}-{duration}");
                        issued_id = Some(id.clone());
                        json!({"proposal": {
                            "id": id,
                            "ask_price": request["amount"],
                            "longcode": format!("Win payout if the market rises in {duration}s"),
                        }})
                    }
                } else if let Some(buy_id) = request.get("buy").and_then(Value::as_str) {
                    if let Some(message) = &script.reject_buy {
                        json!({"error": {"message": message, "code": "InsufficientBalance"}})
                    } else if issued_id.as_deref() == Some(buy_id) {
                        json!({"buy": {
                            "contract_id": 1000 + u64::from(connection_no),
                            "buy_price": request["price"],
                            "transaction_id": 5000 + u64::from(connection_no),
                            "longcode": "Win payout if the market rises",
                        }})
                    } else {
                        json!({"error": {"message": "UnknownProposal", "code": "InvalidContractProposal"}})
                    }
                } else {
                    json!({"error": {"message": "UnrecognisedRequest"}})
                };

                if write.send(Message::Text(reply.to_string())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }
}

/// Notifier that records every handed-off outcome for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    events: std::sync::Mutex<Vec<(TradeSignal, TradeOutcome)>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<(TradeSignal, TradeOutcome)> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, signal: &TradeSignal, outcome: &TradeOutcome) {
        self.events
            .lock()
            .unwrap()
            .push((signal.clone(), outcome.clone()));
    }
}
