// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime client: one broker connection for the process lifetime.
//!
//! A single background task owns the WebSocket. It reconnects with a fixed
//! delay, performs the STOMP handshake, and after every CONNECTED frame
//! replays a SUBSCRIBE for each topic in the registry. Callers never deal
//! with connection state when subscribing: [`RealtimeClient::subscribe`]
//! always returns a live handle, and the intent is carried to the broker
//! whenever a session is up. Outbound [`RealtimeClient::send`] is the only
//! operation that fails while disconnected.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use uuid::Uuid;

use fixo_config::RealtimeConfig;
use fixo_core::FixoError;

use crate::frame::{Command, Frame};
use crate::registry::SubscriptionRegistry;

type WsSink = futures::stream::SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

enum ClientCommand {
    Subscribe(String),
    Unsubscribe(String),
    Send { destination: String, body: String },
    Shutdown,
}

/// A live subscription to one broker topic.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) removes
/// the subscriber immediately; no message dispatched afterwards reaches it.
/// When the last local subscriber of a topic goes away the broker
/// subscription is torn down too.
pub struct Subscription {
    topic: String,
    id: Uuid,
    rx: mpsc::Receiver<Value>,
    registry: Arc<SubscriptionRegistry>,
    commands: mpsc::UnboundedSender<ClientCommand>,
    released: bool,
}

impl Subscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Next message for this topic. `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Value> {
        self.rx.try_recv().ok()
    }

    /// Explicit teardown. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.rx.close();
        if self.registry.remove(&self.topic, self.id) {
            let _ = self
                .commands
                .send(ClientCommand::Unsubscribe(self.topic.clone()));
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Handle to the realtime connection task.
pub struct RealtimeClient {
    registry: Arc<SubscriptionRegistry>,
    commands: mpsc::UnboundedSender<ClientCommand>,
    connected: Arc<AtomicBool>,
    capacity: usize,
}

impl RealtimeClient {
    /// Spawns the connection task and returns immediately; the first
    /// connection attempt happens in the background.
    pub fn start(config: RealtimeConfig) -> Self {
        let registry = Arc::new(SubscriptionRegistry::new());
        let connected = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(run_connection(
            config.clone(),
            Arc::clone(&registry),
            Arc::clone(&connected),
            rx,
        ));

        Self {
            registry,
            commands: tx,
            connected,
            capacity: config.channel_capacity,
        }
    }

    /// Registers interest in a topic. Always succeeds: if the connection
    /// is down, the SUBSCRIBE frame is sent on the next (re)connect.
    pub fn subscribe(&self, topic: impl Into<String>) -> Subscription {
        let topic = topic.into();
        let registered = self.registry.register(&topic, self.capacity);
        if registered.topic_created {
            // Ignore a closed command channel: the replay on reconnect
            // covers the intent, and after shutdown there is nothing to do.
            let _ = self.commands.send(ClientCommand::Subscribe(topic.clone()));
        }
        Subscription {
            topic,
            id: registered.id,
            rx: registered.rx,
            registry: Arc::clone(&self.registry),
            commands: self.commands.clone(),
            released: false,
        }
    }

    /// Sends a JSON payload to an application destination.
    ///
    /// Unlike subscriptions, sends are not queued across outages; callers
    /// get an immediate error and fall back to the REST path.
    pub fn send(&self, destination: &str, payload: &Value) -> Result<(), FixoError> {
        if !self.is_connected() {
            return Err(FixoError::transport("realtime connection is down"));
        }
        self.commands
            .send(ClientCommand::Send {
                destination: destination.to_string(),
                body: payload.to_string(),
            })
            .map_err(|_| FixoError::transport("realtime task has shut down"))
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Asks the connection task to disconnect and exit.
    pub fn shutdown(&self) {
        let _ = self.commands.send(ClientCommand::Shutdown);
    }
}

enum Flow {
    Reconnect,
    Shutdown,
}

async fn run_connection(
    config: RealtimeConfig,
    registry: Arc<SubscriptionRegistry>,
    connected: Arc<AtomicBool>,
    mut commands: mpsc::UnboundedReceiver<ClientCommand>,
) {
    let delay = Duration::from_secs(config.reconnect_delay_secs);
    loop {
        match connect_async(config.ws_url.as_str()).await {
            Ok((ws, _)) => {
                info!(url = %config.ws_url, "websocket connected");
                let flow = drive(ws, &config, &registry, &connected, &mut commands).await;
                connected.store(false, Ordering::SeqCst);
                if matches!(flow, Flow::Shutdown) {
                    info!("realtime task shutting down");
                    return;
                }
                warn!(delay_secs = config.reconnect_delay_secs, "broker session lost, reconnecting");
            }
            Err(e) => {
                warn!(url = %config.ws_url, error = %e, "websocket connect failed");
            }
        }
        sleep(delay).await;
    }
}

/// Runs one broker session until the socket drops or shutdown is requested.
async fn drive(
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    config: &RealtimeConfig,
    registry: &SubscriptionRegistry,
    connected: &AtomicBool,
    commands: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> Flow {
    let (mut sink, mut stream) = ws.split();
    // Broker subscription ids for this session only; rebuilt on reconnect.
    let mut broker_subs: std::collections::HashMap<String, String> = std::collections::HashMap::new();
    let mut sub_seq: u64 = 0;
    let mut session_up = false;

    if send_frame(&mut sink, &Frame::connect(&stomp_host(&config.ws_url))).await.is_err() {
        return Flow::Reconnect;
    }

    loop {
        tokio::select! {
            msg = stream.next() => {
                let msg = match msg {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        warn!(error = %e, "websocket read error");
                        return Flow::Reconnect;
                    }
                    None => return Flow::Reconnect,
                };
                match msg {
                    Message::Text(text) => {
                        let frame = match Frame::parse(text.as_str()) {
                            Ok(Some(frame)) => frame,
                            Ok(None) => continue,
                            Err(e) => {
                                warn!(error = %e, "unparseable STOMP frame, skipping");
                                continue;
                            }
                        };
                        match frame.command {
                            Command::Connected => {
                                session_up = true;
                                connected.store(true, Ordering::SeqCst);
                                info!("STOMP session established");
                                for topic in registry.topics() {
                                    if subscribe_at_broker(
                                        &mut sink, &mut broker_subs, &mut sub_seq, &topic,
                                    )
                                    .await
                                    .is_err()
                                    {
                                        return Flow::Reconnect;
                                    }
                                }
                            }
                            Command::Message => {
                                handle_message(registry, &frame);
                            }
                            Command::Error => {
                                warn!(
                                    message = frame.get_header("message").unwrap_or("<none>"),
                                    body = %frame.body,
                                    "broker ERROR frame"
                                );
                                return Flow::Reconnect;
                            }
                            other => {
                                debug!(command = ?other, "ignoring broker frame");
                            }
                        }
                    }
                    Message::Ping(payload) => {
                        if sink.send(Message::Pong(payload)).await.is_err() {
                            return Flow::Reconnect;
                        }
                    }
                    Message::Close(_) => return Flow::Reconnect,
                    _ => {}
                }
            }
            cmd = commands.recv() => {
                let Some(cmd) = cmd else {
                    // All client handles dropped; leave politely.
                    let _ = send_frame(&mut sink, &Frame::disconnect()).await;
                    return Flow::Shutdown;
                };
                match cmd {
                    ClientCommand::Subscribe(topic) => {
                        // Skip stale intents: the topic may have been
                        // released again while this command was queued.
                        if session_up
                            && registry.has_topic(&topic)
                            && !broker_subs.contains_key(&topic)
                            && subscribe_at_broker(
                                &mut sink, &mut broker_subs, &mut sub_seq, &topic,
                            )
                            .await
                            .is_err()
                        {
                            return Flow::Reconnect;
                        }
                    }
                    ClientCommand::Unsubscribe(topic) => {
                        // Only tear down if no new subscriber reclaimed the
                        // topic since the command was queued.
                        if !registry.has_topic(&topic) {
                            if let Some(id) = broker_subs.remove(&topic) {
                                debug!(%topic, "unsubscribing at broker");
                                if send_frame(&mut sink, &Frame::unsubscribe(&id)).await.is_err() {
                                    return Flow::Reconnect;
                                }
                            }
                        }
                    }
                    ClientCommand::Send { destination, body } => {
                        if !session_up {
                            warn!(%destination, "dropping send, session not established");
                            continue;
                        }
                        if send_frame(&mut sink, &Frame::send(&destination, body)).await.is_err() {
                            return Flow::Reconnect;
                        }
                    }
                    ClientCommand::Shutdown => {
                        let _ = send_frame(&mut sink, &Frame::disconnect()).await;
                        return Flow::Shutdown;
                    }
                }
            }
        }
    }
}

fn handle_message(registry: &SubscriptionRegistry, frame: &Frame) {
    let Some(destination) = frame.get_header("destination") else {
        warn!("MESSAGE frame without destination header");
        return;
    };
    let payload: Value = match serde_json::from_str(&frame.body) {
        Ok(value) => value,
        Err(e) => {
            warn!(%destination, error = %e, "non-JSON message body, skipping");
            return;
        }
    };
    let delivered = registry.dispatch(destination, &payload);
    debug!(%destination, delivered, "broker message dispatched");
}

async fn subscribe_at_broker(
    sink: &mut WsSink,
    broker_subs: &mut std::collections::HashMap<String, String>,
    sub_seq: &mut u64,
    topic: &str,
) -> Result<(), FixoError> {
    *sub_seq += 1;
    let id = format!("sub-{sub_seq}");
    debug!(%topic, %id, "subscribing at broker");
    send_frame(sink, &Frame::subscribe(&id, topic)).await?;
    broker_subs.insert(topic.to_string(), id);
    Ok(())
}

async fn send_frame(sink: &mut WsSink, frame: &Frame) -> Result<(), FixoError> {
    sink.send(Message::text(frame.to_wire()))
        .await
        .map_err(|e| FixoError::Transport {
            message: "websocket send failed".to_string(),
            source: Some(Box::new(e)),
        })
}

/// The `host` STOMP header; brokers use it for virtual-host routing.
fn stomp_host(ws_url: &str) -> String {
    ws_url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split(['/', ':']).next())
        .unwrap_or("localhost")
        .to_string()
}
