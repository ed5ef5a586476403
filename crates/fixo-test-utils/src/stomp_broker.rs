// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process STOMP broker for end-to-end realtime tests.
//!
//! Speaks just enough STOMP to answer the CONNECT handshake, observe
//! SUBSCRIBE/UNSUBSCRIBE/SEND frames, and publish MESSAGE frames, so
//! tests exercise the real connection task. All methods panic on
//! protocol surprises; that is the assertion.

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

use fixo_realtime::{Command, Frame};

const WAIT: Duration = Duration::from_secs(5);

/// Listening broker endpoint. Each client connection becomes a
/// [`StompSession`] after the handshake.
pub struct StompBroker {
    listener: TcpListener,
    addr: SocketAddr,
}

impl StompBroker {
    pub async fn bind() -> StompBroker {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test broker");
        let addr = listener.local_addr().expect("broker local addr");
        StompBroker { listener, addr }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Accepts one connection and completes the CONNECT/CONNECTED
    /// handshake.
    pub async fn accept(&self) -> StompSession {
        let (stream, _) = timeout(WAIT, self.listener.accept())
            .await
            .expect("timed out waiting for connection")
            .expect("accept failed");
        let mut ws = timeout(WAIT, accept_async(stream))
            .await
            .expect("timed out in websocket handshake")
            .expect("websocket handshake failed");

        let connect = next_frame(&mut ws).await;
        assert_eq!(connect.command, Command::Connect);
        assert_eq!(connect.get_header("accept-version"), Some("1.2"));
        ws.send(Message::text(
            Frame::new(Command::Connected)
                .header("version", "1.2")
                .to_wire(),
        ))
        .await
        .expect("send CONNECTED");
        StompSession { ws }
    }
}

/// One established broker-side session.
pub struct StompSession {
    ws: WebSocketStream<TcpStream>,
}

impl StompSession {
    /// Next frame from the client, asserting its command.
    pub async fn expect(&mut self, command: Command) -> Frame {
        let frame = next_frame(&mut self.ws).await;
        assert_eq!(frame.command, command, "unexpected frame: {frame:?}");
        frame
    }

    /// Publishes a MESSAGE frame to the given destination.
    pub async fn publish(&mut self, destination: &str, body: &serde_json::Value) {
        self.ws
            .send(Message::text(
                Frame::new(Command::Message)
                    .header("destination", destination)
                    .header("message-id", "m-1")
                    .header("subscription", "sub-1")
                    .body(body.to_string())
                    .to_wire(),
            ))
            .await
            .expect("publish MESSAGE");
    }
}

async fn next_frame(ws: &mut WebSocketStream<TcpStream>) -> Frame {
    loop {
        let msg = timeout(WAIT, ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("connection closed")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            if let Some(frame) = Frame::parse(text.as_str()).expect("unparseable frame") {
                return frame;
            }
        }
    }
}
