// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat endpoints.
//!
//! REST is the fallback path: live messages arrive over the
//! `/topic/chat/{roomCode}` realtime topic, and history is re-fetched here
//! on screen focus when the socket is down.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;

use fixo_core::{FixoError, RoomCode};

use crate::client::ApiClient;

/// A chat room between a customer and a worker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub code: RoomCode,
    pub peer_name: String,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single chat message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub room_code: RoomCode,
    pub sender_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ApiClient {
    /// Lists the caller's chat rooms.
    pub async fn chat_rooms(&self) -> Result<Vec<ChatRoom>, FixoError> {
        self.authorized(Method::GET, "/chat/rooms", None).await
    }

    /// Fetches the message history of a room.
    pub async fn chat_history(&self, room: &RoomCode) -> Result<Vec<ChatMessage>, FixoError> {
        self.authorized(Method::GET, &format!("/chat/rooms/{room}/messages"), None)
            .await
    }

    /// Sends a chat message over REST (fallback when the socket is down).
    pub async fn send_chat_message(
        &self,
        room: &RoomCode,
        content: &str,
    ) -> Result<ChatMessage, FixoError> {
        self.authorized(
            Method::POST,
            &format!("/chat/rooms/{room}/messages"),
            Some(serde_json::json!({"content": content})),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_deserializes_backend_shape() {
        let json = r#"{
            "id": "m-1",
            "roomCode": "room-9",
            "senderId": "u1",
            "content": "On my way",
            "sentAt": "2026-08-11T11:00:00Z"
        }"#;
        let msg: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.room_code, RoomCode("room-9".into()));
        assert_eq!(msg.content, "On my way");
    }

    #[test]
    fn chat_room_tolerates_missing_optionals() {
        let room: ChatRoom =
            serde_json::from_str(r#"{"code": "room-1", "peerName": "Pham D"}"#).unwrap();
        assert!(room.last_message.is_none());
        assert!(room.updated_at.is_none());
    }
}
