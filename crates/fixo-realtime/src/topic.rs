// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broker destination builders.
//!
//! Topic paths are fixed by the backend; these helpers keep the string
//! formats in one place. Note the broker's mixed naming: kebab-case for
//! most topics but camelCase for price confirmation.

use fixo_core::{JobCode, RoomCode, ServiceId};

/// New job requests posted in a service category, watched by workers.
pub fn new_job(service: &ServiceId) -> String {
    format!("/topic/new-job/{service}")
}

/// Quotes arriving for a service category.
pub fn send_quote(service: &ServiceId) -> String {
    format!("/topic/send-quote/{service}")
}

/// Cancellation of a specific job request.
pub fn job_canceled(code: &JobCode) -> String {
    format!("/topic/job-canceled/{code}")
}

/// Final price confirmation for a booking the customer placed.
pub fn confirm_price(code: &JobCode) -> String {
    format!("/topic/confirmPrice/{code}")
}

/// Chat messages for a room.
pub fn chat(room: &RoomCode) -> String {
    format!("/topic/chat/{room}")
}

/// Worker location updates while a job is in progress.
pub fn worker_location(code: &JobCode) -> String {
    format!("/topic/worker-location/{code}")
}

/// Application destination for outbound chat messages.
pub fn chat_send(room: &RoomCode) -> String {
    format!("/app/chat/{room}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_paths_match_broker_conventions() {
        let job = JobCode::from("JR-42");
        let service = ServiceId::from("svc-plumbing");
        let room = RoomCode::from("room-9");

        assert_eq!(new_job(&service), "/topic/new-job/svc-plumbing");
        assert_eq!(send_quote(&service), "/topic/send-quote/svc-plumbing");
        assert_eq!(job_canceled(&job), "/topic/job-canceled/JR-42");
        assert_eq!(confirm_price(&job), "/topic/confirmPrice/JR-42");
        assert_eq!(chat(&room), "/topic/chat/room-9");
        assert_eq!(worker_location(&job), "/topic/worker-location/JR-42");
        assert_eq!(chat_send(&room), "/app/chat/room-9");
    }
}
