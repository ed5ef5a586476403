// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Booking pipeline: placing a booking and following it to a confirmed
//! price.
//!
//! Placing a booking does three things, in order: create the job request
//! over REST, register its code in the persisted pending list, and
//! subscribe to that job's price-confirmation topic. The pending list is
//! the source of truth across restarts; [`Bookings::resume`] replays it at
//! launch so a confirmation arriving while the app was closed is still
//! caught on the next connect. A code leaves the list only when the
//! customer answers the proposed price or the job is canceled.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use fixo_api::ApiClient;
use fixo_api::endpoints::jobs::{JobRequest, NewJobRequest};
use fixo_core::{FixoError, JobCode};
use fixo_realtime::{RealtimeClient, Subscription, topic};
use fixo_storage::PendingConfirmationStore;

/// Price confirmation event published on `/topic/confirmPrice/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceConfirmation {
    pub job_request_code: JobCode,
    pub final_price: f64,
    #[serde(default)]
    pub worker_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A booking awaiting its price confirmation: the job code plus the live
/// topic subscription.
pub struct BookingWatch {
    code: JobCode,
    subscription: Subscription,
}

impl BookingWatch {
    pub fn code(&self) -> &JobCode {
        &self.code
    }

    /// Waits for the next confirmation event on this booking's topic.
    ///
    /// Payloads that do not parse as a confirmation are skipped; `None`
    /// means the subscription was torn down.
    pub async fn next_confirmation(&mut self) -> Option<PriceConfirmation> {
        loop {
            let payload = self.subscription.recv().await?;
            match serde_json::from_value::<PriceConfirmation>(payload) {
                Ok(confirmation) => return Some(confirmation),
                Err(e) => {
                    warn!(code = %self.code, error = %e, "unrecognized confirmation payload, skipping");
                }
            }
        }
    }
}

/// The booking pipeline, shared by the customer-facing flows.
#[derive(Clone)]
pub struct Bookings {
    api: ApiClient,
    realtime: Arc<RealtimeClient>,
    pending: PendingConfirmationStore,
}

impl Bookings {
    pub fn new(
        api: ApiClient,
        realtime: Arc<RealtimeClient>,
        pending: PendingConfirmationStore,
    ) -> Self {
        Self {
            api,
            realtime,
            pending,
        }
    }

    /// Places a booking and starts watching for its price confirmation.
    ///
    /// The job code is persisted before subscribing, so a crash between
    /// the two steps is repaired by [`Bookings::resume`] on next launch.
    pub async fn place(&self, request: &NewJobRequest) -> Result<(JobRequest, BookingWatch), FixoError> {
        let job = self.api.create_job(request).await?;
        self.pending.register(&job.code).await?;
        let watch = self.watch(job.code.clone());
        info!(code = %job.code, "booking placed, watching for price confirmation");
        Ok((job, watch))
    }

    /// Re-subscribes every persisted pending booking. Called at launch;
    /// reconnect replay within a running process is handled by the
    /// realtime layer itself.
    pub async fn resume(&self) -> Result<Vec<BookingWatch>, FixoError> {
        let codes = self.pending.all().await?;
        Ok(codes.into_iter().map(|code| self.watch(code)).collect())
    }

    /// Answers a proposed price. The backend call is booking-critical: on
    /// failure the watch is returned so the booking stays pending and the
    /// topic subscription stays live.
    pub async fn respond(
        &self,
        watch: BookingWatch,
        accept: bool,
    ) -> Result<(), (BookingWatch, FixoError)> {
        if let Err(e) = self.api.confirm_price(&watch.code, accept).await {
            return Err((watch, e));
        }
        let BookingWatch { code, subscription } = watch;
        subscription.unsubscribe();
        if let Err(e) = self.pending.remove(&code).await {
            warn!(code = %code, error = %e, "price answered but local cleanup failed");
        }
        info!(code = %code, accepted = accept, "price confirmation answered");
        Ok(())
    }

    /// Cancels a booking that has not been confirmed yet. The backend
    /// call is booking-critical: on failure the watch is returned so the
    /// booking stays pending.
    pub async fn cancel(&self, watch: BookingWatch) -> Result<(), (BookingWatch, FixoError)> {
        if let Err(e) = self.api.cancel_job(&watch.code).await {
            return Err((watch, e));
        }
        let BookingWatch { code, subscription } = watch;
        subscription.unsubscribe();
        // A leftover pending entry is harmless: resume() re-watches it and
        // the broker never publishes for a canceled job.
        if let Err(e) = self.pending.remove(&code).await {
            warn!(code = %code, error = %e, "canceled at backend but local cleanup failed");
        }
        info!(code = %code, "booking canceled");
        Ok(())
    }

    /// Removes a booking from the pending list and drops its subscription.
    /// Used when an external event (broker-side cancellation) ends the wait.
    pub async fn settle(&self, watch: BookingWatch) -> Result<(), FixoError> {
        let BookingWatch { code, subscription } = watch;
        subscription.unsubscribe();
        let removed = self.pending.remove(&code).await?;
        info!(code = %code, removed, "booking settled");
        Ok(())
    }

    /// The codes currently awaiting confirmation.
    pub async fn pending_codes(&self) -> Result<Vec<JobCode>, FixoError> {
        self.pending.all().await
    }

    fn watch(&self, code: JobCode) -> BookingWatch {
        let subscription = self.realtime.subscribe(topic::confirm_price(&code));
        BookingWatch { code, subscription }
    }
}
