// ABOUTME: In-process notification sink backed by an unbounded tokio channel
// ABOUTME: A worker task drains the channel and hands rendered emails to a Mailer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{render, Mailer, NotificationJob, NotificationSink};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sink that queues jobs for the in-process worker
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<NotificationJob>,
}

impl ChannelSink {
    /// Create the sink and the receiving end the worker drains
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<NotificationJob>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn enqueue(&self, job: NotificationJob) -> AppResult<()> {
        let kind = job.kind();
        self.sender
            .send(job)
            .map_err(|_| AppError::internal("Notification worker is not running"))?;
        debug!(job.kind = kind, "Notification job queued");
        Ok(())
    }
}

/// Run the delivery loop until every sender is dropped
///
/// Delivery failures are logged and the job is dropped.
pub fn spawn_worker(
    mut receiver: UnboundedReceiver<NotificationJob>,
    mailer: Arc<dyn Mailer>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Notification worker started");
        while let Some(job) = receiver.recv().await {
            let message = render(&job);
            if let Err(e) = mailer.send(&message).await {
                warn!(job.kind = job.kind(), error = %e, "Failed to deliver notification");
            }
        }
        info!("Notification worker stopped");
    })
}
