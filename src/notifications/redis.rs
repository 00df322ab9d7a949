// ABOUTME: Redis-backed notification sink for out-of-process workers
// ABOUTME: Pushes JSON-encoded jobs onto one list per job kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{NotificationJob, NotificationSink};
use crate::constants::jobs::REDIS_QUEUE_PREFIX;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info, warn};

const CONNECT_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 200;

/// Sink that LPUSHes jobs onto `gympoint:jobs:<kind>`
#[derive(Clone)]
pub struct RedisSink {
    manager: ConnectionManager,
}

impl RedisSink {
    /// Connect to Redis, retrying with exponential backoff
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or every attempt fails
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::config(format!("Invalid Redis URL: {e}")))?;

        let mut delay_ms = INITIAL_RETRY_DELAY_MS;
        let mut attempt = 1;
        loop {
            match ConnectionManager::new(client.clone()).await {
                Ok(manager) => {
                    info!("Connected to Redis job queue");
                    return Ok(Self { manager });
                }
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    warn!(
                        "Redis connection attempt {attempt}/{CONNECT_ATTEMPTS} failed, retrying in {delay_ms}ms: {e}"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(AppError::internal(format!(
                        "Failed to connect to Redis after {CONNECT_ATTEMPTS} attempts: {e}"
                    )));
                }
            }
        }
    }

    /// Queue key for a job kind
    #[must_use]
    pub fn queue_key(kind: &str) -> String {
        format!("{REDIS_QUEUE_PREFIX}:{kind}")
    }
}

#[async_trait]
impl NotificationSink for RedisSink {
    async fn enqueue(&self, job: NotificationJob) -> AppResult<()> {
        let key = Self::queue_key(job.kind());
        let payload = serde_json::to_string(&job)?;

        let mut conn = self.manager.clone();
        conn.lpush::<_, _, ()>(&key, payload)
            .await
            .map_err(|e| AppError::internal(format!("Failed to push job to Redis: {e}")))?;

        debug!(queue = %key, "Notification job pushed to Redis");
        Ok(())
    }
}
