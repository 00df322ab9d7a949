// ABOUTME: Fire-and-forget job queue for enrollment confirmation emails
// ABOUTME: Defines the NotificationSink contract, the job payloads, and sink construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Notifications
//!
//! Handlers await [`NotificationSink::enqueue`] only; delivery happens
//! elsewhere. The in-process [`ChannelSink`] hands jobs to a worker task that
//! renders and mails them. The [`RedisSink`] pushes them onto a list for an
//! external worker.

mod channel;
mod mailer;
mod redis;

pub use channel::{spawn_worker, ChannelSink};
pub use mailer::{render, EmailMessage, LogMailer, Mailer};
pub use redis::RedisSink;

use crate::config::QueueConfig;
use crate::constants::jobs;
use crate::errors::AppResult;
use crate::models::{Enrollment, Plan, Student};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Everything the confirmation email needs, captured at enrollment time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentConfirmation {
    /// Recipient name
    pub student_name: String,
    /// Recipient address
    pub student_email: String,
    /// Plan title
    pub plan_title: String,
    /// Plan length in months
    pub plan_length: u32,
    /// Plan monthly price
    pub plan_price: f64,
    /// Formatted first day
    pub start_date: String,
    /// Formatted last day
    pub end_date: String,
    /// Total enrollment price
    pub total_price: f64,
}

/// Human-readable date used in emails, e.g. "10 January 2024"
fn format_email_date(instant: DateTime<Utc>) -> String {
    instant.format("%d %B %Y").to_string()
}

impl EnrollmentConfirmation {
    /// Build the payload for a freshly created enrollment
    #[must_use]
    pub fn new(student: &Student, plan: &Plan, enrollment: &Enrollment) -> Self {
        Self {
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            plan_title: plan.title.clone(),
            plan_length: plan.length,
            plan_price: plan.price,
            start_date: format_email_date(enrollment.start_date),
            end_date: format_email_date(enrollment.end_date),
            total_price: enrollment.price,
        }
    }
}

/// A unit of background work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum NotificationJob {
    /// Confirmation email after an enrollment is created
    EnrollmentConfirmation(EnrollmentConfirmation),
}

impl NotificationJob {
    /// Stable job identifier, also the Redis queue suffix
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EnrollmentConfirmation(_) => jobs::ENROLLMENT_CONFIRMATION,
        }
    }
}

/// Destination for background jobs
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Queue a job without waiting for it to run
    ///
    /// # Errors
    ///
    /// Returns an error if the job could not be queued
    async fn enqueue(&self, job: NotificationJob) -> AppResult<()>;
}

/// Build the configured sink
///
/// Returns the Redis sink when a Redis URL is configured, otherwise the
/// channel sink together with its running worker.
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable
pub async fn build_sink(
    config: &QueueConfig,
) -> AppResult<(Arc<dyn NotificationSink>, Option<JoinHandle<()>>)> {
    if let Some(url) = &config.redis_url {
        let sink = RedisSink::connect(url).await?;
        info!("Notification jobs will be pushed to Redis");
        return Ok((Arc::new(sink), None));
    }

    let (sink, receiver) = ChannelSink::new();
    let worker = spawn_worker(receiver, Arc::new(LogMailer));
    info!("Notification jobs will be delivered by the in-process worker");
    Ok((Arc::new(sink), Some(worker)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_email_dates_are_spelled_out() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
        assert_eq!(format_email_date(instant), "10 January 2024");
    }

    #[test]
    fn test_job_serializes_with_kind_tag() {
        let job = NotificationJob::EnrollmentConfirmation(EnrollmentConfirmation {
            student_name: "Ana".to_owned(),
            student_email: "ana@example.com".to_owned(),
            plan_title: "Gold".to_owned(),
            plan_length: 3,
            plan_price: 100.0,
            start_date: "10 January 2024".to_owned(),
            end_date: "10 April 2024".to_owned(),
            total_price: 300.0,
        });

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["kind"], "enrollment_confirmation");
        assert_eq!(json["payload"]["plan_title"], "Gold");
        assert_eq!(job.kind(), "enrollment_confirmation");
    }
}
