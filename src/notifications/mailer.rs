// ABOUTME: Email rendering and the Mailer contract used by the notification worker
// ABOUTME: The default mailer writes rendered messages to the log instead of sending them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{EnrollmentConfirmation, NotificationJob};
use crate::errors::AppResult;
use async_trait::async_trait;
use std::fmt::Write as _;

/// A rendered plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient, `Name <address>`
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// Outbound email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the message
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;
}

/// Mailer that logs messages instead of delivering them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        tracing::info!(
            mail.to = %message.to,
            mail.subject = %message.subject,
            "Email delivered to log mailer:\n{}",
            message.body
        );
        Ok(())
    }
}

/// Render a job into the email it describes
#[must_use]
pub fn render(job: &NotificationJob) -> EmailMessage {
    match job {
        NotificationJob::EnrollmentConfirmation(confirmation) => {
            render_enrollment_confirmation(confirmation)
        }
    }
}

fn render_enrollment_confirmation(confirmation: &EnrollmentConfirmation) -> EmailMessage {
    let mut body = String::new();
    let _ = writeln!(body, "Hello {},", confirmation.student_name);
    let _ = writeln!(body);
    let _ = writeln!(body, "Your enrollment is confirmed.");
    let _ = writeln!(body);
    let _ = writeln!(
        body,
        "Plan: {} ({} month(s) at {:.2} per month)",
        confirmation.plan_title, confirmation.plan_length, confirmation.plan_price
    );
    let _ = writeln!(body, "Starts: {}", confirmation.start_date);
    let _ = writeln!(body, "Ends: {}", confirmation.end_date);
    let _ = writeln!(body, "Total: {:.2}", confirmation.total_price);
    let _ = writeln!(body);
    let _ = write!(body, "See you at the gym!");

    EmailMessage {
        to: format!(
            "{} <{}>",
            confirmation.student_name, confirmation.student_email
        ),
        subject: "Enrollment confirmed".to_owned(),
        body,
    }
}
