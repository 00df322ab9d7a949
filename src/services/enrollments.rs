// ABOUTME: Enrollment lifecycle rules: period and price computation, overlap checks, cancellation
// ABOUTME: Queues a confirmation email job after each successful creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Enrollment Manager
//!
//! An enrollment chosen for day `D` on a plan of `n` months covers
//! `[end_of_day(D), end_of_day(D) + n months]` and costs `n` times the plan's
//! monthly price. A student may hold any number of enrollments as long as no
//! two non-canceled ones collide under [`EnrollmentPeriod::collides_with`].
//!
//! The overlap check and the write are separate statements, so two
//! concurrent requests for the same student can both pass the check.

use crate::constants::messages;
use crate::database::{EnrollmentRepository, NewEnrollment, PlanRepository, StudentRepository};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Enrollment, EnrollmentPeriod, EnrollmentStatus, Plan, Student};
use crate::notifications::{EnrollmentConfirmation, NotificationJob, NotificationSink};
use crate::validation::{
    validate_create_enrollment, validate_update_enrollment, CreateEnrollmentRequest,
    UpdateEnrollmentRequest,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// The empty listing answers 400 rather than the usual 401 for missing data
const EMPTY_LIST_STATUS: u16 = 400;

/// Body returned by a successful cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResponse {
    /// Confirmation text
    pub message: String,
}

/// Enrollment operations
pub struct EnrollmentService<'a, R: ?Sized> {
    repository: &'a R,
    notifications: &'a dyn NotificationSink,
}

impl<'a, R> EnrollmentService<'a, R>
where
    R: StudentRepository + PlanRepository + EnrollmentRepository + ?Sized,
{
    /// Borrow the repository and sink for one operation
    pub fn new(repository: &'a R, notifications: &'a dyn NotificationSink) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    async fn resolve_student(&self, id: Option<i64>) -> AppResult<Student> {
        let student = match id {
            Some(id) => self.repository.find_student(id).await?,
            None => None,
        };
        student.ok_or_else(|| AppError::not_found("student"))
    }

    async fn resolve_plan(&self, id: Option<i64>) -> AppResult<Plan> {
        let plan = match id {
            Some(id) => self.repository.find_plan(id).await?,
            None => None,
        };
        plan.ok_or_else(|| AppError::not_found("plan"))
    }

    /// Compute the period for `plan` from `start_date` and reject past starts
    fn plan_period(plan: &Plan, start_date: NaiveDate) -> AppResult<EnrollmentPeriod> {
        let period = EnrollmentPeriod::from_start_date(start_date, plan.length)
            .ok_or_else(|| AppError::invalid_date("start date is out of range"))?;

        if period.starts_before(Utc::now()) {
            return Err(AppError::invalid_date(messages::DATE_IN_PAST));
        }
        Ok(period)
    }

    /// Reject `period` if it collides with another active enrollment of the student
    async fn ensure_no_overlap(
        &self,
        student_id: i64,
        period: &EnrollmentPeriod,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let candidates = self
            .repository
            .find_overlapping(student_id, period.start, period.end, exclude_id)
            .await?;

        if candidates
            .iter()
            .any(|existing| period.collides_with(&existing.period()))
        {
            return Err(AppError::conflict(messages::ENROLLMENT_OVERLAP));
        }
        Ok(())
    }

    /// Enroll a student in a plan and queue the confirmation email
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad payload, `RESOURCE_NOT_FOUND` for an unknown
    /// student or plan, `INVALID_DATE` for a past start, `RESOURCE_CONFLICT`
    /// for an overlapping period, or an internal error if the job cannot be
    /// queued
    #[instrument(skip(self, request), fields(operation = "create_enrollment"))]
    pub async fn create(&self, request: CreateEnrollmentRequest) -> AppResult<Enrollment> {
        let request = validate_create_enrollment(request)?;

        let student = self.resolve_student(request.student_id).await?;
        let plan = self.resolve_plan(request.plan_id).await?;
        let period = Self::plan_period(&plan, request.start_date)?;
        self.ensure_no_overlap(student.id, &period, None).await?;

        let enrollment = self
            .repository
            .create_enrollment(&NewEnrollment {
                student_id: student.id,
                plan_id: plan.id,
                period,
                price: plan.total_price(),
            })
            .await?;

        self.notifications
            .enqueue(NotificationJob::EnrollmentConfirmation(
                EnrollmentConfirmation::new(&student, &plan, &enrollment),
            ))
            .await?;

        info!(
            enrollment_id = enrollment.id,
            student_id = student.id,
            plan_id = plan.id,
            "Enrollment created"
        );
        Ok(enrollment)
    }

    /// Every enrollment, canceled ones included
    ///
    /// # Errors
    ///
    /// `RESOURCE_NOT_FOUND` (400) when there are none
    #[instrument(skip(self), fields(operation = "list_enrollments"))]
    pub async fn list(&self) -> AppResult<Vec<Enrollment>> {
        let enrollments = self.repository.list_enrollments().await?;
        if enrollments.is_empty() {
            return Err(
                AppError::new(ErrorCode::ResourceNotFound, messages::NO_ENROLLMENTS)
                    .with_http_status(EMPTY_LIST_STATUS),
            );
        }
        Ok(enrollments)
    }

    /// Re-point an enrollment at a student, plan and start date
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad payload, `RESOURCE_NOT_FOUND` for an unknown
    /// enrollment, student or plan, `INVALID_DATE` for a past start,
    /// `RESOURCE_CONFLICT` for an overlapping period
    #[instrument(skip(self, request), fields(operation = "update_enrollment"))]
    pub async fn update(&self, id: i64, request: UpdateEnrollmentRequest) -> AppResult<Enrollment> {
        let request = validate_update_enrollment(request)?;

        if self.repository.find_enrollment(id).await?.is_none() {
            return Err(AppError::not_found("enrollment"));
        }

        let student = self.resolve_student(Some(request.student_id)).await?;
        let plan = self.resolve_plan(Some(request.plan_id)).await?;
        let period = Self::plan_period(&plan, request.start_date)?;
        self.ensure_no_overlap(student.id, &period, Some(id)).await?;

        let updated = self
            .repository
            .update_enrollment(
                id,
                &NewEnrollment {
                    student_id: student.id,
                    plan_id: plan.id,
                    period,
                    price: plan.total_price(),
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("enrollment"))?;

        info!(enrollment_id = id, "Enrollment updated");
        Ok(updated)
    }

    /// Soft-cancel an enrollment
    ///
    /// # Errors
    ///
    /// `RESOURCE_NOT_FOUND` for an unknown id, `ALREADY_CANCELED` for a
    /// second cancellation
    #[instrument(skip(self), fields(operation = "cancel_enrollment"))]
    pub async fn cancel(&self, id: i64) -> AppResult<CancelResponse> {
        let enrollment = self
            .repository
            .find_enrollment(id)
            .await?
            .ok_or_else(|| AppError::not_found("enrollment"))?;

        if enrollment.status() == EnrollmentStatus::Canceled {
            return Err(AppError::already_canceled(
                messages::ENROLLMENT_ALREADY_CANCELED,
            ));
        }

        self.repository
            .cancel_enrollment(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("enrollment"))?;

        info!(enrollment_id = id, "Enrollment canceled");
        Ok(CancelResponse {
            message: messages::ENROLLMENT_CANCELED.to_owned(),
        })
    }
}
