// ABOUTME: Repository traits for students, plans, enrollments, and admin users
// ABOUTME: Services depend on these traits; Database implements all of them over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use crate::errors::AppResult;
use crate::models::{AdminUser, Enrollment, EnrollmentPeriod, Plan, Student};
use crate::validation::{ValidPlan, ValidPlanUpdate, ValidStudent, ValidStudentUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gympoint_core::pagination::PageRequest;

/// Student storage
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student
    async fn create_student(&self, student: &ValidStudent) -> AppResult<Student>;

    /// Look a student up by id
    async fn find_student(&self, id: i64) -> AppResult<Option<Student>>;

    /// Look a student up by exact, case-sensitive email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>>;

    /// All students ordered by name
    async fn list_students(&self, page: PageRequest) -> AppResult<Vec<Student>>;

    /// Students whose name contains `substring`, case-insensitively, ordered by name
    ///
    /// `%` and `_` in `substring` match literally.
    async fn search_by_name(&self, substring: &str, page: PageRequest) -> AppResult<Vec<Student>>;

    /// Apply the provided fields; `None` if the student does not exist
    async fn update_student(
        &self,
        id: i64,
        changes: &ValidStudentUpdate,
    ) -> AppResult<Option<Student>>;
}

/// Plan storage
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Insert a plan
    async fn create_plan(&self, plan: &ValidPlan) -> AppResult<Plan>;

    /// Look a plan up by id
    async fn find_plan(&self, id: i64) -> AppResult<Option<Plan>>;

    /// All plans ordered by price
    async fn list_plans(&self) -> AppResult<Vec<Plan>>;

    /// Apply the provided fields; `None` if the plan does not exist
    async fn update_plan(&self, id: i64, changes: &ValidPlanUpdate) -> AppResult<Option<Plan>>;
}

/// Values written when an enrollment is created or rewritten
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewEnrollment {
    /// Enrolled student
    pub student_id: i64,
    /// Chosen plan
    pub plan_id: i64,
    /// Computed date range
    pub period: EnrollmentPeriod,
    /// Computed total price
    pub price: f64,
}

/// Enrollment storage
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert an enrollment
    async fn create_enrollment(&self, enrollment: &NewEnrollment) -> AppResult<Enrollment>;

    /// Look an enrollment up by id, canceled or not
    async fn find_enrollment(&self, id: i64) -> AppResult<Option<Enrollment>>;

    /// Every enrollment ordered by id
    async fn list_enrollments(&self) -> AppResult<Vec<Enrollment>>;

    /// Non-canceled enrollments of `student_id` with
    /// `start_date <= end AND end_date > start`, skipping `exclude_id`
    async fn find_overlapping(
        &self,
        student_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Enrollment>>;

    /// Rewrite student, plan, period and price; `None` if the enrollment does not exist
    async fn update_enrollment(
        &self,
        id: i64,
        enrollment: &NewEnrollment,
    ) -> AppResult<Option<Enrollment>>;

    /// Set `canceled_at`; `None` if the enrollment does not exist
    async fn cancel_enrollment(
        &self,
        id: i64,
        canceled_at: DateTime<Utc>,
    ) -> AppResult<Option<Enrollment>>;
}

/// Administrator storage
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    /// Insert an administrator
    async fn create_admin_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<AdminUser>;

    /// Look an administrator up by email
    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<AdminUser>>;
}
