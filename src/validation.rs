// ABOUTME: Request payloads and the per-operation validation that turns them into checked inputs
// ABOUTME: Failures collect a reason per field and surface as a 400 with details.fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Input Validation
//!
//! Every write operation has a `validate_*` function taking the raw request
//! payload and returning either a `Valid*` value, whose fields are known to
//! be present and well formed, or [`ValidationErrors`] listing each rejected
//! field. Payload fields are optional at the serde level so that a missing
//! field is reported by name instead of as a generic body rejection.

use crate::constants::{limits, messages, pagination::STUDENT_PAGE_SIZE};
use crate::errors::AppError;
use chrono::{DateTime, NaiveDate};
use gympoint_core::pagination::PageRequest;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

const REQUIRED: &str = "is required";

/// Per-field validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    /// Empty error set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`; the first reason per field wins
    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.fields
            .entry(field.to_owned())
            .or_insert_with(|| reason.into());
    }

    /// Whether no field failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reason recorded for `field`
    #[must_use]
    pub fn reason(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// `Ok(value)` when nothing failed
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Unwrap a required field, recording it as missing when absent
    fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, REQUIRED);
        }
        value
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::invalid_input(messages::VALIDATION_FAILED)
            .with_details(serde_json::json!({ "fields": errors.fields }))
    }
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

fn check_name(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "must not be blank");
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !is_valid_email(email) {
        errors.add("email", "must be a valid email address");
    }
}

/// Accept a calendar date or a full RFC 3339 timestamp and keep its date
fn parse_start_date(errors: &mut ValidationErrors, raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    if parsed.is_none() {
        errors.add("start_date", "must be a date (YYYY-MM-DD)");
    }
    parsed
}

// ============================================================================
// Students
// ============================================================================

/// Body of `POST /students`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStudentRequest {
    /// Full name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Age in years
    pub age: Option<i32>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in meters
    pub height: Option<f64>,
}

/// A student ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ValidStudent {
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Age in years
    pub age: i32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
}

/// Validate a student creation payload
///
/// # Errors
///
/// Returns the failing fields when any is missing or malformed
pub fn validate_create_student(
    request: CreateStudentRequest,
) -> Result<ValidStudent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = errors.require("name", request.name);
    if let Some(name) = &name {
        check_name(&mut errors, "name", name);
    }
    let email = errors.require("email", request.email);
    if let Some(email) = &email {
        check_email(&mut errors, email);
    }
    let age = errors.require("age", request.age);
    let weight = errors.require("weight", request.weight);
    let height = errors.require("height", request.height);

    match (name, email, age, weight, height) {
        (Some(name), Some(email), Some(age), Some(weight), Some(height)) => {
            errors.into_result(ValidStudent {
                name,
                email,
                age,
                weight,
                height,
            })
        }
        _ => Err(errors),
    }
}

/// Body of `PUT /students/:id`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    /// New name
    pub name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New age
    pub age: Option<i32>,
    /// New weight
    pub weight: Option<f64>,
    /// New height
    pub height: Option<f64>,
}

/// A checked partial student update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidStudentUpdate {
    /// New name
    pub name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New age
    pub age: Option<i32>,
    /// New weight
    pub weight: Option<f64>,
    /// New height
    pub height: Option<f64>,
}

/// Validate only the fields present in a student update
///
/// # Errors
///
/// Returns the failing fields when a provided value is malformed
pub fn validate_update_student(
    request: UpdateStudentRequest,
) -> Result<ValidStudentUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(name) = &request.name {
        check_name(&mut errors, "name", name);
    }
    if let Some(email) = &request.email {
        check_email(&mut errors, email);
    }

    errors.into_result(ValidStudentUpdate {
        name: request.name,
        email: request.email,
        age: request.age,
        weight: request.weight,
        height: request.height,
    })
}

/// Query string of `GET /students`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStudentsQuery {
    /// Case-insensitive name substring
    pub q: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

/// A checked student listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStudentQuery {
    /// Name filter; `None` lists everyone
    pub name: Option<String>,
    /// Page to return
    pub page: PageRequest,
}

/// Validate the student listing query
///
/// # Errors
///
/// Returns a `page` failure when the page is 0
pub fn validate_list_students(
    query: ListStudentsQuery,
) -> Result<ValidStudentQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(page) = PageRequest::new(query.page, STUDENT_PAGE_SIZE) else {
        errors.add("page", "must be at least 1");
        return Err(errors);
    };

    let name = query.q.filter(|q| !q.is_empty());
    errors.into_result(ValidStudentQuery { name, page })
}

// ============================================================================
// Plans
// ============================================================================

/// Body of `POST /plans`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlanRequest {
    /// Display title
    pub title: Option<String>,
    /// Duration in months
    pub length: Option<i64>,
    /// Monthly price
    pub price: Option<f64>,
}

/// A plan ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPlan {
    /// Display title
    pub title: String,
    /// Duration in months
    pub length: u32,
    /// Monthly price
    pub price: f64,
}

fn check_length(errors: &mut ValidationErrors, length: i64) -> Option<u32> {
    if (1..=limits::MAX_PLAN_LENGTH_MONTHS).contains(&length) {
        u32::try_from(length).ok()
    } else {
        errors.add(
            "length",
            format!(
                "must be between 1 and {} months",
                limits::MAX_PLAN_LENGTH_MONTHS
            ),
        );
        None
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    if !price.is_finite() || price < 0.0 {
        errors.add("price", "must be zero or more");
    }
}

/// Validate a plan creation payload
///
/// # Errors
///
/// Returns the failing fields when any is missing or out of range
pub fn validate_create_plan(request: CreatePlanRequest) -> Result<ValidPlan, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = errors.require("title", request.title);
    if let Some(title) = &title {
        check_name(&mut errors, "title", title);
    }
    let length = errors
        .require("length", request.length)
        .and_then(|length| check_length(&mut errors, length));
    let price = errors.require("price", request.price);
    if let Some(price) = price {
        check_price(&mut errors, price);
    }

    match (title, length, price) {
        (Some(title), Some(length), Some(price)) => errors.into_result(ValidPlan {
            title,
            length,
            price,
        }),
        _ => Err(errors),
    }
}

/// Body of `PUT /plans/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlanRequest {
    /// New title
    pub title: Option<String>,
    /// New duration
    pub length: Option<i64>,
    /// New monthly price
    pub price: Option<f64>,
}

/// A checked partial plan update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPlanUpdate {
    /// New title
    pub title: Option<String>,
    /// New duration
    pub length: Option<u32>,
    /// New monthly price
    pub price: Option<f64>,
}

/// Validate only the fields present in a plan update
///
/// # Errors
///
/// Returns the failing fields when a provided value is out of range
pub fn validate_update_plan(request: UpdatePlanRequest) -> Result<ValidPlanUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(title) = &request.title {
        check_name(&mut errors, "title", title);
    }
    let length = request
        .length
        .and_then(|length| check_length(&mut errors, length));
    if let Some(price) = request.price {
        check_price(&mut errors, price);
    }

    errors.into_result(ValidPlanUpdate {
        title: request.title,
        length,
        price: request.price,
    })
}

// ============================================================================
// Enrollments
// ============================================================================

/// Body of `POST /enrollments`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEnrollmentRequest {
    /// Student to enroll
    pub student_id: Option<i64>,
    /// Chosen plan
    pub plan_id: Option<i64>,
    /// First day, `YYYY-MM-DD` or an RFC 3339 timestamp
    pub start_date: Option<String>,
}

/// A checked enrollment creation
///
/// Ids stay optional: an absent id resolves as "not found" downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEnrollment {
    /// Student to enroll
    pub student_id: Option<i64>,
    /// Chosen plan
    pub plan_id: Option<i64>,
    /// First calendar day
    pub start_date: NaiveDate,
}

/// Validate an enrollment creation payload
///
/// # Errors
///
/// Returns a `start_date` failure when it is missing or not a date
pub fn validate_create_enrollment(
    request: CreateEnrollmentRequest,
) -> Result<ValidEnrollment, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let start_date = errors
        .require("start_date", request.start_date)
        .and_then(|raw| parse_start_date(&mut errors, &raw));

    match start_date {
        Some(start_date) => errors.into_result(ValidEnrollment {
            student_id: request.student_id,
            plan_id: request.plan_id,
            start_date,
        }),
        None => Err(errors),
    }
}

/// Body of `PUT /enrollments/:id`; every field is required
pub type UpdateEnrollmentRequest = CreateEnrollmentRequest;

/// A checked enrollment update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEnrollmentUpdate {
    /// Student to enroll
    pub student_id: i64,
    /// Chosen plan
    pub plan_id: i64,
    /// First calendar day
    pub start_date: NaiveDate,
}

/// Validate an enrollment update payload
///
/// # Errors
///
/// Returns the failing fields when any is missing or malformed
pub fn validate_update_enrollment(
    request: UpdateEnrollmentRequest,
) -> Result<ValidEnrollmentUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let student_id = errors.require("student_id", request.student_id);
    let plan_id = errors.require("plan_id", request.plan_id);
    let start_date = errors
        .require("start_date", request.start_date)
        .and_then(|raw| parse_start_date(&mut errors, &raw));

    match (student_id, plan_id, start_date) {
        (Some(student_id), Some(plan_id), Some(start_date)) => {
            errors.into_result(ValidEnrollmentUpdate {
                student_id,
                plan_id,
                start_date,
            })
        }
        _ => Err(errors),
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// Body of `POST /sessions`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    /// Admin email
    pub email: Option<String>,
    /// Admin password
    pub password: Option<String>,
}

/// Checked session credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ValidSession {
    /// Admin email
    pub email: String,
    /// Admin password
    pub password: String,
}

impl std::fmt::Debug for ValidSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidSession")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Validate session credentials
///
/// # Errors
///
/// Returns the failing fields when email or password is missing
pub fn validate_create_session(
    request: CreateSessionRequest,
) -> Result<ValidSession, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let email = errors.require("email", request.email);
    if let Some(email) = &email {
        check_email(&mut errors, email);
    }
    let password = errors
        .require("password", request.password)
        .filter(|password| {
            let present = !password.is_empty();
            if !present {
                errors.add("password", REQUIRED);
            }
            present
        });

    match (email, password) {
        (Some(email), Some(password)) => errors.into_result(ValidSession { email, password }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn student_request() -> CreateStudentRequest {
        CreateStudentRequest {
            name: Some("Ana Lima".to_owned()),
            email: Some("ana@example.com".to_owned()),
            age: Some(29),
            weight: Some(61.5),
            height: Some(1.68),
        }
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_complete_student_is_valid() {
        let student = validate_create_student(student_request()).unwrap();
        assert_eq!(student.email, "ana@example.com");
        assert_eq!(student.age, 29);
    }

    #[test]
    fn test_missing_student_fields_are_named() {
        let request = CreateStudentRequest {
            height: None,
            email: Some("not-an-email".to_owned()),
            ..student_request()
        };
        let errors = validate_create_student(request).unwrap_err();
        assert_eq!(errors.reason("height"), Some("is required"));
        assert_eq!(errors.reason("email"), Some("must be a valid email address"));
        assert!(errors.reason("name").is_none());
    }

    #[test]
    fn test_student_update_checks_only_provided_fields() {
        let update = validate_update_student(UpdateStudentRequest {
            age: Some(30),
            ..UpdateStudentRequest::default()
        })
        .unwrap();
        assert_eq!(update.age, Some(30));
        assert!(update.email.is_none());

        let errors = validate_update_student(UpdateStudentRequest {
            email: Some("broken".to_owned()),
            ..UpdateStudentRequest::default()
        })
        .unwrap_err();
        assert!(errors.reason("email").is_some());
    }

    #[test]
    fn test_page_zero_is_rejected() {
        let errors = validate_list_students(ListStudentsQuery {
            q: None,
            page: Some(0),
        })
        .unwrap_err();
        assert!(errors.reason("page").is_some());
    }

    #[test]
    fn test_empty_query_lists_everyone() {
        let query = validate_list_students(ListStudentsQuery {
            q: Some(String::new()),
            page: None,
        })
        .unwrap();
        assert!(query.name.is_none());
        assert_eq!(query.page.page, 1);
    }

    #[test]
    fn test_plan_length_bounds() {
        let request = |length| CreatePlanRequest {
            title: Some("Gold".to_owned()),
            length: Some(length),
            price: Some(100.0),
        };
        assert!(validate_create_plan(request(0)).is_err());
        assert!(validate_create_plan(request(-3)).is_err());
        assert_eq!(validate_create_plan(request(3)).unwrap().length, 3);
    }

    #[test]
    fn test_negative_plan_price_is_rejected() {
        let errors = validate_update_plan(UpdatePlanRequest {
            price: Some(-1.0),
            ..UpdatePlanRequest::default()
        })
        .unwrap_err();
        assert!(errors.reason("price").is_some());
    }

    #[test]
    fn test_enrollment_create_keeps_missing_ids() {
        let valid = validate_create_enrollment(CreateEnrollmentRequest {
            student_id: None,
            plan_id: Some(2),
            start_date: Some("2024-01-10".to_owned()),
        })
        .unwrap();
        assert!(valid.student_id.is_none());
        assert_eq!(valid.start_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_enrollment_start_date_accepts_timestamps() {
        let valid = validate_create_enrollment(CreateEnrollmentRequest {
            student_id: Some(1),
            plan_id: Some(1),
            start_date: Some("2024-01-10T08:30:00Z".to_owned()),
        })
        .unwrap();
        assert_eq!(valid.start_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_enrollment_start_date_is_required() {
        let errors = validate_create_enrollment(CreateEnrollmentRequest::default()).unwrap_err();
        assert_eq!(errors.reason("start_date"), Some("is required"));

        let errors = validate_create_enrollment(CreateEnrollmentRequest {
            start_date: Some("tomorrow".to_owned()),
            ..CreateEnrollmentRequest::default()
        })
        .unwrap_err();
        assert!(errors.reason("start_date").is_some());
    }

    #[test]
    fn test_enrollment_update_requires_everything() {
        let errors = validate_update_enrollment(UpdateEnrollmentRequest {
            student_id: Some(1),
            plan_id: None,
            start_date: None,
        })
        .unwrap_err();
        assert!(errors.reason("plan_id").is_some());
        assert!(errors.reason("start_date").is_some());
        assert!(errors.reason("student_id").is_none());
    }

    #[test]
    fn test_empty_password_is_required() {
        let errors = validate_create_session(CreateSessionRequest {
            email: Some("admin@gympoint.test".to_owned()),
            password: Some(String::new()),
        })
        .unwrap_err();
        assert_eq!(errors.reason("password"), Some("is required"));
    }

    #[test]
    fn test_validation_errors_become_400_with_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        let error = AppError::from(errors);

        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert_eq!(error.http_status(), 400);
        assert_eq!(error.details["fields"]["email"], "is required");
    }
}
