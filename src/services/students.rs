// ABOUTME: Student directory rules: creation with unique email, search, partial updates
// ABOUTME: Only the six-field StudentProfile projection leaves this service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use crate::constants::messages;
use crate::database::StudentRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::StudentProfile;
use crate::validation::{
    validate_create_student, validate_list_students, validate_update_student,
    CreateStudentRequest, ListStudentsQuery, UpdateStudentRequest,
};
use tracing::{info, instrument};

/// Duplicate emails answer 400 on creation, unlike the 401 of updates
const CREATE_CONFLICT_STATUS: u16 = 400;

/// Student directory operations
pub struct StudentService<'a, R: ?Sized> {
    students: &'a R,
}

impl<'a, R: StudentRepository + ?Sized> StudentService<'a, R> {
    /// Borrow a student repository for one operation
    pub const fn new(students: &'a R) -> Self {
        Self { students }
    }

    /// Register a student
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad payload, `RESOURCE_CONFLICT` (400) when the
    /// email is taken
    #[instrument(skip(self, request), fields(operation = "create_student"))]
    pub async fn create(&self, request: CreateStudentRequest) -> AppResult<StudentProfile> {
        let student = validate_create_student(request)?;

        if self.students.find_by_email(&student.email).await?.is_some() {
            return Err(AppError::conflict(messages::EMAIL_ALREADY_REGISTERED)
                .with_http_status(CREATE_CONFLICT_STATUS));
        }

        let created = self
            .students
            .create_student(&student)
            .await
            .map_err(|e| {
                // Lost a race with a concurrent registration of the same email
                if e.code == ErrorCode::ResourceConflict {
                    e.with_http_status(CREATE_CONFLICT_STATUS)
                } else {
                    e
                }
            })?;

        info!(student_id = created.id, "Student registered");
        Ok(created.into())
    }

    /// List students by name, optionally filtered
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` when the page is 0
    #[instrument(skip(self), fields(operation = "list_students"))]
    pub async fn list(&self, query: ListStudentsQuery) -> AppResult<Vec<StudentProfile>> {
        let query = validate_list_students(query)?;

        let students = match &query.name {
            Some(name) => self.students.search_by_name(name, query.page).await?,
            None => self.students.list_students(query.page).await?,
        };

        Ok(students.into_iter().map(StudentProfile::from).collect())
    }

    /// Apply the provided fields to a student
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad field, `RESOURCE_NOT_FOUND` for an unknown
    /// id, `RESOURCE_CONFLICT` when a changed email is taken
    #[instrument(skip(self, request), fields(operation = "update_student"))]
    pub async fn update(&self, id: i64, request: UpdateStudentRequest) -> AppResult<StudentProfile> {
        let changes = validate_update_student(request)?;

        let current = self
            .students
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::not_found("student"))?;

        if let Some(email) = changes.email.as_deref().filter(|email| *email != current.email) {
            if self.students.find_by_email(email).await?.is_some() {
                return Err(AppError::conflict(messages::EMAIL_ALREADY_REGISTERED));
            }
        }

        let updated = self
            .students
            .update_student(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("student"))?;

        info!(student_id = id, "Student updated");
        Ok(updated.into())
    }
}
