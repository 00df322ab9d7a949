// ABOUTME: Student record and its public projection
// ABOUTME: The projection is the only shape that leaves the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gym member as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Database identity
    pub id: i64,
    /// Full name
    pub name: String,
    /// Unique contact email
    pub email: String,
    /// Age in years
    pub age: i32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a [`Student`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Database identity
    pub id: i64,
    /// Full name
    pub name: String,
    /// Unique contact email
    pub email: String,
    /// Age in years
    pub age: i32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in meters
    pub height: f64,
}

impl From<Student> for StudentProfile {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            age: student.age,
            weight: student.weight,
            height: student.height,
        }
    }
}
