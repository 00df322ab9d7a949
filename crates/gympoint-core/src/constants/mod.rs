// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for pagination, env configuration, messages, and job queues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list.

/// Service names used in logs and token issuers
pub mod service_names {
    /// Main HTTP server
    pub const GYMPOINT_SERVER: &str = "gympoint-server";
}

/// Pagination limits
pub mod pagination {
    /// Fixed page size for student listings
    pub const STUDENT_PAGE_SIZE: u32 = 20;
    /// First page number
    pub const FIRST_PAGE: u32 = 1;
}

/// Default values for configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 3333;
    /// Default bind address
    pub const HOST: &str = "127.0.0.1";
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/gympoint.db";
    /// Default pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
    /// Default token lifetime (7 days)
    pub const JWT_EXPIRY_HOURS: i64 = 168;
    /// Default request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Limits enforced on configuration and input
pub mod limits {
    /// Minimum accepted length for the token signing secret
    pub const MIN_JWT_SECRET_LEN: usize = 16;
    /// Upper bound for plan duration in months
    pub const MAX_PLAN_LENGTH_MONTHS: i64 = 120;
}

/// Environment variable names
pub mod env_config {
    /// Listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Pool size
    pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
    /// Token signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// Token lifetime
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Optional Redis connection for the job queue
    pub const REDIS_URL: &str = "REDIS_URL";
    /// Request timeout
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Background job identifiers
pub mod jobs {
    /// Enrollment confirmation email
    pub const ENROLLMENT_CONFIRMATION: &str = "enrollment_confirmation";
    /// Prefix of the Redis lists jobs are pushed onto
    pub const REDIS_QUEUE_PREFIX: &str = "gympoint:jobs";
}

/// Client-facing messages
pub mod messages {
    /// Authorization header missing
    pub const TOKEN_NOT_PROVIDED: &str = "token not provided";
    /// Any token verification failure
    pub const AUTHENTICATION_FAILED: &str = "authentication failed";
    /// Generic validation failure
    pub const VALIDATION_FAILED: &str = "validation failed";
    /// Duplicate student email
    pub const EMAIL_ALREADY_REGISTERED: &str = "email already registered";
    /// Overlapping enrollment
    pub const ENROLLMENT_OVERLAP: &str = "student already has an active enrollment for this period";
    /// Start date before now
    pub const DATE_IN_PAST: &str = "start date is in the past";
    /// Empty enrollment listing
    pub const NO_ENROLLMENTS: &str = "no enrollments found";
    /// Second cancellation
    pub const ENROLLMENT_ALREADY_CANCELED: &str = "enrollment has already been canceled";
    /// Successful cancellation
    pub const ENROLLMENT_CANCELED: &str = "enrollment canceled";
}
