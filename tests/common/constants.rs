//! Shared constants for end-to-end tests
//!
//! When fixture data changes, update only this file.

#![allow(dead_code)]

// ============================================================================
// Fixture slugs and names
// ============================================================================

pub const SINGER_SLUG: &str = "abida-parveen";
pub const SINGER_NAME: &str = "Abida Parveen";

pub const QAWWAL_SLUG: &str = "nusrat-fateh-ali-khan";
pub const QAWWAL_NAME: &str = "Nusrat Fateh Ali Khan";

pub const BLOG_SLUG: &str = "riyaz-basics";
pub const BLOG_TITLE: &str = "Riyaz Basics";

pub const CLASS_SLUG: &str = "sitar-classes-in-lahore";
pub const CLASS_TITLE: &str = "Sitar Classes in Lahore";

/// Number of canonical class pages the seed migration inserts.
pub const CANONICAL_CLASS_COUNT: usize = 5;

/// Well-formed identifier that no fixture uses.
pub const UNKNOWN_ID: &str = "0123456789abcdef01234567";

/// Malformed identifier, rejected before reaching the store.
pub const MALFORMED_ID: &str = "abc123";

// ============================================================================
// Test images
// ============================================================================

/// PNG signature plus IHDR chunk header, enough for content sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Upload limit configured on test servers (bytes)
pub const TEST_MAX_UPLOAD_BYTES: usize = 64 * 1024;
