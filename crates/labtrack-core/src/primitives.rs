//! # Fixed Primitives
//!
//! Hardcoded runtime constants for the LabTrack core.
//!
//! The reference ranges live next to the classifier (see [`crate::classifier`]);
//! this module holds the display thresholds, layout sizes and input limits
//! that every other module agrees on. They are compiled in and immutable.

// =============================================================================
// COMPLIANCE BUCKETS
// =============================================================================

/// Lowest percentage (inclusive) rendered as "good".
pub const GOOD_THRESHOLD: u8 = 90;

/// Lowest percentage (inclusive) rendered as "warning".
///
/// Anything below this is "bad".
pub const WARNING_THRESHOLD: u8 = 75;

// =============================================================================
// CALENDAR LAYOUT
// =============================================================================

/// Days per calendar row. Rows start on Sunday.
pub const DAYS_PER_WEEK: usize = 7;

/// Total cells in a month grid (6 rows x 7 days).
///
/// Leading cells belong to the previous month, trailing cells to the next.
pub const CALENDAR_CELLS: usize = 42;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Minimum length of an uploaded document body, in characters.
pub const MIN_UPLOAD_CONTENT_LENGTH: usize = 50;

/// Maximum length of an uploaded document title, in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Maximum length of an uploaded document category, in characters.
pub const MAX_CATEGORY_LENGTH: usize = 64;

/// Maximum length of a corrective action note, in characters.
pub const MAX_CORRECTIVE_ACTION_LENGTH: usize = 2000;

/// Maximum length of a single chat message, in characters.
pub const MAX_CHAT_MESSAGE_LENGTH: usize = 4000;
