//! Domain-level constants.

// =============================================================================
// Pagination
// =============================================================================

/// Largest page a caller may request unless configured otherwise
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;
