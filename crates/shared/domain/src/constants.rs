//! Domain-level constants.

// =============================================================================
// Users
// =============================================================================

/// Message shown when a lookup by identifier finds nothing
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Identifiers are assigned by the store starting from 1
pub const MIN_USER_ID: i32 = 1;

/// Check if an identifier can refer to a stored user
pub fn is_valid_user_id(id: i32) -> bool {
    id >= MIN_USER_ID
}
