//! Unified error codes
//!
//! Error codes are organized by range:
//! - 0xxx: General errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Rate limit exceeded
    TooManyRequests = 9,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// System errors (9xxx) are logged when rendered
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Default client-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::TooManyRequests => "Too many requests, try again later",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_system() {
        assert!(ErrorCode::InternalError.is_system());
        assert!(ErrorCode::DatabaseError.is_system());
        assert!(!ErrorCode::TooManyRequests.is_system());
        assert!(!ErrorCode::NotFound.is_system());
    }

    #[test]
    fn test_display_is_numeric() {
        assert_eq!(ErrorCode::DatabaseError.to_string(), "9002");
        assert_eq!(ErrorCode::TooManyRequests.to_string(), "9");
    }

    #[test]
    fn test_database_message_does_not_leak_kind() {
        assert_eq!(
            ErrorCode::DatabaseError.message(),
            ErrorCode::InternalError.message()
        );
    }
}
