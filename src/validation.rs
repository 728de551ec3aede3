//! Identifier validation for names crossing the engine boundary.
//!
//! Location, category, and user identifiers arrive from the chat
//! collaborator already resolved, but the CLI front-end accepts them raw, so
//! they are checked here before they reach the world document or the logs.

use thiserror::Error;

/// Upper bound chosen to fit chat-platform channel name limits.
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("identifier cannot start or end with whitespace")]
    EdgeWhitespace,

    #[error("identifier contains control characters")]
    ControlCharacters,

    #[error("identifier contains path separators (/ or \\)")]
    PathSeparators,
}

/// Validate a location, category, or user identifier.
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if name.chars().count() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong {
            max: MAX_IDENTIFIER_LENGTH,
        });
    }
    if name.trim() != name {
        return Err(IdentifierError::EdgeWhitespace);
    }
    if name.chars().any(char::is_control) {
        return Err(IdentifierError::ControlCharacters);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(IdentifierError::PathSeparators);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_channel_names() {
        for name in ["lobby", "roof-terrace", "Hotel Eclipse", "room-12", "café"] {
            assert_eq!(validate_identifier(name), Ok(()), "{name} should pass");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        assert_eq!(validate_identifier(""), Err(IdentifierError::Empty));
        assert_eq!(
            validate_identifier(" lobby"),
            Err(IdentifierError::EdgeWhitespace)
        );
        assert_eq!(
            validate_identifier("lob\nby"),
            Err(IdentifierError::ControlCharacters)
        );
        assert_eq!(
            validate_identifier("../lobby"),
            Err(IdentifierError::PathSeparators)
        );
        let long = "x".repeat(MAX_IDENTIFIER_LENGTH + 1);
        assert!(matches!(
            validate_identifier(&long),
            Err(IdentifierError::TooLong { .. })
        ));
    }
}
