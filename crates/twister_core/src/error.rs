//! Error types for checkpoint text decoding.
//!
//! This module provides:
//! - `StateError`: why a state string could not be decoded
//! - `StateResult<T>`: result alias for decoding operations

use thiserror::Error;

/// Checkpoint decoding errors.
///
/// Every variant describes input that is not a faithful encoding of a
/// generator. A stream restored from such input cannot be continued safely,
/// which is why [`restore`](crate::IntegerRng::restore) treats all of them as
/// fatal.
///
/// # Examples
/// ```
/// use twister_core::StateError;
///
/// let err = StateError::TagMismatch { expected: 'U', found: Some('G') };
/// assert_eq!(err.to_string(), "Expected state tag 'U', found 'G'");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// Leading tag character does not name the expected layer.
    #[error("Expected state tag '{expected}', found {}", display_tag(.found))]
    TagMismatch {
        /// Tag of the layer being decoded
        expected: char,
        /// First character of the input, if any
        found: Option<char>,
    },

    /// Input length differs from the fixed encoding length.
    #[error("State text for tag '{tag}' must be {expected} bytes, got {actual}")]
    Length {
        /// Tag of the layer being decoded
        tag: char,
        /// Required length
        expected: usize,
        /// Length of the input
        actual: usize,
    },

    /// A fixed-width field is not right-aligned hexadecimal.
    #[error("Invalid {field} field at offset {offset}: {text:?}")]
    InvalidField {
        /// Name of the field
        field: &'static str,
        /// Byte offset of the field
        offset: usize,
        /// Raw field text
        text: String,
    },

    /// A separator position does not hold a space.
    #[error("Expected separator at offset {offset}")]
    MissingSeparator {
        /// Byte offset of the separator
        offset: usize,
    },

    /// Register index outside the range the generator can produce.
    #[error("Register index {index} is out of range")]
    IndexOutOfRange {
        /// The decoded index
        index: i32,
    },

    /// Cached-pair flag other than `0` or `1`.
    #[error("Cached flag must be 0 or 1, got {value:#x}")]
    InvalidFlag {
        /// The decoded flag value
        value: u32,
    },
}

fn display_tag(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("'{c}'"),
        None => "empty input".to_string(),
    }
}

/// Result type for checkpoint decoding.
pub type StateResult<T> = Result<T, StateError>;
