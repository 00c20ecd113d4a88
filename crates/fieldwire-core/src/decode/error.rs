use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by a decode call.
///
/// Every variant maps onto exactly one [`ErrorKind`]; offsets are byte offsets
/// of the field that failed, counted from the start of the buffer.
///
/// # Examples
/// ```
/// use fieldwire_core::{DecodeError, ErrorKind};
///
/// let err = DecodeError::ExceededDataRange { needed: 20, actual: 10 };
/// assert_eq!(err.kind(), ErrorKind::ExceededDataRange);
/// assert!(err.to_string().contains("need 20 bytes, got 10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid text at offset {offset}")]
    InvalidText { offset: usize },
    #[error("invalid value at offset {offset}")]
    InvalidValue { offset: usize },
    #[error("missing null terminator within {max_length} bytes at offset {offset}")]
    MissingNullTerminator { offset: usize, max_length: usize },
    #[error("empty text not allowed at offset {offset}")]
    EmptyTextNotAllowed { offset: usize },
    #[error("exceeded data range: need {needed} bytes, got {actual}")]
    ExceededDataRange { needed: usize, actual: usize },
    #[error("unhandled field type: {kind}")]
    UnhandledFieldType { kind: &'static str },
    #[error("unknown decode error")]
    Unknown,
}

impl DecodeError {
    /// Flat taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidText { .. } => ErrorKind::InvalidText,
            DecodeError::InvalidValue { .. } => ErrorKind::InvalidValue,
            DecodeError::MissingNullTerminator { .. } => ErrorKind::MissingNullTerminator,
            DecodeError::EmptyTextNotAllowed { .. } => ErrorKind::EmptyTextNotAllowed,
            DecodeError::ExceededDataRange { .. } => ErrorKind::ExceededDataRange,
            DecodeError::UnhandledFieldType { .. } => ErrorKind::UnhandledFieldType,
            DecodeError::Unknown => ErrorKind::Unknown,
        }
    }
}

/// Flat decode outcome, including the success case.
///
/// # Examples
/// ```
/// use fieldwire_core::{DecodeError, ErrorKind};
///
/// let ok: Result<(), DecodeError> = Ok(());
/// assert_eq!(ErrorKind::of(&ok), ErrorKind::NoError);
/// assert_eq!(ErrorKind::MissingNullTerminator.to_string(), "MissingNullTerminator");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NoError,
    InvalidText,
    InvalidValue,
    MissingNullTerminator,
    EmptyTextNotAllowed,
    ExceededDataRange,
    UnhandledFieldType,
    Unknown,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::NoError,
        ErrorKind::InvalidText,
        ErrorKind::InvalidValue,
        ErrorKind::MissingNullTerminator,
        ErrorKind::EmptyTextNotAllowed,
        ErrorKind::ExceededDataRange,
        ErrorKind::UnhandledFieldType,
        ErrorKind::Unknown,
    ];

    /// Collapse a decode result into its kind.
    pub fn of<T>(result: &Result<T, DecodeError>) -> Self {
        match result {
            Ok(_) => ErrorKind::NoError,
            Err(err) => err.kind(),
        }
    }

    pub fn is_error(self) -> bool {
        self != ErrorKind::NoError
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(error_text(*self))
    }
}

/// Display text for an error kind.
///
/// # Examples
/// ```
/// use fieldwire_core::{ErrorKind, error_text};
///
/// assert_eq!(error_text(ErrorKind::ExceededDataRange), "ExceededDataRange");
/// ```
pub fn error_text(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NoError => "NoError",
        ErrorKind::InvalidText => "InvalidText",
        ErrorKind::InvalidValue => "InvalidValue",
        ErrorKind::MissingNullTerminator => "MissingNullTerminator",
        ErrorKind::EmptyTextNotAllowed => "EmptyTextNotAllowed",
        ErrorKind::ExceededDataRange => "ExceededDataRange",
        ErrorKind::UnhandledFieldType => "UnhandledFieldType",
        ErrorKind::Unknown => "Unknown",
    }
}
