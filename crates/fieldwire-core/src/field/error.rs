use thiserror::Error;

/// Errors raised while composing descriptors, before any buffer is seen.
///
/// # Examples
/// ```
/// use fieldwire_core::field::{DescriptorError, Field};
///
/// struct Packet;
/// let err = Field::<Packet>::text(0, |_, _| {}).unwrap_err();
/// assert_eq!(err, DescriptorError::ZeroTextLength);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("text max length must be greater than 0")]
    ZeroTextLength,
    #[error("static array repeat count must be greater than 0")]
    ZeroRepeatCount,
    #[error("composite field needs at least one child field")]
    EmptyComposite,
    #[error("byte order cannot be inverted for width {width}")]
    UninvertibleWidth { width: usize },
}
