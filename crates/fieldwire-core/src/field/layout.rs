//! Wire widths for count and length prefixes.

use super::error::DescriptorError;
use crate::endian;

/// Byte width of an unsigned count or length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountWidth {
    U8,
    U16,
    U32,
    U64,
}

impl CountWidth {
    pub const fn bytes(self) -> usize {
        match self {
            CountWidth::U8 => 1,
            CountWidth::U16 => 2,
            CountWidth::U32 => 4,
            CountWidth::U64 => 8,
        }
    }

    /// Interpret exactly `self.bytes()` bytes in native order.
    pub(crate) fn read_native(self, bytes: &[u8]) -> Option<u64> {
        match self {
            CountWidth::U8 => bytes.first().copied().map(u64::from),
            CountWidth::U16 => bytes.try_into().ok().map(u16::from_ne_bytes).map(u64::from),
            CountWidth::U32 => bytes.try_into().ok().map(u32::from_ne_bytes).map(u64::from),
            CountWidth::U64 => bytes.try_into().ok().map(u64::from_ne_bytes),
        }
    }
}

/// Count or length prefix: width plus byte-order handling.
///
/// Prefixes are read in native byte order unless built with
/// [`CountPrefix::inverted`].
///
/// # Examples
/// ```
/// use fieldwire_core::field::{CountPrefix, CountWidth};
///
/// let prefix = CountPrefix::inverted(CountWidth::U16).unwrap();
/// assert!(prefix.is_inverted());
/// assert!(CountPrefix::inverted(CountWidth::U8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountPrefix {
    width: CountWidth,
    inverted: bool,
}

impl CountPrefix {
    pub const fn native(width: CountWidth) -> Self {
        Self {
            width,
            inverted: false,
        }
    }

    /// Prefix whose bytes are reversed after reading.
    ///
    /// # Errors
    /// Returns [`DescriptorError::UninvertibleWidth`] for single-byte prefixes.
    pub fn inverted(width: CountWidth) -> Result<Self, DescriptorError> {
        endian::invert_width(0, width.bytes())?;
        Ok(Self {
            width,
            inverted: true,
        })
    }

    pub const fn width(&self) -> CountWidth {
        self.width
    }

    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Decode a prefix from exactly `width` bytes.
    pub(crate) fn decode(&self, bytes: &[u8]) -> Option<u64> {
        let raw = self.width.read_native(bytes)?;
        if self.inverted {
            endian::invert_width(raw, self.width.bytes()).ok()
        } else {
            Some(raw)
        }
    }
}

impl From<CountWidth> for CountPrefix {
    fn from(width: CountWidth) -> Self {
        CountPrefix::native(width)
    }
}
