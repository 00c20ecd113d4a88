//! Byte-order inversion for fixed-width numbers.
//!
//! Reversal is defined for 2, 4 and 8 byte widths only. Values read from the
//! wire are in native byte order; inverting converts between big- and
//! little-endian representations. Single-byte values have no byte order:
//! [`Invertible`] has no `u8`/`i8` impl and [`invert_width`] rejects width 1.

use crate::field::DescriptorError;

/// Swap the two bytes of a 16-bit value.
pub const fn reverse_u16(value: u16) -> u16 {
    ((value << 8) & 0xff00) | ((value >> 8) & 0x00ff)
}

/// Reverse the four bytes of a 32-bit value.
pub const fn reverse_u32(value: u32) -> u32 {
    ((value << 24) & 0xff00_0000)
        | ((value << 8) & 0x00ff_0000)
        | ((value >> 8) & 0x0000_ff00)
        | ((value >> 24) & 0x0000_00ff)
}

/// Reverse the eight bytes of a 64-bit value.
pub const fn reverse_u64(value: u64) -> u64 {
    ((value << 56) & 0xff00_0000_0000_0000)
        | ((value << 40) & 0x00ff_0000_0000_0000)
        | ((value << 24) & 0x0000_ff00_0000_0000)
        | ((value << 8) & 0x0000_00ff_0000_0000)
        | ((value >> 8) & 0x0000_0000_ff00_0000)
        | ((value >> 24) & 0x0000_0000_00ff_0000)
        | ((value >> 40) & 0x0000_0000_0000_ff00)
        | ((value >> 56) & 0x0000_0000_0000_00ff)
}

/// Reverse the low `width` bytes of `value`.
///
/// Used for count and length prefixes whose width is only known as data.
///
/// # Errors
/// Returns [`DescriptorError::UninvertibleWidth`] for any width other than
/// 2, 4 or 8.
///
/// # Examples
/// ```
/// use fieldwire_core::endian::invert_width;
///
/// assert_eq!(invert_width(0x0102, 2).unwrap(), 0x0201);
/// assert!(invert_width(0x01, 1).is_err());
/// ```
pub fn invert_width(value: u64, width: usize) -> Result<u64, DescriptorError> {
    match width {
        2 => Ok(u64::from(reverse_u16(value as u16))),
        4 => Ok(u64::from(reverse_u32(value as u32))),
        8 => Ok(reverse_u64(value)),
        _ => Err(DescriptorError::UninvertibleWidth { width }),
    }
}

/// Numeric types whose byte order can be inverted.
pub trait Invertible: Sized {
    fn invert_byte_order(self) -> Self;
}

macro_rules! invertible_int {
    ($($ty:ty => $unsigned:ty, $reverse:ident);* $(;)?) => {
        $(
            impl Invertible for $ty {
                fn invert_byte_order(self) -> Self {
                    $reverse(self as $unsigned) as $ty
                }
            }
        )*
    };
}

invertible_int! {
    u16 => u16, reverse_u16;
    i16 => u16, reverse_u16;
    u32 => u32, reverse_u32;
    i32 => u32, reverse_u32;
    u64 => u64, reverse_u64;
    i64 => u64, reverse_u64;
}

impl Invertible for f32 {
    fn invert_byte_order(self) -> Self {
        f32::from_bits(reverse_u32(self.to_bits()))
    }
}

impl Invertible for f64 {
    fn invert_byte_order(self) -> Self {
        f64::from_bits(reverse_u64(self.to_bits()))
    }
}
