use std::fmt;

use super::Rejected;
use crate::endian::Invertible;

/// Fixed-width numeric types that can be read from the wire.
///
/// Values are read in native byte order; the width is the size of the type.
pub trait WireValue: Copy + Send + Sync + 'static {
    const WIDTH: usize;

    /// Build a value from exactly `WIDTH` native-order bytes.
    fn from_native(bytes: &[u8]) -> Option<Self>;
}

macro_rules! wire_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl WireValue for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn from_native(bytes: &[u8]) -> Option<Self> {
                    bytes.try_into().ok().map(<$ty>::from_ne_bytes)
                }
            }
        )*
    };
}

wire_value!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

type ValueApply<T> = Box<dyn Fn(&mut T, &[u8]) -> Result<(), Rejected> + Send + Sync>;

/// Descriptor for a fixed-width numeric field.
pub struct ValueField<T> {
    width: usize,
    inverted: bool,
    apply: ValueApply<T>,
}

impl<T: 'static> ValueField<T> {
    /// Value read in native byte order.
    pub fn native<V: WireValue>(setter: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self {
        Self::compose(false, V::from_native, |_| true, setter)
    }

    /// Value whose bytes are reversed after reading.
    ///
    /// Only 2, 4 and 8 byte types implement [`Invertible`], so asking for
    /// inversion of a single-byte value does not compile.
    pub fn inverted<V: WireValue + Invertible>(
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self::compose(true, read_inverted::<V>, |_| true, setter)
    }

    /// Native-order value that must satisfy `accept`; rejected values report
    /// `InvalidValue` and never reach the setter.
    pub fn checked<V: WireValue>(
        accept: impl Fn(V) -> bool + Send + Sync + 'static,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self::compose(false, V::from_native, accept, setter)
    }

    /// Inverted counterpart of [`ValueField::checked`].
    pub fn inverted_checked<V: WireValue + Invertible>(
        accept: impl Fn(V) -> bool + Send + Sync + 'static,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self::compose(true, read_inverted::<V>, accept, setter)
    }

    fn compose<V: WireValue>(
        inverted: bool,
        read: fn(&[u8]) -> Option<V>,
        accept: impl Fn(V) -> bool + Send + Sync + 'static,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Self {
            width: V::WIDTH,
            inverted,
            apply: Box::new(move |target: &mut T, bytes: &[u8]| -> Result<(), Rejected> {
                let value = read(bytes).ok_or(Rejected)?;
                if !accept(value) {
                    return Err(Rejected);
                }
                setter(target, value);
                Ok(())
            }),
        }
    }
}

impl<T> ValueField<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub(crate) fn apply(&self, target: &mut T, bytes: &[u8]) -> Result<(), Rejected> {
        (self.apply)(target, bytes)
    }
}

impl<T> fmt::Debug for ValueField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueField")
            .field("width", &self.width)
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

fn read_inverted<V: WireValue + Invertible>(bytes: &[u8]) -> Option<V> {
    V::from_native(bytes).map(Invertible::invert_byte_order)
}

#[cfg(test)]
mod tests {
    use super::{ValueField, WireValue};

    #[derive(Default)]
    struct Sample {
        value: u32,
        signed: i16,
    }

    #[test]
    fn widths_follow_type_size() {
        assert_eq!(u8::WIDTH, 1);
        assert_eq!(i16::WIDTH, 2);
        assert_eq!(f32::WIDTH, 4);
        assert_eq!(u64::WIDTH, 8);
    }

    #[test]
    fn native_value_applies_setter() {
        let field = ValueField::native::<u32>(|s: &mut Sample, v| s.value = v);
        let mut sample = Sample::default();
        field.apply(&mut sample, &257u32.to_ne_bytes()).unwrap();
        assert_eq!(sample.value, 257);
        assert_eq!(field.width(), 4);
        assert!(!field.is_inverted());
    }

    #[test]
    fn inverted_value_reverses_bytes() {
        let field = ValueField::inverted::<u32>(|s: &mut Sample, v| s.value = v);
        let mut sample = Sample::default();
        field.apply(&mut sample, &[0x00, 0x00, 0x00, 0x02]).unwrap();
        let expected = u32::from_ne_bytes([0x02, 0x00, 0x00, 0x00]);
        assert_eq!(sample.value, expected);
    }

    #[test]
    fn checked_value_rejects_without_writing() {
        let field = ValueField::checked::<i16>(|v| v >= 0, |s: &mut Sample, v| s.signed = v);
        let mut sample = Sample::default();
        assert!(field.apply(&mut sample, &(-5i16).to_ne_bytes()).is_err());
        assert_eq!(sample.signed, 0);
        field.apply(&mut sample, &9i16.to_ne_bytes()).unwrap();
        assert_eq!(sample.signed, 9);
    }

    #[test]
    fn inverted_check_sees_inverted_value() {
        let field =
            ValueField::inverted_checked::<u32>(|v| v == 2, |s: &mut Sample, v| s.value = v);
        let mut sample = Sample::default();
        field.apply(&mut sample, &2u32.swap_bytes().to_ne_bytes()).unwrap();
        assert_eq!(sample.value, 2);
        assert!(field.apply(&mut sample, &2u32.to_ne_bytes()).is_err());
    }

    #[test]
    fn short_slice_is_rejected() {
        let field = ValueField::native::<u32>(|s: &mut Sample, v| s.value = v);
        let mut sample = Sample::default();
        assert!(field.apply(&mut sample, &[1, 2]).is_err());
    }
}
