use std::fmt;

use super::layout::CountPrefix;

type BinaryApply<T> = Box<dyn Fn(&mut T, &[u8]) + Send + Sync>;

/// Descriptor for a length-prefixed run of raw bytes.
///
/// The prefix gives the payload length in bytes; the setter receives exactly
/// that many bytes.
pub struct BinaryField<T> {
    prefix: CountPrefix,
    apply: BinaryApply<T>,
}

impl<T: 'static> BinaryField<T> {
    pub fn new(
        prefix: impl Into<CountPrefix>,
        setter: impl Fn(&mut T, &[u8]) + Send + Sync + 'static,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            apply: Box::new(setter),
        }
    }
}

impl<T> BinaryField<T> {
    pub fn prefix(&self) -> CountPrefix {
        self.prefix
    }

    pub(crate) fn apply(&self, target: &mut T, payload: &[u8]) {
        (self.apply)(target, payload)
    }
}

impl<T> fmt::Debug for BinaryField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryField")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
