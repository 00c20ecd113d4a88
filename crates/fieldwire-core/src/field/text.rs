use std::fmt;

use super::Rejected;
use super::error::DescriptorError;

type TextApply<T> = Box<dyn Fn(&mut T, &[u8]) -> Result<(), Rejected> + Send + Sync>;

/// Descriptor for a NUL-terminated text field.
///
/// `max_length` bounds the terminator search and includes the terminator
/// itself, so a field of `max_length = 16` holds at most 15 content bytes.
pub struct TextField<T> {
    max_length: usize,
    allow_empty: bool,
    apply: TextApply<T>,
}

impl<T: 'static> TextField<T> {
    /// Text delivered as UTF-8; other content reports `InvalidText`.
    ///
    /// # Errors
    /// Returns [`DescriptorError::ZeroTextLength`] when `max_length` is 0.
    pub fn new(
        max_length: usize,
        setter: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        Self::compose(
            max_length,
            Box::new(move |target: &mut T, bytes: &[u8]| -> Result<(), Rejected> {
                let text = std::str::from_utf8(bytes).map_err(|_| Rejected)?;
                setter(target, text);
                Ok(())
            }),
        )
    }

    /// Text delivered as the raw byte span before the terminator.
    ///
    /// # Errors
    /// Returns [`DescriptorError::ZeroTextLength`] when `max_length` is 0.
    pub fn raw(
        max_length: usize,
        setter: impl Fn(&mut T, &[u8]) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        Self::compose(
            max_length,
            Box::new(move |target: &mut T, bytes: &[u8]| -> Result<(), Rejected> {
                setter(target, bytes);
                Ok(())
            }),
        )
    }

    fn compose(max_length: usize, apply: TextApply<T>) -> Result<Self, DescriptorError> {
        if max_length == 0 {
            return Err(DescriptorError::ZeroTextLength);
        }
        Ok(Self {
            max_length,
            allow_empty: false,
            apply,
        })
    }
}

impl<T> TextField<T> {
    /// Accept a terminator at the first byte (empty text).
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn allows_empty(&self) -> bool {
        self.allow_empty
    }

    pub(crate) fn apply(&self, target: &mut T, content: &[u8]) -> Result<(), Rejected> {
        (self.apply)(target, content)
    }
}

impl<T> fmt::Debug for TextField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("max_length", &self.max_length)
            .field("allow_empty", &self.allow_empty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::TextField;
    use crate::field::DescriptorError;

    #[derive(Default)]
    struct Named {
        name: String,
        raw: Vec<u8>,
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = TextField::new(0, |n: &mut Named, s| n.name = s.to_owned()).unwrap_err();
        assert_eq!(err, DescriptorError::ZeroTextLength);
    }

    #[test]
    fn empty_is_forbidden_by_default() {
        let field = TextField::new(8, |n: &mut Named, s| n.name = s.to_owned()).unwrap();
        assert!(!field.allows_empty());
        assert!(field.allow_empty().allows_empty());
    }

    #[test]
    fn utf8_setter_rejects_invalid_bytes() {
        let field = TextField::new(8, |n: &mut Named, s| n.name = s.to_owned()).unwrap();
        let mut named = Named::default();
        assert!(field.apply(&mut named, &[0xff, 0xfe]).is_err());
        assert!(named.name.is_empty());
    }

    #[test]
    fn raw_setter_passes_bytes_through() {
        let field = TextField::raw(8, |n: &mut Named, b| n.raw = b.to_vec()).unwrap();
        let mut named = Named::default();
        field.apply(&mut named, &[0xff, 0x41]).unwrap();
        assert_eq!(named.raw, vec![0xff, 0x41]);
    }
}
