use std::fmt;

use super::Field;
use super::error::DescriptorError;
use super::layout::CountPrefix;

/// Element descriptor repeated as many times as a count prefix says.
///
/// Elements are applied to the same target as the array itself, in wire
/// order; a composite element typically pushes each record onto a `Vec`.
pub struct DynamicArrayField<T> {
    prefix: CountPrefix,
    element: Box<Field<T>>,
}

impl<T> DynamicArrayField<T> {
    pub fn new(prefix: impl Into<CountPrefix>, element: Field<T>) -> Self {
        Self {
            prefix: prefix.into(),
            element: Box::new(element),
        }
    }

    pub fn prefix(&self) -> CountPrefix {
        self.prefix
    }

    pub fn element(&self) -> &Field<T> {
        &self.element
    }
}

/// Element descriptor repeated a fixed number of times.
pub struct StaticArrayField<T> {
    count: usize,
    element: Box<Field<T>>,
}

impl<T> StaticArrayField<T> {
    /// # Errors
    /// Returns [`DescriptorError::ZeroRepeatCount`] when `count` is 0.
    pub fn new(count: usize, element: Field<T>) -> Result<Self, DescriptorError> {
        if count == 0 {
            return Err(DescriptorError::ZeroRepeatCount);
        }
        Ok(Self {
            count,
            element: Box::new(element),
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn element(&self) -> &Field<T> {
        &self.element
    }
}

impl<T> fmt::Debug for DynamicArrayField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArrayField")
            .field("prefix", &self.prefix)
            .field("element", &self.element)
            .finish()
    }
}

impl<T> fmt::Debug for StaticArrayField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticArrayField")
            .field("count", &self.count)
            .field("element", &self.element)
            .finish()
    }
}
