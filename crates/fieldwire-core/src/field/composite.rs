use std::fmt;

use super::Field;
use super::error::DescriptorError;
use crate::decode::DecodeError;
use crate::decode::parser;
use crate::decode::reader::PacketReader;

/// Nested record decoding with the record type erased.
pub(crate) trait NestedRecord<T>: Send + Sync {
    fn decode_into(
        &self,
        reader: &mut PacketReader<'_>,
        target: &mut T,
    ) -> Result<(), DecodeError>;

    fn child_count(&self) -> usize;

    fn record_type(&self) -> &'static str;
}

struct Record<T, R> {
    fields: Vec<Field<R>>,
    setter: Box<dyn Fn(&mut T, R) + Send + Sync>,
}

impl<T, R: Default> NestedRecord<T> for Record<T, R> {
    fn decode_into(
        &self,
        reader: &mut PacketReader<'_>,
        target: &mut T,
    ) -> Result<(), DecodeError> {
        let mut record = R::default();
        parser::decode_fields(&self.fields, reader, &mut record)?;
        (self.setter)(target, record);
        Ok(())
    }

    fn child_count(&self) -> usize {
        self.fields.len()
    }

    fn record_type(&self) -> &'static str {
        std::any::type_name::<R>()
    }
}

/// Descriptor for a nested record decoded into its own default-constructed
/// value, then handed to the outer target in one piece.
pub struct CompositeField<T> {
    record: Box<dyn NestedRecord<T>>,
}

impl<T: 'static> CompositeField<T> {
    /// # Errors
    /// Returns [`DescriptorError::EmptyComposite`] when `fields` is empty.
    pub fn new<R: Default + 'static>(
        fields: Vec<Field<R>>,
        setter: impl Fn(&mut T, R) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        if fields.is_empty() {
            return Err(DescriptorError::EmptyComposite);
        }
        Ok(Self {
            record: Box::new(Record {
                fields,
                setter: Box::new(setter),
            }),
        })
    }
}

impl<T> CompositeField<T> {
    pub fn child_count(&self) -> usize {
        self.record.child_count()
    }

    pub(crate) fn decode_into(
        &self,
        reader: &mut PacketReader<'_>,
        target: &mut T,
    ) -> Result<(), DecodeError> {
        self.record.decode_into(reader, target)
    }
}

impl<T> fmt::Debug for CompositeField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeField")
            .field("record", &self.record.record_type())
            .field("children", &self.record.child_count())
            .finish_non_exhaustive()
    }
}
