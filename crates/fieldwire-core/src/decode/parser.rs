use tracing::trace;

use super::error::DecodeError;
use super::reader::PacketReader;
use crate::field::{BinaryField, Field, TextField, ValueField};

/// Decode `fields` in order, stopping at the first error.
pub(crate) fn decode_fields<T>(
    fields: &[Field<T>],
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    fields
        .iter()
        .try_for_each(|field| decode_field(field, reader, target))
}

pub(crate) fn decode_field<T>(
    field: &Field<T>,
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    trace!(offset = reader.offset(), kind = %field.kind(), "decoding field");
    match field {
        Field::Value(value) => decode_value(value, reader, target),
        Field::Text(text) => decode_text(text, reader, target),
        Field::Composite(composite) => composite.decode_into(reader, target),
        Field::DynamicArray(array) => {
            let count = reader.read_prefix(array.prefix())?;
            repeat(array.element(), count, reader, target)
        }
        Field::StaticArray(array) => repeat(array.element(), array.count() as u64, reader, target),
        Field::Binary(binary) => decode_binary(binary, reader, target),
    }
}

fn decode_value<T>(
    field: &ValueField<T>,
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    let offset = reader.offset();
    let bytes = reader.read_slice(field.width())?;
    field
        .apply(target, bytes)
        .map_err(|_| DecodeError::InvalidValue { offset })
}

fn decode_text<T>(
    field: &TextField<T>,
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    let offset = reader.offset();
    let distance = reader.find_terminator(field.max_length())?;
    if distance == 1 && !field.allows_empty() {
        return Err(DecodeError::EmptyTextNotAllowed { offset });
    }
    let bytes = reader.read_slice(distance)?;
    let (_, content) = bytes.split_last().ok_or(DecodeError::Unknown)?;
    field
        .apply(target, content)
        .map_err(|_| DecodeError::InvalidText { offset })
}

fn decode_binary<T>(
    field: &BinaryField<T>,
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    let length = reader.read_prefix(field.prefix())?;
    let length = usize::try_from(length).map_err(|_| DecodeError::ExceededDataRange {
        needed: usize::MAX,
        actual: reader.len(),
    })?;
    let payload = reader.read_slice(length)?;
    field.apply(target, payload);
    Ok(())
}

// Every element consumes at least one byte, so a count larger than the
// remaining input fails on the first element past the end.
fn repeat<T>(
    element: &Field<T>,
    count: u64,
    reader: &mut PacketReader<'_>,
    target: &mut T,
) -> Result<(), DecodeError> {
    for _ in 0..count {
        decode_field(element, reader, target)?;
    }
    Ok(())
}
