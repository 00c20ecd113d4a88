//! Field descriptor model.
//!
//! A [`Field`] describes how to decode one unit of a packet into a target of
//! type `T`: a fixed-width value, NUL-terminated text, a nested record, a
//! repeated element, or a length-prefixed byte run. Descriptors are built
//! once, validated at composition time, and never mutated by decoding, so a
//! single descriptor tree can serve any number of decode calls on any number
//! of threads.
//!
//! Each variant lives in its own module:
//! - `value`: fixed-width numbers and the [`WireValue`] trait
//! - `text`: NUL-terminated text
//! - `composite`: nested records with their own target type
//! - `array`: dynamic (count-prefixed) and static repetition
//! - `binary`: length-prefixed raw bytes
//! - `layout`: count and length prefix widths
//! - `error`: composition-time errors
//!
//! Version française (résumé):
//! Un `Field` décrit le décodage d'une unité du paquet (valeur, texte terminé
//! par NUL, enregistrement imbriqué, tableau, binaire). Les descripteurs sont
//! validés à la composition et restent immuables pendant le décodage.

use std::fmt;

mod array;
mod binary;
mod composite;
mod error;
mod layout;
mod text;
mod value;

pub use array::{DynamicArrayField, StaticArrayField};
pub use binary::BinaryField;
pub use composite::CompositeField;
pub use error::DescriptorError;
pub use layout::{CountPrefix, CountWidth};
pub use text::TextField;
pub use value::{ValueField, WireValue};

use crate::endian::Invertible;

/// Content rejected by a setter hook (UTF-8 check or value predicate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rejected;

/// One field descriptor over target type `T`.
///
/// # Examples
/// ```
/// use fieldwire_core::field::{CountWidth, Field};
///
/// #[derive(Default)]
/// struct Packet {
///     name: String,
///     flags: Vec<u16>,
/// }
///
/// let name = Field::text(16, |p: &mut Packet, s: &str| p.name = s.to_owned())?;
/// let flags = Field::dynamic_array(
///     CountWidth::U8,
///     Field::value::<u16>(|p: &mut Packet, v| p.flags.push(v)),
/// );
/// assert_eq!(name.kind().as_str(), "text");
/// assert_eq!(flags.kind().as_str(), "dynamic_array");
/// # Ok::<(), fieldwire_core::field::DescriptorError>(())
/// ```
pub enum Field<T> {
    Value(ValueField<T>),
    Text(TextField<T>),
    Composite(CompositeField<T>),
    DynamicArray(DynamicArrayField<T>),
    StaticArray(StaticArrayField<T>),
    Binary(BinaryField<T>),
}

/// Discriminant of a [`Field`], used for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Value,
    Text,
    Composite,
    DynamicArray,
    StaticArray,
    Binary,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Value => "value",
            FieldKind::Text => "text",
            FieldKind::Composite => "composite",
            FieldKind::DynamicArray => "dynamic_array",
            FieldKind::StaticArray => "static_array",
            FieldKind::Binary => "binary",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: 'static> Field<T> {
    /// Fixed-width value in native byte order.
    pub fn value<V: WireValue>(setter: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self {
        Field::Value(ValueField::native(setter))
    }

    /// Fixed-width value with its byte order inverted.
    pub fn value_inverted<V: WireValue + Invertible>(
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Field::Value(ValueField::inverted(setter))
    }

    /// Native-order value that must satisfy `accept`.
    pub fn value_checked<V: WireValue>(
        accept: impl Fn(V) -> bool + Send + Sync + 'static,
        setter: impl Fn(&mut T, V) + Send + Sync + 'static,
    ) -> Self {
        Field::Value(ValueField::checked(accept, setter))
    }

    /// Non-empty UTF-8 text of at most `max_length` bytes including the
    /// terminator.
    pub fn text(
        max_length: usize,
        setter: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        TextField::new(max_length, setter).map(Field::Text)
    }

    /// UTF-8 text that may be empty.
    pub fn text_allow_empty(
        max_length: usize,
        setter: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        TextField::new(max_length, setter).map(|text| Field::Text(text.allow_empty()))
    }

    /// Nested record of type `R`, handed to `setter` once fully decoded.
    pub fn composite<R: Default + 'static>(
        fields: Vec<Field<R>>,
        setter: impl Fn(&mut T, R) + Send + Sync + 'static,
    ) -> Result<Self, DescriptorError> {
        CompositeField::new(fields, setter).map(Field::Composite)
    }

    /// `element` repeated as many times as the count prefix says.
    pub fn dynamic_array(prefix: impl Into<CountPrefix>, element: Field<T>) -> Self {
        Field::DynamicArray(DynamicArrayField::new(prefix, element))
    }

    /// `element` repeated exactly `count` times.
    pub fn static_array(count: usize, element: Field<T>) -> Result<Self, DescriptorError> {
        StaticArrayField::new(count, element).map(Field::StaticArray)
    }

    /// Length-prefixed raw bytes.
    pub fn binary(
        prefix: impl Into<CountPrefix>,
        setter: impl Fn(&mut T, &[u8]) + Send + Sync + 'static,
    ) -> Self {
        Field::Binary(BinaryField::new(prefix, setter))
    }
}

impl<T> Field<T> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Value(_) => FieldKind::Value,
            Field::Text(_) => FieldKind::Text,
            Field::Composite(_) => FieldKind::Composite,
            Field::DynamicArray(_) => FieldKind::DynamicArray,
            Field::StaticArray(_) => FieldKind::StaticArray,
            Field::Binary(_) => FieldKind::Binary,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Value(field) => fmt::Debug::fmt(field, f),
            Field::Text(field) => fmt::Debug::fmt(field, f),
            Field::Composite(field) => fmt::Debug::fmt(field, f),
            Field::DynamicArray(field) => fmt::Debug::fmt(field, f),
            Field::StaticArray(field) => fmt::Debug::fmt(field, f),
            Field::Binary(field) => fmt::Debug::fmt(field, f),
        }
    }
}

impl<T> From<ValueField<T>> for Field<T> {
    fn from(field: ValueField<T>) -> Self {
        Field::Value(field)
    }
}

impl<T> From<TextField<T>> for Field<T> {
    fn from(field: TextField<T>) -> Self {
        Field::Text(field)
    }
}

impl<T> From<CompositeField<T>> for Field<T> {
    fn from(field: CompositeField<T>) -> Self {
        Field::Composite(field)
    }
}

impl<T> From<DynamicArrayField<T>> for Field<T> {
    fn from(field: DynamicArrayField<T>) -> Self {
        Field::DynamicArray(field)
    }
}

impl<T> From<StaticArrayField<T>> for Field<T> {
    fn from(field: StaticArrayField<T>) -> Self {
        Field::StaticArray(field)
    }
}

impl<T> From<BinaryField<T>> for Field<T> {
    fn from(field: BinaryField<T>) -> Self {
        Field::Binary(field)
    }
}

#[cfg(test)]
mod tests {
    use super::{CountWidth, DescriptorError, Field, FieldKind, TextField, ValueField};

    #[derive(Default)]
    struct Packet {
        name: String,
        value: u32,
        blobs: Vec<Vec<u8>>,
    }

    #[test]
    fn factories_produce_matching_kinds() {
        let value = Field::value::<u32>(|p: &mut Packet, v| p.value = v);
        let text = Field::text(4, |p: &mut Packet, s: &str| p.name = s.to_owned()).unwrap();
        let binary = Field::binary(CountWidth::U8, |p: &mut Packet, b: &[u8]| {
            p.blobs.push(b.to_vec())
        });
        assert_eq!(value.kind(), FieldKind::Value);
        assert_eq!(text.kind(), FieldKind::Text);
        assert_eq!(binary.kind(), FieldKind::Binary);
    }

    #[test]
    fn text_allow_empty_sets_flag() {
        let field =
            Field::text_allow_empty(4, |p: &mut Packet, s: &str| p.name = s.to_owned()).unwrap();
        match field {
            Field::Text(text) => assert!(text.allows_empty()),
            other => panic!("unexpected field {other:?}"),
        }
    }

    #[test]
    fn static_array_validates_count() {
        let element = Field::value::<u8>(|p: &mut Packet, v| p.value = u32::from(v));
        let err = Field::static_array(0, element).unwrap_err();
        assert_eq!(err, DescriptorError::ZeroRepeatCount);
    }

    #[test]
    fn debug_output_shows_metadata() {
        let field = Field::value_inverted::<u32>(|p: &mut Packet, v| p.value = v);
        let rendered = format!("{field:?}");
        assert!(rendered.contains("width: 4"));
        assert!(rendered.contains("inverted: true"));
    }

    #[test]
    fn descriptors_are_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Field<Packet>>();
        assert_send_sync::<Field<std::rc::Rc<u8>>>();
    }

    #[test]
    fn variant_structs_convert_into_fields() {
        let value: Field<Packet> = ValueField::native::<u32>(|p: &mut Packet, v| p.value = v).into();
        let text: Field<Packet> =
            TextField::raw(4, |p: &mut Packet, b: &[u8]| p.blobs.push(b.to_vec()))
                .unwrap()
                .into();
        assert_eq!(value.kind(), FieldKind::Value);
        assert_eq!(text.kind(), FieldKind::Text);
    }

    #[test]
    fn kind_display_matches_as_str() {
        assert_eq!(FieldKind::DynamicArray.to_string(), "dynamic_array");
    }
}
