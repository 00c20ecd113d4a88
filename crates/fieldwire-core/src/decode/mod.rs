//! Decoding engine.
//!
//! A [`Pipeline`] is an ordered list of top-level [`Field`] descriptors. Each
//! decode call walks the pipeline with a fresh bounds-checked cursor, applies
//! decoded values to the caller's output through the descriptor setters, and
//! stops at the first error. Fields applied before the failure stay applied;
//! the failing field and everything after it are not written.

use std::fmt;

use tracing::debug;

mod error;
pub(crate) mod parser;
pub(crate) mod reader;

pub use error::{DecodeError, ErrorKind, error_text};

use crate::field::Field;
use reader::PacketReader;

/// Ordered, immutable list of top-level field descriptors.
///
/// # Examples
/// ```
/// use fieldwire_core::{ErrorKind, Field, Pipeline};
///
/// #[derive(Default)]
/// struct Header {
///     version: u8,
///     tag: String,
/// }
///
/// let pipeline = Pipeline::builder()
///     .field(Field::value::<u8>(|h: &mut Header, v| h.version = v))
///     .field(Field::text(8, |h: &mut Header, s: &str| h.tag = s.to_owned())?)
///     .build();
///
/// let mut header = Header::default();
/// pipeline.decode(b"\x02ok\0", &mut header)?;
/// assert_eq!(header.version, 2);
/// assert_eq!(header.tag, "ok");
///
/// let mut header = Header::default();
/// let result = pipeline.decode(b"\x02ok", &mut header);
/// assert_eq!(ErrorKind::of(&result), ErrorKind::ExceededDataRange);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Pipeline<T> {
    fields: Vec<Field<T>>,
}

impl<T> Pipeline<T> {
    pub fn new(fields: Vec<Field<T>>) -> Self {
        Self { fields }
    }

    pub fn builder() -> PipelineBuilder<T> {
        PipelineBuilder::default()
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode the whole of `buffer` into `output`.
    pub fn decode(&self, buffer: &[u8], output: &mut T) -> Result<(), DecodeError> {
        self.decode_consumed(buffer, output).map(|_| ())
    }

    /// Decode the whole of `buffer` and return how many bytes were consumed.
    pub fn decode_consumed(&self, buffer: &[u8], output: &mut T) -> Result<usize, DecodeError> {
        let mut reader = PacketReader::new(buffer);
        match parser::decode_fields(&self.fields, &mut reader, output) {
            Ok(()) => {
                debug!(
                    consumed = reader.offset(),
                    length = reader.len(),
                    "decode complete"
                );
                Ok(reader.offset())
            }
            Err(err) => {
                debug!(error = %err, offset = reader.offset(), "decode failed");
                Err(err)
            }
        }
    }
}

/// Decode the first `length` bytes of `buffer` into `output`.
///
/// # Errors
/// Returns [`DecodeError::ExceededDataRange`] without touching `output` when
/// `length` is larger than `buffer`, and otherwise the first error raised by
/// a field.
///
/// # Examples
/// ```
/// use fieldwire_core::{DecodeError, Field, Pipeline, decode};
///
/// let pipeline = Pipeline::new(vec![Field::value::<u8>(|v: &mut u8, b| *v = b)]);
/// let mut value = 0u8;
/// decode(&pipeline, &[9, 1], 1, &mut value)?;
/// assert_eq!(value, 9);
///
/// let err = decode(&pipeline, &[9], 4, &mut value).unwrap_err();
/// assert_eq!(err, DecodeError::ExceededDataRange { needed: 4, actual: 1 });
/// # Ok::<(), DecodeError>(())
/// ```
pub fn decode<T>(
    pipeline: &Pipeline<T>,
    buffer: &[u8],
    length: usize,
    output: &mut T,
) -> Result<(), DecodeError> {
    decode_consumed(pipeline, buffer, length, output).map(|_| ())
}

/// [`decode`] that also returns how many of the `length` bytes were consumed.
pub fn decode_consumed<T>(
    pipeline: &Pipeline<T>,
    buffer: &[u8],
    length: usize,
    output: &mut T,
) -> Result<usize, DecodeError> {
    let bytes = buffer
        .get(..length)
        .ok_or(DecodeError::ExceededDataRange {
            needed: length,
            actual: buffer.len(),
        })?;
    pipeline.decode_consumed(bytes, output)
}

/// Incremental construction of a [`Pipeline`].
pub struct PipelineBuilder<T> {
    fields: Vec<Field<T>>,
}

impl<T> Default for PipelineBuilder<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> PipelineBuilder<T> {
    pub fn field(mut self, field: Field<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Pipeline<T> {
        Pipeline::new(self.fields)
    }
}

impl<T> FromIterator<Field<T>> for Pipeline<T> {
    fn from_iter<I: IntoIterator<Item = Field<T>>>(iter: I) -> Self {
        Pipeline::new(iter.into_iter().collect())
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, Pipeline, decode, decode_consumed};
    use crate::field::{CountWidth, Field};

    #[derive(Debug, Default, PartialEq)]
    struct Frame {
        kind: u8,
        payload: Vec<u8>,
    }

    fn frame_pipeline() -> Pipeline<Frame> {
        Pipeline::builder()
            .field(Field::value::<u8>(|f: &mut Frame, v| f.kind = v))
            .field(Field::binary(CountWidth::U8, |f: &mut Frame, b: &[u8]| {
                f.payload = b.to_vec()
            }))
            .build()
    }

    #[test]
    fn decode_consumed_reports_cursor() {
        let mut frame = Frame::default();
        let consumed = frame_pipeline()
            .decode_consumed(&[1, 2, 0xaa, 0xbb, 0xff], &mut frame)
            .unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(
            frame,
            Frame {
                kind: 1,
                payload: vec![0xaa, 0xbb]
            }
        );
    }

    #[test]
    fn length_limits_visible_bytes() {
        let mut frame = Frame::default();
        let err = decode(&frame_pipeline(), &[1, 2, 0xaa, 0xbb], 3, &mut frame).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ExceededDataRange {
                needed: 4,
                actual: 3
            }
        );
        assert_eq!(frame.kind, 1);
        assert!(frame.payload.is_empty());
    }

    #[test]
    fn length_beyond_buffer_touches_nothing() {
        let mut frame = Frame::default();
        let err = decode(&frame_pipeline(), &[1, 0], 10, &mut frame).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ExceededDataRange {
                needed: 10,
                actual: 2
            }
        );
        assert_eq!(frame, Frame::default());
    }

    #[test]
    fn free_decode_consumed_stops_at_length() {
        let mut frame = Frame::default();
        let consumed =
            decode_consumed(&frame_pipeline(), &[7, 1, 0xaa, 0xbb], 3, &mut frame).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(frame.payload, vec![0xaa]);
    }

    #[test]
    fn empty_pipeline_consumes_nothing() {
        let pipeline: Pipeline<Frame> = Pipeline::new(Vec::new());
        let mut frame = Frame::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.decode_consumed(&[1, 2], &mut frame).unwrap(), 0);
    }

    #[test]
    fn pipeline_collects_from_iterator() {
        let pipeline: Pipeline<Frame> = (0..3)
            .map(|_| Field::value::<u8>(|f: &mut Frame, v| f.payload.push(v)))
            .collect();
        assert_eq!(pipeline.len(), 3);
        let mut frame = Frame::default();
        pipeline.decode(&[5, 6, 7], &mut frame).unwrap();
        assert_eq!(frame.payload, vec![5, 6, 7]);
    }

    #[test]
    fn debug_lists_fields() {
        let rendered = format!("{:?}", frame_pipeline());
        assert!(rendered.contains("ValueField"));
        assert!(rendered.contains("BinaryField"));
    }
}
