use super::error::DecodeError;
use crate::field::CountPrefix;

/// Bounds-checked cursor over the bytes of one decode call.
pub(crate) struct PacketReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> PacketReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// End offset of the next `width` bytes, if they fit.
    pub(crate) fn require_len(&self, width: usize) -> Result<usize, DecodeError> {
        let end = self
            .offset
            .checked_add(width)
            .ok_or(DecodeError::ExceededDataRange {
                needed: usize::MAX,
                actual: self.data.len(),
            })?;
        if end > self.data.len() {
            return Err(DecodeError::ExceededDataRange {
                needed: end,
                actual: self.data.len(),
            });
        }
        Ok(end)
    }

    pub(crate) fn read_slice(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.require_len(width)?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(DecodeError::Unknown)?;
        self.offset = end;
        Ok(bytes)
    }

    pub(crate) fn read_prefix(&mut self, prefix: CountPrefix) -> Result<u64, DecodeError> {
        let bytes = self.read_slice(prefix.width().bytes())?;
        prefix.decode(bytes).ok_or(DecodeError::Unknown)
    }

    /// Distance from the cursor to one past the next zero byte, searching at
    /// most `max_length` bytes. Does not move the cursor.
    pub(crate) fn find_terminator(&self, max_length: usize) -> Result<usize, DecodeError> {
        let remaining = self.data.get(self.offset..).unwrap_or_default();
        let window = &remaining[..remaining.len().min(max_length)];
        if let Some(position) = window.iter().position(|&byte| byte == 0) {
            return Ok(position + 1);
        }
        if max_length > remaining.len() {
            return Err(DecodeError::ExceededDataRange {
                needed: self.data.len() + 1,
                actual: self.data.len(),
            });
        }
        Err(DecodeError::MissingNullTerminator {
            offset: self.offset,
            max_length,
        })
    }
}
