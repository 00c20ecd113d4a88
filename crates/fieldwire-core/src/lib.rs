//! Fieldwire core library for declarative binary packet decoding.
//!
//! Packet layouts are described as data: an ordered [`Pipeline`] of [`Field`]
//! descriptors (fixed-width values, NUL-terminated text, nested composite
//! records, count-prefixed and fixed-count arrays, length-prefixed binary).
//! The decoding engine walks the pipeline over a byte buffer with a
//! bounds-checked cursor and writes decoded values into the caller's own
//! output type through setter closures. Decoding is synchronous, free of I/O,
//! and stops at the first error.
//!
//! Invariants:
//! - The cursor never moves past the buffer length; an overrun is reported as
//!   [`DecodeError::ExceededDataRange`] before any setter sees the field.
//! - Fields are applied in declared order; after an error nothing later is
//!   applied.
//! - Descriptors are immutable after composition and `Send + Sync`, so one
//!   pipeline serves any number of concurrent decode calls.
//!
//! Version française (résumé):
//! Cette crate décrit la disposition d'un paquet binaire sous forme de
//! données : un `Pipeline` de descripteurs `Field` (valeurs, texte terminé par
//! NUL, enregistrements imbriqués, tableaux, binaire). Le moteur parcourt le
//! tampon avec un curseur borné, applique les valeurs via des fermetures et
//! s'arrête à la première erreur. Les descripteurs sont immuables et
//! partageables entre threads.
//!
//! # Examples
//! ```
//! use fieldwire_core::{CountWidth, Field, Pipeline};
//!
//! #[derive(Default)]
//! struct Reading {
//!     sensor: String,
//!     samples: Vec<u16>,
//! }
//!
//! let pipeline = Pipeline::builder()
//!     .field(Field::text(16, |r: &mut Reading, s: &str| r.sensor = s.to_owned())?)
//!     .field(Field::dynamic_array(
//!         CountWidth::U8,
//!         Field::value::<u16>(|r: &mut Reading, v| r.samples.push(v)),
//!     ))
//!     .build();
//!
//! let mut buffer = b"probe\0".to_vec();
//! buffer.push(2);
//! buffer.extend_from_slice(&10u16.to_ne_bytes());
//! buffer.extend_from_slice(&20u16.to_ne_bytes());
//!
//! let mut reading = Reading::default();
//! pipeline.decode(&buffer, &mut reading)?;
//! assert_eq!(reading.sensor, "probe");
//! assert_eq!(reading.samples, vec![10, 20]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod decode;
pub mod endian;
pub mod field;

pub use decode::{
    DecodeError, ErrorKind, Pipeline, PipelineBuilder, decode, decode_consumed, error_text,
};
pub use field::{CountPrefix, CountWidth, DescriptorError, Field, FieldKind, WireValue};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Outcome of decoding one input with a named layout.
///
/// The report is deterministic: it carries no timestamps, and the decoded
/// record keeps the field order of its `Serialize` impl.
///
/// # Examples
/// ```
/// use fieldwire_core::make_stub_report;
///
/// let report = make_stub_report("roster", "roster.bin", 59, 59);
/// assert_eq!(report.report_version, fieldwire_core::REPORT_VERSION);
/// assert!(report.record.is_null());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Name of the layout used for decoding.
    pub layout: String,
    /// Input metadata.
    pub input: InputInfo,
    /// Flat decode outcome.
    pub status: ErrorKind,
    /// Error message when the decode failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Bytes consumed by a successful decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_bytes: Option<u64>,
    /// Decoded record, possibly partial after a failure.
    pub record: serde_json::Value,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use fieldwire_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "fieldwire".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "fieldwire");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "fieldwire").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided, or `"-"` for inline input.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Number of bytes handed to the decoder.
    pub decoded_length: u64,
}

impl DecodeReport {
    /// Fill status, error text, consumed bytes and record from a decode
    /// outcome.
    ///
    /// # Errors
    /// Returns an error when `record` cannot be represented as JSON.
    ///
    /// # Examples
    /// ```
    /// use fieldwire_core::{DecodeError, ErrorKind, make_stub_report};
    ///
    /// let outcome: Result<usize, DecodeError> = Err(DecodeError::Unknown);
    /// let report = make_stub_report("records", "-", 0, 0).with_outcome(&outcome, &())?;
    /// assert_eq!(report.status, ErrorKind::Unknown);
    /// assert_eq!(report.error.as_deref(), Some("unknown decode error"));
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn with_outcome<R: Serialize>(
        mut self,
        outcome: &Result<usize, DecodeError>,
        record: &R,
    ) -> Result<Self, serde_json::Error> {
        self.status = ErrorKind::of(outcome);
        match outcome {
            Ok(consumed) => {
                self.error = None;
                self.consumed_bytes = Some(*consumed as u64);
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.consumed_bytes = None;
            }
        }
        self.record = serde_json::to_value(record)?;
        Ok(self)
    }
}

/// Build a report with metadata only and a `NoError` status.
///
/// # Examples
/// ```
/// use fieldwire_core::{ErrorKind, make_stub_report};
///
/// let report = make_stub_report("records", "records.bin", 18, 18);
/// assert_eq!(report.status, ErrorKind::NoError);
/// assert_eq!(report.input.bytes, 18);
/// ```
pub fn make_stub_report(
    layout: &str,
    input_path: &str,
    input_bytes: u64,
    decoded_length: u64,
) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "fieldwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        layout: layout.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
            decoded_length,
        },
        status: ErrorKind::NoError,
        error: None,
        consumed_bytes: None,
        record: serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn success_report_omits_error() {
        let record = Sample {
            name: "a".to_string(),
            value: 7,
        };
        let report = make_stub_report("roster", "in.bin", 5, 5)
            .with_outcome(&Ok(5), &record)
            .expect("report");

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("error").is_none());
        assert_eq!(value["status"], "NoError");
        assert_eq!(value["consumed_bytes"], 5);
        assert_eq!(value["record"]["value"], 7);
    }

    #[test]
    fn failure_report_keeps_partial_record() {
        let record = Sample {
            name: "partial".to_string(),
            value: 0,
        };
        let outcome = Err(DecodeError::ExceededDataRange {
            needed: 20,
            actual: 10,
        });
        let report = make_stub_report("roster", "in.bin", 10, 10)
            .with_outcome(&outcome, &record)
            .expect("report");

        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("consumed_bytes").is_none());
        assert_eq!(value["status"], "ExceededDataRange");
        assert_eq!(
            value["error"],
            "exceeded data range: need 20 bytes, got 10"
        );
        assert_eq!(value["record"]["name"], "partial");
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = make_stub_report("records", "-", 3, 3);
        let json = serde_json::to_string(&report).expect("serialize");
        let back: DecodeReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.layout, "records");
        assert_eq!(back.input.decoded_length, 3);
        assert_eq!(back.status, ErrorKind::NoError);
    }
}
