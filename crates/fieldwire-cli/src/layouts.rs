use clap::ValueEnum;
use fieldwire_core::{
    CountWidth, DecodeError, DecodeReport, DescriptorError, Field, Pipeline, decode_consumed,
};
use serde::Serialize;

/// Built-in packet layouts selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Named roster: title, native u32, u8 member count, members as
    /// (text allowing empty, big-endian u32).
    Roster,
    /// Three binary records, each with a u8 length prefix.
    Records,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Roster, Layout::Records];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Roster => "roster",
            Layout::Records => "records",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Layout::Roster => {
                "title text, native u32 value, u8-counted members (name text, big-endian u32 id)"
            }
            Layout::Records => "three binary records, each prefixed by a u8 byte length",
        }
    }

    /// Decode the first `length` bytes of `bytes` and fill the report.
    pub fn decode(
        self,
        bytes: &[u8],
        length: usize,
        report: DecodeReport,
    ) -> anyhow::Result<DecodeReport> {
        match self {
            Layout::Roster => run(&roster_pipeline()?, bytes, length, report),
            Layout::Records => run(&records_pipeline()?, bytes, length, report),
        }
    }
}

fn run<T: Default + Serialize>(
    pipeline: &Pipeline<T>,
    bytes: &[u8],
    length: usize,
    report: DecodeReport,
) -> anyhow::Result<DecodeReport> {
    let mut record = T::default();
    let outcome: Result<usize, DecodeError> =
        decode_consumed(pipeline, bytes, length, &mut record);
    Ok(report.with_outcome(&outcome, &record)?)
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Roster {
    pub name: String,
    pub value: u32,
    pub members: Vec<Member>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Member {
    pub name: String,
    pub id: u32,
}

pub fn roster_pipeline() -> Result<Pipeline<Roster>, DescriptorError> {
    let member = Field::composite(
        vec![
            Field::text_allow_empty(64, |m: &mut Member, s: &str| m.name = s.to_owned())?,
            Field::value_inverted::<u32>(|m: &mut Member, v| m.id = v),
        ],
        |r: &mut Roster, m| r.members.push(m),
    )?;

    Ok(Pipeline::builder()
        .field(Field::text(64, |r: &mut Roster, s: &str| {
            r.name = s.to_owned()
        })?)
        .field(Field::value::<u32>(|r: &mut Roster, v| r.value = v))
        .field(Field::dynamic_array(CountWidth::U8, member))
        .build())
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Records {
    pub records: Vec<RecordEntry>,
}

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct RecordEntry {
    pub length: usize,
    pub hex: String,
}

pub fn records_pipeline() -> Result<Pipeline<Records>, DescriptorError> {
    let record = Field::binary(CountWidth::U8, |r: &mut Records, payload: &[u8]| {
        r.records.push(RecordEntry {
            length: payload.len(),
            hex: to_hex(payload),
        })
    });
    Ok(Pipeline::new(vec![Field::static_array(3, record)?]))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}
