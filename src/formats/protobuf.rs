//! Protocol Buffers codec.
//!
//! Protobuf needs a field number for every field it writes. Instead of attaching
//! numbers to [`Record`] with attributes, the numbers live in a [`SchemaDescriptor`]
//! value handed to [`ProtobufCodec::new`]. The codec turns the descriptor into a
//! protobuf file descriptor at construction time and encodes records as
//! `prost_reflect::DynamicMessage`s against it.
//!
//! The generated schema, with the default numbers:
//!
//! ```text
//! syntax = "proto3";
//! package serbench;
//!
//! message Timestamp { int64 seconds = 1; int32 nanos = 2; }
//! message Address   { string line1 = 1; string line2 = 2; }
//! message Record    { uint64 id = 1; string name = 2; Timestamp timestamp = 3; Address address = 4; }
//! message Dataset   { repeated Record records = 1; }
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use prost::Message;
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, Value};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
};

use super::{Codec, Format};
use crate::error::{BenchError, Result};
use crate::record::{Address, Record};

/// Protobuf package the generated messages live in.
pub const PACKAGE: &str = "serbench";

/// Largest field number protobuf allows.
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Field numbers reserved for the protobuf implementation.
pub const RESERVED_FIELD_NUMBERS: std::ops::RangeInclusive<u32> = 19_000..=19_999;

const FORMAT_NAME: &str = "Protobuf";

/// Field-number map for every message the codec writes.
///
/// # Examples
///
/// ```
/// use serbench::formats::{Codec, ProtobufCodec, SchemaDescriptor};
///
/// let schema = SchemaDescriptor {
///     name: 10,
///     ..SchemaDescriptor::default()
/// };
/// let codec = ProtobufCodec::new(schema)?;
/// assert_eq!(codec.schema().name, 10);
/// # Ok::<(), serbench::BenchError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaDescriptor {
    /// `Dataset.records`
    pub records: u32,
    /// `Record.id`
    pub id: u32,
    /// `Record.name`
    pub name: u32,
    /// `Record.timestamp`
    pub timestamp: u32,
    /// `Record.address`
    pub address: u32,
    /// `Address.line1`
    pub line1: u32,
    /// `Address.line2`
    pub line2: u32,
    /// `Timestamp.seconds`
    pub seconds: u32,
    /// `Timestamp.nanos`
    pub nanos: u32,
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self {
            records: 1,
            id: 1,
            name: 2,
            timestamp: 3,
            address: 4,
            line1: 1,
            line2: 2,
            seconds: 1,
            nanos: 2,
        }
    }
}

impl SchemaDescriptor {
    /// Field numbers grouped by message, as `(message, [(field, number)])`.
    #[must_use]
    pub fn messages(&self) -> [(&'static str, Vec<(&'static str, u32)>); 4] {
        [
            (
                "Timestamp",
                vec![("seconds", self.seconds), ("nanos", self.nanos)],
            ),
            ("Address", vec![("line1", self.line1), ("line2", self.line2)]),
            (
                "Record",
                vec![
                    ("id", self.id),
                    ("name", self.name),
                    ("timestamp", self.timestamp),
                    ("address", self.address),
                ],
            ),
            ("Dataset", vec![("records", self.records)]),
        ]
    }

    /// Check every number is usable and unique within its message.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidSchema`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (message, fields) in self.messages() {
            let mut seen = HashSet::new();
            for (field, number) in fields {
                if number == 0 || number > MAX_FIELD_NUMBER {
                    return Err(BenchError::InvalidSchema(format!(
                        "{message}.{field}: field number {number} is outside 1..={MAX_FIELD_NUMBER}"
                    )));
                }
                if RESERVED_FIELD_NUMBERS.contains(&number) {
                    return Err(BenchError::InvalidSchema(format!(
                        "{message}.{field}: field number {number} is reserved"
                    )));
                }
                if !seen.insert(number) {
                    return Err(BenchError::InvalidSchema(format!(
                        "{message}.{field}: field number {number} is already used"
                    )));
                }
            }
        }
        Ok(())
    }

    fn file_descriptor_set(&self) -> Result<FileDescriptorSet> {
        let message = |name: &str, fields: Vec<FieldDescriptorProto>| DescriptorProto {
            name: Some(name.to_string()),
            field: fields,
            ..Default::default()
        };

        let file = FileDescriptorProto {
            name: Some(format!("{PACKAGE}.proto")),
            package: Some(PACKAGE.to_string()),
            syntax: Some("proto3".to_string()),
            message_type: vec![
                message(
                    "Timestamp",
                    vec![
                        field("seconds", self.seconds, Type::Int64, None)?,
                        field("nanos", self.nanos, Type::Int32, None)?,
                    ],
                ),
                message(
                    "Address",
                    vec![
                        field("line1", self.line1, Type::String, None)?,
                        field("line2", self.line2, Type::String, None)?,
                    ],
                ),
                message(
                    "Record",
                    vec![
                        field("id", self.id, Type::Uint64, None)?,
                        field("name", self.name, Type::String, None)?,
                        field("timestamp", self.timestamp, Type::Message, Some("Timestamp"))?,
                        field("address", self.address, Type::Message, Some("Address"))?,
                    ],
                ),
                message(
                    "Dataset",
                    vec![FieldDescriptorProto {
                        label: Some(Label::Repeated as i32),
                        ..field("records", self.records, Type::Message, Some("Record"))?
                    }],
                ),
            ],
            ..Default::default()
        };

        Ok(FileDescriptorSet { file: vec![file] })
    }
}

fn field(
    name: &str,
    number: u32,
    ty: Type,
    message: Option<&str>,
) -> Result<FieldDescriptorProto> {
    let number = i32::try_from(number)
        .map_err(|_| BenchError::InvalidSchema(format!("{name}: field number {number} overflows")))?;
    Ok(FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(ty as i32),
        type_name: message.map(|m| format!(".{PACKAGE}.{m}")),
        ..Default::default()
    })
}

/// Protobuf codec driven by a runtime [`SchemaDescriptor`].
#[derive(Debug, Clone)]
pub struct ProtobufCodec {
    schema: SchemaDescriptor,
    dataset: MessageDescriptor,
    record: MessageDescriptor,
    address: MessageDescriptor,
    timestamp: MessageDescriptor,
}

impl ProtobufCodec {
    /// Build a codec for the given field numbers.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidSchema`] if the descriptor fails validation or
    /// the generated file descriptor is rejected by `prost-reflect`.
    pub fn new(schema: SchemaDescriptor) -> Result<Self> {
        schema.validate()?;
        let pool = DescriptorPool::from_file_descriptor_set(schema.file_descriptor_set()?)
            .map_err(|e| BenchError::InvalidSchema(e.to_string()))?;

        let lookup = |name: &str| {
            pool.get_message_by_name(&format!("{PACKAGE}.{name}"))
                .ok_or_else(|| BenchError::InvalidSchema(format!("message {name} missing from pool")))
        };

        Ok(Self {
            schema,
            dataset: lookup("Dataset")?,
            record: lookup("Record")?,
            address: lookup("Address")?,
            timestamp: lookup("Timestamp")?,
        })
    }

    /// The field numbers this codec was built with
    #[must_use]
    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    fn record_message(&self, record: &Record) -> Result<DynamicMessage> {
        let nanos = i32::try_from(record.timestamp.timestamp_subsec_nanos())
            .map_err(|e| BenchError::unsupported(FORMAT_NAME, e))?;

        let mut timestamp = DynamicMessage::new(self.timestamp.clone());
        set(&mut timestamp, "seconds", Value::I64(record.timestamp.timestamp()))?;
        set(&mut timestamp, "nanos", Value::I32(nanos))?;

        let mut address = DynamicMessage::new(self.address.clone());
        set(&mut address, "line1", Value::String(record.address.line1.clone()))?;
        set(&mut address, "line2", Value::String(record.address.line2.clone()))?;

        let mut message = DynamicMessage::new(self.record.clone());
        set(&mut message, "id", Value::U64(record.id))?;
        set(&mut message, "name", Value::String(record.name.clone()))?;
        set(&mut message, "timestamp", Value::Message(timestamp))?;
        set(&mut message, "address", Value::Message(address))?;
        Ok(message)
    }
}

impl Codec for ProtobufCodec {
    fn format(&self) -> Format {
        Format::Protobuf
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let list = records
            .iter()
            .map(|record| self.record_message(record).map(Value::Message))
            .collect::<Result<Vec<_>>>()?;

        let mut dataset = DynamicMessage::new(self.dataset.clone());
        set(&mut dataset, "records", Value::List(list))?;
        Ok(dataset.encode_to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>> {
        let dataset = DynamicMessage::decode(self.dataset.clone(), bytes)
            .map_err(|e| BenchError::malformed(FORMAT_NAME, e))?;

        let records = get(&dataset, "records")?;
        let list = records
            .as_list()
            .ok_or_else(|| BenchError::malformed(FORMAT_NAME, "records is not a list"))?;
        list.iter().map(read_record).collect()
    }
}

fn set(message: &mut DynamicMessage, name: &str, value: Value) -> Result<()> {
    message
        .try_set_field_by_name(name, value)
        .map_err(|e| BenchError::unsupported(FORMAT_NAME, e))
}

fn get<'a>(message: &'a DynamicMessage, name: &str) -> Result<Cow<'a, Value>> {
    message
        .get_field_by_name(name)
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, format!("missing field {name}")))
}

fn expect_message<'a>(value: &'a Value, what: &str) -> Result<&'a DynamicMessage> {
    value
        .as_message()
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, format!("{what} is not a message")))
}

fn read_string(message: &DynamicMessage, name: &str) -> Result<String> {
    get(message, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, format!("{name} is not a string")))
}

fn read_record(value: &Value) -> Result<Record> {
    let message = expect_message(value, "record")?;

    let id = get(message, "id")?
        .as_u64()
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, "id is not a uint64"))?;
    let name = read_string(message, "name")?;

    let timestamp = get(message, "timestamp")?;
    let timestamp = read_timestamp(expect_message(&timestamp, "timestamp")?)?;

    let address = get(message, "address")?;
    let address = expect_message(&address, "address")?;
    let address = Address::new(read_string(address, "line1")?, read_string(address, "line2")?);

    Ok(Record::new(id, name, timestamp, address))
}

fn read_timestamp(message: &DynamicMessage) -> Result<DateTime<Utc>> {
    let seconds = get(message, "seconds")?
        .as_i64()
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, "seconds is not an int64"))?;
    let nanos = get(message, "nanos")?
        .as_i32()
        .ok_or_else(|| BenchError::malformed(FORMAT_NAME, "nanos is not an int32"))?;
    let nanos = u32::try_from(nanos).map_err(|e| BenchError::malformed(FORMAT_NAME, e))?;

    DateTime::from_timestamp(seconds, nanos).ok_or_else(|| {
        BenchError::malformed(
            FORMAT_NAME,
            format!("timestamp {seconds}s {nanos}ns is out of range"),
        )
    })
}
