use crate::SchemaError;

/// A value parsed from (or destined for) a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer (any declared width).
    Int(i64),
    /// An unsigned integer (any declared width).
    Uint(u64),
    /// UTF-8 text.
    Text(String),
    /// A raw byte run.
    Bytes(Vec<u8>),
    /// A nested record.
    Record(Record),
    /// An array of nested records.
    Array(Vec<Record>),
}

/// A keyed record in field-declaration order.
///
/// This is the engine's parse output and serialize input. Keys stay in
/// the order their fields were declared; [`Record::set`] on an existing
/// key replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(&'static str, Value)>,
}

impl Record {
    /// An empty record.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a field value.
    pub fn set(&mut self, name: &'static str, value: Value) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, name: &'static str, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Remove and return a field value, keeping later fields in order.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Look up a field value, failing with
    /// [`SchemaError::MissingField`] if absent.
    pub fn require(&self, name: &'static str) -> Result<&Value, SchemaError> {
        self.get(name).ok_or(SchemaError::MissingField(name))
    }

    /// The field as a signed integer.
    pub fn int(&self, name: &'static str) -> Result<i64, SchemaError> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "a signed integer",
            }),
        }
    }

    /// The field as an unsigned integer.
    pub fn uint(&self, name: &'static str) -> Result<u64, SchemaError> {
        match self.require(name)? {
            Value::Uint(v) => Ok(*v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "an unsigned integer",
            }),
        }
    }

    /// The field as an integer of either signedness.
    ///
    /// Used for size resolution, where the declared field may be signed
    /// (AIFF's `ckSize`) or unsigned (marker counts) but the consumer
    /// only cares about the magnitude. Unsigned values above `i64::MAX`
    /// are clamped; nothing in this format approaches them.
    pub(crate) fn int_like(&self, name: &'static str) -> Result<i64, SchemaError> {
        match self.require(name)? {
            Value::Int(v) => Ok(*v),
            Value::Uint(v) => Ok((*v).min(i64::MAX as u64) as i64),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "an integer",
            }),
        }
    }

    /// The field as text.
    pub fn text(&self, name: &'static str) -> Result<&str, SchemaError> {
        match self.require(name)? {
            Value::Text(v) => Ok(v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "text",
            }),
        }
    }

    /// The field as raw bytes.
    pub fn bytes(&self, name: &'static str) -> Result<&[u8], SchemaError> {
        match self.require(name)? {
            Value::Bytes(v) => Ok(v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "bytes",
            }),
        }
    }

    /// The field as a nested record.
    pub fn record(&self, name: &'static str) -> Result<&Record, SchemaError> {
        match self.require(name)? {
            Value::Record(v) => Ok(v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "a nested record",
            }),
        }
    }

    /// The field as an array of nested records.
    pub fn array(&self, name: &'static str) -> Result<&[Record], SchemaError> {
        match self.require(name)? {
            Value::Array(v) => Ok(v),
            _ => Err(SchemaError::WrongType {
                field: name,
                expected: "an array",
            }),
        }
    }
}
