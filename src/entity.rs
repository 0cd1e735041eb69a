use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known column names shared with the store and the mapping layer.
pub mod columns {
    pub const PARTITION_KEY: &str = "PartitionKey";
    pub const ROW_KEY: &str = "RowKey";
    pub const ETAG: &str = "ETag";
    /// Soft-delete marker. Rows carrying `deleted = true` are logically gone
    /// but physically retained.
    pub const DELETED: &str = "deleted";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Text(CompactString),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Blob(Vec<u8>),
    Timestamp(i64),
    Null,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            // total_cmp so NaN-carrying rows still compare deterministically
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b).is_eq(),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Blob(a), Value::Blob(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

/// One record of a partitioned table: identity fields plus a property bag.
///
/// The partition key groups related rows and is the store's unit of
/// atomic-batch scope; the row key is unique within a partition; the etag is
/// the optimistic-concurrency token returned by the store (absent on rows
/// that have never been written).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowEntity {
    pub partition_key: String,
    pub row_key: String,
    pub etag: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl RowEntity {
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
            etag: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn is_deleted(&self) -> bool {
        matches!(
            self.properties.get(columns::DELETED),
            Some(Value::Boolean(true))
        )
    }

    pub fn set_deleted(&mut self, deleted: bool) {
        self.properties
            .insert(columns::DELETED.to_string(), Value::Boolean(deleted));
    }
}
