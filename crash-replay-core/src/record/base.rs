//! Base implementation of records.
use crate::error::CrashReplayError;
use std::{collections::HashMap, convert::Into};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f32),

    /// A 1-dimensional array, e.g. one value per agent.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use crash_replay_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("replay_buffer_size", 3.0);
/// record.insert("note", RecordValue::String("replayed".to_string()));
///
/// assert_eq!(record.get_scalar("replay_buffer_size").unwrap(), 3.0);
/// assert_eq!(record.get_string("note").unwrap(), "replayed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` win over values of `self` on key collisions.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, CrashReplayError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(CrashReplayError::RecordValueTypeError("Scalar".to_string())),
            None => Err(CrashReplayError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, CrashReplayError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(CrashReplayError::RecordValueTypeError("Array1".to_string())),
            None => Err(CrashReplayError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, CrashReplayError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(CrashReplayError::RecordValueTypeError("String".to_string())),
            None => Err(CrashReplayError::RecordKeyError(k.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordValue};
    use crate::error::CrashReplayError;

    #[test]
    fn test_merge_prefers_right_hand_side() {
        let a = Record::from_slice(&[
            ("replay_buffer_size", RecordValue::Scalar(1.0)),
            ("reward", RecordValue::Array1(vec![0.5, -0.5])),
        ]);
        let b = Record::from_scalar("replay_buffer_size", 2.0);
        let merged = a.merge(b);

        assert_eq!(merged.get_scalar("replay_buffer_size").unwrap(), 2.0);
        assert_eq!(merged.get_array1("reward").unwrap(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_get_errors() {
        let record = Record::from_scalar("tick", 3.0);

        assert_eq!(
            record.get_scalar("missing"),
            Err(CrashReplayError::RecordKeyError("missing".to_string()))
        );
        assert_eq!(
            record.get_string("tick"),
            Err(CrashReplayError::RecordValueTypeError("String".to_string()))
        );
    }
}
