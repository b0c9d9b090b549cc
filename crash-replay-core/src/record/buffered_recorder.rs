use super::{Record, Recorder};

/// Buffered recorder.
///
/// Keeps every written record in memory, e.g. for summarizing a run of
/// episodes after the fact.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Collects the scalar stored under `key` in each record that has one.
    pub fn scalars(&self, key: &str) -> Vec<f32> {
        self.buf
            .iter()
            .filter_map(|r| r.get_scalar(key).ok())
            .collect()
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::BufferedRecorder;
    use crate::record::{Record, Recorder};

    #[test]
    fn test_scalars_skip_missing_keys() {
        let mut recorder = BufferedRecorder::new();
        assert!(recorder.is_empty());

        recorder.write(Record::from_scalar("commits", 1.0));
        recorder.write(Record::from_scalar("tick", 30.0));
        recorder.write(Record::from_scalar("commits", 0.0));

        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.scalars("commits"), vec![1.0, 0.0]);
    }
}
