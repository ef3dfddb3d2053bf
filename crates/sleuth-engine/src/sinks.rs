//! Snapshot sinks: where state snapshots go after each phase transition.

use std::io::Write;
use std::sync::Mutex;

use sleuth_core::errors::SinkError;
use sleuth_core::models::Phase;
use sleuth_core::traits::SnapshotSink;
use sleuth_core::InvestigationState;

/// In-process sink keeping every snapshot as a JSON value.
#[derive(Debug, Default)]
pub struct MemorySink {
    snapshots: Mutex<Vec<serde_json::Value>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<serde_json::Value> {
        self.snapshots.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Phase recorded in each snapshot, in emission order.
    pub fn phases(&self) -> Vec<Phase> {
        self.snapshots()
            .into_iter()
            .filter_map(|snapshot| serde_json::from_value(snapshot.get("phase")?.clone()).ok())
            .collect()
    }
}

impl SnapshotSink for MemorySink {
    fn emit(&self, state: &InvestigationState) -> Result<(), SinkError> {
        let value = serde_json::to_value(state).map_err(|e| SinkError::Serialization {
            message: e.to_string(),
        })?;
        let mut snapshots = self.snapshots.lock().map_err(|_| SinkError::Io {
            message: "snapshot buffer poisoned".to_string(),
        })?;
        snapshots.push(value);
        Ok(())
    }
}

/// Writes one JSON document per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|_| SinkError::Io {
            message: "writer poisoned".to_string(),
        })
    }
}

impl<W: Write + Send> SnapshotSink for JsonLinesSink<W> {
    fn emit(&self, state: &InvestigationState) -> Result<(), SinkError> {
        let line = serde_json::to_string(state).map_err(|e| SinkError::Serialization {
            message: e.to_string(),
        })?;
        let mut writer = self.writer.lock().map_err(|_| SinkError::Io {
            message: "writer poisoned".to_string(),
        })?;
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| SinkError::Io {
                message: e.to_string(),
            })
    }
}
