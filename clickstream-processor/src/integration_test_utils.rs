use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::SinkError;
use crate::sink::DocumentSink;
use crate::types::AggregateRow;

/// A sink that accumulates rows in memory, for integration tests.
#[derive(Clone, Default)]
pub struct MemorySink {
    rows: Arc<Mutex<Vec<AggregateRow>>>,
}

impl MemorySink {
    pub fn rows(&self) -> Vec<AggregateRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn index(&self, row: &AggregateRow) -> Result<(), SinkError> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }
}
