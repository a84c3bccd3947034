use std::sync::Arc;
use parking_lot::RwLock;
use crate::core::types::Document;
use crate::memory::low_memory::LowMemoryConfig;
use crate::query::ast::Query;
use crate::reader::lazy::LazySegmentReader;
use crate::core::error::Result;

/// Streaming query processor for large result sets
#[derive(Clone)]
pub struct StreamingProcessor {
    pub batch_size: usize,
    pub buffer_size: usize,
    pub enable_compression: bool,
}

impl StreamingProcessor {
    pub fn new(config: LowMemoryConfig) -> Self {
        StreamingProcessor {
            batch_size: config.batch_size,
            buffer_size: config.buffer_size,
            enable_compression: config.enable_compression,
        }
    }

    /// Process query with streaming results
    pub fn process_streaming(
        &self,
        query: &Query,
        reader: &mut LazySegmentReader
    ) -> Result<StreamingResults> {
        let cursor = StreamingCursor::new(query.clone(), self.batch_size);

        Ok(StreamingResults {
            cursor: Arc::new(RwLock::new(cursor)),
            processor: self.clone(),
        })
    }
}

/// Streaming results with cursor
pub struct StreamingResults {
    pub cursor: Arc<RwLock<StreamingCursor>>,
    pub processor: StreamingProcessor,
}

pub struct StreamingCursor {
    pub query: Query,
    pub position: usize,
    pub batch_size: usize,
    pub exhausted: bool,
}

impl StreamingCursor {
    pub fn new(query: Query, batch_size: usize) -> Self {
        StreamingCursor {
            query,
            position: 0,
            batch_size,
            exhausted: false,
        }
    }
}

impl StreamingResults {
    /// Get next batch of results
    pub fn next_batch(&self) -> Result<Option<Vec<Document>>> {
        let mut cursor = self.cursor.write();

        if cursor.exhausted {
            return Ok(None);
        }

        // Fetch next batch
        let batch = self.fetch_batch(&mut cursor)?;

        if batch.len() < cursor.batch_size {
            cursor.exhausted = true;
        }

        cursor.position += batch.len();

        Ok(Some(batch))
    }

    /// Reset cursor to beginning
    pub fn reset(&self) {
        let mut cursor = self.cursor.write();
        cursor.position = 0;
        cursor.exhausted = false;
    }

    fn fetch_batch(&self, cursor: &mut StreamingCursor) -> Result<Vec<Document>> {
        // Implementation would fetch actual documents
        Ok(Vec::new()) // Placeholder
    }
}