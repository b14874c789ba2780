//! Configured entry point bundling a registry, a null policy and a batch size.

use std::sync::Arc;

#[cfg(feature = "arrow")]
use arrow::{datatypes::SchemaRef, record_batch::RecordBatch};
use rowbinary_core::{ColumnTypeRef, NullPolicy, Value, WireCursor};
#[cfg(feature = "arrow")]
use rowbinary_arrow::{result_rows_to_record_batch, type_defs_to_arrow_schema};
use rowbinary_types::TypeRegistry;

use crate::{
    decoder::{self, Header, RowDecoder},
    encoder::{self, InsertColumns},
    error::RowBinaryError,
    result_set::ResultSet,
};

const DEFAULT_BATCH_SIZE: usize = 1024;

/// Decodes and encodes RowBinary buffers with a shared [`TypeRegistry`].
#[derive(Clone)]
pub struct RowBinaryCodec {
    registry: Arc<TypeRegistry>,
    nulls: NullPolicy,
    batch_size: usize,
}

/// Builder for configuring [`RowBinaryCodec`].
#[derive(Default)]
pub struct RowBinaryCodecBuilder {
    registry: Option<Arc<TypeRegistry>>,
    nulls: NullPolicy,
    batch_size: Option<usize>,
}

impl RowBinaryCodec {
    /// Create a builder for [`RowBinaryCodec`].
    pub fn builder() -> RowBinaryCodecBuilder {
        RowBinaryCodecBuilder::default()
    }

    /// Codec with the built-in types and default settings.
    pub fn new() -> Self {
        Self::builder().with_default_types().build()
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn null_policy(&self) -> NullPolicy {
        self.nulls
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Decode a `RowBinaryWithNamesAndTypes` buffer.
    pub fn decode(&self, buffer: &[u8]) -> Result<ResultSet, RowBinaryError> {
        decoder::decode_result_set(&self.registry, buffer, self.nulls)
    }

    /// Iterate rows without collecting them.
    pub fn rows<'a>(&self, buffer: &'a [u8]) -> Result<RowDecoder<'a>, RowBinaryError> {
        RowDecoder::new(&self.registry, buffer, self.nulls)
    }

    /// Read only the header of a buffer.
    pub fn header(&self, buffer: &[u8]) -> Result<Header, RowBinaryError> {
        decoder::read_header(&self.registry, &mut WireCursor::new(buffer))
    }

    /// Encode a headerless `RowBinary` insert payload.
    pub fn encode(
        &self,
        rows: &[Vec<Value>],
        columns: InsertColumns<'_>,
    ) -> Result<Vec<u8>, RowBinaryError> {
        encoder::encode_rows(&self.registry, rows, columns)
    }

    /// Encode a result set with its header.
    pub fn encode_result_set(&self, result_set: &ResultSet) -> Result<Vec<u8>, RowBinaryError> {
        encoder::encode_result_set(result_set)
    }

    pub fn resolve_columns<S: AsRef<str>>(
        &self,
        type_names: &[S],
    ) -> Result<Vec<ColumnTypeRef>, RowBinaryError> {
        encoder::resolve_columns(&self.registry, type_names)
    }

    /// Arrow schema for a buffer's header.
    #[cfg(feature = "arrow")]
    pub fn arrow_schema(&self, buffer: &[u8]) -> Result<SchemaRef, RowBinaryError> {
        Ok(header_arrow_schema(&self.header(buffer)?))
    }

    /// Decode a buffer and emit Arrow RecordBatches of at most `batch_size` rows.
    ///
    /// Rows are converted as they are decoded; the callback sees every batch
    /// before a later decode error (if any) is returned.
    #[cfg(feature = "arrow")]
    pub fn for_each_record_batch(
        &self,
        buffer: &[u8],
        mut callback: impl FnMut(RecordBatch) -> Result<(), Box<dyn std::error::Error + Send + Sync>>,
    ) -> Result<(), RowBinaryError> {
        fn flush_batch<F>(
            schema: &SchemaRef,
            rows: &mut Vec<Vec<Value>>,
            callback: &mut F,
        ) -> Result<(), RowBinaryError>
        where
            F: FnMut(RecordBatch) -> Result<(), Box<dyn std::error::Error + Send + Sync>>,
        {
            if rows.is_empty() {
                return Ok(());
            }

            let batch = result_rows_to_record_batch(schema, rows.as_slice())?;
            rows.clear();
            callback(batch).map_err(RowBinaryError::Callback)
        }

        let decoder = self.rows(buffer)?;
        let schema = header_arrow_schema(decoder.header());
        let mut rows = Vec::with_capacity(self.batch_size);

        for row in decoder {
            rows.push(row?);
            if rows.len() >= self.batch_size {
                flush_batch(&schema, &mut rows, &mut callback)?;
            }
        }

        flush_batch(&schema, &mut rows, &mut callback)
    }
}

impl Default for RowBinaryCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RowBinaryCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBinaryCodec")
            .field("families", &self.registry.family_names())
            .field("nulls", &self.nulls)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl RowBinaryCodecBuilder {
    /// Use a pre-built registry (shared with other codecs).
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Use a registry with every built-in type.
    pub fn with_default_types(self) -> Self {
        self.with_registry(Arc::new(TypeRegistry::with_default_types()))
    }

    /// How wire null markers decode (default: [`NullPolicy::Null`]).
    pub fn with_null_policy(mut self, nulls: NullPolicy) -> Self {
        self.nulls = nulls;
        self
    }

    /// Set the number of rows per RecordBatch (default: 1024, minimum 1).
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size.max(1));
        self
    }

    /// Build the codec. Without a registry every type name is unknown.
    pub fn build(self) -> RowBinaryCodec {
        RowBinaryCodec {
            registry: self.registry.unwrap_or_default(),
            nulls: self.nulls,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

#[cfg(feature = "arrow")]
fn header_arrow_schema(header: &Header) -> SchemaRef {
    let defs: Vec<_> = header.types.iter().map(|t| t.type_def()).collect();
    Arc::new(type_defs_to_arrow_schema(&header.names, &defs))
}
