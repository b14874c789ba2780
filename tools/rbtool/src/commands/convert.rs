use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rowbinary::{NullPolicy, RowBinaryCodec};
use tracing::{info, warn};

use crate::{
    format::OutputFormat,
    input::map_input,
    writer::{CsvWriter, JsonlWriter, RecordBatchWriter},
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the RowBinaryWithNamesAndTypes file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decode Nullable nulls as the inner type's zero value
    #[arg(long)]
    zero_nulls: bool,

    /// Rows per Arrow batch
    #[arg(long, default_value_t = 1024)]
    batch_size: usize,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let nulls = if self.zero_nulls {
            NullPolicy::Zero
        } else {
            NullPolicy::Null
        };
        let codec = RowBinaryCodec::builder()
            .with_default_types()
            .with_null_policy(nulls)
            .with_batch_size(self.batch_size)
            .build();
        let buffer = map_input(&self.input)?;

        let schema = codec.arrow_schema(&buffer)?;
        let (columns, dropped) = self.format.project(&schema);
        if !dropped.is_empty() {
            warn!(
                "{:?} output skips nested columns: {}",
                self.format,
                dropped.join(", ")
            );
        }

        let mut writer: Box<dyn RecordBatchWriter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlWriter::new(self.output.as_deref())?),
            OutputFormat::Csv => Box::new(CsvWriter::new(self.output.as_deref())?),
        };

        let mut total_rows = 0;
        codec.for_each_record_batch(&buffer, |batch| {
            let batch = if dropped.is_empty() {
                batch
            } else {
                batch.project(&columns)?
            };
            total_rows += batch.num_rows();
            writer.write_batch(batch)?;
            Ok(())
        })?;

        writer.finish()?;
        info!(rows = total_rows, input = %self.input.display(), "converted");
        Ok(())
    }
}
