use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use arrow::record_batch::RecordBatch;

pub trait RecordBatchWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

/// Buffered file or stdout destination; stdout is flushed after every batch.
fn open_output(output: Option<&Path>) -> Result<(Box<dyn Write>, bool)> {
    Ok(match output {
        Some(path) => (Box::new(BufWriter::new(fs::File::create(path)?)), false),
        None => (Box::new(BufWriter::new(io::stdout().lock())), true),
    })
}

// --- JSON Lines ---

pub struct JsonlWriter<W: Write = Box<dyn Write>> {
    dest: W,
    flush_each_batch: bool,
}

impl JsonlWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let (dest, flush_each_batch) = open_output(output)?;
        Ok(Self::from_writer(dest, flush_each_batch))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn from_writer(dest: W, flush_each_batch: bool) -> Self {
        Self {
            dest,
            flush_each_batch,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.dest
    }
}

impl<W: Write> RecordBatchWriter for JsonlWriter<W> {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let mut json_writer = arrow::json::LineDelimitedWriter::new(Vec::new());
        json_writer.write(&batch)?;
        json_writer.finish()?;
        self.dest.write_all(&json_writer.into_inner())?;
        if self.flush_each_batch {
            self.dest.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

// --- CSV ---

pub struct CsvWriter<W: Write = Box<dyn Write>> {
    dest: W,
    header_written: bool,
    flush_each_batch: bool,
}

impl CsvWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let (dest, flush_each_batch) = open_output(output)?;
        Ok(Self::from_writer(dest, flush_each_batch))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn from_writer(dest: W, flush_each_batch: bool) -> Self {
        Self {
            dest,
            header_written: false,
            flush_each_batch,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.dest
    }
}

impl<W: Write> RecordBatchWriter for CsvWriter<W> {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let with_header = !self.header_written;
        self.header_written = true;
        let mut csv_writer = arrow::csv::WriterBuilder::new()
            .with_header(with_header)
            .build(&mut self.dest);
        csv_writer.write(&batch)?;
        drop(csv_writer);
        if self.flush_each_batch {
            self.dest.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{StringArray, UInt8Array},
        datatypes::{DataType, Field, Schema},
    };

    use super::*;

    fn batch(ids: &[u8], names: &[Option<&str>]) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::UInt8, false),
            Field::new("name", DataType::Utf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(UInt8Array::from(ids.to_vec())),
                Arc::new(StringArray::from(names.to_vec())),
            ],
        )
        .unwrap()
    }

    #[test]
    fn jsonl_writes_one_object_per_row() {
        let mut writer = JsonlWriter::from_writer(Vec::new(), false);
        writer.write_batch(batch(&[1], &[Some("a")])).unwrap();
        writer.write_batch(batch(&[2], &[None])).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "{\"id\":1,\"name\":\"a\"}\n{\"id\":2}\n");
    }

    #[test]
    fn csv_writes_header_once() {
        let mut writer = CsvWriter::from_writer(Vec::new(), false);
        writer.write_batch(batch(&[1], &[Some("a")])).unwrap();
        writer.write_batch(batch(&[2], &[Some("b")])).unwrap();
        writer.finish().unwrap();

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "id,name\n1,a\n2,b\n");
    }
}
