use arrow::datatypes::{DataType, Schema};
use clap::ValueEnum;

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Jsonl,
    Csv,
}

impl OutputFormat {
    /// Whether a column of this type can be written in this format.
    pub fn supports(&self, dt: &DataType) -> bool {
        match self {
            OutputFormat::Jsonl => true,
            OutputFormat::Csv => !matches!(
                dt,
                DataType::List(_) | DataType::Struct(_) | DataType::Map(_, _)
            ),
        }
    }

    /// Indices of the columns kept for this format, and names of the dropped ones.
    pub fn project(&self, schema: &Schema) -> (Vec<usize>, Vec<String>) {
        let mut kept = Vec::new();
        let mut dropped = Vec::new();
        for (i, field) in schema.fields().iter().enumerate() {
            if self.supports(field.data_type()) {
                kept.push(i);
            } else {
                dropped.push(field.name().clone());
            }
        }
        (kept, dropped)
    }
}
