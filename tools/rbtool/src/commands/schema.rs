use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use rowbinary::{Header, RowBinaryCodec};

use crate::input::map_input;

#[derive(Args)]
pub struct SchemaArgs {
    /// Path to the RowBinaryWithNamesAndTypes file
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let buffer = map_input(&self.input)?;
        let header = RowBinaryCodec::new().header(&buffer)?;
        let text = format_header(&header);

        match self.output {
            Some(path) => fs::write(path, format!("{text}\n"))?,
            None => println!("{text}"),
        }
        Ok(())
    }
}

/// One `name<TAB>type` line per column.
fn format_header(header: &Header) -> String {
    header
        .names
        .iter()
        .zip(&header.types)
        .map(|(name, ty)| format!("{name}\t{}", ty.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_header_prints_canonical_types() {
        let codec = RowBinaryCodec::new();
        let mut buffer = Vec::new();
        rowbinary::write_header(
            &["id".to_string(), "tags".to_string()],
            &codec
                .resolve_columns(&["UInt64", "array(Nullable(String))"])
                .unwrap(),
            &mut buffer,
        );

        let header = codec.header(&buffer).unwrap();
        assert_eq!(
            format_header(&header),
            "id\tUInt64\ntags\tArray(Nullable(String))"
        );
    }
}
