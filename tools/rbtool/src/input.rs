use std::{fs, path::Path};

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Memory-map an input file.
pub fn map_input(path: &Path) -> Result<Mmap> {
    let file = fs::File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    // SAFETY: the mapping is read-only and lives only for the duration of one command.
    let mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("cannot map {}", path.display()))?;
    Ok(mmap)
}
