use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Error;

/// (Over)write `dst` with `values` as a pretty-printed JSON array.
///
/// Non-ASCII text is written as is.
pub fn write_array<T: Serialize>(dst: &Path, values: &[T]) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(dst)?);
    serde_json::to_writer_pretty(&mut writer, values)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
