/*! Master merging

Appends chunk results to the master result file.

The master file is read, extended and rewritten as a whole: there is no locking,
so only one run should merge into a given master at a time.
Merging is append-only. Prior entries are kept as raw JSON values and are never
rewritten, reordered or deduplicated, meaning that merging the same chunk twice
duplicates its records.
!*/
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::io::writer::write_array;

fn parse_array(src: &Path) -> Result<Vec<Value>, Error> {
    let reader = BufReader::new(File::open(src)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Read the master entries, falling back on an empty set when the file
/// is absent or is not a JSON array.
fn read_master(master: &Path) -> Vec<Value> {
    if !master.exists() {
        debug!("no master file at {:?}, starting from scratch", master);
        return Vec::new();
    }

    match parse_array(master) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "could not read master file {:?} ({}), treating it as empty",
                master, e
            );
            Vec::new()
        }
    }
}

/// Append `chunk` to the master file at `master`.
///
/// Returns the number of entries in the master file after merging.
pub fn merge_into_master<T: Serialize>(master: &Path, chunk: &[T]) -> Result<usize, Error> {
    let mut entries = read_master(master);
    let prior = entries.len();

    for record in chunk {
        entries.push(serde_json::to_value(record)?);
    }

    write_array(master, &entries)?;
    info!(
        "merged {} results into {:?} ({} -> {} entries)",
        chunk.len(),
        master,
        prior,
        entries.len()
    );
    Ok(entries.len())
}

/// Append the content of the chunk file `chunk` to the master file at `master`.
///
/// Unlike the master file, the chunk file has to be a valid JSON array.
pub fn merge_file(chunk: &Path, master: &Path) -> Result<usize, Error> {
    let records = parse_array(chunk)?;
    merge_into_master(master, &records)
}
