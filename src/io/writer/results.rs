/*! Result files location

Chunk files are named `<base>_<start>_to_<end>.json` after the effective span bounds,
the master file is `<base>_master.json`. Both live at the root of `dst`.
!*/
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Error;
use crate::record::AnnotationResult;
use crate::span::Bounds;

use super::write_array;

#[derive(Debug, Clone)]
pub struct ResultStore {
    dst: PathBuf,
    base: String,
}

impl ResultStore {
    pub fn new(dst: &Path, base: &str) -> Self {
        Self {
            dst: dst.to_path_buf(),
            base: base.to_string(),
        }
    }

    /// Create the destination folder if needed.
    pub fn init(&self) -> Result<(), Error> {
        if !self.dst.exists() {
            debug!("creating result folder {:?}", self.dst);
            std::fs::create_dir_all(&self.dst)?;
        }
        Ok(())
    }

    /// Path of the chunk file for `bounds`.
    pub fn chunk_path(&self, bounds: &Bounds) -> PathBuf {
        self.dst.join(format!(
            "{}_{}_to_{}.json",
            self.base,
            bounds.start(),
            bounds.end()
        ))
    }

    /// Path of the master file.
    pub fn master_path(&self) -> PathBuf {
        self.dst.join(format!("{}_master.json", self.base))
    }

    /// Overwrite the chunk file for `bounds` with `results`.
    pub fn write_chunk(
        &self,
        bounds: &Bounds,
        results: &[AnnotationResult],
    ) -> Result<PathBuf, Error> {
        let path = self.chunk_path(bounds);
        write_array(&path, results)?;
        debug!("wrote {} results to {:?}", results.len(), path);
        Ok(path)
    }
}
