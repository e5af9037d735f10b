//! Corpus preprocessing
//!
//! Extracts a column of a tab-separated corpus release, normalizes every line
//! and writes the non-empty ones as a JSON array of strings, ready for annotation.
use std::path::PathBuf;

use log::{debug, info};

use crate::error::Error;
use crate::io::reader::ColumnReader;
use crate::io::writer::write_array;
use crate::pipelines::pipeline::Pipeline;
use crate::transformers::{Normalizer, Rules, Transform};

pub struct Preprocess {
    src: PathBuf,
    dst: PathBuf,
    reader: ColumnReader,
    rules: Rules,
}

impl Preprocess {
    pub fn new(src: PathBuf, dst: PathBuf, column: usize, has_header: bool, rules: Rules) -> Self {
        Self {
            src,
            dst,
            reader: ColumnReader::new(column, has_header),
            rules,
        }
    }
}

impl Pipeline<usize> for Preprocess {
    /// Returns the number of lines written.
    fn run(&self) -> Result<usize, Error> {
        debug!("normalization rules: {:?}", self.rules);
        let normalizer = Normalizer::from(self.rules);

        let raw = self.reader.read(&self.src)?;
        let total = raw.len();

        let lines: Vec<String> = raw
            .iter()
            .map(|line| normalizer.transform(line))
            .filter(|line| !line.is_empty())
            .collect();

        write_array(&self.dst, &lines)?;
        info!(
            "wrote {} lines to {:?} ({} empty lines dropped)",
            lines.len(),
            self.dst,
            total - lines.len()
        );

        Ok(lines.len())
    }
}
