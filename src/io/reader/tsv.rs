/*! Tab-separated corpus reader

Extracts a single column from a tab-separated file, such as the Dravidian Code-Mix
`tamil_sentiment_full.csv` release.
!*/
use std::path::Path;

use log::{debug, warn};

use crate::error::Error;

pub struct ColumnReader {
    column: usize,
    has_header: bool,
}

impl ColumnReader {
    /// Reader for the 0-based `column`.
    pub fn new(column: usize, has_header: bool) -> Self {
        Self { column, has_header }
    }

    fn builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(b'\t')
            .has_headers(self.has_header)
            .flexible(true)
            .quoting(false);
        builder
    }

    /// Read the column values of `src`, in order.
    ///
    /// Rows that are shorter than the column yield an empty string.
    /// Fails if the column index is beyond the width of the file.
    pub fn read(&self, src: &Path) -> Result<Vec<String>, Error> {
        let mut reader = self.builder().from_path(src)?;

        let mut width = 0;
        let mut values = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping row {}: {}", idx, e);
                    continue;
                }
            };
            width = width.max(record.len());
            values.push(record.get(self.column).unwrap_or_default().to_string());
        }

        if self.column >= width && !values.is_empty() {
            return Err(Error::Custom(format!(
                "Column index {} out of range. File has {} columns.",
                self.column, width
            )));
        }

        debug!("read {} rows from {:?}", values.len(), src);
        Ok(values)
    }
}
