/*! Corpus reading utilities

[corpus] reads preprocessed corpora (JSON arrays of strings),
[tsv] reads raw tab-separated releases for preprocessing.
!*/
pub mod corpus;
pub mod tsv;

pub use corpus::{load_span, Corpus, TextItem};
pub use tsv::ColumnReader;
