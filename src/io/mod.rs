/*!
# IO utilities

Corpus loading and JSON result saving.
!*/
pub mod reader;
pub mod writer;
