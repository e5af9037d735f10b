/*! Offline processing

Operations on already generated result files.
!*/
pub mod merge;

pub use merge::{merge_file, merge_into_master};
