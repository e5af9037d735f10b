/*!
# JSON array writing

Every file produced by the tool is a single, pretty-printed JSON array that is rewritten wholesale.

The user-facing object is [ResultStore], which knows where chunk and master result files live.
!*/
mod json;
mod results;

pub use json::write_array;
pub use results::ResultStore;
