mod buffer;
mod error;
mod search;
mod segments;
mod source;

pub use buffer::Buffer;
pub use error::BufferError;
pub use search::{Searcher, SearcherRev};
pub use source::{ReadSeek, Source};
