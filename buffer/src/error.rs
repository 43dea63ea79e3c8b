use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("Offset {offset} is out of range for a buffer of length {len}")]
    OutOfRange { offset: u64, len: u64 },
}
