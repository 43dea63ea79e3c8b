use std::{
    fmt,
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom},
    sync::Arc,
};

use parking_lot::Mutex;

/// Anything that can be used as the contents of an unedited buffer.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Read only byte source the buffer is built on, usually an open file.
///
/// Cloning a source only clones the handle, the underlying reader is shared.
/// Seek + read pairs are done under a lock so clones can be read from in any
/// order. The length is measured once when the source is created, the source
/// content is expected to stay the same while it is in use.
#[derive(Clone)]
pub struct Source {
    reader: Arc<Mutex<Box<dyn ReadSeek + Send>>>,
    len: u64,
}

impl Source {
    /// Source with no content, used for new documents
    #[inline]
    pub fn empty() -> Source {
        Source::from_bytes(Vec::new())
    }

    #[inline]
    pub fn from_bytes(bytes: Vec<u8>) -> Source {
        let len = bytes.len() as u64;
        Source::with_len(Cursor::new(bytes), len)
    }

    pub fn from_reader<R: Read + Seek + Send + 'static>(mut reader: R) -> io::Result<Source> {
        let len = reader.seek(SeekFrom::End(0))?;
        Ok(Source::with_len(reader, len))
    }

    #[inline]
    pub fn from_file(file: File) -> io::Result<Source> {
        let len = file.metadata()?.len();
        Ok(Source::with_len(file, len))
    }

    fn with_len<R: Read + Seek + Send + 'static>(reader: R, len: u64) -> Source {
        let reader: Box<dyn ReadSeek + Send> = Box::new(reader);
        Source {
            reader: Arc::new(Mutex::new(reader)),
            len,
        }
    }

    /// Read bytes starting at `pos`. Reads until `buf` is full or the source
    /// ends, so a short read always means end of data.
    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut reader = self.reader.lock();
        reader.seek(SeekFrom::Start(pos))?;

        let mut read = 0;
        while read < buf.len() {
            match reader.read(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        Ok(read)
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the two handles point to the same underlying reader
    #[inline]
    pub fn ptr_eq(&self, other: &Source) -> bool {
        Arc::ptr_eq(&self.reader, &other.reader)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("len", &self.len)
            .field("handles", &Arc::strong_count(&self.reader))
            .finish()
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::empty()
    }
}
