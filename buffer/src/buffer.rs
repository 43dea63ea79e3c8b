use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    ops::Range,
    path::Path,
};

use crate::{error::BufferError, segments::Segments, source::Source};

/// Chunk size used when streaming the buffer content
const CHUNK_SIZE: usize = 64 * 1024;

/// Editable byte buffer.
///
/// The buffer is built on a read only [`Source`], usually an open file, and
/// a list of segments describing which parts of the content come from the
/// source and which are edited bytes kept in memory. Edits only touch the
/// segment list so files of any size can be edited without reading them into
/// memory.
///
/// Cloning is cheap: the source is shared between clones and only the edited
/// bytes are copied. Clones are fully independent of each other, which is what
/// the undo history relies on.
///
/// The buffer implements [`Read`] and [`Seek`] over the edited content. The
/// read position is only used by these traits, [`Buffer::read_at`] reads
/// without touching it.
#[derive(Debug, Clone)]
pub struct Buffer {
    segments: Segments,
    index: u64,
}

impl Buffer {
    /// Create a new empty buffer
    #[inline]
    pub fn new() -> Buffer {
        Buffer::from_source(Source::empty())
    }

    #[inline]
    pub fn from_source(source: Source) -> Buffer {
        Buffer {
            segments: Segments::new(source),
            index: 0,
        }
    }

    #[inline]
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B) -> Buffer {
        Buffer::from_source(Source::from_bytes(bytes.into()))
    }

    #[inline]
    pub fn from_reader<R: Read + Seek + Send + 'static>(reader: R) -> io::Result<Buffer> {
        let source = Source::from_reader(reader)?;
        Ok(Buffer::from_source(source))
    }

    /// Create a file backed buffer.
    /// The file is read on demand and never written to.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Buffer> {
        let file = File::open(path.as_ref())?;
        let source = Source::from_file(file)?;
        log::debug!(
            "Opened file backed buffer {:?}, {} bytes",
            path.as_ref(),
            source.len()
        );
        Ok(Buffer::from_source(source))
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of segments the content is currently split into
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.count()
    }

    /// Read bytes starting at `pos` without moving the read position.
    /// Returns the number of bytes read, less than `buf.len()` only if the
    /// content ended.
    #[inline]
    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.segments.read_at(pos, buf)
    }

    /// Read at most `len` bytes starting at `pos`
    pub fn bytes_at(&self, pos: u64, len: usize) -> io::Result<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        let n = self.read_at(pos, &mut bytes)?;
        bytes.truncate(n);
        Ok(bytes)
    }

    /// Insert `byte` at `pos`. `pos` may be equal to the length, which
    /// appends.
    pub fn insert(&mut self, pos: u64, byte: u8) -> Result<(), BufferError> {
        self.check_pos(pos, self.len() + 1)?;
        self.segments.insert(pos, byte);
        Ok(())
    }

    /// Insert all of `bytes` starting at `pos`
    pub fn insert_bytes<B: AsRef<[u8]>>(&mut self, pos: u64, bytes: B) -> Result<(), BufferError> {
        self.check_pos(pos, self.len() + 1)?;
        for (i, byte) in bytes.as_ref().iter().enumerate() {
            self.segments.insert(pos + i as u64, *byte);
        }
        Ok(())
    }

    /// Overwrite the byte at `pos`
    pub fn replace(&mut self, pos: u64, byte: u8) -> Result<(), BufferError> {
        self.check_pos(pos, self.len())?;
        self.segments.replace(pos, byte);
        Ok(())
    }

    /// Remove the byte at `pos`
    pub fn delete(&mut self, pos: u64) -> Result<(), BufferError> {
        self.check_pos(pos, self.len())?;
        self.segments.remove(pos);
        Ok(())
    }

    /// Remove all bytes in `range`
    pub fn delete_range(&mut self, range: Range<u64>) -> Result<(), BufferError> {
        if range.is_empty() {
            return Ok(());
        }

        let len = self.len();
        self.check_pos(range.start, len)?;
        self.check_pos(range.end - 1, len)?;

        for _ in range.clone() {
            self.segments.remove(range.start);
        }
        Ok(())
    }

    #[inline]
    fn check_pos(&self, offset: u64, limit: u64) -> Result<(), BufferError> {
        if offset < limit {
            Ok(())
        } else {
            Err(BufferError::OutOfRange {
                offset,
                len: self.len(),
            })
        }
    }

    /// Ranges of the content that are edited, in order
    #[inline]
    pub fn edited_indices(&self) -> Vec<Range<u64>> {
        self.segments.edited_indices()
    }

    /// Whether any part of the content is edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        !self.segments.edited_indices().is_empty()
    }

    /// Write the whole content to `writer`. Does not move the read position.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<u64> {
        let mut chunk = vec![0u8; CHUNK_SIZE];
        let mut pos = 0;

        loop {
            let n = self.read_at(pos, &mut chunk)?;
            writer.write_all(&chunk[..n])?;
            pos += n as u64;

            if n < chunk.len() {
                break;
            }
        }

        writer.flush()?;
        Ok(pos)
    }

    /// Read the whole content into memory
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(usize::try_from(self.len()).unwrap_or(0));
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    #[cfg(test)]
    pub(crate) fn check(&self) -> Result<(), &'static str> {
        self.segments.check()
    }
}

impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.segments.read_at(self.index, buf)?;
        self.index += n as u64;
        Ok(n)
    }
}

impl Seek for Buffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match pos {
            SeekFrom::Start(n) => {
                self.index = n;
                return Ok(n);
            }
            SeekFrom::Current(n) => (self.index, n),
            SeekFrom::End(n) => (self.len(), n),
        };

        match base.checked_add_signed(offset) {
            Some(n) => {
                self.index = n;
                Ok(n)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::new()
    }
}

#[cfg(test)]
mod test {
    use std::{
        io::Cursor,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    use super::*;

    const HEX: &[u8] = b"0123456789abcdef";

    fn read_from_start(buf: &mut Buffer, len: usize) -> Vec<u8> {
        buf.seek(SeekFrom::Start(0)).unwrap();
        let mut out = vec![0u8; len];
        let n = buf.read(&mut out).unwrap();
        out.truncate(n);
        out
    }

    #[test]
    fn insert_at_start() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.insert(0, 0x39).unwrap();
        assert_eq!(b"90123456", read_from_start(&mut buf, 8).as_slice());
        assert_eq!(17, buf.len());
    }

    #[test]
    fn insert_in_middle() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.insert(4, 0x37).unwrap();
        assert_eq!(b"01237456", read_from_start(&mut buf, 8).as_slice());
    }

    #[test]
    fn delete_in_middle() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.delete(7).unwrap();
        assert_eq!(b"01234568", read_from_start(&mut buf, 8).as_slice());
        assert_eq!(15, buf.len());
    }

    #[test]
    fn out_of_range() {
        let mut buf = Buffer::from_bytes("abc");
        assert_eq!(
            Err(BufferError::OutOfRange { offset: 4, len: 3 }),
            buf.insert(4, b'x')
        );
        assert_eq!(
            Err(BufferError::OutOfRange { offset: 3, len: 3 }),
            buf.replace(3, b'x')
        );
        assert_eq!(
            Err(BufferError::OutOfRange { offset: 3, len: 3 }),
            buf.delete(3)
        );
        assert!(buf.insert(3, b'd').is_ok());
        assert_eq!(b"abcd".to_vec(), buf.to_vec().unwrap());
        assert_eq!(Ok(()), buf.check());
    }

    #[test]
    fn empty_buffer() {
        let mut buf = Buffer::new();
        assert!(buf.is_empty());
        assert!(buf.delete(0).is_err());
        assert!(buf.replace(0, 1).is_err());

        buf.insert(0, b'a').unwrap();
        assert_eq!(1, buf.len());
        buf.delete(0).unwrap();
        assert!(buf.is_empty());
        assert!(!buf.is_edited());
    }

    #[test]
    fn read_advances_cursor() {
        let mut buf = Buffer::from_bytes(HEX);
        let mut out = [0u8; 4];
        assert_eq!(4, buf.read(&mut out).unwrap());
        assert_eq!(b"0123", &out);
        assert_eq!(4, buf.read(&mut out).unwrap());
        assert_eq!(b"4567", &out);

        // read_at does not move the cursor
        buf.read_at(12, &mut out).unwrap();
        assert_eq!(b"cdef", &out);
        assert_eq!(4, buf.read(&mut out).unwrap());
        assert_eq!(b"89ab", &out);
    }

    #[test]
    fn short_read_at_end() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.seek(SeekFrom::End(-3)).unwrap();
        let mut out = [0u8; 8];
        assert_eq!(3, buf.read(&mut out).unwrap());
        assert_eq!(b"def", &out[..3]);
        assert_eq!(0, buf.read(&mut out).unwrap());
    }

    #[test]
    fn seek_modes() {
        let mut buf = Buffer::from_bytes(HEX);
        assert_eq!(5, buf.seek(SeekFrom::Start(5)).unwrap());
        assert_eq!(7, buf.seek(SeekFrom::Current(2)).unwrap());
        assert_eq!(4, buf.seek(SeekFrom::Current(-3)).unwrap());
        assert_eq!(14, buf.seek(SeekFrom::End(-2)).unwrap());
        assert_eq!(20, buf.seek(SeekFrom::End(4)).unwrap());
        assert!(buf.seek(SeekFrom::Current(-21)).is_err());
        assert_eq!(20, buf.seek(SeekFrom::Current(0)).unwrap());
    }

    #[test]
    fn multi_byte_edits() {
        let mut buf = Buffer::from_bytes("hello world");
        buf.insert_bytes(5, ",").unwrap();
        buf.delete_range(6..12).unwrap();
        buf.insert_bytes(6, " there").unwrap();
        assert_eq!(b"hello, there".to_vec(), buf.to_vec().unwrap());
        assert_eq!(vec![5..12], buf.edited_indices());
        assert!(buf.delete_range(10..13).is_err());
        assert!(buf.delete_range(3..3).is_ok());
    }

    #[test]
    fn clone_independence() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.replace(0, b'x').unwrap();
        let mut copy = buf.clone();

        buf.replace(0, b'y').unwrap();
        buf.insert(1, b'z').unwrap();
        copy.delete(1).unwrap();

        assert_eq!(b"yz123456789abcdef".to_vec(), buf.to_vec().unwrap());
        assert_eq!(b"x23456789abcdef".to_vec(), copy.to_vec().unwrap());
    }

    #[test]
    fn reader_source() {
        let mut buf = Buffer::from_reader(Cursor::new(HEX.to_vec())).unwrap();
        buf.insert(16, b'!').unwrap();
        let mut out = Vec::new();
        assert_eq!(17, buf.write_to(&mut out).unwrap());
        assert_eq!(b"0123456789abcdef!".to_vec(), out);
    }

    /// Reader that starts failing once `fail` is set
    struct Failing {
        inner: Cursor<Vec<u8>>,
        fail: Arc<AtomicBool>,
    }

    impl Failing {
        fn check(&self) -> io::Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            } else {
                Ok(())
            }
        }
    }

    impl Read for Failing {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.check()?;
            self.inner.read(buf)
        }
    }

    impl Seek for Failing {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.check()?;
            self.inner.seek(pos)
        }
    }

    #[test]
    fn source_errors_are_returned() {
        let fail = Arc::new(AtomicBool::new(false));
        let reader = Failing {
            inner: Cursor::new(HEX.to_vec()),
            fail: fail.clone(),
        };
        let mut buf = Buffer::from_reader(reader).unwrap();
        buf.insert(2, b'x').unwrap();
        buf.seek(SeekFrom::Start(1)).unwrap();
        fail.store(true, Ordering::SeqCst);

        let mut out = [0u8; 4];
        assert!(buf.read_at(0, &mut out).is_err());
        assert!(buf.read(&mut out).is_err());
        assert!(buf.write_to(Vec::new()).is_err());
        assert!(buf.to_vec().is_err());

        // Edited bytes do not touch the source
        assert_eq!(1, buf.read_at(2, &mut out[..1]).unwrap());
        assert_eq!(b'x', out[0]);

        assert_eq!(17, buf.len());
        assert_eq!(vec![2..3], buf.edited_indices());
        assert_eq!(3, buf.segment_count());
        assert_eq!(Ok(()), buf.check());

        fail.store(false, Ordering::SeqCst);
        assert_eq!(1, buf.seek(SeekFrom::Current(0)).unwrap());
        assert_eq!(4, buf.read(&mut out).unwrap());
        assert_eq!(b"1x23", &out);
        assert_eq!(b"01x23456789abcdef".to_vec(), buf.to_vec().unwrap());
    }

    #[test]
    fn source_error_on_open() {
        let reader = Failing {
            inner: Cursor::new(HEX.to_vec()),
            fail: Arc::new(AtomicBool::new(true)),
        };
        assert!(Buffer::from_reader(reader).is_err());
    }

    #[test]
    fn read_far_past_end() {
        let mut buf = Buffer::from_bytes(HEX);
        buf.insert(16, b'!').unwrap();

        let mut out = [0u8; 8];
        assert_eq!(0, buf.read_at(u64::MAX, &mut out).unwrap());
        assert_eq!(u64::MAX - 2, buf.seek(SeekFrom::Start(u64::MAX - 2)).unwrap());
        assert_eq!(0, buf.read(&mut out).unwrap());
        assert_eq!(u64::MAX - 2, buf.seek(SeekFrom::Current(0)).unwrap());

        buf.seek(SeekFrom::End(-1)).unwrap();
        assert_eq!(1, buf.read(&mut out).unwrap());
        assert_eq!(b'!', out[0]);
    }
}
