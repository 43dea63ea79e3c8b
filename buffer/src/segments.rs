mod patch;
mod segment;

use std::{io, ops::Range};

use crate::source::Source;

use self::patch::Patch;
use self::segment::{Segment, SegmentEnd, SegmentKind};

/// Ordered list of segments partitioning the virtual offsets of a buffer.
///
/// Segments are sorted, contiguous, start at zero and are never empty. The
/// last segment points to the backing source and extends to its end. After
/// each edit adjacent segments reading from the same place are merged back
/// together, so typing sequential bytes grows a single patch instead of
/// creating a segment per byte.
///
/// Cloning shares the sources and copies the patches.
#[derive(Debug, Clone)]
pub(crate) struct Segments {
    list: Vec<Segment>,
}

impl Segments {
    pub fn new(source: Source) -> Segments {
        Segments {
            list: vec![Segment::original(source, 0, SegmentEnd::Unbounded, 0)],
        }
    }

    /// Index of the segment containing virtual offset `pos`
    #[inline]
    pub fn locate(&self, pos: u64) -> Option<usize> {
        self.list.iter().position(|seg| seg.contains(pos))
    }

    /// Virtual length, calculated from the last segment so no running total
    /// needs to be kept
    pub fn len(&self) -> u64 {
        let last = match self.list.last() {
            Some(last) => last,
            None => return 0,
        };

        match last.end {
            SegmentEnd::At(end) => end,
            SegmentEnd::Unbounded => {
                let blen = match &last.kind {
                    SegmentKind::Original(source) => source.len(),
                    SegmentKind::Patch(patch) => patch.len() as u64,
                };
                let len = blen as i128 - last.translation as i128;
                len.max(last.start as i128) as u64
            }
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.list.len()
    }

    /// Insert `byte` at `pos` moving everything after it one byte later.
    /// `pos` may be equal to the length.
    pub fn insert(&mut self, pos: u64, byte: u8) {
        let idx = match self.locate(pos) {
            Some(idx) => idx,
            None => {
                // Only reachable at the end if the last segment is bounded
                self.list.push(Segment::patch(pos, Patch::new(byte)));
                self.cleanup();
                return;
            }
        };

        // Inserting right after a patch, append to it
        if idx > 0 && self.list[idx].start == pos {
            let prev = &mut self.list[idx - 1];
            if let SegmentKind::Patch(patch) = &mut prev.kind {
                patch.push(byte);
                prev.end.shift_right(1);
                self.shift_right_from(idx, 1);
                self.cleanup();
                return;
            }
        }

        let seg = self.list.remove(idx);
        let (left, mut right) = seg.split_at(pos);
        right.shift_right(1);
        let middle = Segment::patch(pos, Patch::new(byte));
        self.list.splice(idx..idx, [left, middle, right]);
        self.shift_right_from(idx + 3, 1);
        self.cleanup();
    }

    /// Overwrite the byte at `pos`
    pub fn replace(&mut self, pos: u64, byte: u8) {
        let idx = match self.locate(pos) {
            Some(idx) => idx,
            None => return,
        };

        let start = self.list[idx].start;
        if let SegmentKind::Patch(patch) = &mut self.list[idx].kind {
            patch.replace((pos - start) as usize, byte);
            return;
        }

        // Replacing the byte right after a patch, extend the patch over it
        if idx > 0 && self.list[idx].start == pos {
            if let SegmentKind::Patch(patch) = &mut self.list[idx - 1].kind {
                patch.push(byte);
                self.list[idx - 1].end.shift_right(1);
                self.list[idx].start += 1;
                self.cleanup();
                return;
            }
        }

        let seg = self.list.remove(idx);
        let (left, rest) = seg.split_at(pos);
        let (_, right) = rest.split_at(pos + 1);
        let middle = Segment::patch(pos, Patch::new(byte));
        self.list.splice(idx..idx, [left, middle, right]);
        self.cleanup();
    }

    /// Remove the byte at `pos` moving everything after it one byte earlier
    pub fn remove(&mut self, pos: u64) {
        let idx = match self.locate(pos) {
            Some(idx) => idx,
            None => return,
        };

        let seg = &mut self.list[idx];
        let start = seg.start;
        if let SegmentKind::Patch(patch) = &mut seg.kind {
            patch.remove((pos - start) as usize);
            seg.end.shift_left(1);
            self.shift_left_from(idx + 1, 1);
            self.cleanup();
            return;
        }

        let seg = self.list.remove(idx);
        let (left, mut right) = seg.split_at(pos);
        right.end.shift_left(1);
        right.translation += 1;
        self.list.splice(idx..idx, [left, right]);
        self.shift_left_from(idx + 2, 1);
        self.cleanup();
    }

    fn shift_right_from(&mut self, idx: usize, n: u64) {
        for seg in &mut self.list[idx..] {
            seg.shift_right(n);
        }
    }

    fn shift_left_from(&mut self, idx: usize, n: u64) {
        for seg in &mut self.list[idx..] {
            seg.shift_left(n);
        }
    }

    /// Remove empty segments and merge adjacent segments that read from the
    /// same place.
    fn cleanup(&mut self) {
        let mut list: Vec<Segment> = Vec::with_capacity(self.list.len());

        for seg in self.list.drain(..) {
            if seg.is_empty() {
                continue;
            }

            match list.last_mut() {
                Some(prev) if prev.can_merge(&seg) => prev.merge(seg),
                _ => list.push(seg),
            }
        }

        self.list = list;
        debug_assert_eq!(Ok(()), self.check());
    }

    /// Virtual ranges currently backed by patches
    pub fn edited_indices(&self) -> Vec<Range<u64>> {
        self.list
            .iter()
            .filter(|seg| seg.is_patch())
            .filter_map(|seg| match seg.end {
                SegmentEnd::At(end) => Some(seg.start..end),
                SegmentEnd::Unbounded => None,
            })
            .collect()
    }

    /// Read bytes starting at virtual offset `pos`, crossing segment
    /// boundaries as needed. A short read means the data ended.
    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.len();
        if pos >= len {
            return Ok(0);
        }

        // Never read past the end, offsets below stay within 0..=len
        let max = usize::try_from(len - pos).unwrap_or(usize::MAX);
        let buf_len = buf.len().min(max);
        let buf = &mut buf[..buf_len];
        let mut read = 0;

        for seg in &self.list {
            let remaining = buf.len() - read;
            if remaining == 0 {
                break;
            }

            let cursor = pos + read as u64;
            if !seg.end.is_after(cursor) {
                continue;
            }

            if seg.start >= cursor + remaining as u64 {
                break;
            }

            let (n, want) = seg.read_at(cursor, &mut buf[read..])?;
            read += n;

            if n < want {
                break;
            }
        }

        Ok(read)
    }

    /// Validate the segment list invariants
    pub fn check(&self) -> Result<(), &'static str> {
        let first = self.list.first().ok_or("No segments")?;
        if first.start != 0 {
            return Err("First segment does not start at zero.");
        }

        for (i, seg) in self.list.iter().enumerate() {
            if seg.is_empty() {
                return Err("Empty segment.");
            }

            if let SegmentEnd::At(end) = seg.end {
                if end < seg.start {
                    return Err("Segment ends before it starts.");
                }
            }

            if let SegmentKind::Patch(patch) = &seg.kind {
                if seg.end != SegmentEnd::At(seg.start + patch.len() as u64) {
                    return Err("Patch segment length does not match patch.");
                }

                if seg.translation != -(seg.start as i64) {
                    return Err("Patch segment does not index from zero.");
                }
            }

            if let Some(next) = self.list.get(i + 1) {
                if seg.end != SegmentEnd::At(next.start) {
                    return Err("Segments are not contiguous.");
                }

                if seg.can_merge(next) {
                    return Err("Segments are not merged.");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn segments(content: &str) -> Segments {
        Segments::new(Source::from_bytes(content.as_bytes().to_vec()))
    }

    fn read_all(segs: &Segments) -> String {
        let mut buf = vec![0u8; segs.len() as usize + 8];
        let n = segs.read_at(0, &mut buf).unwrap();
        buf.truncate(n);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn len_of_source() {
        let segs = segments("0123456789abcdef");
        assert_eq!(16, segs.len());
        assert_eq!(1, segs.count());
        assert_eq!(0, segments("").len());
    }

    #[test]
    fn insert_start() {
        let mut segs = segments("0123456789abcdef");
        segs.insert(0, b'9');

        let mut buf = [0u8; 8];
        segs.read_at(0, &mut buf).unwrap();
        assert_eq!(b"90123456", &buf);
        assert_eq!(17, segs.len());
        assert_eq!(Ok(()), segs.check());
    }

    #[test]
    fn insert_middle() {
        let mut segs = segments("0123456789abcdef");
        segs.insert(4, b'7');

        let mut buf = [0u8; 8];
        segs.read_at(0, &mut buf).unwrap();
        assert_eq!(b"01237456", &buf);
        assert_eq!(3, segs.count());
        assert_eq!(vec![4..5], segs.edited_indices());
    }

    #[test]
    fn insert_end() {
        let mut segs = segments("abc");
        segs.insert(3, b'd');
        segs.insert(4, b'e');
        assert_eq!("abcde", read_all(&segs));
        assert_eq!(5, segs.len());
        assert_eq!(vec![3..5], segs.edited_indices());
    }

    #[test]
    fn insert_empty() {
        let mut segs = segments("");
        segs.insert(0, b'a');
        segs.insert(1, b'b');
        segs.insert(0, b'c');
        assert_eq!("cab", read_all(&segs));
        assert_eq!(3, segs.len());
        assert_eq!(vec![0..3], segs.edited_indices());
    }

    #[test]
    fn insert_sequential_appends() {
        let mut segs = segments("0123456789");
        for (i, b) in b"hello world".iter().enumerate() {
            segs.insert(5 + i as u64, *b);
        }

        assert_eq!("01234hello world56789", read_all(&segs));
        assert_eq!(3, segs.count());
    }

    #[test]
    fn insert_inside_patch() {
        let mut segs = segments("0123");
        segs.insert(2, b'a');
        segs.insert(3, b'c');
        segs.insert(3, b'b');
        assert_eq!("01abc23", read_all(&segs));
        assert_eq!(3, segs.count());
        assert_eq!(vec![2..5], segs.edited_indices());
    }

    #[test]
    fn remove_middle() {
        let mut segs = segments("0123456789abcdef");
        segs.remove(7);

        let mut buf = [0u8; 8];
        segs.read_at(0, &mut buf).unwrap();
        assert_eq!(b"01234568", &buf);
        assert_eq!(15, segs.len());
        assert!(segs.edited_indices().is_empty());
    }

    #[test]
    fn remove_start_and_end() {
        let mut segs = segments("0123456789");
        segs.remove(0);
        segs.remove(8);
        assert_eq!("12345678", read_all(&segs));
        assert_eq!(8, segs.len());
        assert_eq!(Ok(()), segs.check());
    }

    #[test]
    fn remove_from_patch() {
        let mut segs = segments("0123");
        segs.insert(2, b'a');
        segs.insert(3, b'b');
        segs.remove(2);
        assert_eq!("01b23", read_all(&segs));
        assert_eq!(vec![2..3], segs.edited_indices());

        segs.remove(2);
        assert_eq!("0123", read_all(&segs));
        assert!(segs.edited_indices().is_empty());
        assert_eq!(1, segs.count());
    }

    #[test]
    fn remove_then_insert_merges_back() {
        let mut segs = segments("0123456789");
        segs.remove(5);
        assert_eq!(2, segs.count());
        segs.insert(5, b'x');
        segs.remove(5);
        assert_eq!("012346789", read_all(&segs));
        assert_eq!(2, segs.count());
    }

    #[test]
    fn replace_in_source() {
        let mut segs = segments("0123456789");
        segs.replace(3, b'x');
        assert_eq!("012x456789", read_all(&segs));
        assert_eq!(10, segs.len());
        assert_eq!(vec![3..4], segs.edited_indices());
    }

    #[test]
    fn replace_sequential_extends_patch() {
        let mut segs = segments("0123456789");
        for i in 2..7 {
            segs.replace(i, b'x');
        }

        assert_eq!("01xxxxx789", read_all(&segs));
        assert_eq!(3, segs.count());
        assert_eq!(vec![2..7], segs.edited_indices());
    }

    #[test]
    fn replace_in_patch() {
        let mut segs = segments("0123");
        segs.insert(1, b'a');
        segs.replace(1, b'b');
        assert_eq!("0b123", read_all(&segs));
        assert_eq!(vec![1..2], segs.edited_indices());
    }

    #[test]
    fn replace_last_byte() {
        let mut segs = segments("0123");
        segs.replace(3, b'x');
        assert_eq!("012x", read_all(&segs));
        assert_eq!(4, segs.len());

        segs.replace(0, b'y');
        assert_eq!("y12x", read_all(&segs));
        assert_eq!(Ok(()), segs.check());
    }

    #[test]
    fn adjacent_patches_merge() {
        let mut segs = segments("0123");
        segs.replace(2, b'b');
        segs.replace(1, b'a');
        assert_eq!("0ab3", read_all(&segs));
        assert_eq!(vec![1..3], segs.edited_indices());
    }

    #[test]
    fn read_window_across_segments() {
        let mut segs = segments("0123456789");
        segs.insert(3, b'a');
        segs.insert(8, b'b');

        let mut buf = [0u8; 6];
        let n = segs.read_at(2, &mut buf).unwrap();
        assert_eq!(6, n);
        assert_eq!(b"2a3456", &buf);

        let n = segs.read_at(9, &mut buf).unwrap();
        assert_eq!(3, n);
        assert_eq!(b"789", &buf[..n]);

        assert_eq!(0, segs.read_at(12, &mut buf).unwrap());
        assert_eq!(0, segs.read_at(100, &mut buf).unwrap());
    }

    #[test]
    fn read_at_huge_offset() {
        let mut segs = segments("0123");
        segs.insert(4, b'x');

        let mut buf = [0u8; 8];
        assert_eq!(0, segs.read_at(u64::MAX, &mut buf).unwrap());
        assert_eq!(0, segs.read_at(u64::MAX - 2, &mut buf).unwrap());
        assert_eq!(2, segs.read_at(3, &mut buf).unwrap());
        assert_eq!(b"3x", &buf[..2]);
    }

    #[test]
    fn clone_copies_patches() {
        let mut segs = segments("0123");
        segs.insert(1, b'a');
        let copy = segs.clone();

        segs.replace(1, b'b');
        segs.insert(2, b'c');

        assert_eq!("0bc123", read_all(&segs));
        assert_eq!("0a123", read_all(&copy));
    }
}
