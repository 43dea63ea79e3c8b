use std::{cmp, io};

use super::patch::Patch;
use crate::source::Source;

/// Exclusive end of a segment in virtual offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SegmentEnd {
    At(u64),
    /// Segment extends to the end of its source
    Unbounded,
}

impl SegmentEnd {
    /// Whether `pos` is before this end
    #[inline(always)]
    pub fn is_after(&self, pos: u64) -> bool {
        match self {
            SegmentEnd::At(end) => pos < *end,
            SegmentEnd::Unbounded => true,
        }
    }

    #[inline]
    pub fn shift_right(&mut self, n: u64) {
        if let SegmentEnd::At(end) = self {
            *end += n;
        }
    }

    #[inline]
    pub fn shift_left(&mut self, n: u64) {
        if let SegmentEnd::At(end) = self {
            *end -= n;
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SegmentKind {
    Original(Source),
    Patch(Patch),
}

/// A contiguous virtual range `start..end` mapped into a source or a patch.
/// Backing offset of a virtual offset `pos` is `pos + translation`.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    pub(crate) kind: SegmentKind,
    pub(crate) start: u64,
    pub(crate) end: SegmentEnd,
    pub(crate) translation: i64,
}

impl Segment {
    #[inline]
    pub fn original(source: Source, start: u64, end: SegmentEnd, translation: i64) -> Segment {
        Segment {
            kind: SegmentKind::Original(source),
            start,
            end,
            translation,
        }
    }

    /// Patch segment starting at `start`, patch indexing starts from zero
    #[inline]
    pub fn patch(start: u64, patch: Patch) -> Segment {
        Segment {
            start,
            end: SegmentEnd::At(start + patch.len() as u64),
            translation: -(start as i64),
            kind: SegmentKind::Patch(patch),
        }
    }

    #[inline(always)]
    pub fn contains(&self, pos: u64) -> bool {
        self.start <= pos && self.end.is_after(pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == SegmentEnd::At(self.start)
    }

    #[inline]
    pub fn is_patch(&self) -> bool {
        matches!(self.kind, SegmentKind::Patch(_))
    }

    #[inline(always)]
    pub fn backing_pos(&self, pos: u64) -> u64 {
        pos.saturating_add_signed(self.translation)
    }

    /// Everything after this segment moves `n` bytes later in the buffer
    #[inline]
    pub fn shift_right(&mut self, n: u64) {
        self.start += n;
        self.end.shift_right(n);
        self.translation -= n as i64;
    }

    /// Everything after this segment moves `n` bytes earlier in the buffer
    #[inline]
    pub fn shift_left(&mut self, n: u64) {
        self.start -= n;
        self.end.shift_left(n);
        self.translation += n as i64;
    }

    /// Split into `start..pos` and `pos..end`. Original segments keep
    /// referencing the same source, patches are split in two.
    pub fn split_at(self, pos: u64) -> (Segment, Segment) {
        debug_assert!(self.start <= pos && (self.end.is_after(pos) || self.end == SegmentEnd::At(pos)));

        match self.kind {
            SegmentKind::Original(source) => {
                let left = Segment::original(
                    source.clone(),
                    self.start,
                    SegmentEnd::At(pos),
                    self.translation,
                );
                let right = Segment::original(source, pos, self.end, self.translation);
                (left, right)
            }
            SegmentKind::Patch(mut patch) => {
                let right = patch.split_off((pos - self.start) as usize);
                (Segment::patch(self.start, patch), Segment::patch(pos, right))
            }
        }
    }

    /// Whether `next` directly follows this segment and reads from the same
    /// place
    pub fn can_merge(&self, next: &Segment) -> bool {
        if self.end != SegmentEnd::At(next.start) {
            return false;
        }

        match (&self.kind, &next.kind) {
            (SegmentKind::Patch(_), SegmentKind::Patch(_)) => true,
            (SegmentKind::Original(a), SegmentKind::Original(b)) => {
                a.ptr_eq(b) && self.translation == next.translation
            }
            _ => false,
        }
    }

    /// Merge `next` into this segment, see `can_merge`
    pub fn merge(&mut self, next: Segment) {
        debug_assert!(self.can_merge(&next));

        if let (SegmentKind::Patch(patch), SegmentKind::Patch(npatch)) = (&mut self.kind, next.kind)
        {
            patch.append(npatch);
        }

        self.end = next.end;
    }

    /// Read bytes of this segment starting from virtual offset `pos`.
    /// Returns the number of bytes read and the number of bytes this segment
    /// was expected to provide.
    pub fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<(usize, usize)> {
        let want = match self.end {
            SegmentEnd::At(end) => cmp::min(buf.len() as u64, end - pos) as usize,
            SegmentEnd::Unbounded => buf.len(),
        };
        let bpos = self.backing_pos(pos);

        let read = match &self.kind {
            SegmentKind::Original(source) => source.read_at(bpos, &mut buf[..want])?,
            SegmentKind::Patch(patch) => {
                let bytes = patch.as_slice();
                let start = cmp::min(bpos as usize, bytes.len());
                let n = cmp::min(want, bytes.len() - start);
                buf[..n].copy_from_slice(&bytes[start..start + n]);
                n
            }
        };

        Ok((read, want))
    }
}
