use std::{cmp::max, io, ops::Range};

use crate::Buffer;

/// Bytes read from the buffer at a time while searching
const WINDOW_SIZE: usize = 64 * 1024;

/// Forward byte pattern searcher using Boyer-Moore-Horspool.
///
/// The buffer is scanned using `read_at` in windows that overlap by
/// `pattern.len() - 1` bytes, so matches crossing a window boundary are found
/// and the buffer read position is never touched.
#[derive(Debug)]
pub struct Searcher {
    pattern: Vec<u8>,
    bad_char: [usize; 256],
}

impl Searcher {
    pub fn new(pattern: &[u8]) -> Searcher {
        Searcher {
            bad_char: build_bad_char_table(pattern),
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Find the first match starting at or after `from`
    pub fn find_next(&self, buf: &Buffer, from: u64) -> io::Result<Option<Range<u64>>> {
        let m = self.pattern.len();
        if m == 0 {
            return Ok(None);
        }

        let mut window = vec![0u8; max(WINDOW_SIZE, m * 2)];
        let mut pos = from;

        loop {
            let n = buf.read_at(pos, &mut window)?;
            if let Some(i) = self.find_in(&window[..n]) {
                let start = pos + i as u64;
                return Ok(Some(start..start + m as u64));
            }

            if n < window.len() {
                return Ok(None);
            }

            pos += (n - (m - 1)) as u64;
        }
    }

    fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        let m = self.pattern.len();
        let last = m - 1;
        let mut i = 0;

        while i + m <= haystack.len() {
            let mut j = last;
            while haystack[i + j] == self.pattern[j] {
                if j == 0 {
                    return Some(i);
                }

                j -= 1;
            }

            i += self.bad_char[haystack[i + last] as usize];
        }

        None
    }
}

/// Backward byte pattern searcher, Horspool with the pattern reversed.
#[derive(Debug)]
pub struct SearcherRev {
    pattern: Vec<u8>,
    bad_char: [usize; 256],
}

impl SearcherRev {
    pub fn new(pattern: &[u8]) -> SearcherRev {
        let rev: Vec<u8> = pattern.iter().rev().cloned().collect();
        SearcherRev {
            bad_char: build_bad_char_table(&rev),
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Find the last match starting before `before`
    pub fn find_prev(&self, buf: &Buffer, before: u64) -> io::Result<Option<Range<u64>>> {
        let m = self.pattern.len();
        if m == 0 {
            return Ok(None);
        }

        let mut window = vec![0u8; max(WINDOW_SIZE, m * 2)];
        let mut end = before.saturating_add(m as u64 - 1).min(buf.len());

        loop {
            let start = end.saturating_sub(window.len() as u64);
            let wlen = (end - start) as usize;
            let n = buf.read_at(start, &mut window[..wlen])?;

            if let Some(i) = self.rfind_in(&window[..n]) {
                let mstart = start + i as u64;
                return Ok(Some(mstart..mstart + m as u64));
            }

            if start == 0 {
                return Ok(None);
            }

            end = start + m as u64 - 1;
        }
    }

    fn rfind_in(&self, haystack: &[u8]) -> Option<usize> {
        let m = self.pattern.len();
        if haystack.len() < m {
            return None;
        }

        let mut i = haystack.len() - m;
        loop {
            let mut j = 0;
            while haystack[i + j] == self.pattern[j] {
                if j == m - 1 {
                    return Some(i);
                }

                j += 1;
            }

            let shift = self.bad_char[haystack[i] as usize];
            if i < shift {
                return None;
            }

            i -= shift;
        }
    }
}

/// Distance from the last occurence of each byte to the end of the pattern,
/// the last byte excluded.
fn build_bad_char_table(pattern: &[u8]) -> [usize; 256] {
    let mut table = [max(pattern.len(), 1); 256];
    if pattern.is_empty() {
        return table;
    }

    let last = pattern.len() - 1;
    for i in 0..last {
        table[pattern[i] as usize] = last - i;
    }

    table
}

#[cfg(test)]
mod test {
    use super::*;

    const TEXT: &str =
        "world. This is another world. In another universe. Other worldy creatures. worl orld world";

    fn all_forward(searcher: &Searcher, buf: &Buffer) -> Vec<Range<u64>> {
        let mut matches = vec![];
        let mut pos = 0;
        while let Some(mat) = searcher.find_next(buf, pos).unwrap() {
            pos = mat.start + 1;
            matches.push(mat);
        }
        matches
    }

    fn all_backward(searcher: &SearcherRev, buf: &Buffer) -> Vec<Range<u64>> {
        let mut matches = vec![];
        let mut pos = buf.len();
        while let Some(mat) = searcher.find_prev(buf, pos).unwrap() {
            pos = mat.start;
            matches.push(mat);
        }
        matches
    }

    #[test]
    fn forward() {
        let buf = Buffer::from_bytes(TEXT);
        let searcher = Searcher::new(b"world");
        assert_eq!(
            vec![0..5, 23..28, 57..62, 85..90],
            all_forward(&searcher, &buf)
        );
    }

    #[test]
    fn backward() {
        let buf = Buffer::from_bytes(TEXT);
        let searcher = SearcherRev::new(b"world");
        assert_eq!(
            vec![85..90, 57..62, 23..28, 0..5],
            all_backward(&searcher, &buf)
        );
    }

    #[test]
    fn overlapping_matches() {
        let buf = Buffer::from_bytes("aaaa");
        assert_eq!(
            vec![0..2, 1..3, 2..4],
            all_forward(&Searcher::new(b"aa"), &buf)
        );
        assert_eq!(
            vec![2..4, 1..3, 0..2],
            all_backward(&SearcherRev::new(b"aa"), &buf)
        );
    }

    #[test]
    fn finds_edited_bytes() {
        let mut buf = Buffer::from_bytes(vec![0u8; 100]);
        buf.replace(50, 0xde).unwrap();
        buf.insert(51, 0xad).unwrap();

        let pattern = [0xde, 0xad, 0x00];
        let mat = Searcher::new(&pattern).find_next(&buf, 0).unwrap();
        assert_eq!(Some(50..53), mat);

        let mat = SearcherRev::new(&pattern).find_prev(&buf, 100).unwrap();
        assert_eq!(Some(50..53), mat);
        assert_eq!(None, Searcher::new(&pattern).find_next(&buf, 51).unwrap());
        assert_eq!(None, SearcherRev::new(&pattern).find_prev(&buf, 50).unwrap());
    }

    #[test]
    fn across_windows() {
        let mut content = vec![b'x'; WINDOW_SIZE * 3];
        let at = WINDOW_SIZE - 2;
        content[at..at + 4].copy_from_slice(b"abcd");
        let buf = Buffer::from_bytes(content);

        let fwd = Searcher::new(b"abcd").find_next(&buf, 0).unwrap();
        assert_eq!(Some(at as u64..at as u64 + 4), fwd);

        let bwd = SearcherRev::new(b"abcd").find_prev(&buf, buf.len()).unwrap();
        assert_eq!(Some(at as u64..at as u64 + 4), bwd);

        let at2 = WINDOW_SIZE * 2 + 1;
        let bwd = SearcherRev::new(b"x").find_prev(&buf, at2 as u64).unwrap();
        assert_eq!(Some(at2 as u64 - 1..at2 as u64), bwd);
    }

    #[test]
    fn empty_pattern() {
        let buf = Buffer::from_bytes(TEXT);
        assert_eq!(None, Searcher::new(b"").find_next(&buf, 0).unwrap());
        assert_eq!(None, SearcherRev::new(b"").find_prev(&buf, 10).unwrap());
    }
}
