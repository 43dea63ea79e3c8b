use std::collections::VecDeque;

use hexe_buffer::Buffer;

/// Buffer state stored as an undo point
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) buffer: Buffer,
    pub(crate) cursor: u64,
    pub(crate) view_offset: u64,
}

/// Linear undo and redo history of buffer snapshots.
///
/// Snapshots are cheap buffer clones and are never modified once stored.
/// Pushing a new snapshot after undoing drops the redo entries. At most `cap`
/// snapshots are kept, the oldest are dropped first.
#[derive(Debug)]
pub(crate) struct History {
    snapshots: VecDeque<Snapshot>,
    current: usize,
    /// Index of the snapshot that matches the file on disk
    saved: Option<usize>,
    cap: usize,
}

impl History {
    pub fn new(initial: Snapshot, cap: usize) -> History {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);

        History {
            snapshots,
            current: 0,
            saved: Some(0),
            cap: cap.max(1),
        }
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.current]
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.current + 1);
        if self.saved.map_or(false, |saved| saved > self.current) {
            self.saved = None;
        }

        self.snapshots.push_back(snapshot);
        self.current += 1;

        while self.snapshots.len() > self.cap {
            self.snapshots.pop_front();
            self.current -= 1;
            self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
        }
    }

    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.current == 0 {
            return None;
        }

        self.current -= 1;
        Some(&self.snapshots[self.current])
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.current + 1 >= self.snapshots.len() {
            return None;
        }

        self.current += 1;
        Some(&self.snapshots[self.current])
    }

    pub fn mark_saved(&mut self) {
        self.saved = Some(self.current);
    }

    pub fn is_saved_point(&self) -> bool {
        self.saved == Some(self.current)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
