/// Bytes written by the user. A patch is owned by exactly one segment and is
/// copied when the buffer is cloned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Patch {
    bytes: Vec<u8>,
}

impl Patch {
    #[inline]
    pub fn new(byte: u8) -> Patch {
        Patch { bytes: vec![byte] }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub fn replace(&mut self, index: usize, byte: u8) {
        self.bytes[index] = byte;
    }

    #[inline]
    pub fn remove(&mut self, index: usize) {
        self.bytes.remove(index);
    }

    /// Split the patch in two at `index`, returning the bytes after it
    #[inline]
    pub fn split_off(&mut self, index: usize) -> Patch {
        Patch {
            bytes: self.bytes.split_off(index),
        }
    }

    #[inline]
    pub fn append(&mut self, mut other: Patch) {
        self.bytes.append(&mut other.bytes);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&[u8]> for Patch {
    fn from(value: &[u8]) -> Self {
        Patch {
            bytes: value.to_vec(),
        }
    }
}
