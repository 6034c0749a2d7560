//! 64-byte aligned storage for model files.
//!
//! The transducer kernel matrix and vector pool are read as flat `i32`
//! arrays on the hot path (`spec.md` §4.4/§9: "an implementer must decode
//! vectors without allocation on the hot path"). A plain `Vec<u8>` gives no
//! alignment guarantee, so a misaligned buffer would force byte-at-a-time
//! reads on some targets. `AlignedVec` guarantees the backing storage starts
//! at a 64-byte boundary.

use std::ops::Deref;

/// Alignment for model buffers (matches [`crate::header::SECTION_ALIGN`]).
pub const ALIGN: usize = 64;

#[repr(C, align(64))]
#[derive(Clone, Copy)]
struct Block([u8; 64]);

/// Immutable 64-byte aligned byte storage.
pub struct AlignedVec {
    blocks: Vec<Block>,
    len: usize,
}

impl AlignedVec {
    /// Copy bytes into aligned storage.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self { blocks: Vec::new(), len: 0 };
        }
        let num_blocks = bytes.len().div_ceil(ALIGN);
        let mut blocks = vec![Block([0; ALIGN]); num_blocks];
        for (i, chunk) in bytes.chunks(ALIGN).enumerate() {
            blocks[i].0[..chunk.len()].copy_from_slice(chunk);
        }
        Self { blocks, len: bytes.len() }
    }

    /// Read a file into aligned storage.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::copy_from_slice(&bytes))
    }

    /// Number of bytes stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View as byte slice.
    pub fn as_slice(&self) -> &[u8] {
        if self.blocks.is_empty() {
            return &[];
        }
        // SAFETY: Block is repr(C) with only [u8; 64], so pointer cast is
        // valid. Only `len` bytes are exposed, all initialized above.
        unsafe { std::slice::from_raw_parts(self.blocks.as_ptr() as *const u8, self.len) }
    }
}

impl Deref for AlignedVec {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Clone for AlignedVec {
    fn clone(&self) -> Self {
        Self { blocks: self.blocks.clone(), len: self.len }
    }
}

impl std::fmt::Debug for AlignedVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedVec")
            .field("len", &self.len)
            .field("aligned", &(self.blocks.as_ptr() as usize).is_multiple_of(ALIGN))
            .finish()
    }
}

#[cfg(test)]
mod aligned_vec_tests {
    use super::*;

    #[test]
    fn empty() {
        let v = AlignedVec::copy_from_slice(&[]);
        assert!(v.is_empty());
        assert_eq!(v.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn roundtrip_arbitrary_length() {
        for len in [1, 63, 64, 65, 200] {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let v = AlignedVec::copy_from_slice(&data);
            assert_eq!(v.len(), len);
            assert_eq!(v.as_slice(), &data[..]);
        }
    }

    #[test]
    fn backing_pointer_is_64_aligned() {
        let v = AlignedVec::copy_from_slice(&[1, 2, 3]);
        assert_eq!(v.as_slice().as_ptr() as usize % ALIGN, 0);
    }
}
