//! Per-transducer records: equivalence map, kernel matrix, and vector pool.
//!
//! This is the data the transductor's inner loop reads on every input
//! symbol (`spec.md` §4.3, §4.4): given the current state and an input
//! symbol, look up the symbol's equivalence class, then the `(next_state,
//! effect_code)` pair at `[class][state]` in the kernel matrix. A negative
//! `effect_code` is a vector pool offset; decoding that vector is the
//! runtime's job ([`ribose_runtime`]), not this crate's — `ribose-model`
//! only owns getting the flat arrays out of the file.
//!
//! Records are decoded once, at load time, into owned `Vec`s: the model
//! file's byte layout packs variable-length prefixes ahead of the
//! equivalence map and kernel, so those sections aren't guaranteed to sit
//! at a 2- or 4-byte-aligned offset for a zero-copy cast. Paying that copy
//! once at load keeps the hot path (one slice index per input symbol)
//! allocation-free without relying on unsound transmutes.

use crate::error::{ModelError, Result};
use crate::header::TRANSDUCER_ENTRY_SIZE;

/// Directory entry pointing at one transducer's variable-length record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransducerEntry {
    pub name_offset: u32,
    pub name_len: u32,
    pub state_count: u32,
    pub eq_class_count: u16,
    pub record_offset: u64,
    pub record_size: u32,
}

impl TransducerEntry {
    pub fn to_bytes(self) -> [u8; TRANSDUCER_ENTRY_SIZE as usize] {
        let mut bytes = [0u8; 32];
        bytes[0..4].copy_from_slice(&self.name_offset.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.name_len.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.state_count.to_be_bytes());
        bytes[12..14].copy_from_slice(&self.eq_class_count.to_be_bytes());
        // bytes[14..16] reserved/padding
        bytes[16..24].copy_from_slice(&self.record_offset.to_be_bytes());
        bytes[24..28].copy_from_slice(&self.record_size.to_be_bytes());
        // bytes[28..32] reserved/padding
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name_offset: u32::from_be_bytes(bytes[0..4].try_into().unwrap()),
            name_len: u32::from_be_bytes(bytes[4..8].try_into().unwrap()),
            state_count: u32::from_be_bytes(bytes[8..12].try_into().unwrap()),
            eq_class_count: u16::from_be_bytes([bytes[12], bytes[13]]),
            record_offset: u64::from_be_bytes(bytes[16..24].try_into().unwrap()),
            record_size: u32::from_be_bytes(bytes[24..28].try_into().unwrap()),
        }
    }
}

/// One decoded `(next_state, effect_code)` transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next_state: i32,
    pub code: i32,
}

/// A transducer's compiled kernel: equivalence map, transition matrix, and
/// the vector pool that negative effect codes index into.
#[derive(Clone, Debug)]
pub struct Transducer {
    pub name: String,
    pub state_count: u32,
    pub eq_class_count: u16,
    pub field_subset: Vec<u16>,
    pub signal_subset: Vec<u16>,
    pub(crate) eq_map: Vec<u16>,
    pub(crate) kernel: Vec<i32>,
    pub vector_pool: Vec<i32>,
}

impl Transducer {
    /// Map an input symbol ordinal to its equivalence class.
    ///
    /// Panics if `symbol_ordinal` is out of range for the equivalence map;
    /// the caller (the transductor) is expected to have validated the
    /// symbol space against the model's total symbol count already.
    pub fn class_of(&self, symbol_ordinal: usize) -> u16 {
        self.eq_map[symbol_ordinal]
    }

    /// Look up the transition for `(class, state)`.
    pub fn transition(&self, class: u16, state: u32) -> Transition {
        let idx = (class as usize * self.state_count as usize + state as usize) * 2;
        Transition { next_state: self.kernel[idx], code: self.kernel[idx + 1] }
    }

    pub fn eq_map(&self) -> &[u16] {
        &self.eq_map
    }

    /// Decode one run of the vector pool starting at `offset`.
    ///
    /// Per `spec.md` §4.4: entries are signed; a positive entry is a simple
    /// effector invocation, a negative entry begins a `(effector_id,
    /// param_index)` pair, and the run is terminated by a `0` entry.
    pub fn vector_at(&self, offset: usize) -> &[i32] {
        // Walk entry-by-entry rather than scanning for the first zero byte:
        // a parameterized entry is a `(effector, param_index)` pair, and a
        // param index of `0` is a legitimate value, not the terminator. Only
        // a zero in *entry* position ends the run (`spec.md` §4.4).
        let mut end = offset;
        while end < self.vector_pool.len() {
            let entry = self.vector_pool[end];
            if entry == 0 {
                break;
            }
            end += if entry > 0 { 1 } else { 2 };
        }
        &self.vector_pool[offset..end]
    }
}

/// Decode a transducer record from raw bytes plus the table sizes declared
/// by its directory entry.
///
/// Record layout (`spec.md` §4.4, §4.7):
/// `field_subset_count: u16, field_subset: [u16; n]`,
/// `signal_subset_count: u16, signal_subset: [u16; m]`,
/// `eq_map: [u16; total_symbol_count]`,
/// `kernel: [(i32, i32); eq_class_count * state_count]`,
/// `vector_pool_len: u32, vector_pool: [i32; vector_pool_len]`.
pub fn decode_record(
    name: &str,
    entry: &TransducerEntry,
    record: &[u8],
    total_symbol_count: usize,
) -> Result<Transducer> {
    let mut cursor = 0usize;
    let take = |cursor: &mut usize, n: usize| -> Result<std::ops::Range<usize>> {
        let end = *cursor + n;
        if end > record.len() {
            return Err(ModelError::Truncated {
                offset: *cursor as u32,
                expected: n as u32,
                actual: record.len(),
            });
        }
        let range = *cursor..end;
        *cursor = end;
        Ok(range)
    };

    let r = take(&mut cursor, 2)?;
    let field_subset_count = u16::from_be_bytes(record[r].try_into().unwrap()) as usize;
    let r = take(&mut cursor, field_subset_count * 2)?;
    let field_subset = decode_u16_vec(&record[r]);

    let r = take(&mut cursor, 2)?;
    let signal_subset_count = u16::from_be_bytes(record[r].try_into().unwrap()) as usize;
    let r = take(&mut cursor, signal_subset_count * 2)?;
    let signal_subset = decode_u16_vec(&record[r]);

    let r = take(&mut cursor, total_symbol_count * 2)?;
    let eq_map = decode_u16_vec(&record[r]);
    if eq_map.len() != total_symbol_count {
        return Err(ModelError::BadEquivalenceMapLength {
            transducer: name.to_string(),
            actual: eq_map.len(),
            expected: total_symbol_count,
        });
    }

    let kernel_len = entry.eq_class_count as usize * entry.state_count as usize * 2;
    let r = take(&mut cursor, kernel_len * 4)?;
    let kernel = decode_i32_vec(&record[r]);

    let r = take(&mut cursor, 4)?;
    let vector_pool_len = u32::from_be_bytes(record[r].try_into().unwrap()) as usize;
    let r = take(&mut cursor, vector_pool_len * 4)?;
    let vector_pool = decode_i32_vec(&record[r]);

    Ok(Transducer {
        name: name.to_string(),
        state_count: entry.state_count,
        eq_class_count: entry.eq_class_count,
        field_subset,
        signal_subset,
        eq_map,
        kernel,
        vector_pool,
    })
}

/// Encode a transducer record, returning the bytes in the same layout
/// [`decode_record`] expects.
pub fn encode_record(
    field_subset: &[u16],
    signal_subset: &[u16],
    eq_map: &[u16],
    kernel: &[(i32, i32)],
    vector_pool: &[i32],
) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(field_subset.len() as u16).to_be_bytes());
    for &f in field_subset {
        out.extend_from_slice(&f.to_be_bytes());
    }
    out.extend_from_slice(&(signal_subset.len() as u16).to_be_bytes());
    for &s in signal_subset {
        out.extend_from_slice(&s.to_be_bytes());
    }
    for &e in eq_map {
        out.extend_from_slice(&e.to_be_bytes());
    }
    for &(next, code) in kernel {
        out.extend_from_slice(&next.to_be_bytes());
        out.extend_from_slice(&code.to_be_bytes());
    }
    out.extend_from_slice(&(vector_pool.len() as u32).to_be_bytes());
    for &v in vector_pool {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

fn decode_u16_vec(bytes: &[u8]) -> Vec<u16> {
    bytes.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect()
}

fn decode_i32_vec(bytes: &[u8]) -> Vec<i32> {
    bytes.chunks_exact(4).map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect()
}
