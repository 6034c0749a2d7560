//! Name tables and the parameterized-effector block.
//!
//! Every name table (signals, fields, effectors) shares one shape: a fixed
//! array of `(offset: u32, len: u32)` entries pointing into the shared blob.
//! The parameterized-effector block layers three more fixed arrays on top
//! of that to describe, per effector, a list of parameters, each a list of
//! byte-string arguments — the shape the vector pool's negative entries
//! point back into (`spec.md` §4.4, §4.6).

use crate::error::{ModelError, Result};
use crate::header::NAME_ENTRY_SIZE;

/// One `(offset, len)` entry into the blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameEntry {
    pub offset: u32,
    pub len: u32,
}

impl NameEntry {
    pub fn to_bytes(self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.offset.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.len.to_be_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            offset: u32::from_be_bytes(bytes[0..4].try_into().unwrap()),
            len: u32::from_be_bytes(bytes[4..8].try_into().unwrap()),
        }
    }
}

/// A table of names backed by a shared blob.
///
/// Used for the signal, field, and effector tables alike; which one a given
/// instance represents is a matter of which section of the model file it
/// was sliced from, not a type-level distinction.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    entries: Vec<NameEntry>,
}

impl NameTable {
    pub fn new(entries: Vec<NameEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, ordinal: usize) -> Option<NameEntry> {
        self.entries.get(ordinal).copied()
    }

    /// Resolve an entry's bytes against a blob, validating bounds.
    pub fn resolve<'a>(&self, ordinal: usize, blob: &'a [u8]) -> Result<&'a [u8]> {
        let entry = self.entry(ordinal).ok_or(ModelError::DanglingString { index: ordinal })?;
        let start = entry.offset as usize;
        let end = start + entry.len as usize;
        blob.get(start..end).ok_or(ModelError::DanglingString { index: ordinal })
    }

    /// Resolve an entry as a UTF-8 name.
    pub fn resolve_str<'a>(&self, ordinal: usize, blob: &'a [u8]) -> Result<&'a str> {
        let bytes = self.resolve(ordinal, blob)?;
        std::str::from_utf8(bytes).map_err(|_| ModelError::InvalidUtf8 { index: ordinal })
    }

    pub fn decode(bytes: &[u8], count: usize) -> Self {
        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let start = i * NAME_ENTRY_SIZE as usize;
            entries.push(NameEntry::from_bytes(&bytes[start..start + 8]));
        }
        Self { entries }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.entries.len() * 8);
        for entry in &self.entries {
            out.extend_from_slice(&entry.to_bytes());
        }
        out
    }
}

/// One argument byte-string, resolved against the blob.
pub type Arg<'a> = &'a [u8];

/// A single parameter: an ordered list of byte-string arguments.
///
/// E.g. the `out` effector's parameter `["error: ", field]` is two args:
/// a literal byte-string and a field reference encoded as an escape
/// sequence (`spec.md` §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamEntry {
    pub arg_offset: u32,
    pub arg_count: u16,
}

impl ParamEntry {
    pub fn to_bytes(self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.arg_offset.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.arg_count.to_be_bytes());
        // bytes[6..8] reserved/padding
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            arg_offset: u32::from_be_bytes(bytes[0..4].try_into().unwrap()),
            arg_count: u16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// Directory entry mapping an effector with parameters to its parameter
/// list within [`ParamEntry`] storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamEffectorEntry {
    pub effector_id: u16,
    pub param_list_offset: u32,
    pub param_list_count: u32,
}

impl ParamEffectorEntry {
    pub fn to_bytes(self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0..2].copy_from_slice(&self.effector_id.to_be_bytes());
        // bytes[2..4] reserved/padding
        bytes[4..8].copy_from_slice(&self.param_list_offset.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.param_list_count.to_be_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            effector_id: u16::from_be_bytes([bytes[0], bytes[1]]),
            param_list_offset: u32::from_be_bytes(bytes[4..8].try_into().unwrap()),
            param_list_count: u32::from_be_bytes(bytes[8..12].try_into().unwrap()),
        }
    }
}

/// The full parameterized-effector block: which effectors carry parameters,
/// and the flattened parameter/argument storage they point into.
#[derive(Clone, Debug, Default)]
pub struct ParamBlock {
    pub effectors: Vec<ParamEffectorEntry>,
    pub params: Vec<ParamEntry>,
    pub args: Vec<NameEntry>,
}

impl ParamBlock {
    /// Find the parameter list declared for `effector_id`, if any.
    pub fn params_for(&self, effector_id: u16) -> Option<&[ParamEntry]> {
        let entry = self.effectors.iter().find(|e| e.effector_id == effector_id)?;
        let start = entry.param_list_offset as usize;
        let end = start + entry.param_list_count as usize;
        self.params.get(start..end)
    }

    /// Resolve a parameter's argument byte-strings against the blob.
    pub fn resolve_args<'a>(&self, param: ParamEntry, blob: &'a [u8]) -> Result<Vec<Arg<'a>>> {
        let start = param.arg_offset as usize;
        let end = start + param.arg_count as usize;
        let entries =
            self.args.get(start..end).ok_or(ModelError::DanglingParam { effector: 0, param: param.arg_offset })?;
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let s = e.offset as usize;
                let en = s + e.len as usize;
                blob.get(s..en).ok_or(ModelError::DanglingString { index: start + i })
            })
            .collect()
    }
}
