//! The compiled model: signal/field/effector names, parameterized-effector
//! arguments, and the transducer stack a target ships with.
//!
//! `Model` owns its data post-load (names and parameter arguments are
//! resolved out of the blob into owned `String`/`Vec<u8>` once, at
//! `from_bytes` time) so that `ribose-runtime` never has to thread a
//! lifetime back to the backing file buffer. Only [`crate::transducer::Transducer`]'s
//! flat `eq_map`/kernel/vector-pool arrays matter for hot-path performance,
//! and those are already owned `Vec`s decoded once at load (see
//! `transducer.rs`).

use std::collections::HashMap;

use crate::error::{ModelError, Result};
use crate::header::{Header, SectionOffsets};
use crate::tables::{NameEntry, NameTable, ParamBlock, ParamEffectorEntry, ParamEntry};
use crate::transducer::{self, Transducer, TransducerEntry};

/// A fully loaded, cross-reference-verified model.
#[derive(Clone, Debug)]
pub struct Model {
    /// Names of signals declared beyond the 4 predefined ones, indexed by
    /// `ordinal - PREDEFINED_SIGNAL_COUNT`.
    pub signal_names: Vec<String>,
    /// Field names, indexed by ordinal; index 0 is always `""` (anonymous).
    pub field_names: Vec<String>,
    /// Effector names, indexed by `dispatch_code - 2`.
    pub effector_names: Vec<String>,
    /// Per-effector parameter lists: `effector_params[i][p]` is the `p`th
    /// parameter declared for effector `i`, itself a list of byte-string
    /// arguments. Effectors with no parameters have an empty outer `Vec`.
    pub effector_params: Vec<Vec<Vec<Vec<u8>>>>,
    pub transducers: Vec<Transducer>,
}

impl Model {
    /// Total symbol-space size: 256 bytes plus every declared signal,
    /// including the 4 predefined ones.
    pub fn total_symbol_count(&self) -> usize {
        256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize + self.signal_names.len()
    }

    pub fn find_transducer(&self, name: &str) -> Option<&Transducer> {
        self.transducers.iter().find(|t| t.name == name)
    }

    pub fn effector_ordinal(&self, name: &str) -> Option<u16> {
        self.effector_names.iter().position(|n| n == name).map(|i| i as u16)
    }

    pub fn field_ordinal(&self, name: &str) -> Option<u16> {
        self.field_names.iter().position(|n| n == name).map(|i| i as u16)
    }

    /// Load a model from a byte buffer, validating checksum, size, and every
    /// cross-reference (`spec.md` §3's structural invariants).
    pub fn from_bytes(bytes: &[u8]) -> Result<Model> {
        if bytes.len() < 64 {
            return Err(ModelError::FileTooSmall(bytes.len()));
        }
        let header = Header::from_bytes(bytes);
        if !header.validate_magic() {
            return Err(ModelError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ModelError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len() {
            return Err(ModelError::SizeMismatch { header: header.total_size, actual: bytes.len() });
        }

        let computed = crc32fast::hash(&bytes[64..]);
        if computed != header.checksum {
            return Err(ModelError::ChecksumMismatch { expected: header.checksum, actual: computed });
        }

        let offsets = header.compute_offsets();
        let blob = section(bytes, offsets.blob, header.blob_size)?;

        let signal_table = NameTable::decode(
            section(bytes, offsets.signal_table, header.signal_count as u32 * 8)?,
            header.signal_count as usize,
        );
        let field_table = NameTable::decode(
            section(bytes, offsets.field_table, header.field_count as u32 * 8)?,
            header.field_count as usize,
        );
        let effector_table = NameTable::decode(
            section(bytes, offsets.effector_table, header.effector_count as u32 * 8)?,
            header.effector_count as usize,
        );

        if header.field_count == 0 {
            return Err(ModelError::MissingAnonymousField);
        }
        let anon = field_table.resolve(0, blob)?;
        if !anon.is_empty() {
            return Err(ModelError::MissingAnonymousField);
        }

        let signal_names = resolve_all(&signal_table, blob)?;
        let field_names = resolve_all(&field_table, blob)?;
        let effector_names = resolve_all(&effector_table, blob)?;

        let param_block = decode_param_block(bytes, &header, &offsets)?;
        let mut effector_params: Vec<Vec<Vec<Vec<u8>>>> =
            vec![Vec::new(); effector_names.len()];
        for pe in &param_block.effectors {
            let params = param_block
                .params_for(pe.effector_id)
                .ok_or(ModelError::DanglingParam { effector: pe.effector_id, param: 0 })?;
            let mut resolved = Vec::with_capacity(params.len());
            for &p in params {
                let args = param_block
                    .resolve_args(p, blob)?
                    .into_iter()
                    .map(|a| a.to_vec())
                    .collect();
                resolved.push(args);
            }
            let idx = pe.effector_id as usize;
            *effector_params.get_mut(idx).ok_or(ModelError::DanglingEffector {
                transducer: String::new(),
                effector: pe.effector_id as i32,
            })? = resolved;
        }

        let total_symbol_count =
            256 + ribose_core::PREDEFINED_SIGNAL_COUNT as usize + signal_names.len();

        let dir_bytes = section(
            bytes,
            offsets.transducer_dir,
            header.transducer_count as u32 * 32,
        )?;
        let mut transducers = Vec::with_capacity(header.transducer_count as usize);
        let mut seen_names = HashMap::new();
        for i in 0..header.transducer_count as usize {
            let entry = TransducerEntry::from_bytes(&dir_bytes[i * 32..i * 32 + 32]);
            let name_bytes = blob
                .get(entry.name_offset as usize..(entry.name_offset + entry.name_len) as usize)
                .ok_or(ModelError::DanglingString { index: i })?;
            let name = std::str::from_utf8(name_bytes)
                .map_err(|_| ModelError::InvalidUtf8 { index: i })?
                .to_string();
            if seen_names.insert(name.clone(), ()).is_some() {
                return Err(ModelError::DuplicateTransducerName(name));
            }

            let record = bytes
                .get(entry.record_offset as usize..(entry.record_offset + entry.record_size as u64) as usize)
                .ok_or(ModelError::Truncated {
                    offset: entry.record_offset as u32,
                    expected: entry.record_size,
                    actual: bytes.len(),
                })?;
            let transducer = transducer::decode_record(&name, &entry, record, total_symbol_count)?;
            verify_transducer(&transducer, field_names.len(), signal_names.len(), effector_names.len())?;
            transducers.push(transducer);
        }

        Ok(Model { signal_names, field_names, effector_names, effector_params, transducers })
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Model> {
        let bytes = std::fs::read(path).map_err(|_| ModelError::FileTooSmall(0))?;
        Self::from_bytes(&bytes)
    }

    /// Serialize back to the on-disk format. `from_bytes(model.to_bytes())`
    /// round-trips to an equal [`Model`] (`spec.md` §8, testable property:
    /// "a model serialized and reloaded behaves identically").
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        let mut push_name = |blob: &mut Vec<u8>, s: &[u8]| -> NameEntry {
            let entry = NameEntry { offset: blob.len() as u32, len: s.len() as u32 };
            blob.extend_from_slice(s);
            entry
        };

        let signal_entries: Vec<NameEntry> =
            self.signal_names.iter().map(|s| push_name(&mut blob, s.as_bytes())).collect();
        let field_entries: Vec<NameEntry> =
            self.field_names.iter().map(|s| push_name(&mut blob, s.as_bytes())).collect();
        let effector_entries: Vec<NameEntry> =
            self.effector_names.iter().map(|s| push_name(&mut blob, s.as_bytes())).collect();

        let mut param_effectors = Vec::new();
        let mut params = Vec::new();
        let mut args = Vec::new();
        for (id, param_list) in self.effector_params.iter().enumerate() {
            if param_list.is_empty() {
                continue;
            }
            let param_list_offset = params.len() as u32;
            for param in param_list {
                let arg_offset = args.len() as u32;
                for arg in param {
                    args.push(push_name(&mut blob, arg));
                }
                params.push(ParamEntry { arg_offset, arg_count: param.len() as u16 });
            }
            param_effectors.push(ParamEffectorEntry {
                effector_id: id as u16,
                param_list_offset,
                param_list_count: param_list.len() as u32,
            });
        }

        let mut transducer_name_entries = Vec::with_capacity(self.transducers.len());
        let mut records = Vec::with_capacity(self.transducers.len());
        for t in &self.transducers {
            transducer_name_entries.push(push_name(&mut blob, t.name.as_bytes()));
            let kernel_pairs: Vec<(i32, i32)> =
                t.kernel.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
            records.push(transducer::encode_record(
                &t.field_subset,
                &t.signal_subset,
                t.eq_map(),
                &kernel_pairs,
                &t.vector_pool,
            ));
        }

        let header = Header {
            blob_size: blob.len() as u32,
            signal_count: self.signal_names.len() as u16,
            field_count: self.field_names.len() as u16,
            effector_count: self.effector_names.len() as u16,
            param_effector_count: param_effectors.len() as u16,
            param_count: params.len() as u32,
            arg_count: args.len() as u32,
            transducer_count: self.transducers.len() as u16,
            ..Header::default()
        };
        let offsets = header.compute_offsets();

        let mut out = vec![0u8; offsets.blob as usize];
        out.extend_from_slice(&blob);
        pad_to(&mut out, offsets.signal_table);
        for e in &signal_entries {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.field_table);
        for e in &field_entries {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.effector_table);
        for e in &effector_entries {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.param_effector_table);
        for e in &param_effectors {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.param_entries);
        for e in &params {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.arg_entries);
        for e in &args {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.transducer_dir);

        let mut record_offset = offsets.records_start as u64;
        let mut dir_entries = Vec::with_capacity(self.transducers.len());
        for (t, record) in self.transducers.iter().zip(&records) {
            let name_entry = transducer_name_entries[dir_entries.len()];
            dir_entries.push(TransducerEntry {
                name_offset: name_entry.offset,
                name_len: name_entry.len,
                state_count: t.state_count,
                eq_class_count: t.eq_class_count,
                record_offset,
                record_size: record.len() as u32,
            });
            record_offset += record.len() as u64;
        }
        for e in &dir_entries {
            out.extend_from_slice(&e.to_bytes());
        }
        pad_to(&mut out, offsets.records_start);
        for record in &records {
            out.extend_from_slice(record);
        }

        let total_size = out.len() as u32;
        let checksum = crc32fast::hash(&out[64..]);
        let header = Header { total_size, checksum, ..header };
        out[0..64].copy_from_slice(&header.to_bytes());

        out
    }
}

fn pad_to(out: &mut Vec<u8>, target: u32) {
    out.resize(target as usize, 0);
}

fn section(bytes: &[u8], offset: u32, len: u32) -> Result<&[u8]> {
    let start = offset as usize;
    let end = start + len as usize;
    bytes.get(start..end).ok_or(ModelError::Truncated { offset, expected: len, actual: bytes.len() })
}

fn resolve_all(table: &NameTable, blob: &[u8]) -> Result<Vec<String>> {
    (0..table.len()).map(|i| table.resolve_str(i, blob).map(str::to_string)).collect()
}

fn decode_param_block(bytes: &[u8], header: &Header, offsets: &SectionOffsets) -> Result<ParamBlock> {
    let effector_bytes =
        section(bytes, offsets.param_effector_table, header.param_effector_count as u32 * 12)?;
    let effectors = (0..header.param_effector_count as usize)
        .map(|i| ParamEffectorEntry::from_bytes(&effector_bytes[i * 12..i * 12 + 12]))
        .collect();

    let param_bytes = section(bytes, offsets.param_entries, header.param_count * 8)?;
    let params = (0..header.param_count as usize)
        .map(|i| ParamEntry::from_bytes(&param_bytes[i * 8..i * 8 + 8]))
        .collect();

    let arg_bytes = section(bytes, offsets.arg_entries, header.arg_count * 8)?;
    let args = (0..header.arg_count as usize)
        .map(|i| NameEntry::from_bytes(&arg_bytes[i * 8..i * 8 + 8]))
        .collect();

    Ok(ParamBlock { effectors, params, args })
}

fn verify_transducer(
    t: &Transducer,
    field_count: usize,
    signal_count: usize,
    effector_count: usize,
) -> Result<()> {
    for &f in &t.field_subset {
        if f as usize >= field_count {
            return Err(ModelError::DanglingField { transducer: t.name.clone(), field: f });
        }
    }
    let total_signals = ribose_core::PREDEFINED_SIGNAL_COUNT as usize + signal_count;
    for &s in &t.signal_subset {
        if s as usize >= total_signals {
            return Err(ModelError::DanglingSignal { transducer: t.name.clone(), signal: s });
        }
    }
    for class in 0..t.eq_class_count {
        for state in 0..t.state_count {
            let tr = t.transition(class, state);
            if tr.code >= 2 && (tr.code as usize - 2) >= effector_count {
                return Err(ModelError::DanglingEffector {
                    transducer: t.name.clone(),
                    effector: tr.code,
                });
            }
            if tr.code < 0 {
                let offset = (-tr.code) as usize;
                if offset >= t.vector_pool.len() {
                    return Err(ModelError::DanglingVectorOffset {
                        transducer: t.name.clone(),
                        class: class as usize,
                        state: state as usize,
                        code: tr.code,
                    });
                }
            }
            if tr.next_state < 0 || tr.next_state as u32 >= t.state_count {
                // A next_state of -1 marks STOPPED/terminal transitions and is
                // valid; only a positive out-of-range value is a real defect.
                if tr.next_state >= 0 {
                    return Err(ModelError::OutOfRangeState {
                        transducer: t.name.clone(),
                        class: class as usize,
                        state: state as usize,
                        next: tr.next_state,
                        count: t.state_count,
                    });
                }
            }
        }
    }
    verify_vector_pool(t, effector_count)
}

/// Walk every run packed into the vector pool (not just the ones a
/// transition's effect code happens to point at — the pool is a flat,
/// entry-by-entry stream of simple/paired calls terminated by `0`s) and
/// check every effector ordinal it names against the effector table.
fn verify_vector_pool(t: &Transducer, effector_count: usize) -> Result<()> {
    let mut i = 0;
    while i < t.vector_pool.len() {
        let entry = t.vector_pool[i];
        if entry == 0 {
            i += 1;
            continue;
        }
        let ordinal = if entry > 0 { entry - 2 } else { (-entry) - 2 };
        if ordinal < 0 || ordinal as usize >= effector_count {
            return Err(ModelError::DanglingEffector { transducer: t.name.clone(), effector: ordinal });
        }
        i += if entry > 0 { 1 } else { 2 };
    }
    Ok(())
}
