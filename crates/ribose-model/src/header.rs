//! Model file header (64 bytes) and computed section offsets.
//!
//! Layout per `spec.md` §4.7: magic + version, then counts for every
//! section that follows. All multi-byte integers in the model file are
//! big-endian, as mandated by `spec.md` §4.7's "big-endian integers unless
//! noted".
//!
//! Section order: Header → Blob → SignalTable → FieldTable → EffectorTable
//! → ParamEffectorTable → ParamEntries → ArgEntries → TransducerDirectory →
//! (transducer records, addressed by absolute offset from the directory).

/// Magic bytes identifying a Ribose model file: `"RIBOSE\0"`, padded to 8
/// bytes for alignment.
pub const MAGIC: [u8; 8] = *b"RIBOSE\0\0";

/// Current model format version.
pub const VERSION: u16 = 1;

/// Alignment for section starts within the model file.
pub const SECTION_ALIGN: u32 = 64;

/// Fixed size, in bytes, of a signal/field/effector name-table entry
/// (`offset: u32, len: u32` into the blob).
pub const NAME_ENTRY_SIZE: u32 = 8;

/// Fixed size, in bytes, of a parameterized-effector directory entry.
pub const PARAM_EFFECTOR_ENTRY_SIZE: u32 = 12;

/// Fixed size, in bytes, of a parameter entry (`arg_offset: u32, arg_count:
/// u16` + padding).
pub const PARAM_ENTRY_SIZE: u32 = 8;

/// Fixed size, in bytes, of an argument entry (`blob_offset: u32,
/// blob_len: u32`).
pub const ARG_ENTRY_SIZE: u32 = 8;

/// Fixed size, in bytes, of a transducer directory entry.
pub const TRANSDUCER_ENTRY_SIZE: u32 = 32;

/// File header — first 64 bytes of a model file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Header {
    pub magic: [u8; 8],
    pub version: u16,
    pub _reserved0: u16,
    /// CRC32 of every byte after the header.
    pub checksum: u32,
    /// Total file size in bytes.
    pub total_size: u32,
    /// Size of the string/byte blob in bytes.
    pub blob_size: u32,

    /// Count of signals declared beyond the 4 predefined (`nul`, `nil`,
    /// `eol`, `eos`).
    pub signal_count: u16,
    /// Count of fields, including the anonymous field at ordinal 0.
    pub field_count: u16,
    /// Count of named effectors (dispatch codes `2..`; codes `0` and `1`
    /// are reserved and unnamed).
    pub effector_count: u16,
    /// Count of effectors that carry a non-empty parameter table.
    pub param_effector_count: u16,

    /// Total parameter objects across all parameterized effectors.
    pub param_count: u32,
    /// Total argument byte-strings across all parameters.
    pub arg_count: u32,

    pub transducer_count: u16,
    pub _reserved1: [u8; 22],
}

const _: () = assert!(std::mem::size_of::<Header>() == 64);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            _reserved0: 0,
            checksum: 0,
            total_size: 0,
            blob_size: 0,
            signal_count: 0,
            field_count: 0,
            effector_count: 0,
            param_effector_count: 0,
            param_count: 0,
            arg_count: 0,
            transducer_count: 0,
            _reserved1: [0; 22],
        }
    }
}

/// Computed section offsets, derived from header counts + blob size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub blob: u32,
    pub signal_table: u32,
    pub field_table: u32,
    pub effector_table: u32,
    pub param_effector_table: u32,
    pub param_entries: u32,
    pub arg_entries: u32,
    pub transducer_dir: u32,
    /// First byte after the transducer directory; where transducer record
    /// bytes begin when a model is freshly built (records are otherwise
    /// addressed by the absolute offsets stored in the directory).
    pub records_start: u32,
}

impl Header {
    /// Decode header from the first 64 bytes of a model file.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= 64, "header too short");
        let mut magic = [0u8; 8];
        magic.copy_from_slice(&bytes[0..8]);
        let mut reserved1 = [0u8; 22];
        reserved1.copy_from_slice(&bytes[42..64]);

        Self {
            magic,
            version: u16::from_be_bytes([bytes[8], bytes[9]]),
            _reserved0: u16::from_be_bytes([bytes[10], bytes[11]]),
            checksum: u32::from_be_bytes(bytes[12..16].try_into().unwrap()),
            total_size: u32::from_be_bytes(bytes[16..20].try_into().unwrap()),
            blob_size: u32::from_be_bytes(bytes[20..24].try_into().unwrap()),
            signal_count: u16::from_be_bytes([bytes[24], bytes[25]]),
            field_count: u16::from_be_bytes([bytes[26], bytes[27]]),
            effector_count: u16::from_be_bytes([bytes[28], bytes[29]]),
            param_effector_count: u16::from_be_bytes([bytes[30], bytes[31]]),
            param_count: u32::from_be_bytes(bytes[32..36].try_into().unwrap()),
            arg_count: u32::from_be_bytes(bytes[36..40].try_into().unwrap()),
            transducer_count: u16::from_be_bytes([bytes[40], bytes[41]]),
            _reserved1: reserved1,
        }
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..8].copy_from_slice(&self.magic);
        bytes[8..10].copy_from_slice(&self.version.to_be_bytes());
        bytes[10..12].copy_from_slice(&self._reserved0.to_be_bytes());
        bytes[12..16].copy_from_slice(&self.checksum.to_be_bytes());
        bytes[16..20].copy_from_slice(&self.total_size.to_be_bytes());
        bytes[20..24].copy_from_slice(&self.blob_size.to_be_bytes());
        bytes[24..26].copy_from_slice(&self.signal_count.to_be_bytes());
        bytes[26..28].copy_from_slice(&self.field_count.to_be_bytes());
        bytes[28..30].copy_from_slice(&self.effector_count.to_be_bytes());
        bytes[30..32].copy_from_slice(&self.param_effector_count.to_be_bytes());
        bytes[32..36].copy_from_slice(&self.param_count.to_be_bytes());
        bytes[36..40].copy_from_slice(&self.arg_count.to_be_bytes());
        bytes[40..42].copy_from_slice(&self.transducer_count.to_be_bytes());
        bytes[42..64].copy_from_slice(&self._reserved1);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Total declared signal count, including the 4 predefined signals.
    pub fn total_signal_count(&self) -> u32 {
        ribose_core::PREDEFINED_SIGNAL_COUNT as u32 + self.signal_count as u32
    }

    /// Compute section offsets from counts and blob size.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let align = SECTION_ALIGN;
        let blob = align; // right after the 64-byte header
        let signal_table = align_up(blob + self.blob_size, align);
        let signal_table_size = self.signal_count as u32 * NAME_ENTRY_SIZE;

        let field_table = align_up(signal_table + signal_table_size, align);
        let field_table_size = self.field_count as u32 * NAME_ENTRY_SIZE;

        let effector_table = align_up(field_table + field_table_size, align);
        let effector_table_size = self.effector_count as u32 * NAME_ENTRY_SIZE;

        let param_effector_table = align_up(effector_table + effector_table_size, align);
        let param_effector_table_size =
            self.param_effector_count as u32 * PARAM_EFFECTOR_ENTRY_SIZE;

        let param_entries = align_up(param_effector_table + param_effector_table_size, align);
        let param_entries_size = self.param_count * PARAM_ENTRY_SIZE;

        let arg_entries = align_up(param_entries + param_entries_size, align);
        let arg_entries_size = self.arg_count * ARG_ENTRY_SIZE;

        let transducer_dir = align_up(arg_entries + arg_entries_size, align);
        let transducer_dir_size = self.transducer_count as u32 * TRANSDUCER_ENTRY_SIZE;

        let records_start = align_up(transducer_dir + transducer_dir_size, align);

        SectionOffsets {
            blob,
            signal_table,
            field_table,
            effector_table,
            param_effector_table,
            param_entries,
            arg_entries,
            transducer_dir,
            records_start,
        }
    }
}

/// Round up to the next multiple of `align`.
fn align_up(value: u32, align: u32) -> u32 {
    ribose_core::align_up(value, align)
}

#[cfg(test)]
mod header_tests {
    use super::*;

    #[test]
    fn size_is_64() {
        assert_eq!(std::mem::size_of::<Header>(), 64);
    }

    #[test]
    fn roundtrip() {
        let h = Header {
            magic: MAGIC,
            version: VERSION,
            checksum: 0xdead_beef,
            total_size: 12345,
            blob_size: 100,
            signal_count: 2,
            field_count: 3,
            effector_count: 15,
            param_effector_count: 4,
            param_count: 9,
            arg_count: 20,
            transducer_count: 1,
            ..Header::default()
        };
        let bytes = h.to_bytes();
        assert_eq!(bytes.len(), 64);
        let decoded = Header::from_bytes(&bytes);
        assert_eq!(decoded, h);
    }

    #[test]
    fn validates_magic_and_version() {
        let h = Header::default();
        assert!(h.validate_magic());
        assert!(h.validate_version());

        let mut bad = h;
        bad.magic[0] = b'X';
        assert!(!bad.validate_magic());

        let mut old = h;
        old.version = 0;
        assert!(!old.validate_version());
    }

    #[test]
    fn total_signal_count_includes_predefined() {
        let mut h = Header::default();
        h.signal_count = 3;
        assert_eq!(h.total_signal_count(), 7);
    }

    #[test]
    fn offsets_are_monotonic_and_aligned() {
        let h = Header {
            blob_size: 37,
            signal_count: 2,
            field_count: 5,
            effector_count: 16,
            param_effector_count: 3,
            param_count: 10,
            arg_count: 22,
            transducer_count: 4,
            ..Header::default()
        };
        let off = h.compute_offsets();
        let all = [
            off.blob,
            off.signal_table,
            off.field_table,
            off.effector_table,
            off.param_effector_table,
            off.param_entries,
            off.arg_entries,
            off.transducer_dir,
            off.records_start,
        ];
        for w in all.windows(2) {
            assert!(w[0] < w[1], "{:?}", all);
            assert_eq!(w[1] % SECTION_ALIGN, 0);
        }
    }
}
