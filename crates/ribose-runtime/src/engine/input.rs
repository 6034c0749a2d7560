//! The input stack: a LIFO of byte segments with a mark/reset window.
//!
//! `push(bytes)` (fed directly by the host, or via the `in` effector) opens
//! a new segment on top of the stack; reading falls through to the segment
//! below once the top is exhausted. `mark()`/`reset()` implement the
//! transductor's
//! bounded lookahead (`spec.md` §4.2, §5 "Mark/Reset"): `mark` records the
//! current read position, `reset` rewinds to it. Marks nest — `reset` always
//! rewinds to the most recently pushed, unconsumed mark.

use ribose_core::{EscapeRef, RefKind, Symbol};

use super::error::InputError;

/// One pushed byte segment and its read cursor.
#[derive(Debug)]
struct Segment {
    data: Vec<u8>,
    pos: usize,
}

impl Segment {
    fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }
}

/// One recorded mark: which segment was on top, and the read position
/// within it, at the time `mark()` was called.
#[derive(Clone, Copy, Debug)]
struct Mark {
    segment_index: usize,
    pos: usize,
}

/// A stack of input segments with mark/reset support.
///
/// Per `spec.md` §4.2: symbols are bytes (0-255) or in-band signals encoded
/// as a 4-byte escape (`0xFF, '!', hi, lo`). Field and transducer escapes
/// (`'~'`, `'@'`) are only meaningful inside effector parameter blobs, never
/// on the input stream itself — encountering one here is malformed input.
#[derive(Debug, Default)]
pub struct InputStack {
    segments: Vec<Segment>,
    marks: Vec<Mark>,
}

impl InputStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new segment of raw bytes onto the stack.
    pub fn push(&mut self, bytes: Vec<u8>) {
        if !bytes.is_empty() {
            self.segments.push(Segment { data: bytes, pos: 0 });
        }
    }

    /// Whether every segment is fully consumed.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.pos >= s.data.len())
    }

    /// Record a mark at the current read position.
    pub fn mark(&mut self) {
        self.drop_exhausted();
        let segment_index = self.segments.len().saturating_sub(1);
        let pos = self.segments.last().map(|s| s.pos).unwrap_or(0);
        self.marks.push(Mark { segment_index, pos });
    }

    /// Rewind to the most recent mark.
    pub fn reset(&mut self) -> Result<(), InputError> {
        let mark = self.marks.pop().ok_or(InputError::ResetWithoutMark)?;
        self.segments.truncate(mark.segment_index + 1);
        if let Some(segment) = self.segments.get_mut(mark.segment_index) {
            segment.pos = mark.pos;
        }
        Ok(())
    }

    /// Drop the most recent mark without rewinding (lookahead confirmed).
    pub fn unmark(&mut self) {
        self.marks.pop();
    }

    /// Drain every segment and mark (`Transductor::stop`, `spec.md` §4.5).
    pub fn clear(&mut self) {
        self.segments.clear();
        self.marks.clear();
    }

    fn drop_exhausted(&mut self) {
        while matches!(self.segments.last(), Some(s) if s.pos >= s.data.len()) {
            // Never drop a segment a live mark still points into.
            let idx = self.segments.len() - 1;
            if self.marks.iter().any(|m| m.segment_index == idx) {
                break;
            }
            self.segments.pop();
        }
    }

    /// Read the next input symbol, decoding escape-encoded signals.
    ///
    /// Returns `Ok(None)` when every segment is exhausted.
    pub fn next_symbol(&mut self) -> Result<Option<Symbol>, InputError> {
        self.drop_exhausted();
        // `drop_exhausted` leaves a consumed segment in place when a live
        // mark still points into it, so the top segment isn't necessarily
        // the one with bytes left — find the nearest one below it that has
        // any, without popping the pinned one out from under its mark.
        let Some(idx) = self.segments.iter().rposition(|s| s.pos < s.data.len()) else {
            return Ok(None);
        };
        let segment = &mut self.segments[idx];

        let byte = segment.data[segment.pos];
        if byte != ribose_core::ESCAPE_PREFIX {
            segment.pos += 1;
            return Ok(Some(Symbol::byte(byte)));
        }

        let remaining = segment.remaining();
        if remaining.len() < 4 {
            return Err(InputError::TruncatedEscape);
        }
        let chunk: [u8; 4] = remaining[..4].try_into().unwrap();
        let escape = EscapeRef::from_bytes(&chunk).ok_or(InputError::MalformedEscape)?;
        match escape.kind {
            RefKind::Signal => {
                segment.pos += 4;
                Ok(Some(Symbol::signal(escape.ordinal)))
            }
            RefKind::Field | RefKind::Transducer => Err(InputError::UnexpectedNamedRef),
        }
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn reads_plain_bytes() {
        let mut stack = InputStack::new();
        stack.push(b"ab".to_vec());
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'a')));
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'b')));
        assert_eq!(stack.next_symbol().unwrap(), None);
    }

    #[test]
    fn falls_through_to_lower_segment() {
        let mut stack = InputStack::new();
        stack.push(b"x".to_vec());
        stack.push(b"y".to_vec());
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'y')));
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'x')));
        assert!(stack.is_empty());
    }

    #[test]
    fn decodes_signal_escape() {
        let mut stack = InputStack::new();
        let esc = EscapeRef { kind: RefKind::Signal, ordinal: 7 };
        stack.push(esc.to_bytes().to_vec());
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::signal(7)));
    }

    #[test]
    fn rejects_field_escape_on_input() {
        let mut stack = InputStack::new();
        let esc = EscapeRef { kind: RefKind::Field, ordinal: 1 };
        stack.push(esc.to_bytes().to_vec());
        assert!(matches!(stack.next_symbol(), Err(InputError::UnexpectedNamedRef)));
    }

    #[test]
    fn mark_reset_rewinds_read_position() {
        let mut stack = InputStack::new();
        stack.push(b"abc".to_vec());
        stack.next_symbol().unwrap();
        stack.mark();
        stack.next_symbol().unwrap();
        stack.reset().unwrap();
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'b')));
    }

    #[test]
    fn unmark_keeps_position_advanced() {
        let mut stack = InputStack::new();
        stack.push(b"abc".to_vec());
        stack.next_symbol().unwrap();
        stack.mark();
        stack.next_symbol().unwrap();
        stack.unmark();
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'c')));
    }

    #[test]
    fn reset_without_mark_is_an_error() {
        let mut stack = InputStack::new();
        assert!(matches!(stack.reset(), Err(InputError::ResetWithoutMark)));
    }

    #[test]
    fn reading_past_a_mark_pinned_exhausted_segment_returns_none() {
        let mut stack = InputStack::new();
        stack.push(b"a".to_vec());
        stack.mark();
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'a')));
        // The only segment is now fully consumed but pinned by the live
        // mark, so it can't be popped; reading again must not index past
        // its end.
        assert_eq!(stack.next_symbol().unwrap(), None);
        stack.reset().unwrap();
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'a')));
    }

    #[test]
    fn clear_drops_all_segments_and_marks() {
        let mut stack = InputStack::new();
        stack.push(b"x".to_vec());
        stack.push(b"y".to_vec());
        stack.mark();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.next_symbol().unwrap(), None);
        // No mark survived the clear, so reset() must fail rather than
        // rewinding into the dropped segments.
        assert!(matches!(stack.reset(), Err(InputError::ResetWithoutMark)));
    }

    #[test]
    fn reading_past_a_mark_pinned_segment_falls_through_to_lower_one() {
        let mut stack = InputStack::new();
        stack.push(b"x".to_vec());
        stack.push(b"y".to_vec());
        stack.mark();
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'y')));
        // Top segment is pinned-but-exhausted; the read should fall through
        // to the lower segment rather than index off the end of the top one.
        assert_eq!(stack.next_symbol().unwrap(), Some(Symbol::byte(b'x')));
    }
}
