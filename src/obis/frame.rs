//! # Telegram Frame Reassembly
//!
//! The meter pushes free-form text telegrams terminated by `!`. Chunk
//! boundaries on the wire carry no meaning: a telegram may arrive split
//! across many reads, and one read may carry several telegrams. The
//! [`FrameReassembler`] buffers incoming bytes and yields one [`Frame`] per
//! terminated, non-empty span.
//!
//! ## Usage
//!
//! ```rust
//! use obis2mqtt::obis::FrameReassembler;
//!
//! let mut reassembler = FrameReassembler::new();
//! assert!(reassembler.feed(b"partial telegram").is_empty());
//! let frames = reassembler.feed(b" rest!next");
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].text(), "partial telegram rest");
//! ```

use crate::constants::FRAME_TERMINATOR;
use bytes::{Buf, Bytes, BytesMut};
use std::borrow::Cow;

/// One terminator-delimited unit of meter telemetry text, terminator
/// excluded. Immutable once yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    fn new(payload: Bytes) -> Self {
        Frame { payload }
    }

    /// Raw frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Frame content as text. Meter telegrams are ASCII; anything else is
    /// replaced lossily and simply fails to match any label downstream.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Stateful accumulator turning arbitrary byte chunks into [`Frame`]s.
///
/// Exactly one reassembler exists per transport; the buffer is never shared.
/// Bytes after the last terminator of a chunk stay buffered for the next
/// `feed` call, so a telegram split across reads is reassembled intact.
#[derive(Debug, Default)]
pub struct FrameReassembler {
    buf: BytesMut,
}

impl FrameReassembler {
    pub fn new() -> Self {
        FrameReassembler::default()
    }

    /// Appends `chunk` and returns every newly completed frame, in order of
    /// appearance. Empty spans (terminator directly after a terminator) are
    /// skipped, not yielded.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        self.buf.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == FRAME_TERMINATOR) {
            let span = self.buf.split_to(pos).freeze();
            self.buf.advance(1); // drop the terminator itself
            if !span.is_empty() {
                frames.push(Frame::new(span));
            }
        }
        frames
    }

    /// Number of buffered bytes still awaiting a terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_free_chunks_accumulate() {
        let mut reassembler = FrameReassembler::new();
        assert!(reassembler.feed(b"abc").is_empty());
        assert!(reassembler.feed(b"def").is_empty());
        assert_eq!(reassembler.pending(), 6);

        let frames = reassembler.feed(b"!");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text(), "abcdef");
        assert_eq!(reassembler.pending(), 0);
    }

    #[test]
    fn trailing_remainder_is_kept_for_the_next_feed() {
        let mut reassembler = FrameReassembler::new();
        let frames = reassembler.feed(b"one!two!par");
        assert_eq!(frames.len(), 2);
        assert_eq!(reassembler.pending(), 3);

        let frames = reassembler.feed(b"tial!");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text(), "partial");
    }

    #[test]
    fn empty_spans_are_discarded() {
        let mut reassembler = FrameReassembler::new();
        let frames = reassembler.feed(b"!!a!!b!");
        let texts: Vec<_> = frames.iter().map(|f| f.text().into_owned()).collect();
        assert_eq!(texts, ["a", "b"]);
    }
}
