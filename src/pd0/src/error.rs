use thiserror::Error;

/// Fatal decode failures. Any of these aborts the current ensemble; no
/// partial [`crate::EnsembleRecord`] is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Pd0Error {
    /// The 2-byte magic at offset 0 was not `0x7F 0x7F`.
    #[error("invalid header: id=0x{id:02X} data_source=0x{data_source:02X}, expected 0x7F 0x7F")]
    InvalidHeader { id: u8, data_source: u8 },

    /// The trailing checksum did not match the computed sum.
    #[error("checksum mismatch: computed 0x{computed:04X}, expected 0x{expected:04X}")]
    ChecksumMismatch { computed: u16, expected: u16 },

    /// A scalar read at `offset` (width `len` bytes) ran past the end of
    /// the buffer.
    #[error("truncated record: read of {len} byte(s) at offset {offset} exceeds buffer length {buffer_len}")]
    Truncated {
        offset: usize,
        len: usize,
        buffer_len: usize,
    },

    /// A profiling record (velocity / correlation / echo intensity /
    /// percent good) was reached before the fixed leader had been
    /// decoded anywhere in the address table.
    #[error("{subrecord} requires the fixed leader's num_cells/num_beams, but no fixed leader was present")]
    MissingDependency { subrecord: &'static str },

    /// RTC fields from the variable leader did not compose into a valid
    /// calendar timestamp.
    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),
}

/// Non-fatal conditions reported to the caller's [`DiagnosticSink`] instead
/// of aborting the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// An address in the header's address-offset table pointed at a type
    /// ID not present in the type-ID → decoder table. The subrecord at
    /// that offset is skipped.
    UnknownTypeId { id: u16, offset: usize },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownTypeId { id, offset } => {
                write!(f, "no decoder for type ID 0x{id:04X} at offset {offset}")
            }
        }
    }
}

/// Destination for non-fatal decode warnings, injected by the caller.
///
/// This replaces the original implementation's printed warnings: a decode
/// that hits an unrecognized type ID keeps going and reports the problem
/// here instead of aborting the whole ensemble.
pub trait DiagnosticSink {
    fn warn(&mut self, warning: Warning);
}

impl DiagnosticSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.push(warning);
    }
}

/// A sink that discards every warning, including the `log` call the
/// `Vec<Warning>` sink makes. Useful when a caller has already decided it
/// does not care about unknown type IDs and wants no output at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&mut self, _warning: Warning) {}
}
