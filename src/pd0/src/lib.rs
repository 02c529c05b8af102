//! Decoder for the Teledyne RDI Pathfinder-class DVL binary ensemble
//! format ("PD0"): header discovery, checksum validation, data-type
//! dispatch, and the per-type byte decoders (fixed leader, variable
//! leader, velocity, correlation, echo intensity, percent good, bottom
//! track).
//!
//! The entry point is [`decode_ensemble`], a pure function over a
//! borrowed byte buffer holding exactly one ensemble (header through
//! checksum trailer, inclusive). It never allocates persistent state and
//! performs no I/O; the caller supplies a [`DiagnosticSink`] for non-fatal
//! warnings (currently: unrecognized type IDs in the address table).

mod beam_grid;
mod bottom_track;
mod checksum;
mod ensemble;
mod error;
mod fixed_leader;
mod header;
mod profiling;
mod reader;
mod variable_leader;

pub use beam_grid::BeamGrid;
pub use bottom_track::{BottomTrack, BOTTOM_TRACK_ID};
pub use ensemble::{decode_ensemble, EnsembleRecord};
pub use error::{DiagnosticSink, NullSink, Pd0Error, Warning};
pub use fixed_leader::{FixedLeader, FIXED_LEADER_ID};
pub use header::Header;
pub use profiling::{
    CorrelationSubrecord, EchoIntensitySubrecord, PercentGoodSubrecord, VelocitySubrecord,
    CORRELATION_ID, ECHO_INTENSITY_ID, PERCENT_GOOD_ID, VELOCITY_ID,
};
pub use variable_leader::{Timestamp, VariableLeader, VARIABLE_LEADER_ID};

#[cfg(test)]
mod tests {
    use super::*;

    /// End-to-end smoke test assembling a tiny, hand-built ensemble:
    /// header + fixed leader + variable leader, nothing else.
    #[test]
    fn decodes_a_minimal_multi_section_ensemble() {
        let fl_offset: u16 = 10;
        let vl_offset: u16 = fl_offset + 58;

        let mut buf = vec![0x7F, 0x7F, 0, 0, 0x00, 0x02];
        buf.extend_from_slice(&fl_offset.to_le_bytes());
        buf.extend_from_slice(&vl_offset.to_le_bytes());

        let mut fl = vec![0u8; 58];
        fl[0..2].copy_from_slice(&FIXED_LEADER_ID.to_le_bytes());
        fl[8] = 4;
        fl[9] = 0;
        buf.extend_from_slice(&fl);

        let mut vl = vec![0u8; 77];
        vl[0..2].copy_from_slice(&VARIABLE_LEADER_ID.to_le_bytes());
        vl[4] = 25; // rtc_year -> 2025
        vl[5] = 6;
        vl[6] = 1;
        buf.extend_from_slice(&vl);

        let num_bytes = buf.len() as u16;
        buf[2..4].copy_from_slice(&num_bytes.to_le_bytes());
        let sum: u32 = buf.iter().map(|&b| b as u32).sum();
        buf.extend_from_slice(&((sum & 0xFFFF) as u16).to_le_bytes());

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).expect("well-formed ensemble");

        assert!(sink.is_empty());
        assert_eq!(record.fixed_leader.unwrap().num_beams, 4);
        use chrono::Datelike;
        assert_eq!(record.timestamp.unwrap().year(), 2025);
    }
}
