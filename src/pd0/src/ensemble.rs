use crate::bottom_track::{BottomTrack, BOTTOM_TRACK_ID};
use crate::checksum::validate_checksum;
use crate::error::{DiagnosticSink, Pd0Error, Warning};
use crate::fixed_leader::{FixedLeader, FIXED_LEADER_ID};
use crate::header::Header;
use crate::profiling::{
    CorrelationSubrecord, EchoIntensitySubrecord, PercentGoodSubrecord, VelocitySubrecord,
    CORRELATION_ID, ECHO_INTENSITY_ID, PERCENT_GOOD_ID, VELOCITY_ID,
};
use crate::reader::Reader;
use crate::variable_leader::{Timestamp, VariableLeader, VARIABLE_LEADER_ID};

/// The decoded, immutable record produced by [`decode_ensemble`]. Each
/// subrecord kind is `Option`-al: it is only present if the header's
/// address table names it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnsembleRecord {
    pub header: Header,
    pub fixed_leader: Option<FixedLeader>,
    pub variable_leader: Option<VariableLeader>,
    pub velocity: Option<VelocitySubrecord>,
    pub correlation: Option<CorrelationSubrecord>,
    pub echo_intensity: Option<EchoIntensitySubrecord>,
    pub percent_good: Option<PercentGoodSubrecord>,
    pub bottom_track: Option<BottomTrack>,
    /// Composed from the variable leader's RTC fields, if a variable
    /// leader was present. `None` when no variable leader was decoded.
    pub timestamp: Option<Timestamp>,
}

/// Walks the header's address-offset table (§4.9) and invokes the decoder
/// matching the 2-byte type ID found at each address, aggregating the
/// results into an [`EnsembleRecord`].
///
/// Fixed leader sizing (`num_cells`/`num_beams`) is resolved in two
/// passes: the first pass decodes the fixed leader if it is present
/// anywhere in the address table; the second pass decodes every other
/// subrecord in the table's original order, including a bottom track
/// (which needs no fixed leader) or a profiling record that now has one
/// available regardless of where in the table it was addressed. A
/// profiling record reached when no fixed leader exists anywhere in the
/// table fails with [`Pd0Error::MissingDependency`]. Unknown type IDs are
/// reported to `sink` and skipped; everything else in the table still
/// decodes.
pub fn decode_ensemble(
    buffer: &[u8],
    sink: &mut impl DiagnosticSink,
) -> Result<EnsembleRecord, Pd0Error> {
    let reader = Reader::new(buffer);

    let header = Header::decode(&reader)?;
    validate_checksum(buffer, header.num_bytes as usize)?;

    let mut fixed_leader = None;
    for &offset in &header.address_offsets {
        let offset = offset as usize;
        if reader.read_u16(offset)? == FIXED_LEADER_ID {
            fixed_leader = Some(FixedLeader::decode(&reader, offset)?);
            break;
        }
    }

    let mut variable_leader = None;
    let mut velocity = None;
    let mut correlation = None;
    let mut echo_intensity = None;
    let mut percent_good = None;
    let mut bottom_track = None;

    for &offset in &header.address_offsets {
        let offset = offset as usize;
        let type_id = reader.read_u16(offset)?;

        match type_id {
            FIXED_LEADER_ID => {
                // Already resolved in the first pass.
            }
            VARIABLE_LEADER_ID => {
                variable_leader = Some(VariableLeader::decode(&reader, offset)?);
            }
            VELOCITY_ID => {
                let (num_cells, num_beams) = profiling_dims(&fixed_leader, "velocity")?;
                velocity = Some(VelocitySubrecord::decode(
                    &reader, offset, num_cells, num_beams,
                )?);
            }
            CORRELATION_ID => {
                let (num_cells, num_beams) = profiling_dims(&fixed_leader, "correlation")?;
                correlation = Some(CorrelationSubrecord::decode(
                    &reader, offset, num_cells, num_beams,
                )?);
            }
            ECHO_INTENSITY_ID => {
                let (num_cells, num_beams) = profiling_dims(&fixed_leader, "echo_intensity")?;
                echo_intensity = Some(EchoIntensitySubrecord::decode(
                    &reader, offset, num_cells, num_beams,
                )?);
            }
            PERCENT_GOOD_ID => {
                let (num_cells, num_beams) = profiling_dims(&fixed_leader, "percent_good")?;
                percent_good = Some(PercentGoodSubrecord::decode(
                    &reader, offset, num_cells, num_beams,
                )?);
            }
            BOTTOM_TRACK_ID => {
                bottom_track = Some(BottomTrack::decode(&reader, offset)?);
            }
            unknown => sink.warn(Warning::UnknownTypeId {
                id: unknown,
                offset,
            }),
        }
    }

    let timestamp = variable_leader
        .as_ref()
        .map(VariableLeader::timestamp)
        .transpose()?;

    Ok(EnsembleRecord {
        header,
        fixed_leader,
        variable_leader,
        velocity,
        correlation,
        echo_intensity,
        percent_good,
        bottom_track,
        timestamp,
    })
}

fn profiling_dims(
    fixed_leader: &Option<FixedLeader>,
    subrecord: &'static str,
) -> Result<(usize, usize), Pd0Error> {
    match fixed_leader {
        Some(fl) => Ok((fl.num_cells as usize, fl.num_beams as usize)),
        None => Err(Pd0Error::MissingDependency { subrecord }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_checksum(mut prefix: Vec<u8>) -> Vec<u8> {
        let sum: u32 = prefix.iter().map(|&b| b as u32).sum();
        prefix.extend_from_slice(&((sum & 0xFFFF) as u16).to_le_bytes());
        prefix
    }

    fn header_bytes(offsets: &[u16]) -> Vec<u8> {
        let mut buf = vec![0x7F, 0x7F, 0, 0, 0x00, offsets.len() as u8];
        for &offset in offsets {
            buf.extend_from_slice(&offset.to_le_bytes());
        }
        buf
    }

    #[test]
    fn s1_minimal_header_only_ensemble() {
        let mut buf = header_bytes(&[]);
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();

        assert_eq!(record.header.num_data_types, 0);
        assert!(record.header.address_offsets.is_empty());
        assert!(record.fixed_leader.is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn s2_invalid_magic() {
        let buf = [0x7F, 0x7E, 0x08, 0x00, 0x00, 0x00];
        let mut sink = Vec::new();
        let err = decode_ensemble(&buf, &mut sink).unwrap_err();
        assert!(matches!(err, Pd0Error::InvalidHeader { .. }));
    }

    #[test]
    fn s3_checksum_mismatch() {
        let mut buf = header_bytes(&[]);
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        buf.extend_from_slice(&[0x00, 0x00]);

        let mut sink = Vec::new();
        let err = decode_ensemble(&buf, &mut sink).unwrap_err();
        assert_eq!(
            err,
            Pd0Error::ChecksumMismatch {
                computed: 0x0106,
                expected: 0x0000,
            }
        );
    }

    #[test]
    fn s4_fixed_leader_only() {
        let fl_offset = 8u16;
        let mut buf = header_bytes(&[fl_offset]);
        let mut fl = vec![0u8; 58];
        fl[0..2].copy_from_slice(&FIXED_LEADER_ID.to_le_bytes());
        fl[8] = 4; // num_beams
        fl[9] = 2; // num_cells
        buf.extend_from_slice(&fl);
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();
        let fixed_leader = record.fixed_leader.unwrap();
        assert_eq!(fixed_leader.num_beams, 4);
        assert_eq!(fixed_leader.num_cells, 2);
    }

    #[test]
    fn s5_fixed_and_velocity() {
        let fl_offset = 8u16;
        let mut buf = header_bytes(&[fl_offset, 0]); // velocity offset patched below
        let mut fl = vec![0u8; 58];
        fl[0..2].copy_from_slice(&FIXED_LEADER_ID.to_le_bytes());
        fl[8] = 4;
        fl[9] = 2;
        buf.extend_from_slice(&fl);

        let velocity_offset = buf.len() as u16;
        buf[8..10].copy_from_slice(&velocity_offset.to_le_bytes());

        buf.extend_from_slice(&VELOCITY_ID.to_le_bytes());
        let samples: [i16; 4] = [0, -1, i16::MIN, i16::MAX];
        for _ in 0..2 {
            for sample in samples {
                buf.extend_from_slice(&sample.to_le_bytes());
            }
        }

        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();
        let velocity = record.velocity.unwrap();
        assert_eq!(velocity.data[0][1], -1);
        assert_eq!(velocity.data[0][2], -32768);
        assert_eq!(velocity.data[0][3], 32767);
    }

    #[test]
    fn s6_unknown_type_id_warns_and_continues() {
        let fl_offset = 8u16;
        let mut buf = header_bytes(&[fl_offset, 0]);
        let mut fl = vec![0u8; 58];
        fl[0..2].copy_from_slice(&FIXED_LEADER_ID.to_le_bytes());
        fl[8] = 4;
        fl[9] = 0;
        buf.extend_from_slice(&fl);

        let unknown_offset = buf.len() as u16;
        buf[8..10].copy_from_slice(&unknown_offset.to_le_bytes());
        buf.extend_from_slice(&0x9999u16.to_le_bytes());

        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();
        assert!(record.fixed_leader.is_some());
        assert_eq!(
            sink,
            vec![Warning::UnknownTypeId {
                id: 0x9999,
                offset: unknown_offset as usize,
            }]
        );
    }

    #[test]
    fn profiling_before_fixed_leader_still_resolves() {
        // Address table lists velocity's offset before the fixed
        // leader's offset; the two-pass resolver must still succeed.
        let fixed_leader_bytes_len = 58;
        let velocity_offset = 6 + 2 * 2; // right after the address table
        let fl_offset = velocity_offset + 2 + 4; // after velocity's id + 1 cell * 2 beams

        let mut buf = header_bytes(&[velocity_offset as u16, fl_offset as u16]);

        buf.extend_from_slice(&VELOCITY_ID.to_le_bytes());
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&(-5i16).to_le_bytes());

        let mut fl = vec![0u8; fixed_leader_bytes_len];
        fl[0..2].copy_from_slice(&FIXED_LEADER_ID.to_le_bytes());
        fl[8] = 2; // num_beams
        fl[9] = 1; // num_cells
        buf.extend_from_slice(&fl);

        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();
        let velocity = record.velocity.unwrap();
        assert_eq!(velocity.data[0], vec![0, -5]);
    }

    #[test]
    fn missing_fixed_leader_fails_profiling_with_dependency_error() {
        let velocity_offset = 6 + 2; // right after a 1-entry address table
        let mut buf = header_bytes(&[velocity_offset as u16]);
        buf.extend_from_slice(&VELOCITY_ID.to_le_bytes());
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let err = decode_ensemble(&buf, &mut sink).unwrap_err();
        assert_eq!(
            err,
            Pd0Error::MissingDependency {
                subrecord: "velocity"
            }
        );
    }

    #[test]
    fn timestamp_year_matches_rtc_year() {
        let vl_offset = 6 + 2;
        let mut buf = header_bytes(&[vl_offset as u16]);
        let mut vl = vec![0u8; 77];
        vl[0..2].copy_from_slice(&VARIABLE_LEADER_ID.to_le_bytes());
        vl[4] = 24; // rtc_year
        vl[5] = 1; // month
        vl[6] = 1; // day
        buf.extend_from_slice(&vl);
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink = Vec::new();
        let record = decode_ensemble(&buf, &mut sink).unwrap();
        use chrono::Datelike;
        assert_eq!(record.timestamp.unwrap().year(), 2024);
    }

    #[test]
    fn decoding_twice_is_deterministic() {
        let mut buf = header_bytes(&[]);
        buf[2..4].copy_from_slice(&(buf.len() as u16).to_le_bytes());
        let buf = with_checksum(buf);

        let mut sink_a = Vec::new();
        let mut sink_b = Vec::new();
        let a = decode_ensemble(&buf, &mut sink_a).unwrap();
        let b = decode_ensemble(&buf, &mut sink_b).unwrap();
        assert_eq!(a, b);
    }
}
