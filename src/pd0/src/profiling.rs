use crate::beam_grid::{decode_i16_grid, decode_u8_grid, BeamGrid};
use crate::error::Pd0Error;
use crate::reader::Reader;

pub const VELOCITY_ID: u16 = 0x0100;
pub const CORRELATION_ID: u16 = 0x0200;
pub const ECHO_INTENSITY_ID: u16 = 0x0300;
pub const PERCENT_GOOD_ID: u16 = 0x0400;

/// Velocity subrecord (type ID `0x0100`): a 2-byte id followed by a
/// `num_cells x num_beams` grid of signed 16-bit, little-endian velocity
/// samples.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocitySubrecord {
    pub id: u16,
    pub data: BeamGrid<i16>,
}

impl VelocitySubrecord {
    pub fn decode(
        reader: &Reader,
        offset: usize,
        num_cells: usize,
        num_beams: usize,
    ) -> Result<VelocitySubrecord, Pd0Error> {
        Ok(VelocitySubrecord {
            id: reader.read_u16(offset)?,
            data: decode_i16_grid(reader, offset + 2, num_cells, num_beams)?,
        })
    }
}

/// Shared shape for correlation magnitude, echo intensity, and percent
/// good: a 2-byte id followed by a `num_cells x num_beams` grid of
/// unsigned 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterProfileSubrecord {
    pub id: u16,
    pub data: BeamGrid<u8>,
}

impl WaterProfileSubrecord {
    pub fn decode(
        reader: &Reader,
        offset: usize,
        num_cells: usize,
        num_beams: usize,
    ) -> Result<WaterProfileSubrecord, Pd0Error> {
        Ok(WaterProfileSubrecord {
            id: reader.read_u16(offset)?,
            data: decode_u8_grid(reader, offset + 2, num_cells, num_beams)?,
        })
    }
}

pub type CorrelationSubrecord = WaterProfileSubrecord;
pub type EchoIntensitySubrecord = WaterProfileSubrecord;
pub type PercentGoodSubrecord = WaterProfileSubrecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_decodes_signed_samples() {
        let mut buf = vec![0x00, 0x01]; // id = 0x0100
        for sample in [0i16, -1, i16::MIN, i16::MAX] {
            buf.extend_from_slice(&sample.to_le_bytes());
        }
        let reader = Reader::new(&buf);
        let record = VelocitySubrecord::decode(&reader, 0, 1, 4).unwrap();
        assert_eq!(record.id, VELOCITY_ID);
        assert_eq!(record.data[0], vec![0, -1, -32768, 32767]);
    }

    #[test]
    fn water_profile_decodes_unsigned_bytes() {
        let mut buf = vec![0x00, 0x02]; // id = 0x0200 (correlation)
        buf.extend_from_slice(&[10, 20, 30, 40]);
        let reader = Reader::new(&buf);
        let record = CorrelationSubrecord::decode(&reader, 0, 1, 4).unwrap();
        assert_eq!(record.id, CORRELATION_ID);
        assert_eq!(record.data[0], vec![10, 20, 30, 40]);
    }

    #[test]
    fn zero_cells_yields_empty_grid() {
        let buf = vec![0x00, 0x04]; // id = 0x0400 (percent good)
        let reader = Reader::new(&buf);
        let record = PercentGoodSubrecord::decode(&reader, 0, 0, 4).unwrap();
        assert!(record.data.is_empty());
    }
}
