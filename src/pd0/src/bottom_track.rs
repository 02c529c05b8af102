use crate::error::Pd0Error;
use crate::reader::Reader;

pub const BOTTOM_TRACK_ID: u16 = 0x0600;

/// # Bottom Track (type ID `0x0600`, 81 bytes)
///
/// Four-beam range, velocity, correlation, evaluation amplitude, percent
/// good, reference-layer envelope, RSSI, and most-significant-byte
/// extensions. Offsets are relative to the record's own start offset.
///
/// Bottom-track offset 8 and offsets 12–15 are documented in the Pathfinder
/// manual but unused by the reference implementation this decoder is
/// grounded on; they are not surfaced here either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BottomTrack {
    pub id: u16,
    pub pings_per_ensemble: u16,
    pub min_correlation_mag: u8,
    pub min_evaluation_amp: u8,
    pub bottom_track_mode: u8,
    pub max_error_velocity: u16,
    pub beam_range: [u16; 4],
    pub beam_velocity: [u16; 4],
    pub beam_correlation: [u8; 4],
    pub beam_evaluation_amp: [u8; 4],
    pub beam_percent_good: [u8; 4],
    pub ref_layer_min: u16,
    pub ref_layer_near: u16,
    pub ref_layer_far: u16,
    pub beam_ref_layer_velocity: [u16; 4],
    pub beam_ref_layer_correlation: [u8; 4],
    pub beam_ref_layer_echo_intensity: [u8; 4],
    pub beam_ref_layer_percent_good: [u8; 4],
    pub max_tracking_depth: u16,
    pub beam_rssi: [u8; 4],
    pub shallow_water_gain: u8,
    pub beam_most_significant_byte: [u8; 4],
}

impl BottomTrack {
    pub fn decode(reader: &Reader, offset: usize) -> Result<BottomTrack, Pd0Error> {
        let u16_quad = |base: usize| -> Result<[u16; 4], Pd0Error> {
            let mut out = [0u16; 4];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = reader.read_u16(offset + base + i * 2)?;
            }
            Ok(out)
        };
        let u8_quad = |base: usize| -> Result<[u8; 4], Pd0Error> {
            let mut out = [0u8; 4];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = reader.read_u8(offset + base + i)?;
            }
            Ok(out)
        };

        Ok(BottomTrack {
            id: reader.read_u16(offset)?,
            pings_per_ensemble: reader.read_u16(offset + 2)?,
            min_correlation_mag: reader.read_u8(offset + 6)?,
            min_evaluation_amp: reader.read_u8(offset + 7)?,
            bottom_track_mode: reader.read_u8(offset + 9)?,
            max_error_velocity: reader.read_u16(offset + 10)?,
            beam_range: u16_quad(16)?,
            beam_velocity: u16_quad(24)?,
            beam_correlation: u8_quad(32)?,
            beam_evaluation_amp: u8_quad(36)?,
            beam_percent_good: u8_quad(40)?,
            ref_layer_min: reader.read_u16(offset + 44)?,
            ref_layer_near: reader.read_u16(offset + 46)?,
            ref_layer_far: reader.read_u16(offset + 48)?,
            beam_ref_layer_velocity: u16_quad(50)?,
            beam_ref_layer_correlation: u8_quad(58)?,
            beam_ref_layer_echo_intensity: u8_quad(62)?,
            beam_ref_layer_percent_good: u8_quad(66)?,
            max_tracking_depth: reader.read_u16(offset + 70)?,
            beam_rssi: u8_quad(72)?,
            shallow_water_gain: reader.read_u8(offset + 76)?,
            beam_most_significant_byte: u8_quad(77)?,
        })
    }

    /// Widens `beam_range[beam]` to 24 bits by concatenating the
    /// corresponding most-significant-byte extension: `range | (msb << 16)`.
    /// `beam` is 0-indexed (beam 1 is index 0).
    pub fn beam_range_with_msb(&self, beam: usize) -> u32 {
        self.beam_range[beam] as u32 | ((self.beam_most_significant_byte[beam] as u32) << 16)
    }
}
