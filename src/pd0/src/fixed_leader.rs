use crate::error::Pd0Error;
use crate::reader::Reader;

pub const FIXED_LEADER_ID: u16 = 0x0000;

/// # Fixed Leader (type ID `0x0000`, 58 bytes)
///
/// Per-deployment instrument configuration snapshot. Offsets are relative
/// to the record's own start offset (the address the header's table
/// points at for type ID `0x0000`). Fields not listed in the Pathfinder
/// manual's layout table (bytes 42–49, 51–53) are not surfaced.
///
/// | Field | Kind | Offset |
/// |---|---|---|
/// | id | u16 | 0 |
/// | cpu_firmware_version | u8 | 2 |
/// | cpu_firmware_revision | u8 | 3 |
/// | system_configuration | u16 | 4 |
/// | simulation_flag | u8 | 6 |
/// | lag_length | u8 | 7 |
/// | num_beams | u8 | 8 |
/// | num_cells | u8 | 9 |
/// | pings_per_ensemble | u16 | 10 |
/// | depth_cell_length | u16 | 12 |
/// | blank_after_transmit | u16 | 14 |
/// | profiling_mode | u8 | 16 |
/// | low_correlation_threshold | u8 | 17 |
/// | num_code_repetitions | u8 | 18 |
/// | percent_good_minimum | u8 | 19 |
/// | error_velocity_threshold | u16 | 20 |
/// | minutes, seconds, hundredths | u8,u8,u8 | 22,23,24 |
/// | coordinate_transformation | u8 | 25 |
/// | heading_alignment, heading_bias | u16,u16 | 26,28 |
/// | sensor_source, sensor_available | u8,u8 | 30,31 |
/// | bin_1_distance | u16 | 32 |
/// | transmit_pulse_length | u16 | 34 |
/// | starting_depth_cell, ending_depth_cell | u8,u8 | 36,37 |
/// | false_target_threshold | u8 | 38 |
/// | transmit_lag_distance | u16 | 40 |
/// | system_bandwidth | u16 | 50 |
/// | system_serial_number | u32 | 54 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedLeader {
    pub id: u16,
    pub cpu_firmware_version: u8,
    pub cpu_firmware_revision: u8,
    pub system_configuration: u16,
    pub simulation_flag: u8,
    pub lag_length: u8,
    pub num_beams: u8,
    pub num_cells: u8,
    pub pings_per_ensemble: u16,
    pub depth_cell_length: u16,
    pub blank_after_transmit: u16,
    pub profiling_mode: u8,
    pub low_correlation_threshold: u8,
    pub num_code_repetitions: u8,
    pub percent_good_minimum: u8,
    pub error_velocity_threshold: u16,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
    pub coordinate_transformation: u8,
    pub heading_alignment: u16,
    pub heading_bias: u16,
    pub sensor_source: u8,
    pub sensor_available: u8,
    pub bin_1_distance: u16,
    pub transmit_pulse_length: u16,
    pub starting_depth_cell: u8,
    pub ending_depth_cell: u8,
    pub false_target_threshold: u8,
    pub transmit_lag_distance: u16,
    pub system_bandwidth: u16,
    pub system_serial_number: u32,
}

impl FixedLeader {
    pub fn decode(reader: &Reader, offset: usize) -> Result<FixedLeader, Pd0Error> {
        Ok(FixedLeader {
            id: reader.read_u16(offset)?,
            cpu_firmware_version: reader.read_u8(offset + 2)?,
            cpu_firmware_revision: reader.read_u8(offset + 3)?,
            system_configuration: reader.read_u16(offset + 4)?,
            simulation_flag: reader.read_u8(offset + 6)?,
            lag_length: reader.read_u8(offset + 7)?,
            num_beams: reader.read_u8(offset + 8)?,
            num_cells: reader.read_u8(offset + 9)?,
            pings_per_ensemble: reader.read_u16(offset + 10)?,
            depth_cell_length: reader.read_u16(offset + 12)?,
            blank_after_transmit: reader.read_u16(offset + 14)?,
            profiling_mode: reader.read_u8(offset + 16)?,
            low_correlation_threshold: reader.read_u8(offset + 17)?,
            num_code_repetitions: reader.read_u8(offset + 18)?,
            percent_good_minimum: reader.read_u8(offset + 19)?,
            error_velocity_threshold: reader.read_u16(offset + 20)?,
            minutes: reader.read_u8(offset + 22)?,
            seconds: reader.read_u8(offset + 23)?,
            hundredths: reader.read_u8(offset + 24)?,
            coordinate_transformation: reader.read_u8(offset + 25)?,
            heading_alignment: reader.read_u16(offset + 26)?,
            heading_bias: reader.read_u16(offset + 28)?,
            sensor_source: reader.read_u8(offset + 30)?,
            sensor_available: reader.read_u8(offset + 31)?,
            bin_1_distance: reader.read_u16(offset + 32)?,
            transmit_pulse_length: reader.read_u16(offset + 34)?,
            starting_depth_cell: reader.read_u8(offset + 36)?,
            ending_depth_cell: reader.read_u8(offset + 37)?,
            false_target_threshold: reader.read_u8(offset + 38)?,
            transmit_lag_distance: reader.read_u16(offset + 40)?,
            system_bandwidth: reader.read_u16(offset + 50)?,
            system_serial_number: reader.read_u32(offset + 54)?,
        })
    }
}
