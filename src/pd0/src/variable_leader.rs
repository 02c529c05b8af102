use chrono::NaiveDate;

use crate::error::Pd0Error;
use crate::reader::Reader;

pub const VARIABLE_LEADER_ID: u16 = 0x0080;

/// A point-in-time composed from the variable leader's real-time-clock
/// fields. `year = 2000 + rtc_year`; sub-second precision is `hundredths`
/// (units of 10 ms). The decoder does not sanity-check drift, only that
/// the six RTC fields compose into a calendar date and time that exist.
pub type Timestamp = chrono::NaiveDateTime;

fn compose_timestamp(
    rtc_year: u8,
    rtc_month: u8,
    rtc_day: u8,
    rtc_hour: u8,
    rtc_minute: u8,
    rtc_second: u8,
    rtc_hundredths: u8,
) -> Result<Timestamp, Pd0Error> {
    let year = 2000 + rtc_year as i32;
    let date = NaiveDate::from_ymd_opt(year, rtc_month as u32, rtc_day as u32).ok_or_else(|| {
        Pd0Error::MalformedTimestamp(format!(
            "invalid calendar date {year:04}-{:02}-{:02}",
            rtc_month, rtc_day
        ))
    })?;
    let millis = rtc_hundredths as u32 * 10;
    let time = chrono::NaiveTime::from_hms_milli_opt(
        rtc_hour as u32,
        rtc_minute as u32,
        rtc_second as u32,
        millis,
    )
    .ok_or_else(|| {
        Pd0Error::MalformedTimestamp(format!(
            "invalid time of day {:02}:{:02}:{:02}.{millis:03}",
            rtc_hour, rtc_minute, rtc_second
        ))
    })?;
    Ok(date.and_time(time))
}

/// # Variable Leader (type ID `0x0080`, 77 bytes)
///
/// Per-ping dynamic state: ensemble number, RTC components, attitude,
/// environment, pressure, and ADC voltage. Offsets are relative to the
/// record's own start offset.
///
/// `pitch`/`roll` are surfaced two ways, since the original implementation
/// and the Pathfinder manual disagree on their signedness:
/// `pitch_raw`/`roll_raw` are the bytes reinterpreted as unsigned 16-bit
/// (what the original implementation returns), and
/// `pitch`/`roll` are the same bytes reinterpreted as signed two's
/// complement (what the Pathfinder manual's scaled-integer definition
/// implies). `heading` has only one interpretation: the manual defines it
/// as an unsigned 0..=35999 tenths-of-a-degree value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableLeader {
    pub id: u16,
    pub ensemble_number: u16,
    pub rtc_year: u8,
    pub rtc_month: u8,
    pub rtc_day: u8,
    pub rtc_hour: u8,
    pub rtc_minute: u8,
    pub rtc_second: u8,
    pub rtc_hundredths: u8,
    pub ensemble_roll_over: u8,
    pub bit_result: u16,
    pub speed_of_sound: u16,
    pub depth_of_transducer: u16,
    pub heading: u16,
    pub pitch: i16,
    pub pitch_raw: u16,
    pub roll: i16,
    pub roll_raw: u16,
    pub salinity: u16,
    pub temperature: u16,
    pub min_ping_wait_minutes: u8,
    pub min_ping_wait_seconds: u8,
    pub min_ping_wait_hundredths: u8,
    pub heading_standard_deviation: u8,
    pub pitch_standard_deviation: u8,
    pub roll_standard_deviation: u8,
    pub adc_rounded_voltage: u8,
    pub pressure: u32,
    pub pressure_variance: u32,
    pub spare: u32,
}

impl VariableLeader {
    pub fn decode(reader: &Reader, offset: usize) -> Result<VariableLeader, Pd0Error> {
        let pitch_raw = reader.read_u16(offset + 20)?;
        let roll_raw = reader.read_u16(offset + 22)?;

        Ok(VariableLeader {
            id: reader.read_u16(offset)?,
            ensemble_number: reader.read_u16(offset + 2)?,
            rtc_year: reader.read_u8(offset + 4)?,
            rtc_month: reader.read_u8(offset + 5)?,
            rtc_day: reader.read_u8(offset + 6)?,
            rtc_hour: reader.read_u8(offset + 7)?,
            rtc_minute: reader.read_u8(offset + 8)?,
            rtc_second: reader.read_u8(offset + 9)?,
            rtc_hundredths: reader.read_u8(offset + 10)?,
            ensemble_roll_over: reader.read_u8(offset + 11)?,
            bit_result: reader.read_u16(offset + 12)?,
            speed_of_sound: reader.read_u16(offset + 14)?,
            depth_of_transducer: reader.read_u16(offset + 16)?,
            heading: reader.read_u16(offset + 18)?,
            pitch: pitch_raw as i16,
            pitch_raw,
            roll: roll_raw as i16,
            roll_raw,
            salinity: reader.read_u16(offset + 24)?,
            temperature: reader.read_u16(offset + 26)?,
            min_ping_wait_minutes: reader.read_u8(offset + 28)?,
            min_ping_wait_seconds: reader.read_u8(offset + 29)?,
            min_ping_wait_hundredths: reader.read_u8(offset + 30)?,
            heading_standard_deviation: reader.read_u8(offset + 31)?,
            pitch_standard_deviation: reader.read_u8(offset + 32)?,
            roll_standard_deviation: reader.read_u8(offset + 33)?,
            adc_rounded_voltage: reader.read_u8(offset + 35)?,
            pressure: reader.read_u32(offset + 48)?,
            pressure_variance: reader.read_u32(offset + 52)?,
            spare: reader.read_u32(offset + 56)?,
        })
    }

    /// Composes the six RTC fields (plus hundredths) into a single
    /// calendar timestamp. See [`compose_timestamp`].
    pub fn timestamp(&self) -> Result<Timestamp, Pd0Error> {
        compose_timestamp(
            self.rtc_year,
            self.rtc_month,
            self.rtc_day,
            self.rtc_hour,
            self.rtc_minute,
            self.rtc_second,
            self.rtc_hundredths,
        )
    }
}
