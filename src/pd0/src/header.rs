use crate::error::Pd0Error;
use crate::reader::Reader;

const MAGIC: u8 = 0x7F;

/// # Header
///
/// The 6-byte fixed prefix plus the data-type address table. Both `id` and
/// `data_source` must equal `0x7F`; `num_bytes` is the offset of the
/// 2-byte checksum trailer; `address_offsets` holds one in-buffer offset
/// per declared data type, each strictly less than `num_bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    pub id: u8,
    pub data_source: u8,
    pub num_bytes: u16,
    pub spare: u8,
    pub num_data_types: u8,
    pub address_offsets: Vec<u16>,
}

impl Header {
    /// Reads the 6-byte prefix at offset 0 and the `num_data_types`
    /// little-endian `u16` address offsets that follow it, starting at
    /// byte 6.
    pub fn decode(reader: &Reader) -> Result<Header, Pd0Error> {
        let id = reader.read_u8(0)?;
        let data_source = reader.read_u8(1)?;

        if id != MAGIC || data_source != MAGIC {
            return Err(Pd0Error::InvalidHeader { id, data_source });
        }

        let num_bytes = reader.read_u16(2)?;
        let spare = reader.read_u8(4)?;
        let num_data_types = reader.read_u8(5)?;

        let mut address_offsets = Vec::with_capacity(num_data_types as usize);
        for i in 0..num_data_types as usize {
            address_offsets.push(reader.read_u16(6 + i * 2)?);
        }

        Ok(Header {
            id,
            data_source,
            num_bytes,
            spare,
            num_data_types,
            address_offsets,
        })
    }
}
