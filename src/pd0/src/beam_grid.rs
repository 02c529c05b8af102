use crate::error::Pd0Error;
use crate::reader::Reader;

/// A `num_cells`-row, `num_beams`-column grid of per-depth-cell,
/// per-beam samples.
///
/// Row `i` is the i-th depth cell from the transducer outward; column `j`
/// is the fixed physical beam number. Velocity subrecords carry
/// `BeamGrid<i16>`; correlation, echo intensity, and percent good carry
/// `BeamGrid<u8>`.
pub type BeamGrid<T> = Vec<Vec<T>>;

/// Reads a beam grid of signed 16-bit velocity samples, laid out
/// cell-major then beam-minor: `sample(i, j)` lives at
/// `offset + (i * num_beams + j) * 2`.
///
/// `num_cells == 0` yields an empty grid with no error. There is no bounds
/// check beyond what each per-sample read already enforces.
pub fn decode_i16_grid(
    reader: &Reader,
    offset: usize,
    num_cells: usize,
    num_beams: usize,
) -> Result<BeamGrid<i16>, Pd0Error> {
    let mut grid = Vec::with_capacity(num_cells);
    for cell in 0..num_cells {
        let mut row = Vec::with_capacity(num_beams);
        for beam in 0..num_beams {
            let sample_offset = offset + (cell * num_beams + beam) * 2;
            row.push(reader.read_i16(sample_offset)?);
        }
        grid.push(row);
    }
    Ok(grid)
}

/// Reads a beam grid of unsigned 8-bit samples (correlation, echo
/// intensity, percent good), laid out cell-major then beam-minor:
/// `sample(i, j)` lives at `offset + (i * num_beams + j)`.
pub fn decode_u8_grid(
    reader: &Reader,
    offset: usize,
    num_cells: usize,
    num_beams: usize,
) -> Result<BeamGrid<u8>, Pd0Error> {
    let mut grid = Vec::with_capacity(num_cells);
    for cell in 0..num_cells {
        let mut row = Vec::with_capacity(num_beams);
        for beam in 0..num_beams {
            let sample_offset = offset + cell * num_beams + beam;
            row.push(reader.read_u8(sample_offset)?);
        }
        grid.push(row);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_for_zero_cells() {
        let buf = [0u8; 0];
        let reader = Reader::new(&buf);
        let grid = decode_u8_grid(&reader, 0, 0, 4).unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn cell_major_beam_minor_layout() {
        // 2 cells, 4 beams, i16 samples: cell 0 = [0, -1, -32768, 32767]
        let mut buf = Vec::new();
        for sample in [0i16, -1, i16::MIN, i16::MAX] {
            buf.extend_from_slice(&sample.to_le_bytes());
        }
        buf.extend_from_slice(&buf.clone());
        let reader = Reader::new(&buf);
        let grid = decode_i16_grid(&reader, 0, 2, 4).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec![0, -1, -32768, 32767]);
        assert_eq!(grid[1], grid[0]);
    }
}
