//! Pseudo-QR module matrix.

/// Modules per side.
pub const MODULES: usize = 25;

/// Edge length of a finder block.
pub const FINDER_SIZE: usize = 7;

const FINDER_ORIGINS: [(usize, usize); 3] = [
    (0, 0),
    (0, MODULES - FINDER_SIZE),
    (MODULES - FINDER_SIZE, 0),
];

/// A 25x25 grid of dark/light modules derived from a payload string.
///
/// Each cell takes the parity of one payload character, walking the string
/// row by row and wrapping around as needed. Three finder blocks are then
/// drawn over the top-left, top-right and bottom-left corners. There is no
/// error correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    cells: [[bool; MODULES]; MODULES],
}

impl ModuleMatrix {
    /// Projects `payload` onto the grid.
    ///
    /// Characters are taken as UTF-16 code units. An empty payload leaves
    /// every data module light.
    pub fn from_payload(payload: &str) -> Self {
        let bits: Vec<bool> = payload.encode_utf16().map(|unit| unit % 2 == 1).collect();
        let mut cells = [[false; MODULES]; MODULES];

        if !bits.is_empty() {
            for (i, row) in cells.iter_mut().enumerate() {
                for (j, cell) in row.iter_mut().enumerate() {
                    *cell = bits[(i * MODULES + j) % bits.len()];
                }
            }
        }

        let mut matrix = Self { cells };
        for (row, column) in FINDER_ORIGINS {
            matrix.draw_finder(row, column);
        }
        matrix
    }

    fn draw_finder(&mut self, top: usize, left: usize) {
        let last = FINDER_SIZE - 1;
        for i in 0..FINDER_SIZE {
            for j in 0..FINDER_SIZE {
                let border = i == 0 || i == last || j == 0 || j == last;
                let core = (2..=4).contains(&i) && (2..=4).contains(&j);
                self.cells[top + i][left + j] = border || core;
            }
        }
    }

    /// Returns whether the module at `(row, column)` is dark.
    ///
    /// Out-of-range coordinates are light.
    pub fn is_dark(&self, row: usize, column: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates the dark modules as `(row, column)` in row-major order.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, dark)| **dark)
                .map(move |(j, _)| (i, j))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finder_blocks_are_drawn() {
        let matrix = ModuleMatrix::from_payload("");

        for (top, left) in FINDER_ORIGINS {
            // border
            assert!(matrix.is_dark(top, left));
            assert!(matrix.is_dark(top + 6, left + 6));
            // gap ring
            assert!(!matrix.is_dark(top + 1, left + 1));
            assert!(!matrix.is_dark(top + 1, left + 3));
            // core
            assert!(matrix.is_dark(top + 3, left + 3));
            assert!(matrix.is_dark(top + 2, left + 4));
        }

        // bottom-right corner has no finder
        assert!(!matrix.is_dark(MODULES - 1, MODULES - 1));
    }

    #[test]
    fn test_data_modules_follow_character_parity() {
        // 'a' is odd, 'b' is even
        let matrix = ModuleMatrix::from_payload("ab");
        assert!(matrix.is_dark(10, 10)); // index 260
        assert!(!matrix.is_dark(10, 11)); // index 261
        assert!(matrix.is_dark(24, 24)); // index 624
    }

    #[test]
    fn test_payload_wraps_across_rows() {
        let matrix = ModuleMatrix::from_payload("abc");
        // index 8*25 + 10 = 210, 210 % 3 = 0 -> 'a'
        assert!(matrix.is_dark(8, 10));
        // index 211 % 3 = 1 -> 'b'
        assert!(!matrix.is_dark(8, 11));
    }

    #[test]
    fn test_out_of_range_is_light() {
        let matrix = ModuleMatrix::from_payload("a");
        assert!(!matrix.is_dark(MODULES, 0));
        assert!(!matrix.is_dark(0, MODULES));
    }

    #[test]
    fn test_dark_modules_count_for_all_odd_payload() {
        let matrix = ModuleMatrix::from_payload("a");
        // every cell dark except the 16 gap-ring cells of each finder
        assert_eq!(matrix.dark_modules().count(), MODULES * MODULES - 3 * 16);
    }
}
