use super::structure::StructureMap;
use crate::common::bit_utils::BitStream;
use crate::common::iter::{coord_to_index, EncRegionIter};
use crate::common::metadata::Color;

// Shadow map
//------------------------------------------------------------------------------

/// Raw payload bits laid over the pending modules of a structure map, before
/// masking. Modules that aren't pending stay light and are never read.
#[derive(Debug, Clone)]
pub struct ShadowMap {
    grid: Vec<Color>,
    w: usize,
}

impl ShadowMap {
    /// Writes `payload` MSB first into pending modules in zig-zag order. Pending
    /// modules left over after the payload are remainder bits and stay light.
    pub fn place(structure: &StructureMap, payload: BitStream) -> Self {
        let ver = structure.version();
        let w = structure.width();
        let mut grid = vec![Color::Light; w * w];

        let mut coords = EncRegionIter::new(ver).filter(|&(r, c)| structure.is_pending(r, c));
        let mut placed = 0;
        for bit in payload {
            match coords.next() {
                Some((r, c)) => {
                    grid[coord_to_index(w, r, c)] = Color::from(bit);
                    placed += 1;
                }
                None => break,
            }
        }

        debug_assert!(
            placed == ver.total_codewords() << 3,
            "Payload doesn't fill the encoding region: Placed {placed}, Version {ver}"
        );
        debug_assert!(
            coords.count() == ver.remainder_bits(),
            "Remainder bits don't match version {ver}"
        );

        Self { grid, w }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: i16, c: i16) -> Color {
        self.grid[coord_to_index(self.w, r, c)]
    }

    pub fn grid(&self) -> &[Color] {
        &self.grid
    }
}
