use super::metadata::Version;

// Grid indexing
//------------------------------------------------------------------------------

// Row-major index into a square grid of width `w`. Negative coordinates count
// from the far edge.
pub(crate) fn coord_to_index(w: usize, r: i16, c: i16) -> usize {
    let w = w as i16;
    debug_assert!(-w <= r && r < w, "Row out of bounds: Row {r}, Width {w}");
    debug_assert!(-w <= c && c < w, "Column out of bounds: Column {c}, Width {w}");

    let r = if r < 0 { r + w } else { r };
    let c = if c < 0 { c + w } else { c };
    (r as usize) * (w as usize) + c as usize
}

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Zig-zag traversal over column pairs, right to left, alternating upward and
/// downward, stepping over the vertical timing column. Yields every coordinate
/// outside column 6; callers skip the ones that aren't pending.
#[derive(Debug, Clone)]
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
}

impl EncRegionIter {
    const VERT_TIMING_COL: i16 = 6;

    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let adjusted_col = if self.c <= Self::VERT_TIMING_COL { self.c + 1 } else { self.c };
        let res = (self.r, self.c);
        let col_type = (self.width - adjusted_col) % 4;
        match col_type {
            2 if self.r > 0 => {
                self.r -= 1;
                self.c += 1;
            }
            0 if self.r < self.width - 1 => {
                self.r += 1;
                self.c += 1;
            }
            0 | 2 if self.c == Self::VERT_TIMING_COL + 1 => {
                self.c -= 2;
            }
            _ => {
                self.c -= 1;
            }
        }
        Some(res)
    }
}
